//! rastrum: a software (CPU-only) 2D rasterizer.
//!
//! The core type is [`Image`], a pixel buffer that resolves every draw
//! call (lines, triangles, quads, circles, AABBs, sprites, text) to
//! `plot` writes, optionally blended via a [`BlendMode`]. Higher layers
//! (sprites, sheets, animations, fonts) reduce to primitive draw calls
//! on `Image` and share pixel data by reference counting.
//!
//! ```
//! use glam::Vec2;
//! use rastrum::{BlendMode, Color, FillMode, Image};
//!
//! let mut frame = Image::new(320, 240);
//! frame.clear(Color::BLACK);
//! frame.draw_triangle(
//!     Vec2::new(60.0, 30.0),
//!     Vec2::new(260.0, 90.0),
//!     Vec2::new(160.0, 210.0),
//!     Color::RED,
//!     FillMode::Solid,
//!     BlendMode::ALPHA_BLEND,
//! );
//! ```

mod color;
mod error;
mod font;
mod geometry;
mod image;
mod resources;
mod sprite;
mod transform;

pub use color::{BlendFactor, BlendMode, BlendOp, Color};
pub use error::{Error, Result};
pub use font::{Font, FIRST_CHAR, NUM_CHARS};
pub use geometry::{Aabb, Circle, Rect, Sphere};
pub use self::image::{AddressMode, FillMode, Image, Vertex};
pub use resources::ResourceManager;
pub use sprite::{
    grid_sprite_count, grid_sprite_size, GridDescriptor, SheetDescriptor, Sprite, SpriteAnim,
    SpriteSheet,
};
pub use transform::Transform2D;
