//! Sprites, sprite sheets, and frame animation
//!
//! A `Sprite` is a read-only view into a shared `Image`: a source
//! rectangle plus a tint and blend mode. `SpriteSheet` partitions one
//! image into many rectangles (uniform grid or explicit list) and hands
//! out sprites over them; `SpriteAnim` picks a sheet frame from elapsed
//! time. The image itself is reference-counted, so sheets and every
//! sprite cut from them share one pixel buffer.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::{BlendMode, Color};
use crate::error::Result;
use crate::geometry::Rect;
use crate::image::Image;

// ============================================================================
// Sprite
// ============================================================================

/// Shared image + source rect + tint + blend mode.
#[derive(Debug, Clone)]
pub struct Sprite {
    image: Arc<Image>,
    source: Rect<i32>,
    tint: Color,
    blend: BlendMode,
}

impl Sprite {
    /// Sprite covering the whole image
    pub fn new(image: Arc<Image>) -> Self {
        let source = Rect::new(0, 0, image.width() as i32, image.height() as i32);
        Self::with_source(image, source)
    }

    pub fn with_source(image: Arc<Image>, source: Rect<i32>) -> Self {
        Self {
            image,
            source,
            tint: Color::WHITE,
            blend: BlendMode::ALPHA_BLEND,
        }
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The shared handle, for building more sprites over the same pixels
    #[inline]
    pub fn image_arc(&self) -> &Arc<Image> {
        &self.image
    }

    #[inline]
    pub fn source_rect(&self) -> Rect<i32> {
        self.source
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.source.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.source.height
    }

    #[inline]
    pub fn tint(&self) -> Color {
        self.tint
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_blend_mode(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

// ============================================================================
// SpriteSheet
// ============================================================================

/// Sprites per axis for a uniform grid:
/// `(image_size + padding - 2*margin) / (padding + sprite_size)`
#[inline]
pub fn grid_sprite_count(image_size: u32, sprite_size: u32, padding: u32, margin: u32) -> u32 {
    if sprite_size + padding == 0 {
        return 0;
    }
    (image_size + padding).saturating_sub(2 * margin) / (padding + sprite_size)
}

/// Inverse of `grid_sprite_count`: sprite size from a desired count
#[inline]
pub fn grid_sprite_size(image_size: u32, count: u32, padding: u32, margin: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    ((image_size + padding).saturating_sub(2 * margin) / count).saturating_sub(padding)
}

/// Serializable sheet layout, loaded from JSON for irregular atlases or
/// grids authored outside the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    #[serde(default)]
    pub grid: Option<GridDescriptor>,
    #[serde(default)]
    pub rects: Vec<Rect<i32>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridDescriptor {
    pub sprite_width: u32,
    pub sprite_height: u32,
    #[serde(default)]
    pub padding: u32,
    #[serde(default)]
    pub margin: u32,
}

impl SheetDescriptor {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// One shared image subdivided into addressable sub-rectangles.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: Arc<Image>,
    rects: Vec<Rect<i32>>,
}

impl SpriteSheet {
    /// Uniform grid layout. Rectangles are emitted row-major, top-left
    /// first.
    pub fn from_grid(
        image: Arc<Image>,
        sprite_width: u32,
        sprite_height: u32,
        padding: u32,
        margin: u32,
    ) -> Self {
        let cols = grid_sprite_count(image.width(), sprite_width, padding, margin);
        let rows = grid_sprite_count(image.height(), sprite_height, padding, margin);

        let mut rects = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                rects.push(Rect::new(
                    (margin + col * (sprite_width + padding)) as i32,
                    (margin + row * (sprite_height + padding)) as i32,
                    sprite_width as i32,
                    sprite_height as i32,
                ));
            }
        }
        Self { image, rects }
    }

    /// Explicit rectangle list for irregular atlases
    pub fn from_rects(image: Arc<Image>, rects: Vec<Rect<i32>>) -> Self {
        Self { image, rects }
    }

    pub fn from_descriptor(image: Arc<Image>, desc: &SheetDescriptor) -> Self {
        match desc.grid {
            Some(grid) => Self::from_grid(
                image,
                grid.sprite_width,
                grid.sprite_height,
                grid.padding,
                grid.margin,
            ),
            None => Self::from_rects(image, desc.rects.clone()),
        }
    }

    #[inline]
    pub fn image(&self) -> &Arc<Image> {
        &self.image
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn rect(&self, index: usize) -> Option<Rect<i32>> {
        self.rects.get(index).copied()
    }

    /// Build a sprite over frame `index`, sharing this sheet's image
    pub fn sprite(&self, index: usize) -> Option<Sprite> {
        self.rect(index)
            .map(|r| Sprite::with_source(Arc::clone(&self.image), r))
    }
}

// ============================================================================
// SpriteAnim
// ============================================================================

/// Time-indexed frame selection over a shared sheet.
///
/// The frame list is explicit, allowing non-sequential or repeated-frame
/// animations; `new` fills it with 0..N-1. Indexing wraps via modulo and
/// keeps wrapping silently past `is_done` — one-shot callers gate on
/// `is_done`, looping callers just keep updating (or call `reset`).
#[derive(Debug, Clone)]
pub struct SpriteAnim {
    sheet: Arc<SpriteSheet>,
    frames: Vec<usize>,
    fps: f32,
    time: f32,
}

impl SpriteAnim {
    /// Animate every sheet frame in order
    pub fn new(sheet: Arc<SpriteSheet>, fps: f32) -> Self {
        let frames = (0..sheet.len()).collect();
        Self::with_frames(sheet, frames, fps)
    }

    /// Animate an explicit frame-index sequence
    pub fn with_frames(sheet: Arc<SpriteSheet>, frames: Vec<usize>, fps: f32) -> Self {
        Self {
            sheet,
            frames,
            fps,
            time: 0.0,
        }
    }

    #[inline]
    pub fn sheet(&self) -> &Arc<SpriteSheet> {
        &self.sheet
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance playback time
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// `floor(time * fps) mod frame-count`
    pub fn current_index(&self) -> usize {
        if self.frames.is_empty() {
            return 0;
        }
        (self.time * self.fps).floor() as usize % self.frames.len()
    }

    /// True once elapsed time exceeds the total duration, without
    /// wrapping
    pub fn is_done(&self) -> bool {
        if self.fps <= 0.0 {
            return false;
        }
        self.time > self.frames.len() as f32 / self.fps
    }

    /// The sprite for the current frame; None for an empty animation or
    /// a frame index outside the sheet.
    pub fn current_sprite(&self) -> Option<Sprite> {
        let frame = *self.frames.get(self.current_index())?;
        self.sheet.sprite(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_4x1() -> Arc<SpriteSheet> {
        let image = Arc::new(Image::new(64, 16));
        Arc::new(SpriteSheet::from_grid(image, 16, 16, 0, 0))
    }

    #[test]
    fn test_grid_count_formula() {
        // 66px image, 16px sprites, 2px padding, 1px margin:
        // (66 + 2 - 2) / (2 + 16) = 3
        assert_eq!(grid_sprite_count(66, 16, 2, 1), 3);
        assert_eq!(grid_sprite_count(64, 16, 0, 0), 4);
        // Inverse recovers the sprite size when the grid tiles exactly:
        // a 56px image holds 3 sprites of (56 + 2 - 2) / 3 - 2 = 16px
        assert_eq!(grid_sprite_count(56, 16, 2, 1), 3);
        assert_eq!(grid_sprite_size(56, 3, 2, 1), 16);
        // With slack the truncating division keeps the extra pixels
        assert_eq!(grid_sprite_size(66, 3, 2, 1), 20);
    }

    #[test]
    fn test_grid_rect_positions() {
        let image = Arc::new(Image::new(66, 66));
        let sheet = SpriteSheet::from_grid(image, 16, 16, 2, 1);
        assert_eq!(sheet.len(), 9);
        assert_eq!(sheet.rect(0), Some(Rect::new(1, 1, 16, 16)));
        assert_eq!(sheet.rect(1), Some(Rect::new(19, 1, 16, 16)));
        assert_eq!(sheet.rect(3), Some(Rect::new(1, 19, 16, 16)));
    }

    #[test]
    fn test_sprites_share_the_image() {
        let sheet = sheet_4x1();
        let a = sheet.sprite(0).unwrap();
        let b = sheet.sprite(3).unwrap();
        assert!(Arc::ptr_eq(a.image_arc(), b.image_arc()));
        assert_eq!(b.source_rect().x, 48);
    }

    #[test]
    fn test_anim_frame_selection() {
        let image = Arc::new(Image::new(80, 16));
        let sheet = Arc::new(SpriteSheet::from_grid(image, 16, 16, 0, 0));
        let mut anim = SpriteAnim::new(sheet, 10.0);
        assert_eq!(anim.frame_count(), 5);

        anim.update(0.45);
        assert_eq!(anim.current_index(), 4);
        assert!(!anim.is_done());

        // Past the full duration: done, but indexing keeps wrapping
        anim.update(0.10);
        assert!(anim.is_done());
        assert_eq!(anim.current_index(), 0);

        anim.reset();
        assert_eq!(anim.current_index(), 0);
        assert!(!anim.is_done());
    }

    #[test]
    fn test_anim_explicit_frames() {
        let sheet = sheet_4x1();
        let mut anim = SpriteAnim::with_frames(sheet, vec![0, 2, 0, 3], 4.0);
        anim.set_time(0.3);
        assert_eq!(anim.current_index(), 1);
        assert_eq!(anim.current_sprite().unwrap().source_rect().x, 32);
    }

    #[test]
    fn test_descriptor_json() {
        let desc = SheetDescriptor::from_json(
            r#"{ "grid": { "sprite_width": 16, "sprite_height": 16, "padding": 2, "margin": 1 } }"#,
        )
        .unwrap();
        let image = Arc::new(Image::new(66, 66));
        let sheet = SpriteSheet::from_descriptor(image, &desc);
        assert_eq!(sheet.len(), 9);

        let desc = SheetDescriptor::from_json(
            r#"{ "rects": [ { "x": 0, "y": 0, "width": 8, "height": 8 } ] }"#,
        )
        .unwrap();
        let image = Arc::new(Image::new(8, 8));
        let sheet = SpriteSheet::from_descriptor(image, &desc);
        assert_eq!(sheet.len(), 1);
    }
}
