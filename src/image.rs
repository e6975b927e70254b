//! Image buffer and rasterization core
//!
//! `Image` owns a contiguous RGBA pixel buffer plus a cached bounds AABB
//! that every draw call clips against. All primitives resolve to `plot`
//! writes, optionally blended against the destination via a `BlendMode`.
//!
//! Solid fills iterate the clamped bounding box row-by-row; rows are
//! disjoint `&mut` slices, so the row loop runs on rayon without any
//! synchronization.

use std::path::Path;

use glam::{Mat3, Vec2};
use rayon::prelude::*;

use crate::color::{BlendMode, Color};
use crate::error::{Error, Result};
use crate::geometry::{Aabb, Circle, Rect};
use crate::sprite::Sprite;

/// Policy for mapping out-of-range texel coordinates into the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Euclidean modulo tiling
    Wrap,
    /// Reflect every other tile
    Mirror,
    /// Saturate to the edge texel
    #[default]
    Clamp,
}

/// Outline or filled rendering for shape primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    WireFrame,
    Solid,
}

/// One corner of a textured quad: screen position, texel coordinate, and
/// a color multiplied into the sampled texel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub tex_coord: Vec2,
    pub color: Color,
}

impl Vertex {
    pub const fn new(position: Vec2, tex_coord: Vec2, color: Color) -> Self {
        Self {
            position,
            tex_coord,
            color,
        }
    }
}

// ============================================================================
// Barycentric helpers
// ============================================================================

/// Barycentric coordinates of `p` in triangle (a, b, c), 2D cross-product
/// formulation. Degenerate (zero-area) triangles return coordinates that
/// fail the inside test.
#[inline]
fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> (f32, f32, f32) {
    let d = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if d == 0.0 {
        return (-1.0, -1.0, -1.0);
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / d;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / d;
    (u, v, 1.0 - u - v)
}

#[inline]
fn bary_inside(u: f32, v: f32, w: f32) -> bool {
    u >= 0.0 && v >= 0.0 && w >= 0.0
}

/// Weighted blend of three vertex colors by barycentric coordinates
#[inline]
fn bary_color(c0: Color, c1: Color, c2: Color, u: f32, v: f32, w: f32) -> Color {
    let ch = |a: u8, b: u8, c: u8| {
        (a as f32 * u + b as f32 * v + c as f32 * w).clamp(0.0, 255.0) as u8
    };
    Color::new(
        ch(c0.r, c1.r, c2.r),
        ch(c0.g, c1.g, c2.g),
        ch(c0.b, c1.b, c2.b),
        ch(c0.a, c1.a, c2.a),
    )
}

// ============================================================================
// Image
// ============================================================================

/// RGBA pixel buffer for software rendering.
///
/// Default-constructed images are empty (0x0, no buffer, invalid bounds);
/// every draw against an empty image is a no-op. `Clone` deep-copies the
/// buffer.
#[derive(Debug, Clone, Default)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    bounds: Aabb,
}

impl Image {
    /// Create a zero-filled image
    pub fn new(width: u32, height: u32) -> Self {
        let mut img = Self::default();
        img.resize(width, height);
        img
    }

    /// Build from a raw RGBA byte buffer. Returns None on size mismatch.
    pub fn from_rgba_bytes(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        if data.len() != (width * height * 4) as usize {
            return None;
        }
        let mut img = Self::new(width, height);
        for (px, chunk) in img.pixels.iter_mut().zip(data.chunks_exact(4)) {
            *px = Color::new(chunk[0], chunk[1], chunk[2], chunk[3]);
        }
        Some(img)
    }

    /// Decode an image file (PNG/JPEG/BMP/TGA and friends), normalizing
    /// to RGBA channel order.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let decoded = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let mut img = Self::new(width, height);
        for (px, chunk) in img.pixels.iter_mut().zip(decoded.as_raw().chunks_exact(4)) {
            *px = Color::new(chunk[0], chunk[1], chunk[2], chunk[3]);
        }
        Ok(img)
    }

    /// Degrade-don't-crash load: failures log a diagnostic and yield an
    /// empty image. Check `is_empty` before relying on the contents.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(img) => img,
            Err(err) => {
                log::warn!("failed to load image {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Encode by extension dispatch. PNG/BMP/TGA write RGBA; JPEG drops
    /// alpha. Unsupported extensions are a reported error, not a panic.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "bmp" | "tga" => {
                let bytes = self.to_rgba_bytes();
                image::save_buffer(
                    path,
                    &bytes,
                    self.width,
                    self.height,
                    image::ExtendedColorType::Rgba8,
                )?;
                Ok(())
            }
            "jpg" | "jpeg" => {
                let mut rgb = Vec::with_capacity((self.width * self.height * 3) as usize);
                for px in &self.pixels {
                    rgb.extend_from_slice(&[px.r, px.g, px.b]);
                }
                image::save_buffer(
                    path,
                    &rgb,
                    self.width,
                    self.height,
                    image::ExtendedColorType::Rgb8,
                )?;
                Ok(())
            }
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bounds AABB covering [0,0] .. [w-1, h-1]. Invalid for empty images.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Raw pixel access (row-major)
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flatten to RGBA bytes (for encoding or texture upload)
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        out
    }

    /// Reallocate the buffer if dimensions changed; no-op otherwise.
    /// Contents after a resize are unspecified (currently zero-filled);
    /// the bounds AABB is recomputed as [0,0] .. [w-1, h-1].
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::TRANSPARENT; (width as usize) * (height as usize)];
        self.bounds = if width > 0 && height > 0 {
            Aabb::from(Rect::new(0, 0, width as i32, height as i32))
        } else {
            Aabb::default()
        };
    }

    /// Overwrite every pixel, no blending
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// The fundamental write primitive: bounds-checked, blended. Writes
    /// outside [0,w) x [0,h) are silently discarded.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: Color, blend: BlendMode) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = blend.blend(color, self.pixels[idx]);
        }
    }

    /// Fast unchecked raw write - use only after clipping guarantees
    /// bounds. Asserts in debug builds.
    #[inline]
    pub unsafe fn plot_unchecked(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.pixel_index(x, y);
        *self.pixels.get_unchecked_mut(idx) = color;
    }

    /// Fast unchecked blended write - same contract as `plot_unchecked`
    #[inline]
    pub unsafe fn plot_unchecked_blend(&mut self, x: u32, y: u32, color: Color, blend: BlendMode) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.pixel_index(x, y);
        let dst = *self.pixels.get_unchecked(idx);
        *self.pixels.get_unchecked_mut(idx) = blend.blend(color, dst);
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Texel fetch with address-mode remapping. Empty images sample
    /// transparent black.
    #[inline]
    pub fn sample(&self, x: i32, y: i32, mode: AddressMode) -> Color {
        if self.pixels.is_empty() {
            return Color::TRANSPARENT;
        }
        let w = self.width as i32;
        let h = self.height as i32;
        let (sx, sy) = match mode {
            AddressMode::Wrap => (x.rem_euclid(w), y.rem_euclid(h)),
            AddressMode::Mirror => (Self::mirror(x, w), Self::mirror(y, h)),
            AddressMode::Clamp => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
        };
        self.pixels[self.pixel_index(sx as u32, sy as u32)]
    }

    /// Normalized-coordinate fetch: rounds `coord * dimension` to a texel
    #[inline]
    pub fn sample_uv(&self, u: f32, v: f32, mode: AddressMode) -> Color {
        let x = (u * self.width as f32).round() as i32;
        let y = (v * self.height as f32).round() as i32;
        self.sample(x, y, mode)
    }

    /// Reflect a coordinate so every other tile mirrors
    #[inline]
    fn mirror(v: i32, n: i32) -> i32 {
        let period = 2 * n;
        let m = v.rem_euclid(period);
        if m < n {
            m
        } else {
            period - 1 - m
        }
    }

    // ========================================================================
    // Blits
    // ========================================================================

    /// Unscaled 1:1 blit at (x, y), no blending, clipped against both
    /// images. The fast path for background tiling.
    pub fn copy_at(&mut self, src: &Image, x: i32, y: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + src.width as i32).min(self.width as i32);
        let y1 = (y + src.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let count = (x1 - x0) as usize;
        for dy in y0..y1 {
            let sy = (dy - y) as u32;
            let src_start = src.pixel_index((x0 - x) as u32, sy);
            let dst_start = self.pixel_index(x0 as u32, dy as u32);
            self.pixels[dst_start..dst_start + count]
                .copy_from_slice(&src.pixels[src_start..src_start + count]);
        }
    }

    /// Region blit with independent source and destination rectangles and
    /// nearest-neighbor scaling (ratio src size / dst size). Both rects
    /// are clipped against their image bounds first; a no-op when either
    /// clipped rect is empty.
    pub fn copy_region(
        &mut self,
        src: &Image,
        src_rect: Option<Rect<i32>>,
        dst_rect: Option<Rect<i32>>,
        blend: BlendMode,
    ) {
        let src_rect = src_rect.unwrap_or(Rect::new(0, 0, src.width as i32, src.height as i32));
        let dst_rect = dst_rect.unwrap_or(Rect::new(0, 0, self.width as i32, self.height as i32));

        let src_clip = Aabb::from(src_rect).clamped(src.bounds());
        let dst_clip = Aabb::from(dst_rect).clamped(self.bounds());
        if !src_clip.is_valid() || !dst_clip.is_valid() {
            return;
        }

        let scale_x = src_clip.width() / dst_clip.width();
        let scale_y = src_clip.height() / dst_clip.height();
        let sx0 = src_clip.min.x;
        let sy0 = src_clip.min.y;
        let dx0 = *dst_clip.x_range().start();
        let dy0 = *dst_clip.y_range().start();

        for y in dst_clip.y_range() {
            let sy = (sy0 + (y - dy0) as f32 * scale_y) as u32;
            for x in dst_clip.x_range() {
                let sx = (sx0 + (x - dx0) as f32 * scale_x) as u32;
                let c = src.pixels[src.pixel_index(sx, sy)];
                // Clipped to self.bounds above, so the write is in range
                unsafe {
                    self.plot_unchecked_blend(x as u32, y as u32, c, blend);
                }
            }
        }
    }

    /// Mirror left-right into a new image
    pub fn flip_horizontal(&self) -> Self {
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = out.pixel_index(self.width - 1 - x, y);
                out.pixels[idx] = self.pixels[self.pixel_index(x, y)];
            }
        }
        out
    }

    /// Mirror top-bottom into a new image
    pub fn flip_vertical(&self) -> Self {
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height {
            let src_start = self.pixel_index(0, y);
            let dst_start = out.pixel_index(0, self.height - 1 - y);
            let w = self.width as usize;
            out.pixels[dst_start..dst_start + w]
                .copy_from_slice(&self.pixels[src_start..src_start + w]);
        }
        out
    }

    // ========================================================================
    // Parallel fill core
    // ========================================================================

    /// Run a shader over every pixel of `region` (already clamped to the
    /// image bounds), blending `Some` results into the buffer. Rows are
    /// disjoint slices, so they run in parallel; each destination pixel is
    /// written at most once per call.
    fn fill_region<F>(&mut self, region: &Aabb, blend: BlendMode, shader: F)
    where
        F: Fn(i32, i32) -> Option<Color> + Sync,
    {
        if self.pixels.is_empty() || !region.is_valid() {
            return;
        }
        let w = self.width as usize;
        let x0 = *region.x_range().start();
        let x1 = *region.x_range().end();
        let y0 = *region.y_range().start();
        let y1 = *region.y_range().end();

        let row_start = y0 as usize * w;
        let row_end = (y1 as usize + 1) * w;
        self.pixels[row_start..row_end]
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(i, row)| {
                let y = y0 + i as i32;
                for x in x0..=x1 {
                    if let Some(c) = shader(x, y) {
                        let dst = row[x as usize];
                        row[x as usize] = blend.blend(c, dst);
                    }
                }
            });
    }

    // ========================================================================
    // Line
    // ========================================================================

    /// Bresenham line with Cohen-Sutherland clipping against the image
    /// bounds. Draws nothing when the clipped line is entirely outside.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color, blend: BlendMode) {
        let Some((c0, c1)) = self.bounds.clip_line(p0, p1) else {
            return;
        };

        let x0 = c0.x.round() as i32;
        let y0 = c0.y.round() as i32;
        let x1 = c1.x.round() as i32;
        let y1 = c1.y.round() as i32;

        let dx = (x1 - x0).abs();
        let dy = -((y1 - y0).abs());
        let sx = if x0 < x1 { 1i32 } else { -1i32 };
        let sy = if y0 < y1 { 1i32 } else { -1i32 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            // Safety: endpoints are clipped to the bounds AABB
            unsafe {
                self.plot_unchecked_blend(x as u32, y as u32, color, blend);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    // ========================================================================
    // Triangle / Quad
    // ========================================================================

    /// Rasterize a triangle. WireFrame draws the three edges; Solid tests
    /// every pixel of the clamped bounding box with barycentric
    /// coordinates. Degenerate (zero-area) triangles draw nothing in
    /// Solid mode.
    pub fn draw_triangle(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        color: Color,
        fill: FillMode,
        blend: BlendMode,
    ) {
        let aabb = Aabb::from_points(&[p0.extend(0.0), p1.extend(0.0), p2.extend(0.0)]);
        if !aabb.intersects(&self.bounds) {
            return;
        }

        match fill {
            FillMode::WireFrame => {
                self.draw_line(p0, p1, color, blend);
                self.draw_line(p1, p2, color, blend);
                self.draw_line(p2, p0, color, blend);
            }
            FillMode::Solid => {
                let region = aabb.clamped(&self.bounds);
                self.fill_region(&region, blend, |x, y| {
                    let p = Vec2::new(x as f32, y as f32);
                    let (u, v, w) = barycentric(p, p0, p1, p2);
                    bary_inside(u, v, w).then_some(color)
                });
            }
        }
    }

    /// Rasterize a quad as two triangles sharing the (0,1,3) + (1,2,3)
    /// diagonal.
    pub fn draw_quad(
        &mut self,
        points: &[Vec2; 4],
        color: Color,
        fill: FillMode,
        blend: BlendMode,
    ) {
        let aabb = Aabb::from_points(&[
            points[0].extend(0.0),
            points[1].extend(0.0),
            points[2].extend(0.0),
            points[3].extend(0.0),
        ]);
        if !aabb.intersects(&self.bounds) {
            return;
        }

        match fill {
            FillMode::WireFrame => {
                for i in 0..4 {
                    self.draw_line(points[i], points[(i + 1) % 4], color, blend);
                }
            }
            FillMode::Solid => {
                let region = aabb.clamped(&self.bounds);
                let [p0, p1, p2, p3] = *points;
                self.fill_region(&region, blend, |x, y| {
                    let p = Vec2::new(x as f32, y as f32);
                    let (u, v, w) = barycentric(p, p0, p1, p3);
                    if bary_inside(u, v, w) {
                        return Some(color);
                    }
                    let (u, v, w) = barycentric(p, p1, p2, p3);
                    bary_inside(u, v, w).then_some(color)
                });
            }
        }
    }

    /// Textured quad with per-vertex colors and a whole-quad tint. For
    /// each pixel of the clamped bounding box, barycentric-test both
    /// triangles; where inside, interpolate texel coordinates and vertex
    /// color, sample `texture` with `mode`, multiply by the interpolated
    /// color and `tint`, and blend into the destination.
    pub fn draw_textured_quad(
        &mut self,
        verts: &[Vertex; 4],
        texture: &Image,
        mode: AddressMode,
        tint: Color,
        blend: BlendMode,
    ) {
        let aabb = Aabb::from_points(&[
            verts[0].position.extend(0.0),
            verts[1].position.extend(0.0),
            verts[2].position.extend(0.0),
            verts[3].position.extend(0.0),
        ]);
        if !aabb.intersects(&self.bounds) {
            return;
        }

        let region = aabb.clamped(&self.bounds);
        let [v0, v1, v2, v3] = *verts;
        self.fill_region(&region, blend, |x, y| {
            let p = Vec2::new(x as f32, y as f32);

            // Diagonal split (0,1,3) + (1,2,3), same as the solid path
            let (a, b, c, u, v, w) = {
                let (u, v, w) = barycentric(p, v0.position, v1.position, v3.position);
                if bary_inside(u, v, w) {
                    (v0, v1, v3, u, v, w)
                } else {
                    let (u, v, w) = barycentric(p, v1.position, v2.position, v3.position);
                    if !bary_inside(u, v, w) {
                        return None;
                    }
                    (v1, v2, v3, u, v, w)
                }
            };

            let tex = a.tex_coord * u + b.tex_coord * v + c.tex_coord * w;
            let vcolor = bary_color(a.color, b.color, c.color, u, v, w);
            let sampled = texture.sample(tex.x.round() as i32, tex.y.round() as i32, mode);
            Some(sampled * vcolor * tint)
        });
    }

    // ========================================================================
    // Sprite
    // ========================================================================

    /// Draw a sprite through a 3x3 transform: the sprite-local quad
    /// corners go through `matrix`, then the textured-quad path samples
    /// the sprite's source rect with its tint and blend mode.
    pub fn draw_sprite(&mut self, sprite: &Sprite, matrix: &Mat3) {
        let src = sprite.source_rect();
        if src.width <= 0 || src.height <= 0 || sprite.image().is_empty() {
            return;
        }
        let w = src.width as f32;
        let h = src.height as f32;
        let tx0 = src.x as f32;
        let ty0 = src.y as f32;
        let tx1 = (src.x + src.width - 1) as f32;
        let ty1 = (src.y + src.height - 1) as f32;

        let corner = |local: Vec2, tex: Vec2| {
            Vertex::new(matrix.transform_point2(local), tex, Color::WHITE)
        };
        let verts = [
            corner(Vec2::new(0.0, 0.0), Vec2::new(tx0, ty0)),
            corner(Vec2::new(w, 0.0), Vec2::new(tx1, ty0)),
            corner(Vec2::new(w, h), Vec2::new(tx1, ty1)),
            corner(Vec2::new(0.0, h), Vec2::new(tx0, ty1)),
        ];
        self.draw_textured_quad(
            &verts,
            sprite.image(),
            AddressMode::Clamp,
            sprite.tint(),
            sprite.blend_mode(),
        );
    }

    /// Untransformed integer sprite draw: a 1:1 copy-with-blend that
    /// bypasses barycentric interpolation entirely.
    pub fn draw_sprite_at(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let src = sprite.source_rect();
        let image = sprite.image();
        let blend = sprite.blend_mode();
        let tint = sprite.tint();

        let dst_clip = Aabb::from(Rect::new(x, y, src.width, src.height)).clamped(&self.bounds);
        let src_bounds = Aabb::from(src).clamped(image.bounds());
        if !dst_clip.is_valid() || !src_bounds.is_valid() {
            return;
        }

        for dy in dst_clip.y_range() {
            let sy = src.y + (dy - y);
            for dx in dst_clip.x_range() {
                let sx = src.x + (dx - x);
                let Some(c) = image.get_pixel(sx, sy) else {
                    continue;
                };
                // dst_clip is clamped to self.bounds
                unsafe {
                    self.plot_unchecked_blend(dx as u32, dy as u32, c * tint, blend);
                }
            }
        }
    }

    /// Convenience delegate to [`crate::font::Font::draw_text`]
    pub fn draw_text(
        &mut self,
        font: &crate::font::Font,
        text: &str,
        pos: Vec2,
        size: f32,
        color: Color,
        blend: BlendMode,
    ) {
        font.draw_text(self, text, pos, size, color, blend);
    }

    // ========================================================================
    // AABB / Circle
    // ========================================================================

    /// Draw an axis-aligned box. WireFrame draws the 4 edges; Solid fills
    /// every pixel of the bounds-clamped box unconditionally (no
    /// containment test needed for an axis-aligned shape).
    pub fn draw_aabb(&mut self, aabb: &Aabb, color: Color, fill: FillMode, blend: BlendMode) {
        if !aabb.is_valid() || !aabb.intersects(&self.bounds) {
            return;
        }

        match fill {
            FillMode::WireFrame => {
                let tl = Vec2::new(aabb.min.x, aabb.min.y);
                let tr = Vec2::new(aabb.max.x, aabb.min.y);
                let br = Vec2::new(aabb.max.x, aabb.max.y);
                let bl = Vec2::new(aabb.min.x, aabb.max.y);
                self.draw_line(tl, tr, color, blend);
                self.draw_line(tr, br, color, blend);
                self.draw_line(br, bl, color, blend);
                self.draw_line(bl, tl, color, blend);
            }
            FillMode::Solid => {
                let region = aabb.clamped(&self.bounds);
                self.fill_region(&region, blend, |_, _| Some(color));
            }
        }
    }

    /// Rect convenience wrapper over `draw_aabb`
    pub fn draw_rect(&mut self, rect: Rect<i32>, color: Color, fill: FillMode, blend: BlendMode) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.draw_aabb(&Aabb::from(rect), color, fill, blend);
    }

    /// Approximate a circle as a 64-segment polygon. WireFrame connects
    /// consecutive segment endpoints; Solid fans 64 triangles from the
    /// center.
    pub fn draw_circle(&mut self, circle: &Circle, color: Color, fill: FillMode, blend: BlendMode) {
        const SEGMENTS: u32 = 64;

        if circle.radius <= 0.0 || !Aabb::from(*circle).intersects(&self.bounds) {
            return;
        }

        let point = |i: u32| {
            let angle = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            circle.center + Vec2::new(angle.cos(), angle.sin()) * circle.radius
        };

        for i in 0..SEGMENTS {
            let p0 = point(i);
            let p1 = point((i + 1) % SEGMENTS);
            match fill {
                FillMode::WireFrame => self.draw_line(p0, p1, color, blend),
                FillMode::Solid => {
                    self.draw_triangle(circle.center, p0, p1, color, FillMode::Solid, blend);
                }
            }
        }
    }
}
