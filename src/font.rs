//! Text rendering
//!
//! Two font variants, selected at construction: a dependency-free
//! built-in 8x8 bitmap font that needs no texture (each set bit becomes
//! one solid quad), and a TrueType font baked at load time into a glyph
//! atlas image with one textured quad per character in a contiguous
//! ASCII range.
//!
//! Font files follow the degrade-don't-crash policy: a missing or
//! invalid file logs a diagnostic and yields a font with no glyph atlas,
//! for which `draw_text` draws nothing.

use std::path::Path;

use glam::Vec2;

use crate::color::{BlendMode, Color};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::image::{AddressMode, FillMode, Image, Vertex};

/// First character code covered by both font variants
pub const FIRST_CHAR: u8 = 32;
/// Number of consecutive characters baked (ASCII 32..=126)
pub const NUM_CHARS: u8 = 95;

const BUILTIN_GLYPH_SIZE: u32 = 8;

// ============================================================================
// Font
// ============================================================================

/// One baked glyph: its atlas cell and horizontal advance (both in baked
/// pixels).
#[derive(Debug, Clone, Copy)]
struct Glyph {
    rect: Rect<i32>,
    advance: f32,
}

#[derive(Debug, Clone)]
struct BakedFont {
    atlas: Image,
    glyphs: Vec<Glyph>,
    // Pixel size the atlas was rasterized at; draw_text scales from this
    baked_size: f32,
}

#[derive(Debug, Clone)]
enum FontKind {
    Builtin,
    Baked(BakedFont),
}

#[derive(Debug, Clone)]
pub struct Font {
    kind: FontKind,
}

impl Font {
    /// The built-in quad font: no file, no atlas, always valid
    pub fn builtin() -> Self {
        Self {
            kind: FontKind::Builtin,
        }
    }

    /// Bake a TrueType font from raw file bytes at the given pixel size
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self> {
        let baked = bake(data, size)?;
        Ok(Self {
            kind: FontKind::Baked(baked),
        })
    }

    /// Load and bake a TrueType file. Failures log a diagnostic and
    /// return a font with no glyph atlas rather than an error.
    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Self {
        let path = path.as_ref();
        let result = std::fs::read(path)
            .map_err(Error::from)
            .and_then(|data| Self::from_bytes(&data, size));
        match result {
            Ok(font) => font,
            Err(err) => {
                log::warn!("failed to bake font {}: {err}", path.display());
                Self {
                    kind: FontKind::Baked(BakedFont {
                        atlas: Image::default(),
                        glyphs: Vec::new(),
                        baked_size: size,
                    }),
                }
            }
        }
    }

    /// False only for a baked font whose atlas failed to load
    pub fn is_loaded(&self) -> bool {
        match &self.kind {
            FontKind::Builtin => true,
            FontKind::Baked(baked) => !baked.glyphs.is_empty(),
        }
    }

    /// Rasterize `text` at `pos` (top-left of the first glyph) with the
    /// requested pixel size. Newline resets x and advances y by `size`;
    /// characters outside the baked range are skipped without advancing
    /// the pen.
    pub fn draw_text(
        &self,
        target: &mut Image,
        text: &str,
        pos: Vec2,
        size: f32,
        color: Color,
        blend: BlendMode,
    ) {
        let mut pen = pos;
        for ch in text.chars() {
            if ch == '\n' {
                pen.x = pos.x;
                pen.y += size;
                continue;
            }
            let Some(index) = char_index(ch) else {
                continue;
            };
            match &self.kind {
                FontKind::Builtin => {
                    draw_builtin_glyph(target, index, pen, size, color, blend);
                    pen.x += size;
                }
                FontKind::Baked(baked) => {
                    let Some(glyph) = baked.glyphs.get(index) else {
                        continue;
                    };
                    let scale = size / baked.baked_size;
                    draw_baked_glyph(target, baked, glyph, pen, scale, color, blend);
                    pen.x += glyph.advance * scale;
                }
            }
        }
    }

    /// Width in pixels of the widest line of `text` at `size`
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let mut widest: f32 = 0.0;
        let mut line: f32 = 0.0;
        for ch in text.chars() {
            if ch == '\n' {
                widest = widest.max(line);
                line = 0.0;
                continue;
            }
            let Some(index) = char_index(ch) else {
                continue;
            };
            line += match &self.kind {
                FontKind::Builtin => size,
                FontKind::Baked(baked) => {
                    let scale = size / baked.baked_size;
                    baked.glyphs.get(index).map_or(0.0, |g| g.advance * scale)
                }
            };
        }
        widest.max(line)
    }
}

#[inline]
fn char_index(ch: char) -> Option<usize> {
    let code = ch as u32;
    let first = FIRST_CHAR as u32;
    if code >= first && code < first + NUM_CHARS as u32 {
        Some((code - first) as usize)
    } else {
        None
    }
}

// ============================================================================
// Built-in quad font
// ============================================================================

fn draw_builtin_glyph(
    target: &mut Image,
    index: usize,
    pen: Vec2,
    size: f32,
    color: Color,
    blend: BlendMode,
) {
    let rows = &BUILTIN_GLYPHS[index];
    let cell = size / BUILTIN_GLYPH_SIZE as f32;

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..BUILTIN_GLYPH_SIZE {
            if bits & (1 << col) == 0 {
                continue;
            }
            // One solid quad per set bit; snap edges so adjacent cells
            // tile without gaps or double-blended seams
            let x0 = (pen.x + col as f32 * cell).round() as i32;
            let y0 = (pen.y + row as f32 * cell).round() as i32;
            let x1 = (pen.x + (col + 1) as f32 * cell).round() as i32;
            let y1 = (pen.y + (row + 1) as f32 * cell).round() as i32;
            let w = (x1 - x0).max(1);
            let h = (y1 - y0).max(1);
            target.draw_rect(Rect::new(x0, y0, w, h), color, FillMode::Solid, blend);
        }
    }
}

// ============================================================================
// TrueType baking
// ============================================================================

const ATLAS_COLUMNS: u32 = 16;

fn bake(data: &[u8], size: f32) -> Result<BakedFont> {
    let face = ttf_parser::Face::parse(data, 0).map_err(|e| Error::font(e.to_string()))?;
    let upem = face.units_per_em() as f32;
    if upem <= 0.0 {
        return Err(Error::font("font has no units_per_em"));
    }
    let scale = size / upem;
    let ascent = face.ascender() as f32 * scale;
    let descent = -(face.descender() as f32) * scale;

    let cell_w = size.ceil() as u32 + 1;
    let cell_h = (ascent + descent).ceil() as u32 + 1;
    let rows = (NUM_CHARS as u32).div_ceil(ATLAS_COLUMNS);
    let mut atlas = Image::new(ATLAS_COLUMNS * cell_w, rows * cell_h);

    let mut glyphs = Vec::with_capacity(NUM_CHARS as usize);
    for i in 0..NUM_CHARS as u32 {
        let ch = char::from_u32(FIRST_CHAR as u32 + i).unwrap_or(' ');
        let cell = Rect::new(
            ((i % ATLAS_COLUMNS) * cell_w) as i32,
            ((i / ATLAS_COLUMNS) * cell_h) as i32,
            cell_w as i32,
            cell_h as i32,
        );

        let mut advance = size * 0.5;
        if let Some(id) = face.glyph_index(ch) {
            if let Some(units) = face.glyph_hor_advance(id) {
                advance = units as f32 * scale;
            }
            let mut flattener = Flattener::new(scale, ascent);
            if face.outline_glyph(id, &mut flattener).is_some() {
                fill_contours(&mut atlas, cell, &flattener.finish());
            }
        }

        glyphs.push(Glyph {
            rect: cell,
            advance,
        });
    }

    Ok(BakedFont {
        atlas,
        glyphs,
        baked_size: size,
    })
}

fn draw_baked_glyph(
    target: &mut Image,
    baked: &BakedFont,
    glyph: &Glyph,
    pen: Vec2,
    scale: f32,
    color: Color,
    blend: BlendMode,
) {
    let w = glyph.rect.width as f32 * scale;
    let h = glyph.rect.height as f32 * scale;
    let tx0 = glyph.rect.x as f32;
    let ty0 = glyph.rect.y as f32;
    let tx1 = (glyph.rect.x + glyph.rect.width - 1) as f32;
    let ty1 = (glyph.rect.y + glyph.rect.height - 1) as f32;

    let verts = [
        Vertex::new(pen, Vec2::new(tx0, ty0), color),
        Vertex::new(pen + Vec2::new(w, 0.0), Vec2::new(tx1, ty0), color),
        Vertex::new(pen + Vec2::new(w, h), Vec2::new(tx1, ty1), color),
        Vertex::new(pen + Vec2::new(0.0, h), Vec2::new(tx0, ty1), color),
    ];
    target.draw_textured_quad(&verts, &baked.atlas, AddressMode::Clamp, Color::WHITE, blend);
}

/// Collects a glyph outline as closed contours of line segments in
/// cell-local pixel coordinates (y-down, baseline at `ascent`). Beziers
/// are flattened at a fixed step count.
struct Flattener {
    scale: f32,
    ascent: f32,
    contours: Vec<Vec<Vec2>>,
    current: Vec<Vec2>,
    last: Vec2,
}

impl Flattener {
    fn new(scale: f32, ascent: f32) -> Self {
        Self {
            scale,
            ascent,
            contours: Vec::new(),
            current: Vec::new(),
            last: Vec2::ZERO,
        }
    }

    #[inline]
    fn map(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.scale, self.ascent - y * self.scale)
    }

    fn end_contour(&mut self) {
        if self.current.len() >= 3 {
            self.contours.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }

    fn finish(mut self) -> Vec<Vec<Vec2>> {
        self.end_contour();
        self.contours
    }
}

impl ttf_parser::OutlineBuilder for Flattener {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        self.last = self.map(x, y);
        self.current.push(self.last);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.last = self.map(x, y);
        self.current.push(self.last);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        const STEPS: u32 = 8;
        let s = self.last;
        let c = self.map(x1, y1);
        let e = self.map(x, y);
        for i in 1..=STEPS {
            let t = i as f32 / STEPS as f32;
            let p = s.lerp(c, t).lerp(c.lerp(e, t), t);
            self.current.push(p);
        }
        self.last = e;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        const STEPS: u32 = 12;
        let s = self.last;
        let c1 = self.map(x1, y1);
        let c2 = self.map(x2, y2);
        let e = self.map(x, y);
        for i in 1..=STEPS {
            let t = i as f32 / STEPS as f32;
            let a = s.lerp(c1, t);
            let b = c1.lerp(c2, t);
            let c = c2.lerp(e, t);
            let p = a.lerp(b, t).lerp(b.lerp(c, t), t);
            self.current.push(p);
        }
        self.last = e;
    }

    fn close(&mut self) {
        self.end_contour();
    }
}

/// Even-odd scanline fill of flattened contours into one atlas cell.
/// Each scanline collects edge crossings at the row center, sorts them,
/// and fills between alternating pairs.
fn fill_contours(atlas: &mut Image, cell: Rect<i32>, contours: &[Vec<Vec2>]) {
    let mut crossings: Vec<f32> = Vec::new();

    for y in 0..cell.height {
        let scan = y as f32 + 0.5;
        crossings.clear();

        for contour in contours {
            let n = contour.len();
            for i in 0..n {
                let a = contour[i];
                let b = contour[(i + 1) % n];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
        }

        crossings.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
        for pair in crossings.chunks_exact(2) {
            let x0 = (pair[0].round().max(0.0) as i32).min(cell.width);
            let x1 = (pair[1].round() as i32).clamp(0, cell.width);
            for x in x0..x1 {
                atlas.plot(cell.x + x, cell.y + y, Color::WHITE, BlendMode::DISABLE);
            }
        }
    }
}

/// Built-in 8x8 bitmap glyphs for ASCII 32..=126, one byte per row with
/// the least significant bit as the leftmost pixel.
#[rustfmt::skip]
const BUILTIN_GLYPHS: [[u8; 8]; NUM_CHARS as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x0C, 0x1E, 0x1E, 0x0C, 0x0C, 0x00, 0x0C, 0x00], // '!'
    [0x36, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x36, 0x36, 0x7F, 0x36, 0x7F, 0x36, 0x36, 0x00], // '#'
    [0x0C, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x0C, 0x00], // '$'
    [0x00, 0x63, 0x33, 0x18, 0x0C, 0x66, 0x63, 0x00], // '%'
    [0x1C, 0x36, 0x1C, 0x6E, 0x3B, 0x33, 0x6E, 0x00], // '&'
    [0x06, 0x06, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x18, 0x0C, 0x06, 0x06, 0x06, 0x0C, 0x18, 0x00], // '('
    [0x06, 0x0C, 0x18, 0x18, 0x18, 0x0C, 0x06, 0x00], // ')'
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00], // '*'
    [0x00, 0x0C, 0x0C, 0x3F, 0x0C, 0x0C, 0x00, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ','
    [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00], // '.'
    [0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01, 0x00], // '/'
    [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00], // '0'
    [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00], // '1'
    [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00], // '2'
    [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00], // '3'
    [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00], // '4'
    [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00], // '5'
    [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00], // '6'
    [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00], // '7'
    [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00], // '8'
    [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ';'
    [0x18, 0x0C, 0x06, 0x03, 0x06, 0x0C, 0x18, 0x00], // '<'
    [0x00, 0x00, 0x3F, 0x00, 0x00, 0x3F, 0x00, 0x00], // '='
    [0x06, 0x0C, 0x18, 0x30, 0x18, 0x0C, 0x06, 0x00], // '>'
    [0x1E, 0x33, 0x30, 0x18, 0x0C, 0x00, 0x0C, 0x00], // '?'
    [0x3E, 0x63, 0x7B, 0x7B, 0x7B, 0x03, 0x1E, 0x00], // '@'
    [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00], // 'A'
    [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00], // 'B'
    [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00], // 'C'
    [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00], // 'D'
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00], // 'E'
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00], // 'F'
    [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00], // 'G'
    [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00], // 'H'
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'I'
    [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00], // 'J'
    [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00], // 'K'
    [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00], // 'L'
    [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00], // 'M'
    [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00], // 'N'
    [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00], // 'O'
    [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00], // 'P'
    [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00], // 'Q'
    [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00], // 'R'
    [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00], // 'S'
    [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'T'
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00], // 'U'
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // 'V'
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00], // 'W'
    [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00], // 'X'
    [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00], // 'Y'
    [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00], // 'Z'
    [0x1E, 0x06, 0x06, 0x06, 0x06, 0x06, 0x1E, 0x00], // '['
    [0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00], // '\\'
    [0x1E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x1E, 0x00], // ']'
    [0x08, 0x1C, 0x36, 0x63, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF], // '_'
    [0x0C, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x1E, 0x30, 0x3E, 0x33, 0x6E, 0x00], // 'a'
    [0x07, 0x06, 0x06, 0x3E, 0x66, 0x66, 0x3B, 0x00], // 'b'
    [0x00, 0x00, 0x1E, 0x33, 0x03, 0x33, 0x1E, 0x00], // 'c'
    [0x38, 0x30, 0x30, 0x3E, 0x33, 0x33, 0x6E, 0x00], // 'd'
    [0x00, 0x00, 0x1E, 0x33, 0x3F, 0x03, 0x1E, 0x00], // 'e'
    [0x1C, 0x36, 0x06, 0x0F, 0x06, 0x06, 0x0F, 0x00], // 'f'
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x1F], // 'g'
    [0x07, 0x06, 0x36, 0x6E, 0x66, 0x66, 0x67, 0x00], // 'h'
    [0x0C, 0x00, 0x0E, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'i'
    [0x30, 0x00, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E], // 'j'
    [0x07, 0x06, 0x66, 0x36, 0x1E, 0x36, 0x67, 0x00], // 'k'
    [0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'l'
    [0x00, 0x00, 0x33, 0x7F, 0x7F, 0x6B, 0x63, 0x00], // 'm'
    [0x00, 0x00, 0x1F, 0x33, 0x33, 0x33, 0x33, 0x00], // 'n'
    [0x00, 0x00, 0x1E, 0x33, 0x33, 0x33, 0x1E, 0x00], // 'o'
    [0x00, 0x00, 0x3B, 0x66, 0x66, 0x3E, 0x06, 0x0F], // 'p'
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x78], // 'q'
    [0x00, 0x00, 0x3B, 0x6E, 0x66, 0x06, 0x0F, 0x00], // 'r'
    [0x00, 0x00, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x00], // 's'
    [0x08, 0x0C, 0x3E, 0x0C, 0x0C, 0x2C, 0x18, 0x00], // 't'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x33, 0x6E, 0x00], // 'u'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // 'v'
    [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x7F, 0x36, 0x00], // 'w'
    [0x00, 0x00, 0x63, 0x36, 0x1C, 0x36, 0x63, 0x00], // 'x'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x3E, 0x30, 0x1F], // 'y'
    [0x00, 0x00, 0x3F, 0x19, 0x0C, 0x26, 0x3F, 0x00], // 'z'
    [0x38, 0x0C, 0x0C, 0x07, 0x0C, 0x0C, 0x38, 0x00], // '{'
    [0x18, 0x18, 0x18, 0x00, 0x18, 0x18, 0x18, 0x00], // '|'
    [0x07, 0x0C, 0x0C, 0x38, 0x0C, 0x0C, 0x07, 0x00], // '}'
    [0x6E, 0x3B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(img: &Image) -> usize {
        img.pixels().iter().filter(|c| c.a > 0).count()
    }

    #[test]
    fn test_char_index_range() {
        assert_eq!(char_index(' '), Some(0));
        assert_eq!(char_index('~'), Some(94));
        assert_eq!(char_index('\n'), None);
        assert_eq!(char_index('\u{263A}'), None);
    }

    #[test]
    fn test_builtin_draws_pixels() {
        let font = Font::builtin();
        assert!(font.is_loaded());

        let mut img = Image::new(16, 16);
        font.draw_text(
            &mut img,
            "A",
            Vec2::ZERO,
            8.0,
            Color::WHITE,
            BlendMode::DISABLE,
        );
        assert!(lit_pixels(&img) > 10);

        let mut blank = Image::new(16, 16);
        font.draw_text(
            &mut blank,
            " ",
            Vec2::ZERO,
            8.0,
            Color::WHITE,
            BlendMode::DISABLE,
        );
        assert_eq!(lit_pixels(&blank), 0);
    }

    #[test]
    fn test_newline_resets_pen() {
        let font = Font::builtin();
        assert_eq!(font.text_width("ab\nabcd\nx", 8.0), 32.0);
    }

    #[test]
    fn test_out_of_range_consumes_no_advance() {
        let font = Font::builtin();
        assert_eq!(font.text_width("\u{263A}\u{263A}", 8.0), 0.0);
        assert_eq!(font.text_width("a\u{263A}b", 8.0), 16.0);
    }

    #[test]
    fn test_invalid_font_bytes_error() {
        assert!(Font::from_bytes(&[0u8; 16], 16.0).is_err());
    }

    #[test]
    fn test_missing_font_file_degrades() {
        let font = Font::from_file("/nonexistent/missing.ttf", 16.0);
        assert!(!font.is_loaded());

        let mut img = Image::new(32, 32);
        font.draw_text(
            &mut img,
            "hello",
            Vec2::ZERO,
            16.0,
            Color::WHITE,
            BlendMode::DISABLE,
        );
        assert_eq!(lit_pixels(&img), 0);
    }

    #[test]
    fn test_scanline_fill_square() {
        let mut atlas = Image::new(8, 8);
        let square = vec![vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(6.0, 1.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(1.0, 6.0),
        ]];
        fill_contours(&mut atlas, Rect::new(0, 0, 8, 8), &square);
        assert_eq!(lit_pixels(&atlas), 25);
        assert_eq!(atlas.get_pixel(3, 3), Some(Color::WHITE));
        assert_eq!(atlas.get_pixel(0, 0), Some(Color::TRANSPARENT));
    }
}
