//! Color and blend-mode pipeline
//!
//! `Color` is a packed RGBA value with saturating component arithmetic.
//! `BlendMode` is the configurable factor/operation pipeline every draw
//! call routes through; `BlendMode::DISABLE` is the pass-through fast
//! path for opaque drawing.

// ============================================================================
// Color
// ============================================================================

/// RGBA color, one byte per channel.
///
/// All arithmetic is per-channel and clamps to [0, 255]. Multiplication by
/// another color uses integer `(a * b) / 255` semantics, matching the blend
/// pipeline below.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha = 255)
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpack from a 32-bit ARGB word (0xAARRGGBB)
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as u8,
            r: ((argb >> 16) & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            b: (argb & 0xFF) as u8,
        }
    }

    /// Pack into a 32-bit ARGB word (0xAARRGGBB)
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Construct from normalized floats. Values outside [0, 1] clamp.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(r), q(g), q(b), q(a))
    }

    /// Same color with a different alpha
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl std::ops::Add for Color {
    type Output = Self;

    /// Per-channel saturating add
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r.saturating_add(rhs.r),
            g: self.g.saturating_add(rhs.g),
            b: self.b.saturating_add(rhs.b),
            a: self.a.saturating_add(rhs.a),
        }
    }
}

impl std::ops::Sub for Color {
    type Output = Self;

    /// Per-channel saturating subtract
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            r: self.r.saturating_sub(rhs.r),
            g: self.g.saturating_sub(rhs.g),
            b: self.b.saturating_sub(rhs.b),
            a: self.a.saturating_sub(rhs.a),
        }
    }
}

impl std::ops::Mul for Color {
    type Output = Self;

    /// Per-channel `(a * b) / 255` with integer truncation
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let m = |a: u8, b: u8| ((a as u32 * b as u32) / 255) as u8;
        Self {
            r: m(self.r, rhs.r),
            g: m(self.g, rhs.g),
            b: m(self.b, rhs.b),
            a: m(self.a, rhs.a),
        }
    }
}

impl std::ops::Mul<f32> for Color {
    type Output = Self;

    /// Per-channel scale, clamped to [0, 255]
    #[inline]
    fn mul(self, s: f32) -> Self {
        let m = |c: u8| (c as f32 * s).clamp(0.0, 255.0) as u8;
        Self {
            r: m(self.r),
            g: m(self.g),
            b: m(self.b),
            a: m(self.a),
        }
    }
}

impl std::ops::Div<f32> for Color {
    type Output = Self;

    /// Per-channel scale by 1/s, clamped to [0, 255]. Division by zero
    /// saturates to 255 on non-zero channels.
    #[inline]
    fn div(self, s: f32) -> Self {
        let m = |c: u8| (c as f32 / s).clamp(0.0, 255.0) as u8;
        Self {
            r: m(self.r),
            g: m(self.g),
            b: m(self.b),
            a: m(self.a),
        }
    }
}

// ============================================================================
// Blend Mode
// ============================================================================

/// Per-channel scale term applied to the source or destination color
/// before the blend operation combines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    /// `min(src_a, 255 - dst_a)` for color channels, One for alpha
    SrcAlphaSat,
}

/// How the factored source and destination terms are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Configurable blend pipeline applied at `plot` time.
///
/// Color and alpha channels blend independently: each has its own
/// source factor, destination factor, and operation. When `enabled` is
/// false, `blend()` returns the source unchanged — the fast path for
/// opaque drawing.
///
/// All factor math uses integer-truncating `x * y / 255`, so results are
/// bit-exact across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendMode {
    pub enabled: bool,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub color_op: BlendOp,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub alpha_op: BlendOp,
}

impl BlendMode {
    /// Pass-through: destination is overwritten with the source.
    pub const DISABLE: Self = Self {
        enabled: false,
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
        color_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::Zero,
        alpha_op: BlendOp::Add,
    };

    /// Standard source-over alpha blending
    pub const ALPHA_BLEND: Self = Self {
        enabled: true,
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        color_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_op: BlendOp::Add,
    };

    /// Additive: dst += src * src_alpha, saturating
    pub const ADDITIVE_BLEND: Self = Self {
        enabled: true,
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::One,
        color_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::Zero,
        dst_alpha_factor: BlendFactor::One,
        alpha_op: BlendOp::Add,
    };

    /// Subtractive: dst -= src * src_alpha, clamping at zero
    pub const SUBTRACTIVE_BLEND: Self = Self {
        enabled: true,
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::One,
        color_op: BlendOp::ReverseSubtract,
        src_alpha_factor: BlendFactor::Zero,
        dst_alpha_factor: BlendFactor::One,
        alpha_op: BlendOp::Add,
    };

    /// Per-channel color weights (0-255) for a factor
    #[inline]
    fn color_weights(factor: BlendFactor, src: Color, dst: Color) -> [u32; 3] {
        match factor {
            BlendFactor::Zero => [0, 0, 0],
            BlendFactor::One => [255, 255, 255],
            BlendFactor::SrcColor => [src.r as u32, src.g as u32, src.b as u32],
            BlendFactor::OneMinusSrcColor => {
                [255 - src.r as u32, 255 - src.g as u32, 255 - src.b as u32]
            }
            BlendFactor::SrcAlpha => [src.a as u32; 3],
            BlendFactor::OneMinusSrcAlpha => [255 - src.a as u32; 3],
            BlendFactor::SrcAlphaSat => [(src.a as u32).min(255 - dst.a as u32); 3],
        }
    }

    /// Alpha weight (0-255) for a factor. SrcAlphaSat acts as One here.
    #[inline]
    fn alpha_weight(factor: BlendFactor, src: Color) -> u32 {
        match factor {
            BlendFactor::Zero => 0,
            BlendFactor::One | BlendFactor::SrcAlphaSat => 255,
            BlendFactor::SrcColor | BlendFactor::SrcAlpha => src.a as u32,
            BlendFactor::OneMinusSrcColor | BlendFactor::OneMinusSrcAlpha => 255 - src.a as u32,
        }
    }

    #[inline]
    fn combine(op: BlendOp, s: i32, d: i32) -> u8 {
        let v = match op {
            BlendOp::Add => s + d,
            BlendOp::Subtract => s - d,
            BlendOp::ReverseSubtract => d - s,
            BlendOp::Min => s.min(d),
            BlendOp::Max => s.max(d),
        };
        v.clamp(0, 255) as u8
    }

    /// Blend `src` into `dst`, returning the value to store.
    ///
    /// Disabled modes return `src` untouched without computing factors.
    #[inline]
    pub fn blend(&self, src: Color, dst: Color) -> Color {
        if !self.enabled {
            return src;
        }

        let sw = Self::color_weights(self.src_factor, src, dst);
        let dw = Self::color_weights(self.dst_factor, src, dst);

        let term = |c: u8, w: u32| (c as u32 * w / 255) as i32;
        let r = Self::combine(self.color_op, term(src.r, sw[0]), term(dst.r, dw[0]));
        let g = Self::combine(self.color_op, term(src.g, sw[1]), term(dst.g, dw[1]));
        let b = Self::combine(self.color_op, term(src.b, sw[2]), term(dst.b, dw[2]));

        let saw = Self::alpha_weight(self.src_alpha_factor, src);
        let daw = Self::alpha_weight(self.dst_alpha_factor, src);
        let a = Self::combine(self.alpha_op, term(src.a, saw), term(dst.a, daw));

        Color::new(r, g, b, a)
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::DISABLE
    }
}
