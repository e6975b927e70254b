//! Crate error type
//!
//! Hard failures only (I/O, decode, bad formats). Content-asset load
//! paths that follow the degrade-don't-crash policy log a diagnostic and
//! return an empty object instead of an `Err` — see `Image::load_or_empty`
//! and `Font::from_file`.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("sheet descriptor error: {0}")]
    Descriptor(#[from] serde_json::Error),
}

impl Error {
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}
