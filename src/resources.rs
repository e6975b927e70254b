//! Path-keyed caches for loaded images and baked fonts
//!
//! `ResourceManager` is an explicit cache object rather than hidden
//! static state: construct one, inject it where loading happens, call
//! `clear` when deterministic teardown matters. There is no automatic
//! eviction. The manager itself is not synchronized; share it across
//! threads only behind external locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::font::Font;
use crate::image::Image;

#[derive(Debug, Default)]
pub struct ResourceManager {
    images: HashMap<PathBuf, Arc<Image>>,
    // Fonts are keyed by (path, baked size bits) so the same file baked
    // at two sizes yields two atlas entries
    fonts: HashMap<(PathBuf, u32), Arc<Font>>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image once and share it. Failed loads are cached too (as
    /// empty images), so a missing file logs a single diagnostic rather
    /// than one per frame.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Arc<Image> {
        let path = path.as_ref();
        if let Some(cached) = self.images.get(path) {
            return Arc::clone(cached);
        }
        let loaded = Arc::new(Image::load_or_empty(path));
        self.images.insert(path.to_path_buf(), Arc::clone(&loaded));
        loaded
    }

    /// Bake a font once per (path, size) and share it
    pub fn load_font(&mut self, path: impl AsRef<Path>, size: f32) -> Arc<Font> {
        let key = (path.as_ref().to_path_buf(), size.to_bits());
        if let Some(cached) = self.fonts.get(&key) {
            return Arc::clone(cached);
        }
        let baked = Arc::new(Font::from_file(&key.0, size));
        self.fonts.insert(key, Arc::clone(&baked));
        baked
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Drop every cached entry. Resources still referenced elsewhere
    /// stay alive through their own handles.
    pub fn clear(&mut self) {
        self.images.clear();
        self.fonts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_cache_shares_one_load() {
        let mut resources = ResourceManager::new();
        let a = resources.load_image("/nonexistent/sprite.png");
        let b = resources.load_image("/nonexistent/sprite.png");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(resources.image_count(), 1);
        // Missing file degrades to an empty image
        assert!(a.is_empty());
    }

    #[test]
    fn test_font_keyed_by_path_and_size() {
        let mut resources = ResourceManager::new();
        let a = resources.load_font("/nonexistent/font.ttf", 16.0);
        let b = resources.load_font("/nonexistent/font.ttf", 16.0);
        let c = resources.load_font("/nonexistent/font.ttf", 32.0);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(resources.font_count(), 2);
    }

    #[test]
    fn test_clear_keeps_outstanding_handles_alive() {
        let mut resources = ResourceManager::new();
        let held = resources.load_image("/nonexistent/bg.png");
        resources.clear();
        assert_eq!(resources.image_count(), 0);
        assert!(held.is_empty());
    }
}
