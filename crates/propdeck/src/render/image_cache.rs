use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use eframe::egui;
use log::warn;

/// Path-keyed texture cache for consultant photos. Failed loads are cached
/// too, so a missing file is only reported once.
pub struct ImageCache {
    base_path: PathBuf,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: RefCell::new(HashMap::new()),
        }
    }

    pub fn get(&self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.borrow().get(path) {
            return cached.clone();
        }
        let loaded = self.load(ctx, path);
        self.textures
            .borrow_mut()
            .insert(path.to_string(), loaded.clone());
        loaded
    }

    fn load(&self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        let full_path = if std::path::Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_path.join(path)
        };
        let bytes = match std::fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("could not read photo {}: {err}", full_path.display());
                return None;
            }
        };
        let image = match image::load_from_memory(&bytes) {
            Ok(image) => image.into_rgba8(),
            Err(err) => {
                warn!("could not decode photo {}: {err}", full_path.display());
                return None;
            }
        };
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        Some(ctx.load_texture(path.to_string(), color_image, egui::TextureOptions::LINEAR))
    }
}
