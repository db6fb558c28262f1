use anyhow::{Context, Result};
use dressing_room::{Config, JsonStore};
use image::imageops::FilterType;
use image::ImageReader;
use std::fs;
use std::path::Path;

/// Decoded RGBA pixels at the requested size
pub struct SpritePixels {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

pub fn open_store(config: &Config) -> Result<JsonStore> {
    let path = config.store_path()?;
    let store = JsonStore::open(&path).with_context(|| format!("open store {}", path.display()))?;
    Ok(store)
}

/// Decode an image file and scale it to exactly `width` x `height`
pub fn load_sprite(path: &Path, width: u32, height: u32) -> Result<SpritePixels> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    let scaled = image.resize_exact(width.max(1), height.max(1), FilterType::Triangle);
    Ok(SpritePixels {
        size: [scaled.width() as usize, scaled.height() as usize],
        pixels: scaled.to_rgba8().into_raw(),
    })
}

/// Avatar image paths (relative to the asset root), sorted
pub fn list_avatars(config: &Config) -> Vec<String> {
    let dir = config.resolve_asset("assets/avatars");
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut avatars: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.ends_with(".png") || lower.ends_with(".jpg") || lower.ends_with(".jpeg")
        })
        .map(|name| format!("assets/avatars/{name}"))
        .collect();
    avatars.sort();
    avatars
}
