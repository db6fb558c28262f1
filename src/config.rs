use crate::error::{DressingError, Result};
use dressing_core::gallery::GalleryLayout;
use dressing_core::{ScreenLayout, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the catalog and the users
    pub store_path: Option<PathBuf>,
    /// Directory asset paths are resolved against
    pub asset_root: PathBuf,
    pub window_width: u32,
    pub window_height: u32,
    pub gallery_columns: u32,
    pub thumb_size: u32,
    pub scroll_step: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            asset_root: PathBuf::from("."),
            window_width: 1024,
            window_height: 640,
            gallery_columns: 1,
            thumb_size: 280,
            scroll_step: 40,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| DressingError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("dressing-room"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Configured store file, or `store.json` next to the config
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("store.json")),
        }
    }

    pub fn resolve_asset(&self, asset: &str) -> PathBuf {
        let path = Path::new(asset);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        }
    }

    pub fn screen_layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.window_width as f32, self.window_height as f32)
    }

    pub fn gallery_layout(&self) -> GalleryLayout {
        let thumb = self.thumb_size.max(1) as f32;
        GalleryLayout {
            columns: self.gallery_columns.max(1),
            thumb: Size::new(thumb, thumb),
            ..GalleryLayout::default()
        }
    }

    pub fn set_store_path(&mut self, path: PathBuf) -> Result<()> {
        self.store_path = Some(path);
        self.save()
    }

    pub fn set_asset_root(&mut self, path: PathBuf) -> Result<()> {
        self.asset_root = path;
        self.save()
    }

    pub fn set_gallery_columns(&mut self, columns: u32) -> Result<()> {
        if columns == 0 {
            return Err(DressingError::Config("gallery needs at least one column".into()));
        }
        self.gallery_columns = columns;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.screen_layout(), ScreenLayout::new(1024.0, 640.0));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "gallery_columns": 2, "thumb_size": 140 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.window_width, 1024);
        let layout = config.gallery_layout();
        assert_eq!(layout.columns, 2);
        assert_eq!(layout.thumb, Size::new(140.0, 140.0));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            asset_root: PathBuf::from("/srv/dressing"),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_asset() {
        let config = Config {
            asset_root: PathBuf::from("/srv/dressing"),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_asset("assets/tops/tee.png"),
            PathBuf::from("/srv/dressing/assets/tops/tee.png")
        );
    }
}
