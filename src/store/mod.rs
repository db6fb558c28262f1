//! JSON file persistence
//!
//! One file holds the catalog and the users. A missing file is created from
//! the built-in seed catalog on first open.

mod password;

pub use password::{hash_password, verify_password};

use crate::error::{DressingError, Result};
use dressing_core::account::{NewUser, UserStore};
use dressing_core::{AccountError, Catalog, CatalogStore, Category, CategoryId, CharacterModel, Garment, Profile, UserId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SEED_CATALOG: &str = include_str!("seed_catalog.json");

/// A stored user; never leaves the store as-is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(alias = "avatar_path")]
    pub avatar: String,
    pub password_hash: String,
    #[serde(default)]
    pub created_at: String,
}

impl UserRecord {
    fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub garments: Vec<Garment>,
    #[serde(default)]
    pub models: Vec<CharacterModel>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl StoreFile {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn seed() -> Result<Self> {
        Ok(serde_json::from_str(SEED_CATALOG)?)
    }
}

pub struct JsonStore {
    path: PathBuf,
    data: StoreFile,
}

impl JsonStore {
    /// Open the store, creating a seeded file when there is none
    pub fn open(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::open_existing(path);
        }
        let store = Self {
            path: path.to_path_buf(),
            data: StoreFile::seed()?,
        };
        store.save()?;
        info!(path = %path.display(), "created seeded store");
        Ok(store)
    }

    /// Open a store that must already exist
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DressingError::StoreNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        let data: StoreFile = serde_json::from_reader(BufReader::new(file))?;
        if data.version != StoreFile::CURRENT_VERSION {
            warn!(
                version = data.version,
                expected = StoreFile::CURRENT_VERSION,
                "store version mismatch, reading anyway"
            );
        }
        debug!(
            path = %path.display(),
            categories = data.categories.len(),
            garments = data.garments.len(),
            users = data.users.len(),
            "store opened"
        );
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreFile {
        &self.data
    }

    pub fn user_count(&self) -> usize {
        self.data.users.len()
    }

    /// Snapshot for a dressing session
    pub fn catalog(&self) -> Catalog {
        Catalog::load(self)
    }

    /// Write through a temporary file so a crash never leaves half a store
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp)?;
            serde_json::to_writer_pretty(BufWriter::new(file), &self.data)?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn find_user(&self, username: &str) -> Option<&UserRecord> {
        self.data.users.iter().find(|user| user.username == username)
    }
}

impl CatalogStore for JsonStore {
    fn categories(&self) -> dressing_core::Result<Vec<Category>> {
        Ok(self.data.categories.clone())
    }

    fn garments(&self, category: CategoryId) -> dressing_core::Result<Vec<Garment>> {
        Ok(self
            .data
            .garments
            .iter()
            .filter(|garment| garment.category_id == category)
            .cloned()
            .collect())
    }

    fn character_models(&self) -> dressing_core::Result<Vec<CharacterModel>> {
        Ok(self.data.models.clone())
    }
}

impl UserStore for JsonStore {
    fn authenticate(&self, username: &str, password: &str) -> std::result::Result<Profile, AccountError> {
        let user = self.find_user(username.trim()).ok_or(AccountError::UnknownUser)?;
        if !verify_password(password, &user.password_hash) {
            debug!(username = %user.username, "wrong password");
            return Err(AccountError::WrongPassword);
        }
        info!(username = %user.username, "user signed in");
        Ok(user.profile())
    }

    fn create_user(&mut self, user: NewUser) -> std::result::Result<Profile, AccountError> {
        let user = user.validate()?;
        if self.find_user(&user.username).is_some() {
            return Err(AccountError::UsernameTaken);
        }

        let password_hash = hash_password(&user.password).map_err(|err| AccountError::Store(err.to_string()))?;
        let id = self.data.users.iter().map(|record| record.id.0).max().unwrap_or(0) + 1;
        let record = UserRecord {
            id: UserId(id),
            username: user.username,
            display_name: user.display_name,
            avatar: user.avatar.unwrap_or_else(|| dressing_core::DEFAULT_AVATAR.to_string()),
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let profile = record.profile();
        self.data.users.push(record);

        if let Err(err) = self.save() {
            self.data.users.pop();
            return Err(AccountError::Store(err.to_string()));
        }
        info!(username = %profile.username, "user registered");
        Ok(profile)
    }
}
