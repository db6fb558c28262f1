use thiserror::Error;

#[derive(Error, Debug)]
pub enum DressingError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Store file not found: {0}. Run `dressing-room register` to create it")]
    StoreNotFound(String),

    #[error("Invalid replay script: {0}")]
    Script(String),

    #[error("Unknown theme: {0} (expected one of casual, soiree, colorful, chic)")]
    UnknownTheme(String),

    #[error("Unknown garment id: {0}")]
    UnknownGarment(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] dressing_core::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl From<dressing_core::AccountError> for DressingError {
    fn from(err: dressing_core::AccountError) -> Self {
        DressingError::Core(err.into())
    }
}

impl From<dialoguer::Error> for DressingError {
    fn from(err: dialoguer::Error) -> Self {
        DressingError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DressingError>;
