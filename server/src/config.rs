use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from the environment with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on (`PORT`, default 3000).
    pub port: u16,
    /// Directory holding the recipe store file (`COOKBOOK_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Directory holding uploaded images (`COOKBOOK_UPLOADS_DIR`).
    pub uploads_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let data_dir = env::var("COOKBOOK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let uploads_dir = env::var("COOKBOOK_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self {
            port,
            data_dir,
            uploads_dir,
        }
    }
}
