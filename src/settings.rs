use std::env;
use std::path::PathBuf;

/// Server configuration, read once at startup. Tests construct this
/// directly with temp paths instead of going through the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub images_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "instance/feeder.db".to_string()),
            images_dir: env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("instance/images")),
            templates_dir: env::var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("templates")),
        }
    }
}
