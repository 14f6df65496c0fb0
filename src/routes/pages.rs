use rocket::fs::NamedFile;
use rocket::{State, get};

use crate::settings::AppConfig;

#[get("/")]
pub async fn index(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("index.html")).await.ok()
}

#[get("/module.html")]
pub async fn module_page(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("module.html")).await.ok()
}

#[get("/schedule.html")]
pub async fn schedule_page(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("schedule.html")).await.ok()
}

#[get("/history.html")]
pub async fn history_page(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("history.html")).await.ok()
}

#[get("/feeders.html")]
pub async fn feeders_page(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("feeders.html")).await.ok()
}

#[get("/camera.html")]
pub async fn camera_page(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.templates_dir.join("camera.html")).await.ok()
}
