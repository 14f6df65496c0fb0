use std::fs;
use std::path::Path;

use rocket::{Build, Rocket, catchers};

pub mod db;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod snapshots;
pub mod telemetry;

use crate::settings::AppConfig;
use crate::snapshots::SnapshotStore;

/// Build the server: connection pool, embedded migrations, managed state,
/// routes and catchers. Separate from the launcher so the integration tests
/// can drive the whole stack in-process.
pub fn rocket(config: AppConfig) -> Rocket<Build> {
    if let Some(dir) = Path::new(&config.database_url).parent() {
        if !dir.as_os_str().is_empty() {
            let _ = fs::create_dir_all(dir);
        }
    }

    let pool = db::init_pool(&config.database_url);
    db::run_migrations(&pool);

    let store = SnapshotStore::new(config.images_dir.clone());

    rocket::build()
        .manage(pool)
        .manage(store)
        .manage(config)
        .mount("/", routes::device_routes())
        .mount("/", routes::admin_routes())
        .mount("/", routes::page_routes())
        .mount("/api", routes::snapshot_api_routes())
        .register(
            "/",
            catchers![
                routes::catchers::bad_request,
                routes::catchers::not_found,
                routes::catchers::unprocessable,
                routes::catchers::internal_error,
            ],
        )
}
