use rocket::fs::NamedFile;
use rocket::serde::json::Json;
use rocket::{State, delete, get};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::snapshots::SnapshotStore;

/// List all stored snapshots, newest first
#[get("/snapshots")]
pub async fn list_snapshots(store: &State<SnapshotStore>) -> Result<Json<Value>, ApiError> {
    let images = store.list()?;
    Ok(Json(json!({ "success": true, "images": images })))
}

/// List snapshots taken by one camera
#[get("/snapshots/<camera>")]
pub async fn camera_snapshots(
    store: &State<SnapshotStore>,
    camera: &str,
) -> Result<Json<Value>, ApiError> {
    let images = store.list_for_camera(camera)?;
    Ok(Json(json!({ "success": true, "cam_id": camera, "images": images })))
}

/// Delete one snapshot by filename
#[delete("/snapshots/<filename>")]
pub async fn delete_snapshot(
    store: &State<SnapshotStore>,
    filename: &str,
) -> Result<Json<Value>, ApiError> {
    store.delete(filename)?;
    log::info!("Deleted image: {filename}");

    Ok(Json(json!({
        "success": true,
        "message": format!("Image {filename} deleted successfully"),
    })))
}

/// Serve a stored snapshot image (mounted at the root, not under /api)
#[get("/snapshots/<filename>")]
pub async fn serve_snapshot(
    store: &State<SnapshotStore>,
    filename: &str,
) -> Result<NamedFile, ApiError> {
    let path = store.path_for(filename)?;
    NamedFile::open(path)
        .await
        .map_err(|_| ApiError::NotFound("File"))
}
