//! Endpoints the ESP32 feeders and cams talk to. These take form-encoded
//! bodies (the firmware posts forms, not JSON) and do all validation before
//! touching the store.

use chrono::Utc;
use rocket::form::{Form, FromForm};
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use serde_json::{Value, json};

use crate::db::DbPool;
use crate::dispatch;
use crate::error::ApiError;
use crate::snapshots::SnapshotStore;
use crate::telemetry;

/// mDNS/health check endpoint for devices
#[get("/health")]
pub fn health() -> &'static str {
    "mDNS OK"
}

fn required(field: &Option<String>, name: &'static str) -> Result<String, ApiError> {
    match field.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::MissingField(name)),
    }
}

#[derive(FromForm)]
pub struct CheckScheduleForm {
    pub module_id: Option<String>,
}

/// Check whether a module should dispense food now. Read-only: the same due
/// schedule is reported until the device confirms completion.
#[post("/check_schedule", data = "<form>")]
pub async fn check_schedule(
    pool: &State<DbPool>,
    form: Form<CheckScheduleForm>,
) -> Result<Json<Value>, ApiError> {
    let module = required(&form.module_id, "module_id")?;
    let mut conn = pool.get()?;

    dispatch::require_active_module(&mut conn, &module)?;

    let now = dispatch::current_feed_time();
    match dispatch::find_due_schedule(&mut conn, &module, &now)? {
        Some(due) => Ok(Json(json!({
            "dispense": true,
            "amount": due.amount,
            "schedule_id": due.schedule_id,
            "scheduled_time": due.scheduled_time,
        }))),
        None => Ok(Json(json!({ "dispense": false }))),
    }
}

#[derive(FromForm)]
pub struct CompleteScheduleForm {
    pub schedule_id: Option<String>,
    pub module_id: Option<String>,
}

/// Mark a schedule as done and add it to history
#[post("/complete_schedule", data = "<form>")]
pub async fn complete_schedule(
    pool: &State<DbPool>,
    form: Form<CompleteScheduleForm>,
) -> Result<Json<Value>, ApiError> {
    let raw = required(&form.schedule_id, "schedule_id")?;
    let sid: i32 = raw
        .parse()
        .map_err(|_| ApiError::InvalidInput("schedule_id must be an integer".to_string()))?;
    let module = form
        .module_id
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let mut conn = pool.get()?;
    let owner = dispatch::complete_dispatch(&mut conn, sid, module)?;

    log::info!("Schedule {sid} completed by module {owner}");

    Ok(Json(json!({
        "success": true,
        "message": "Schedule completed successfully",
        "schedule_id": sid,
    })))
}

#[derive(FromForm)]
pub struct WeightUpdateForm {
    pub module_id: Option<String>,
    pub weight: Option<String>,
}

/// Store a weight reading from a feeder's scale
#[post("/weight_update", data = "<form>")]
pub async fn weight_update(
    pool: &State<DbPool>,
    form: Form<WeightUpdateForm>,
) -> Result<Json<Value>, ApiError> {
    let module = required(&form.module_id, "module_id")?;
    let raw = form
        .weight
        .as_deref()
        .ok_or(ApiError::MissingField("weight"))?;
    let grams = telemetry::parse_weight(raw)?;

    let mut conn = pool.get()?;
    telemetry::record_weight(&mut conn, &module, grams)?;

    log::info!("Weight update - Device: {module}, Weight: {grams}g");

    Ok(Json(json!({
        "success": true,
        "message": format!("Weight updated for {module}: {grams}g"),
    })))
}

#[derive(FromForm)]
pub struct UploadImageForm<'r> {
    pub camera_id: Option<String>,
    pub image: Option<TempFile<'r>>,
}

/// Receive a snapshot from an ESP32-CAM
#[post("/upload_image", data = "<form>")]
pub async fn upload_image(
    pool: &State<DbPool>,
    store: &State<SnapshotStore>,
    mut form: Form<UploadImageForm<'_>>,
) -> Result<Json<Value>, ApiError> {
    let camera = required(&form.camera_id, "camera_id")?;

    {
        let mut conn = pool.get()?;
        telemetry::require_active_camera(&mut conn, &camera)?;
    }

    let image = form
        .image
        .as_mut()
        .filter(|file| file.len() > 0)
        .ok_or(ApiError::MissingData)?;

    let filename = format!("{camera}_{}.jpg", Utc::now().timestamp());
    let path = store.path_for(&filename)?;
    store.ensure_root()?;
    image.copy_to(&path).await?;
    let size = image.len();

    log::info!("Saved: {filename}, Size: {size} bytes, Camera: {camera}");

    Ok(Json(json!({
        "success": true,
        "filename": filename,
        "size": size,
        "camera_id": camera,
    })))
}
