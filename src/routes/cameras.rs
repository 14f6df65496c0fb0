use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{self, Camera};
use crate::schema::cameras::dsl::*;

#[derive(Debug, Deserialize)]
pub struct NewCameraBody {
    pub cam_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCameraBody {
    pub status: String,
}

/// List all cameras
#[get("/cameras")]
pub async fn list_cameras(pool: &State<DbPool>) -> Result<Json<Vec<Camera>>, ApiError> {
    let mut conn = pool.get()?;
    let rows = cameras.select(Camera::as_select()).load(&mut conn)?;
    Ok(Json(rows))
}

/// Register a camera
#[post("/cameras", data = "<body>")]
pub async fn add_camera(
    pool: &State<DbPool>,
    body: Json<NewCameraBody>,
) -> Result<Json<Value>, ApiError> {
    let state = models::device_status(&body.status)?;

    let mut conn = pool.get()?;
    diesel::insert_into(cameras)
        .values((cam_id.eq(&body.cam_id), status.eq(state.as_str())))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Flip a camera's status
#[put("/cameras/<camera>", data = "<body>")]
pub async fn update_camera(
    pool: &State<DbPool>,
    camera: &str,
    body: Json<UpdateCameraBody>,
) -> Result<Json<Value>, ApiError> {
    let state = models::device_status(&body.status)?;

    let mut conn = pool.get()?;
    diesel::update(cameras.filter(cam_id.eq(camera)))
        .set(status.eq(state.as_str()))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Remove a camera
#[delete("/cameras/<camera>")]
pub async fn delete_camera(pool: &State<DbPool>, camera: &str) -> Result<Json<Value>, ApiError> {
    let mut conn = pool.get()?;
    diesel::delete(cameras.filter(cam_id.eq(camera))).execute(&mut conn)?;
    Ok(Json(json!({ "success": true })))
}
