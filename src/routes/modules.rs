use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{self, Module};
use crate::schema::modules::dsl::*;

#[derive(Debug, Deserialize)]
pub struct ModuleBody {
    pub cam_id: String,
    pub status: String,
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NewModuleBody {
    pub module_id: String,
    pub cam_id: String,
    pub status: String,
    pub weight: Option<f64>,
}

/// List all feeder modules
#[get("/modules")]
pub async fn list_modules(pool: &State<DbPool>) -> Result<Json<Vec<Module>>, ApiError> {
    let mut conn = pool.get()?;
    let rows = modules.select(Module::as_select()).load(&mut conn)?;
    Ok(Json(rows))
}

/// Register a feeder module. Devices never self-register; this is the only
/// way a module comes into existence.
#[post("/modules", data = "<body>")]
pub async fn add_module(
    pool: &State<DbPool>,
    body: Json<NewModuleBody>,
) -> Result<Json<Value>, ApiError> {
    let state = models::device_status(&body.status)?;

    let mut conn = pool.get()?;
    diesel::insert_into(modules)
        .values((
            module_id.eq(&body.module_id),
            cam_id.eq(&body.cam_id),
            status.eq(state.as_str()),
            weight.eq(body.weight),
        ))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Overwrite a module's camera pairing, status and weight
#[put("/modules/<module>", data = "<body>")]
pub async fn update_module(
    pool: &State<DbPool>,
    module: &str,
    body: Json<ModuleBody>,
) -> Result<Json<Value>, ApiError> {
    let state = models::device_status(&body.status)?;

    let mut conn = pool.get()?;
    diesel::update(modules.filter(module_id.eq(module)))
        .set((
            cam_id.eq(&body.cam_id),
            status.eq(state.as_str()),
            weight.eq(body.weight),
        ))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Remove a module
#[delete("/modules/<module>")]
pub async fn delete_module(pool: &State<DbPool>, module: &str) -> Result<Json<Value>, ApiError> {
    let mut conn = pool.get()?;
    diesel::delete(modules.filter(module_id.eq(module))).execute(&mut conn)?;
    Ok(Json(json!({ "success": true })))
}
