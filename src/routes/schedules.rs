use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{self, Schedule, ScheduleStatus};
use crate::schema::schedules::dsl::*;

#[derive(Debug, Deserialize)]
pub struct NewScheduleBody {
    pub module_id: String,
    pub feed_time: String,
    pub amount: f64,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScheduleBody {
    pub module_id: String,
    pub feed_time: String,
    pub amount: f64,
    pub status: String,
}

/// List all schedules
#[get("/schedules")]
pub async fn list_schedules(pool: &State<DbPool>) -> Result<Json<Vec<Schedule>>, ApiError> {
    let mut conn = pool.get()?;
    let rows = schedules.select(Schedule::as_select()).load(&mut conn)?;
    Ok(Json(rows))
}

/// Create a feed schedule, pending unless the body says otherwise
#[post("/schedules", data = "<body>")]
pub async fn add_schedule(
    pool: &State<DbPool>,
    body: Json<NewScheduleBody>,
) -> Result<Json<Value>, ApiError> {
    models::validate_feed_time(&body.feed_time)?;
    let state = match &body.status {
        Some(s) => models::schedule_status(s)?,
        None => ScheduleStatus::Pending,
    };

    let mut conn = pool.get()?;
    diesel::insert_into(schedules)
        .values((
            module_id.eq(&body.module_id),
            feed_time.eq(&body.feed_time),
            amount.eq(body.amount),
            status.eq(state.as_str()),
        ))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Overwrite a schedule. This is also the re-arm path: putting a `done`
/// schedule back to `pending` makes it due again.
#[put("/schedules/<schedule>", data = "<body>")]
pub async fn update_schedule(
    pool: &State<DbPool>,
    schedule: i32,
    body: Json<UpdateScheduleBody>,
) -> Result<Json<Value>, ApiError> {
    models::validate_feed_time(&body.feed_time)?;
    let state = models::schedule_status(&body.status)?;

    let mut conn = pool.get()?;
    diesel::update(schedules.filter(schedule_id.eq(schedule)))
        .set((
            module_id.eq(&body.module_id),
            feed_time.eq(&body.feed_time),
            amount.eq(body.amount),
            status.eq(state.as_str()),
        ))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Remove a schedule
#[delete("/schedules/<schedule>")]
pub async fn delete_schedule(pool: &State<DbPool>, schedule: i32) -> Result<Json<Value>, ApiError> {
    let mut conn = pool.get()?;
    diesel::delete(schedules.filter(schedule_id.eq(schedule))).execute(&mut conn)?;
    Ok(Json(json!({ "success": true })))
}
