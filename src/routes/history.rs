use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{HistoryRecord, NewHistoryEntry};
use crate::schema::{history, schedules};

#[derive(Debug, Deserialize)]
pub struct NewHistoryBody {
    pub schedule_id: i32,
}

/// Completed feeds joined with their schedule, most recent first. Entries
/// whose schedule was deleted still appear, with null schedule fields.
#[get("/history")]
pub async fn list_history(pool: &State<DbPool>) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let mut conn = pool.get()?;

    let rows = history::table
        .left_join(
            schedules::table
                .on(schedules::schedule_id.nullable().eq(history::schedule_id)),
        )
        .order(history::created_at.desc())
        .select((
            history::history_id,
            history::created_at,
            history::schedule_id,
            schedules::module_id.nullable(),
            schedules::feed_time.nullable(),
            schedules::amount.nullable(),
            schedules::status.nullable(),
        ))
        .load::<HistoryRecord>(&mut conn)?;

    Ok(Json(rows))
}

/// Manual history insert, for data correction only; the dispatch engine is
/// the normal writer.
#[post("/history", data = "<body>")]
pub async fn add_history(
    pool: &State<DbPool>,
    body: Json<NewHistoryBody>,
) -> Result<Json<Value>, ApiError> {
    let mut conn = pool.get()?;
    diesel::insert_into(history::table)
        .values(NewHistoryEntry::for_schedule(body.schedule_id))
        .execute(&mut conn)?;

    Ok(Json(json!({ "success": true })))
}

/// Remove a history entry
#[delete("/history/<entry>")]
pub async fn delete_history(pool: &State<DbPool>, entry: i32) -> Result<Json<Value>, ApiError> {
    let mut conn = pool.get()?;
    diesel::delete(history::table.filter(history::history_id.eq(entry))).execute(&mut conn)?;
    Ok(Json(json!({ "success": true })))
}
