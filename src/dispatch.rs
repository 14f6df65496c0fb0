//! Schedule-dispatch protocol: feeders poll for a due schedule, dispense
//! locally, then confirm completion. Polling is read-only; the pending → done
//! transition happens only in [`complete_dispatch`], atomically with the
//! history insert.

use chrono::Local;
use diesel::prelude::*;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{DeviceStatus, NewHistoryEntry, Schedule, ScheduleStatus};
use crate::schema::{history, schedules};

/// Payload returned to a feeder that has a schedule to act on.
#[derive(Debug, Clone, Serialize)]
pub struct DueSchedule {
    pub schedule_id: i32,
    pub amount: f64,
    pub scheduled_time: String,
}

/// Server wall-clock time-of-day, zero-padded `HH:MM`.
pub fn current_feed_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Poll precondition: the module must be registered and active.
pub fn require_active_module(conn: &mut SqliteConnection, module: &str) -> Result<(), ApiError> {
    use crate::schema::modules::dsl::*;

    modules
        .filter(module_id.eq(module))
        .filter(status.eq(DeviceStatus::Active.as_str()))
        .select(module_id)
        .first::<String>(conn)
        .optional()?
        .map(|_| ())
        .ok_or(ApiError::NotFoundOrInactive("module_id"))
}

/// Earliest pending schedule for `module` whose feed time is at or before
/// `now`. Ties on feed time break by ascending schedule id so repeated polls
/// see the same row.
pub fn find_due_schedule(
    conn: &mut SqliteConnection,
    module: &str,
    now: &str,
) -> Result<Option<DueSchedule>, ApiError> {
    use crate::schema::schedules::dsl::*;

    let row = schedules
        .filter(module_id.eq(module))
        .filter(feed_time.le(now))
        .filter(status.eq(ScheduleStatus::Pending.as_str()))
        .order((feed_time.asc(), schedule_id.asc()))
        .select(Schedule::as_select())
        .first::<Schedule>(conn)
        .optional()?;

    Ok(row.map(|s| DueSchedule {
        schedule_id: s.schedule_id,
        amount: s.amount,
        scheduled_time: s.feed_time,
    }))
}

/// Mark a schedule done and append its history row in one transaction.
///
/// Preconditions, in order: the schedule must exist, must still be pending,
/// and when the caller supplied a module id it must match the owning module.
/// The done-transition is a guarded update on `status = 'pending'` inside an
/// immediate transaction, so two racing completions yield exactly one
/// success and one `AlreadyCompleted` — never two history rows.
///
/// Returns the owning module id.
pub fn complete_dispatch(
    conn: &mut SqliteConnection,
    sid: i32,
    module: Option<&str>,
) -> Result<String, ApiError> {
    conn.immediate_transaction(|conn| {
        let schedule = schedules::table
            .find(sid)
            .select(Schedule::as_select())
            .first::<Schedule>(conn)
            .optional()?
            .ok_or(ApiError::NotFound("Schedule"))?;

        if schedule.status == ScheduleStatus::Done.as_str() {
            return Err(ApiError::AlreadyCompleted);
        }

        if let Some(m) = module {
            if schedule.module_id != m {
                return Err(ApiError::ModuleMismatch);
            }
        }

        let updated = diesel::update(
            schedules::table
                .filter(schedules::schedule_id.eq(sid))
                .filter(schedules::status.eq(ScheduleStatus::Pending.as_str())),
        )
        .set(schedules::status.eq(ScheduleStatus::Done.as_str()))
        .execute(conn)?;

        if updated == 0 {
            return Err(ApiError::AlreadyCompleted);
        }

        diesel::insert_into(history::table)
            .values(NewHistoryEntry::for_schedule(sid))
            .execute(conn)?;

        Ok(schedule.module_id)
    })
}
