use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::schema::{cameras, history, modules, schedules};

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = cameras)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Camera {
    pub cam_id: String,
    pub status: String,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = modules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Module {
    pub module_id: String,
    pub cam_id: String,
    pub status: String,
    pub weight: Option<f64>,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Schedule {
    pub schedule_id: i32,
    pub module_id: String,
    pub feed_time: String,
    pub amount: f64,
    pub status: String,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryEntry {
    pub history_id: i32,
    pub schedule_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = history)]
pub struct NewHistoryEntry {
    pub schedule_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl NewHistoryEntry {
    pub fn for_schedule(schedule_id: i32) -> Self {
        Self {
            schedule_id: Some(schedule_id),
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// History row joined with its schedule. Schedule fields are null when the
/// schedule was deleted after completion.
#[derive(Queryable, Serialize, Debug)]
pub struct HistoryRecord {
    pub history_id: i32,
    pub created_at: NaiveDateTime,
    pub schedule_id: Option<i32>,
    pub module_id: Option<String>,
    pub feed_time: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

/// Camera/module liveness status. Stored as text but the API only accepts
/// these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Active,
    Inactive,
}

impl DeviceStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Lifecycle of a feed schedule. `done` is terminal until an operator
/// re-arms the row through the schedule CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    Pending,
    Done,
}

impl ScheduleStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

pub fn device_status(s: &str) -> Result<DeviceStatus, ApiError> {
    DeviceStatus::parse(s).ok_or_else(|| ApiError::InvalidInput(format!("Unknown status '{s}'")))
}

pub fn schedule_status(s: &str) -> Result<ScheduleStatus, ApiError> {
    ScheduleStatus::parse(s).ok_or_else(|| ApiError::InvalidInput(format!("Unknown status '{s}'")))
}

/// Feed times must be zero-padded 24h `HH:MM`; the due lookup compares them
/// lexicographically, which is only correct for this shape.
pub fn validate_feed_time(s: &str) -> Result<(), ApiError> {
    let valid = s.len() == 5
        && s.as_bytes()[2] == b':'
        && s.get(..2).and_then(|h| h.parse::<u8>().ok()).is_some_and(|h| h < 24)
        && s.get(3..).and_then(|m| m.parse::<u8>().ok()).is_some_and(|m| m < 60);

    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "feed_time must be HH:MM, got '{s}'"
        )))
    }
}
