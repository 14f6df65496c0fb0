//! Device telemetry validation: weight readings from feeders and the camera
//! precondition for image uploads. Telemetry never registers devices; an
//! unknown module or camera is rejected.

use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::DeviceStatus;

/// Scale ceiling, grams. Readings above this are sensor garbage.
pub const MAX_WEIGHT_GRAMS: f64 = 10_000.0;

/// Parse and range-check a raw weight field.
pub fn parse_weight(raw: &str) -> Result<f64, ApiError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidInput("Weight must be a number".to_string()))?;

    if !value.is_finite() || !(0.0..=MAX_WEIGHT_GRAMS).contains(&value) {
        return Err(ApiError::InvalidInput("Invalid weight value".to_string()));
    }
    Ok(value)
}

/// Store a weight reading for a registered module. A reading is evidence of
/// liveness, so the module is forced back to active.
pub fn record_weight(conn: &mut SqliteConnection, module: &str, grams: f64) -> Result<(), ApiError> {
    use crate::schema::modules::dsl::*;

    let registered = modules
        .filter(module_id.eq(module))
        .select(module_id)
        .first::<String>(conn)
        .optional()?;

    if registered.is_none() {
        return Err(ApiError::NotRegistered);
    }

    diesel::update(modules.filter(module_id.eq(module)))
        .set((
            weight.eq(Some(grams)),
            status.eq(DeviceStatus::Active.as_str()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Upload precondition: the camera must be registered and active.
pub fn require_active_camera(conn: &mut SqliteConnection, camera: &str) -> Result<(), ApiError> {
    use crate::schema::cameras::dsl::*;

    cameras
        .filter(cam_id.eq(camera))
        .filter(status.eq(DeviceStatus::Active.as_str()))
        .select(cam_id)
        .first::<String>(conn)
        .optional()?
        .map(|_| ())
        .ok_or(ApiError::NotFoundOrInactive("camera_id"))
}

#[cfg(test)]
mod tests {
    use diesel_migrations::MigrationHarness;

    use super::*;
    use crate::db::MIGRATIONS;
    use crate::models::Module;
    use crate::schema::{cameras, modules};

    fn test_conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        conn
    }

    fn seed_module(conn: &mut SqliteConnection, id: &str, state: &str) {
        diesel::insert_into(modules::table)
            .values((
                modules::module_id.eq(id),
                modules::cam_id.eq("cam-1"),
                modules::status.eq(state),
            ))
            .execute(conn)
            .unwrap();
    }

    #[test]
    fn weight_parsing_enforces_range() {
        assert_eq!(parse_weight("50").unwrap(), 50.0);
        assert_eq!(parse_weight(" 0 ").unwrap(), 0.0);
        assert_eq!(parse_weight("10000").unwrap(), 10_000.0);

        for bad in ["15000", "-1", "abc", "NaN", "inf", ""] {
            assert!(
                matches!(parse_weight(bad), Err(ApiError::InvalidInput(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn unregistered_module_is_rejected() {
        let mut conn = test_conn();
        let err = record_weight(&mut conn, "ghost", 50.0).unwrap_err();
        assert!(matches!(err, ApiError::NotRegistered));
    }

    #[test]
    fn accepted_reading_updates_weight_and_revives_module() {
        let mut conn = test_conn();
        seed_module(&mut conn, "m1", "inactive");

        record_weight(&mut conn, "m1", 42.5).unwrap();

        let row: Module = modules::table
            .find("m1")
            .select(Module::as_select())
            .first(&mut conn)
            .unwrap();
        assert_eq!(row.weight, Some(42.5));
        assert_eq!(row.status, "active");
    }

    #[test]
    fn camera_precondition_requires_active_row() {
        let mut conn = test_conn();
        diesel::insert_into(cameras::table)
            .values((cameras::cam_id.eq("c1"), cameras::status.eq("inactive")))
            .execute(&mut conn)
            .unwrap();

        assert!(matches!(
            require_active_camera(&mut conn, "c1"),
            Err(ApiError::NotFoundOrInactive(_))
        ));
        assert!(matches!(
            require_active_camera(&mut conn, "ghost"),
            Err(ApiError::NotFoundOrInactive(_))
        ));

        diesel::update(cameras::table.find("c1"))
            .set(cameras::status.eq("active"))
            .execute(&mut conn)
            .unwrap();
        assert!(require_active_camera(&mut conn, "c1").is_ok());
    }
}
