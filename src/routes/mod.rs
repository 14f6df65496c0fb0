use rocket::{Route, routes};

pub mod cameras;
pub mod catchers;
pub mod device;
pub mod history;
pub mod modules;
pub mod pages;
pub mod schedules;
pub mod snapshots;

/// Device-facing routes (ESP32 feeders and cams)
pub fn device_routes() -> Vec<Route> {
    routes![
        device::health,
        device::check_schedule,
        device::complete_schedule,
        device::weight_update,
        device::upload_image,
    ]
}

/// Administrative CRUD routes
pub fn admin_routes() -> Vec<Route> {
    routes![
        // Cameras
        cameras::list_cameras,
        cameras::add_camera,
        cameras::update_camera,
        cameras::delete_camera,
        // Modules
        modules::list_modules,
        modules::add_module,
        modules::update_module,
        modules::delete_module,
        // Schedules
        schedules::list_schedules,
        schedules::add_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        // History
        history::list_history,
        history::add_history,
        history::delete_history,
    ]
}

/// Snapshot listing/deletion API, mounted under /api
pub fn snapshot_api_routes() -> Vec<Route> {
    routes![
        snapshots::list_snapshots,
        snapshots::camera_snapshots,
        snapshots::delete_snapshot,
    ]
}

/// Static pages and raw snapshot files
pub fn page_routes() -> Vec<Route> {
    routes![
        pages::index,
        pages::module_page,
        pages::schedule_page,
        pages::history_page,
        pages::feeders_page,
        pages::camera_page,
        snapshots::serve_snapshot,
    ]
}
