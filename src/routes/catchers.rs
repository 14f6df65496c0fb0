use rocket::catch;
use rocket::serde::json::Json;
use serde_json::{Value, json};

#[catch(404)]
pub fn not_found() -> Json<Value> {
    Json(json!({ "error": "Not found" }))
}

/// Rocket reports JSON syntax errors as 400 and shape mismatches as 422;
/// keep both bodies consistent with the API's other errors.
#[catch(400)]
pub fn bad_request() -> Json<Value> {
    Json(json!({ "error": "Malformed request" }))
}

#[catch(422)]
pub fn unprocessable() -> Json<Value> {
    Json(json!({ "error": "Malformed request body" }))
}

#[catch(500)]
pub fn internal_error() -> Json<Value> {
    Json(json!({ "error": "Internal server error" }))
}
