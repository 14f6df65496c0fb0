use rocket::Request;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde_json::json;
use thiserror::Error;

/// Every failure the API can report. Validation errors keep their own
/// variants so handlers can reject a request before touching the store;
/// store and I/O failures fold into opaque 500s.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing {0}")]
    MissingField(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid or inactive {0}")]
    NotFoundOrInactive(&'static str),
    #[error("Module not registered. Please register module first.")]
    NotRegistered,
    #[error("Schedule already completed")]
    AlreadyCompleted,
    #[error("Module ID mismatch")]
    ModuleMismatch,
    #[error("{0}")]
    InvalidInput(String),
    #[error("No image data")]
    MissingData,
    #[error("Invalid filename")]
    PathTraversal,
    #[error("Database unavailable")]
    Store(#[from] diesel::result::Error),
    #[error("Database unavailable")]
    Pool(#[from] r2d2::Error),
    #[error("Image storage failure")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::MissingField(_)
            | Self::AlreadyCompleted
            | Self::InvalidInput(_)
            | Self::MissingData
            | Self::PathTraversal => Status::BadRequest,
            Self::NotFound(_) | Self::NotFoundOrInactive(_) => Status::NotFound,
            Self::NotRegistered | Self::ModuleMismatch => Status::Forbidden,
            Self::Store(_) | Self::Pool(_) | Self::Io(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            log::error!("request to {} failed: {self:?}", req.uri());
        }
        let body = Json(json!({ "error": self.to_string() }));
        response::status::Custom(status, body).respond_to(req)
    }
}
