use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jyotish::NatalError;
use serde_json::json;
use thiserror::Error;

/// Request failures, each rendered as `{"error": kind, "details": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("please provide date, time, place")]
    MissingFields,
    #[error("{0}")]
    BadDateTime(String),
    #[error("{0}")]
    GeocodeFailed(String),
    #[error("{0}")]
    TimezoneFailed(String),
    #[error("{0}")]
    EphemerisFailed(String),
    #[error("{0}")]
    DashaFailed(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields => "please provide date, time, place",
            Self::BadDateTime(_) => "bad_date_time_format",
            Self::GeocodeFailed(_) => "geocode_failed",
            Self::TimezoneFailed(_) => "timezone_failed",
            Self::EphemerisFailed(_) => "ephemeris_failed",
            Self::DashaFailed(_) => "dasha_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EphemerisFailed(_) | Self::DashaFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<NatalError> for ApiError {
    fn from(err: NatalError) -> Self {
        match err {
            // only an out-of-range zone offset reaches this point
            NatalError::Birth(e) => Self::TimezoneFailed(e.to_string()),
            NatalError::Ephemeris(e) => Self::EphemerisFailed(e.to_string()),
            NatalError::Dasha(e) => Self::DashaFailed(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::MissingFields => json!({ "error": self.kind() }),
            other => json!({ "error": other.kind(), "details": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
