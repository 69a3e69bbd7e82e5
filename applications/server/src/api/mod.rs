/// API route modules
pub mod charts;
pub mod deezer;
pub mod health;
pub mod playlists;
pub mod tracks;

use crate::error::{Result, ServerError};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;

/// Unwrap a JSON body, reporting malformed input as 400 with a JSON message
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::bad_request(rejection.body_text()))
}

/// Unwrap path parameters, reporting unparsable ids as 400
pub(crate) fn path_params<T>(path: std::result::Result<Path<T>, PathRejection>) -> Result<T> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ServerError::bad_request(rejection.body_text()))
}

/// Unwrap query parameters, reporting invalid values as 400
pub(crate) fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ServerError::bad_request(rejection.body_text()))
}

/// Blank query values count as missing
pub(crate) fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::bad_request(message))
}
