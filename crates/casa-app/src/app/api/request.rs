//! Request extraction and response helpers shared by the JSON handlers.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Request, Response, Scribe};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Reads a UUID path parameter.
///
/// ## Errors
/// Returns [`AppError::BadRequest`] if the parameter is missing or malformed.
pub(crate) fn path_id(req: &Request, name: &str) -> AppResult<Uuid> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter '{name}'")))?;
    Uuid::parse_str(&raw).map_err(|_err| AppError::BadRequest(format!("'{raw}' is not a valid id")))
}

/// ## Summary
/// Deserializes the JSON request body.
///
/// ## Errors
/// Returns [`AppError::BadRequest`] if the body is not valid JSON for `T`.
pub(crate) async fn parse_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>().await.map_err(|e| {
        tracing::debug!(error = ?e, "Failed to parse request body");
        AppError::BadRequest("Invalid request body".to_string())
    })
}

/// A JSON body sent with `201 Created`.
pub(crate) struct Created<T>(pub T);

impl<T: Serialize + Send> Scribe for Created<T> {
    fn render(self, res: &mut Response) {
        res.status_code(StatusCode::CREATED);
        res.render(Json(self.0));
    }
}
