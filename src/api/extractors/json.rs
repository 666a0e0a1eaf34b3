//! JSON body extractor whose rejection renders as `{ "error": "..." }`.
//!
//! `axum::Json` rejects with a plain-text body; the survey front end expects
//! every failure to come back in the same JSON shape as handler errors.
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
