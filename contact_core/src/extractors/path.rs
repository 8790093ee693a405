//! Record id taken from the URL path

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Id segment of a detail route. Anything that is not a valid `i64` cannot
/// name a stored record, so it is reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct ContactMessageId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ContactMessageId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Not found.".to_string()))?;

        raw.parse::<i64>()
            .map(ContactMessageId)
            .map_err(|_| AppError::NotFound("Not found.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn status_for(uri: &str) -> axum::http::StatusCode {
        let app = Router::new().route(
            "/:id",
            get(|ContactMessageId(id): ContactMessageId| async move { id.to_string() }),
        );
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_integer_id_is_accepted() {
        assert_eq!(status_for("/42").await, axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_ids_are_not_found() {
        assert_eq!(status_for("/abc").await, axum::http::StatusCode::NOT_FOUND);
        assert_eq!(
            status_for("/99999999999999999999").await,
            axum::http::StatusCode::NOT_FOUND
        );
    }
}
