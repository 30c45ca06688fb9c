//! Query string extractor with JSON rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// [`Query`] whose missing or malformed parameters answer 400 with an
/// `INVALID_QUERY` [`ErrorResponse`](crate::ErrorResponse).
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Search {
///     nome: String,
/// }
///
/// async fn search(QueryParams(search): QueryParams<Search>) -> String {
///     search.nome
/// }
/// ```
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(QueryParams(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Range {
        low: i64,
        high: i64,
    }

    fn app() -> Router {
        Router::new().route(
            "/range",
            get(|QueryParams(range): QueryParams<Range>| async move {
                format!("{}..{}", range.low, range.high)
            }),
        )
    }

    async fn call(uri: &str) -> Response {
        app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_query_params_parse() {
        let response = call("/range?low=1&high=9").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"1..9");
    }

    #[tokio::test]
    async fn test_missing_param_is_json_400() {
        for uri in ["/range?low=1", "/range?low=one&high=9"] {
            let response = call(uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["code"], 1006);
            assert_eq!(body["error"], "INVALID_QUERY");
        }
    }
}
