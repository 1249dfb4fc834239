//! Request Extractors
//!
//! Drop-in replacements for `axum::Json` and `axum::extract::Query` whose
//! rejections render as [`AppError`] problem bodies instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::app_error::AppError;

/// JSON request body; also usable as a JSON response
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::{get, post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Serialize)]
    struct Paging {
        page: Option<i64>,
    }

    fn router() -> Router {
        Router::new()
            .route("/echo", post(|Json(body): Json<Paging>| async move { Json(body) }))
            .route(
                "/paged",
                get(|Query(query): Query<Paging>| async move { Json(query) }),
            )
    }

    async fn problem(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_problem_json() {
        let response = router()
            .oneshot(
                Request::post("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{page: 1"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = problem(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Bad Request");
    }

    #[tokio::test]
    async fn test_non_numeric_query_is_problem_json() {
        let response = router()
            .oneshot(Request::get("/paged?page=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = problem(response).await;
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().contains("page"));
    }

    #[tokio::test]
    async fn test_valid_input_passes_through() {
        let response = router()
            .oneshot(Request::get("/paged?page=2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(problem(response).await["page"], 2);
    }
}
