//! HTTP response building module
//!
//! Builders for the JSON and bare responses the service sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::logger::Logger;

pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build JSON response; HEAD requests keep the headers and drop the body
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
    enable_cors: bool,
    logger: &Logger,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger.error(&format!("Failed to serialize response: {e}"));
            return build_500_response(logger);
        }
    };

    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length);
    if enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(logger, status.as_str(), &e);
        Response::new(Full::new(Bytes::new()))
    })
}

#[derive(Serialize)]
struct Detail {
    detail: String,
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
}

/// 404 Not Found with a JSON detail
pub fn build_404_response(is_head: bool, enable_cors: bool, logger: &Logger) -> Response<Full<Bytes>> {
    let detail = Detail {
        detail: "Not found.".to_string(),
    };
    json_response(StatusCode::NOT_FOUND, &detail, is_head, enable_cors, logger)
}

/// 405 Method Not Allowed naming the rejected method
pub fn build_405_response(method: &Method, enable_cors: bool, logger: &Logger) -> Response<Full<Bytes>> {
    let detail = Detail {
        detail: format!("Method \"{method}\" not allowed."),
    };
    let mut response = json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &detail,
        false,
        enable_cors,
        logger,
    );
    response
        .headers_mut()
        .insert("Allow", hyper::header::HeaderValue::from_static(ALLOWED_METHODS));
    response
}

/// 413 Payload Too Large response
pub fn build_413_response(logger: &Logger) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error(logger, "413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

pub fn build_500_response(logger: &Logger) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"detail":"Internal server error."}"#)))
        .unwrap_or_else(|e| {
            log_build_error(logger, "500", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool, logger: &Logger) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error(logger, "OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Liveness/readiness probe response
pub fn build_health_response(is_head: bool, logger: &Logger) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &HealthStatus { status: "ok" },
        is_head,
        false,
        logger,
    )
}

fn log_build_error(logger: &Logger, status: &str, error: &hyper::http::Error) {
    logger.error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_headers() {
        let logger = Logger::buffered();
        let response = json_response(StatusCode::OK, &serde_json::json!({"a": 1}), false, true, &logger);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers()["Content-Length"], "7");
        assert_eq!(body_string(response).await, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_head_keeps_length_without_body() {
        let logger = Logger::buffered();
        let response = json_response(StatusCode::OK, &serde_json::json!({"a": 1}), true, false, &logger);
        assert_eq!(response.headers()["Content-Length"], "7");
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_405_names_method() {
        let logger = Logger::buffered();
        let response = build_405_response(&Method::POST, false, &logger);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], ALLOWED_METHODS);
        assert_eq!(
            body_string(response).await,
            r#"{"detail":"Method \"POST\" not allowed."}"#
        );
    }

    #[test]
    fn test_options_cors_headers() {
        let logger = Logger::buffered();
        let response = build_options_response(true, &logger);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], ALLOWED_METHODS);

        let response = build_options_response(false, &logger);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
    }
}
