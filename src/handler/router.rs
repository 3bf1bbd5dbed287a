//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: access logging, body size check,
//! route matching and method dispatch.

use crate::config::AppState;
use crate::handler::classify;
use crate::http;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);

    let mut response = match check_body_size(&req, &state) {
        Some(resp) => resp,
        None => route_request(&req, &state).await,
    };

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server_name);
    }

    if state.logger.access_log_enabled() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        state.logger.access(&entry);
    }

    Ok(response)
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, state: &AppState) -> Option<Response<Full<Bytes>>> {
    let max_body_size = state.config.http.max_body_size;
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            state
                .logger
                .warn("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                state.logger.warn(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response(&state.logger))
            }
            Err(_) => {
                state.logger.warn(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Paths match with or without a trailing slash
fn path_matches(path: &str, route: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    !trimmed.is_empty() && trimmed == route.trim_end_matches('/')
}

/// Route request based on path and method
async fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let path = req.uri().path();
    let method = req.method();
    let is_head = *method == Method::HEAD;
    let routes = &state.config.routes;
    let enable_cors = state.config.http.enable_cors;

    // Health check endpoints first
    if routes.health.enabled
        && (path == routes.health.liveness_path || path == routes.health.readiness_path)
        && matches!(*method, Method::GET | Method::HEAD)
    {
        return http::build_health_response(is_head, &state.logger);
    }

    if !path_matches(path, &routes.classify_path) {
        return http::build_404_response(is_head, enable_cors, &state.logger);
    }

    match *method {
        Method::GET | Method::HEAD => {
            match classify::classify_number(req.uri().query(), &state.facts).await {
                Ok(result) => {
                    http::json_response(result.status(), &result, is_head, enable_cors, &state.logger)
                }
                Err(e) => {
                    state.logger.error(&format!("Classification task failed: {e}"));
                    http::build_500_response(&state.logger)
                }
            }
        }
        Method::OPTIONS => http::build_options_response(enable_cors, &state.logger),
        _ => {
            state
                .logger
                .warn(&format!("Method not allowed: {method} {path}"));
            http::build_405_response(method, enable_cors, &state.logger)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logger::Logger;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_state() -> (MockServer, Arc<AppState>, Logger) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a fact"))
            .mount(&server)
            .await;

        let mut config = Config::defaults();
        config.facts.base_url = server.uri();
        let logger = Logger::buffered();
        let state = AppState::new(config, logger.clone()).unwrap();
        (server, Arc::new(state), logger)
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn peer() -> SocketAddr {
        "10.0.0.7:50000".parse().unwrap()
    }

    async fn send(state: &Arc<AppState>, req: Request<()>) -> (StatusCode, Response<Full<Bytes>>) {
        let response = handle_request(req, Arc::clone(state), peer()).await.unwrap();
        (response.status(), response)
    }

    async fn json_body(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_classify_route() {
        let (_server, state, _logger) = test_state().await;
        let (status, response) =
            send(&state, request(Method::GET, "/api/classify-number?number=371")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()["Server"], "number-classifier/0.1");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        let body = json_body(response).await;
        assert_eq!(body["digit_sum"], 11);
        assert_eq!(body["fun_fact"], "a fact");
    }

    #[tokio::test]
    async fn test_classify_route_trailing_slash() {
        let (_server, state, _logger) = test_state().await;
        let (status, _) = send(&state, request(Method::GET, "/api/classify-number/?number=2")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_number_is_400() {
        let (_server, state, _logger) = test_state().await;
        let (status, response) =
            send(&state, request(Method::GET, "/api/classify-number?number=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"number": "alphabet", "error": true})
        );

        let (status, _) = send(&state, request(Method::GET, "/api/classify-number")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_server, state, _logger) = test_state().await;
        let (status, response) =
            send(&state, request(Method::HEAD, "/api/classify-number?number=6")).await;
        assert_eq!(status, StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let (_server, state, _logger) = test_state().await;
        let (status, response) =
            send(&state, request(Method::POST, "/api/classify-number?number=6")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let (_server, state, _logger) = test_state().await;
        let (status, _) = send(&state, request(Method::OPTIONS, "/api/classify-number")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (_server, state, _logger) = test_state().await;
        let (status, response) = send(&state, request(Method::GET, "/nope?number=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["detail"], "Not found.");

        let (status, _) = send(&state, request(Method::GET, "/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (_server, state, _logger) = test_state().await;
        for path in ["/healthz", "/readyz"] {
            let (status, response) = send(&state, request(Method::GET, path)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json_body(response).await["status"], "ok");
        }
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let (_server, state, _logger) = test_state().await;
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/classify-number?number=1")
            .header("content-length", "99999999")
            .body(())
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_access_log_written() {
        let (_server, state, logger) = test_state().await;
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/classify-number?number=abc")
            .header("user-agent", "tests")
            .body(())
            .unwrap();
        send(&state, req).await;

        let lines = logger.access_lines();
        let line = lines.last().unwrap();
        assert!(line.starts_with("10.0.0.7 - - ["));
        assert!(line.contains("\"GET /api/classify-number?number=abc HTTP/1.1\" 400 34"));
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/api/classify-number", "/api/classify-number"));
        assert!(path_matches("/api/classify-number/", "/api/classify-number"));
        assert!(!path_matches("/api/classify-numbers", "/api/classify-number"));
        assert!(!path_matches("/", "/api/classify-number"));
    }
}
