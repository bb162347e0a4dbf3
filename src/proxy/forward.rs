//! Autoconfig request forwarding.
//!
//! # Responsibilities
//! - Rewrite the request target to the fixed upstream scheme/host/port,
//!   preserving path and query
//! - Forward method, headers, and body; relay the upstream response
//! - Strip the Host header and hop-by-hop headers in both directions
//!
//! # Design Decisions
//! - No retry, no fallback: an upstream failure is terminal for the
//!   request and maps to 502
//! - Bodies are buffered; autoconfig payloads are small XML documents

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Request, Response, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::server::AppState;

/// Error type for upstream forwarding.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request body unreadable: {0}")]
    Body(#[from] axum::Error),

    #[error("invalid upstream target: {0}")]
    Target(#[from] url::ParseError),

    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("response assembly failed: {0}")]
    Assemble(#[from] axum::http::Error),
}

/// Forward an autoconfig request to the configured upstream.
pub async fn forward(state: &AppState, request: Request<Body>) -> axum::response::Response {
    let path = request.uri().path().to_string();

    match forward_inner(state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(path = %path, error = %error, "Upstream fetch failed");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

async fn forward_inner(
    state: &AppState,
    request: Request<Body>,
) -> Result<axum::response::Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, state.config.limits.proxy_body_bytes).await?;

    let target = rewrite_target(&state.config.upstream, parts.uri.path(), parts.uri.query())?;

    // Host derives from the rewritten target and the body is re-framed,
    // so those headers never travel upstream
    let mut headers = HeaderMap::new();
    for (name, value) in parts.headers.iter() {
        if *name != header::HOST && *name != header::CONTENT_LENGTH && !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    tracing::debug!(target = %target, method = %parts.method, "Forwarding autoconfig request");

    let upstream = state
        .client
        .request(parts.method, target)
        .headers(headers)
        .body(bytes)
        .send()
        .await?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();
    let payload = upstream.bytes().await?;

    let mut response = Response::builder().status(status);
    if let Some(dst) = response.headers_mut() {
        for (name, value) in upstream_headers.iter() {
            if !is_hop_by_hop(name) {
                dst.append(name.clone(), value.clone());
            }
        }
    }

    Ok(response.body(Body::from(payload))?)
}

/// Rewrite a request target onto the upstream authority, keeping the
/// original path and query.
pub fn rewrite_target(
    upstream: &UpstreamConfig,
    path: &str,
    query: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut target = Url::parse(&format!(
        "{}://{}:{}/",
        upstream.scheme, upstream.host, upstream.port
    ))?;
    target.set_path(path);
    target.set_query(query);
    Ok(target)
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_takes_upstream_authority_and_keeps_path_and_query() {
        let upstream = UpstreamConfig::default();
        let target = rewrite_target(
            &upstream,
            "/.well-known/autoconfig/mail/config-v1.1.xml",
            Some("emailaddress=user%40dataat.work"),
        )
        .unwrap();

        assert_eq!(target.scheme(), "https");
        assert_eq!(target.host_str(), Some("lykkebovej44.dalsgaard.net"));
        assert_eq!(target.port(), Some(8447));
        assert_eq!(target.path(), "/.well-known/autoconfig/mail/config-v1.1.xml");
        assert_eq!(target.query(), Some("emailaddress=user%40dataat.work"));
    }

    #[test]
    fn target_without_query_has_none() {
        let upstream = UpstreamConfig {
            scheme: "http".to_string(),
            host: "127.0.0.1".to_string(),
            port: 9999,
        };
        let target = rewrite_target(&upstream, "/autodiscover/autodiscover.xml", None).unwrap();

        assert_eq!(
            target.to_string(),
            "http://127.0.0.1:9999/autodiscover/autodiscover.xml"
        );
    }

    #[test]
    fn hop_by_hop_headers_are_recognized() {
        assert!(is_hop_by_hop(&header::CONNECTION));
        assert!(is_hop_by_hop(&header::TRANSFER_ENCODING));
        assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
    }
}
