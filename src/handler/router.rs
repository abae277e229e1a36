//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! routing-table matching, and access logging.

use crate::config::{AppState, RouteHandler, RoutesConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);

    // 1. Build access log entry first so rejected methods are logged too
    let mut entry = if access_log {
        let mut e = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        e.http_version = version_label(req.version()).to_string();
        e.referer = header_value(&req, "referer");
        e.user_agent = header_value(&req, "user-agent");
        Some(e)
    } else {
        None
    };

    // 2. Check HTTP method, then dispatch against the routing table
    let response = if let Some(resp) = check_http_method(&method) {
        resp
    } else {
        logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

        let ctx = RequestContext {
            path: &path,
            is_head,
            if_none_match: header_value(&req, "if-none-match"),
        };
        route_request(&ctx, &state.routes).await
    };

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and the materialised routing table
///
/// Exact matches win; everything else goes to the fallback handler.
async fn route_request(
    ctx: &RequestContext<'_>,
    routes: &RoutesConfig,
) -> Response<Full<Bytes>> {
    let handler = routes.custom_routes.get(ctx.path).unwrap_or(&routes.fallback);
    dispatch_route_handler(ctx, handler, &routes.index_files).await
}

/// Dispatch to specific route handler
async fn dispatch_route_handler(
    ctx: &RequestContext<'_>,
    handler: &RouteHandler,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match handler {
        RouteHandler::Download {
            path,
            filename,
            content_type,
        } => static_files::serve_download(ctx, path, filename, content_type).await,
        RouteHandler::Dir { path: dir } => {
            static_files::serve_directory(ctx, dir, index_files).await
        }
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
