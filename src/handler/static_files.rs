//! Static file serving module
//!
//! Handles static file loading, directory listings, and forced downloads.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, percent, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the aliased package as a forced download
///
/// The whole file is read and streamed back with attachment headers; a read
/// failure at request time degrades to 404 (the startup precondition already
/// verified existence once).
pub async fn serve_download(
    ctx: &RequestContext<'_>,
    file_path: &str,
    filename: &str,
    content_type: &str,
) -> Response<Full<Bytes>> {
    match fs::read(file_path).await {
        Ok(content) => response::build_download_response(
            Bytes::from(content),
            content_type,
            filename,
            ctx.is_head,
        ),
        Err(e) => {
            logger::log_error(&format!("Failed to read package '{file_path}': {e}"));
            http::build_404_response()
        }
    }
}

/// Serve static files from a directory tree
///
/// Directories resolve to an index file when one exists, otherwise to a
/// generated HTML listing.
pub async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match resolve(dir, ctx.path, index_files) {
        Some(Resolved::File(path)) => match load_file(&path).await {
            Some((content, content_type)) => build_static_file_response(
                &content,
                content_type,
                ctx.if_none_match.as_deref(),
                ctx.is_head,
            ),
            None => http::build_404_response(),
        },
        Some(Resolved::Listing(path)) => match render_listing(ctx.path, &path).await {
            Ok(html) => response::build_html_response(html, ctx.is_head),
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to list directory '{}': {e}",
                    path.display()
                ));
                http::build_404_response()
            }
        },
        None => http::build_404_response(),
    }
}

/// Outcome of mapping a request path onto the static root
enum Resolved {
    File(PathBuf),
    Listing(PathBuf),
}

/// Map a request path to a filesystem path within `static_dir`
///
/// Decodes percent escapes first, so names the listing links to resolve
/// back to the files on disk. Canonicalises both sides and rejects anything
/// escaping the root.
fn resolve(static_dir: &str, path: &str, index_files: &[String]) -> Option<Resolved> {
    let decoded = percent::decode_path(path)?;

    // Remove leading slash and prevent directory traversal
    let clean_path = decoded.trim_start_matches('/').replace("..", "");

    let mut file_path = Path::new(static_dir).join(&clean_path);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Check if path is a directory, try index files
    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // File not found is common (404), no need to log at warning level
    let Ok(canonical) = file_path.canonicalize() else {
        return None;
    };
    if !canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            canonical.display()
        ));
        return None;
    }

    if canonical.is_dir() {
        Some(Resolved::Listing(canonical))
    } else {
        Some(Resolved::File(canonical))
    }
}

/// Load a file and infer its content type from the extension
async fn load_file(path: &Path) -> Option<(Vec<u8>, &'static str)> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return None;
        }
    };

    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build static file response with `ETag` support
fn build_static_file_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    // Check if client has cached version
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    response::build_cached_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}

/// Render an HTML directory listing
///
/// Entries are sorted by name; directories carry a trailing slash. Links are
/// absolute so the listing works whether or not the request path had a
/// trailing slash.
async fn render_listing(request_path: &str, dir: &Path) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = format!("Directory listing for {}", escape_html(request_path));
    let base = request_path.trim_end_matches('/');

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("    <h1>{title}</h1>\n    <hr>\n    <ul>\n"));
    for name in &names {
        let href = percent::encode_path(name);
        let escaped = escape_html(name);
        html.push_str(&format!(
            "        <li><a href=\"{base}/{href}\">{escaped}</a></li>\n"
        ));
    }
    html.push_str("    </ul>\n    <hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Escape special characters for HTML text and attribute values
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::tempdir;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
        }
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        let root = dir.path().to_str().unwrap();
        let resp = serve_directory(&ctx("/notes.txt"), root, &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let resp = serve_directory(&ctx("/nope.txt"), root, &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_percent_encoded_path_is_served() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("release notes.txt"), b"v1.0").unwrap();

        let root = dir.path().to_str().unwrap();
        let resp = serve_directory(&ctx("/release%20notes.txt"), root, &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_listing_links_are_percent_encoded() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("release notes.txt"), b"v1.0").unwrap();

        let root = dir.path().to_str().unwrap();
        let html = render_listing("/", &PathBuf::from(root)).await.unwrap();
        assert!(html.contains("href=\"/release%20notes.txt\""));
        assert!(html.contains(">release notes.txt</a>"));
    }

    #[tokio::test]
    async fn test_encoded_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("pub");
        std_fs::create_dir(&root).unwrap();
        std_fs::write(dir.path().join("secret.txt"), b"top").unwrap();

        let root = root.to_str().unwrap().to_string();
        let resp = serve_directory(&ctx("/%2e%2e/secret.txt"), &root, &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("pub");
        std_fs::create_dir(&root).unwrap();
        std_fs::write(dir.path().join("secret.txt"), b"top").unwrap();

        let root = root.to_str().unwrap().to_string();
        let resp = serve_directory(&ctx("/../secret.txt"), &root, &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_directory_listing_contains_entries() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std_fs::create_dir(dir.path().join("build")).unwrap();

        let root = dir.path().to_str().unwrap();
        let resp = serve_directory(&ctx("/"), root, &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_index_file_preferred_over_listing() {
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("index.html"), b"<p>home</p>").unwrap();

        let root = dir.path().to_str().unwrap();
        let index_files = vec!["index.html".to_string()];
        let resp = serve_directory(&ctx("/"), root, &index_files).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        // Index responses carry an ETag, generated listings do not
        assert!(resp.headers().get("ETag").is_some());
    }
}
