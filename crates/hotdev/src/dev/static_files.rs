//! Static file responses with reload-script injection for HTML.

use crate::dev::server::CLIENT_SCRIPT_PATH;
use crate::dev::ResolvedPath;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use tracing::debug;

/// MIME type for HTML documents; the only type that gets the script injected.
pub const HTML_MIME: &str = "text/html";

/// MIME type for unknown extensions.
pub const FALLBACK_MIME: &str = "application/octet-stream";

const CLOSING_BODY: &[u8] = b"</body>";

/// Determine content type from the extension of a request path.
pub fn mime_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "html" | "htm" => HTML_MIME,
        "css" => "text/css",
        "gif" => "image/gif",
        "png" => "image/png",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "xml" => "text/xml",
        "js" => "text/javascript",
        "json" => "application/json",
        "mid" | "midi" => "audio/midi",
        "ico" => "image/vnd.microsoft.icon",
        "txt" | "md" => "text/plain",
        _ => FALLBACK_MIME,
    }
}

/// Script tag pointing at the reload client.
pub fn reload_script_tag() -> String {
    format!(r#"<script src="{}"></script>"#, CLIENT_SCRIPT_PATH)
}

/// Insert the reload script tag right before the first `</body>`.
///
/// Works on raw bytes so the rest of the document is returned untouched.
/// Documents without `</body>` are returned as-is.
pub fn inject_reload_script(content: &[u8]) -> Vec<u8> {
    let Some(pos) = memchr::memmem::find(content, CLOSING_BODY) else {
        return content.to_vec();
    };

    let tag = reload_script_tag();
    let mut result = Vec::with_capacity(content.len() + tag.len());
    result.extend_from_slice(&content[..pos]);
    result.extend_from_slice(tag.as_bytes());
    result.extend_from_slice(&content[pos..]);
    result
}

/// The uniform response for anything that cannot be served.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, HTML_MIME)],
        "404 Not Found",
    )
        .into_response()
}

/// Read a resolved file and build the response.
///
/// Any read failure (missing, directory, permissions) is a 404.
pub async fn serve_file(resolved: &ResolvedPath) -> Response {
    let content = match tokio::fs::read(&resolved.file).await {
        Ok(content) => content,
        Err(err) => {
            debug!("Cannot read {}: {}", resolved.file.display(), err);
            return not_found();
        }
    };

    let mime = mime_for_path(&resolved.resource);
    let body = if mime == HTML_MIME {
        inject_reload_script(&content)
    } else {
        content
    };

    (StatusCode::OK, [(header::CONTENT_TYPE, mime)], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mime_table() {
        assert_eq!(mime_for_path("/index.html"), "text/html");
        assert_eq!(mime_for_path("/old.htm"), "text/html");
        assert_eq!(mime_for_path("/css/site.css"), "text/css");
        assert_eq!(mime_for_path("/js/app.js"), "text/javascript");
        assert_eq!(mime_for_path("/photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_path("/photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_path("/favicon.ico"), "image/vnd.microsoft.icon");
        assert_eq!(mime_for_path("/song.mid"), "audio/midi");
        assert_eq!(mime_for_path("/README.md"), "text/plain");
        assert_eq!(mime_for_path("/data.json"), "application/json");
    }

    #[test]
    fn test_mime_unknown_is_binary() {
        assert_eq!(mime_for_path("/app.wasm"), FALLBACK_MIME);
        assert_eq!(mime_for_path("/Makefile"), FALLBACK_MIME);
        assert_eq!(mime_for_path("/INDEX.HTML"), FALLBACK_MIME);
    }

    #[test]
    fn test_inject_before_closing_body() {
        let html = b"<html><body><h1>Test</h1></body></html>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();

        assert_eq!(
            result,
            r#"<html><body><h1>Test</h1><script src="/_dev-events.js"></script></body></html>"#
        );
    }

    #[test]
    fn test_inject_only_first_closing_body() {
        let html = b"<body>a</body><template></body></template>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();

        assert_eq!(result.matches("<script").count(), 1);
        assert!(result.starts_with(r#"<body>a<script src="/_dev-events.js"></script></body>"#));
    }

    #[test]
    fn test_inject_without_body_is_noop() {
        let html = b"<html><h1>Fragment</h1></html>";
        assert_eq!(inject_reload_script(html), html.to_vec());
    }

    #[test]
    fn test_inject_preserves_non_utf8_bytes() {
        let mut html = b"<body>caf\xe9".to_vec();
        html.extend_from_slice(b"</body>");
        let result = inject_reload_script(&html);

        assert!(result.starts_with(b"<body>caf\xe9<script"));
        assert!(result.ends_with(b"</script></body>"));
    }

    #[tokio::test]
    async fn test_serve_missing_file_is_404() {
        let temp = TempDir::new().unwrap();
        let resolved = ResolvedPath {
            file: temp.path().join("missing.html"),
            resource: "/missing.html".to_string(),
        };

        let response = serve_file(&resolved).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_directory_is_404() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        let resolved = ResolvedPath {
            file: temp.path().join("docs"),
            resource: "/docs".to_string(),
        };

        let response = serve_file(&resolved).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_sets_content_type() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("site.css"), "body { color: red }").unwrap();
        let resolved = ResolvedPath {
            file: temp.path().join("site.css"),
            resource: "/site.css".to_string(),
        };

        let response = serve_file(&resolved).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
