//! Directory-backed static content handler.
//!
//! Answers every request that is not a WebSocket upgrade: a single GET is
//! read off the socket, mapped to a file under the configured root, and
//! answered with a one-shot `Connection: close` response. The handler knows
//! nothing about the hub or its message-passing contract.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Upper bound on the request head we bother reading.
const MAX_HEAD: usize = 2048;

/// Serves one plain-HTTP request from `root` and closes the connection.
pub async fn serve(mut stream: TcpStream, root: &Path) -> io::Result<()> {
    let mut buf = vec![0u8; MAX_HEAD];
    let n = stream.read(&mut buf).await?;
    let head = String::from_utf8_lossy(&buf[..n]).into_owned();

    let (status, content_type, body) = match request_target(&head) {
        Some(target) => load(root, &target).await,
        None => (
            "400 Bad Request",
            "text/plain; charset=utf-8",
            b"400 bad request".to_vec(),
        ),
    };
    debug!("static: {} -> {}", head.lines().next().unwrap_or(""), status);

    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(&body).await?;
    stream.shutdown().await
}

async fn load(root: &Path, target: &str) -> (&'static str, &'static str, Vec<u8>) {
    let not_found = (
        "404 Not Found",
        "text/plain; charset=utf-8",
        b"404 not found".to_vec(),
    );
    let Some(path) = resolve(root, target) else {
        return not_found;
    };
    match tokio::fs::read(&path).await {
        Ok(body) => ("200 OK", content_type(&path), body),
        Err(_) => not_found,
    }
}

/// Extracts the GET path from a request head, query stripped.
///
/// Returns `None` for anything that is not a GET (the handler serves
/// files, nothing else).
pub(crate) fn request_target(head: &str) -> Option<String> {
    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    if method != "GET" {
        return None;
    }
    let path = target.split('?').next().unwrap_or(target);
    Some(path.to_string())
}

/// Maps a request path to a file under `root`.
///
/// `/` becomes `index.html`; any path containing `..` is refused.
pub(crate) fn resolve(root: &Path, target: &str) -> Option<PathBuf> {
    if target.contains("..") {
        return None;
    }
    let rel = target.trim_start_matches('/');
    let rel = if rel.is_empty() { "index.html" } else { rel };
    Some(root.join(rel))
}

/// Content type by file extension; anything unknown is served as bytes.
pub(crate) fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}
