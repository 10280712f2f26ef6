use std::path::Path;

use crate::transport::static_files::{content_type, request_target, resolve};
use crate::transport::websocket::{is_upgrade_request, username_from_query};

#[test]
fn test_username_from_query() {
    assert_eq!(
        username_from_query(Some("username=alice")),
        Some("alice".to_string())
    );
    assert_eq!(
        username_from_query(Some("room=1&username=bob")),
        Some("bob".to_string())
    );
    // Percent-encoded values are decoded.
    assert_eq!(
        username_from_query(Some("username=alice%20b")),
        Some("alice b".to_string())
    );
}

#[test]
fn test_username_absent_or_empty_yields_none() {
    assert_eq!(username_from_query(None), None);
    assert_eq!(username_from_query(Some("")), None);
    assert_eq!(username_from_query(Some("user=alice")), None);
    assert_eq!(username_from_query(Some("username=")), None);
}

#[test]
fn test_is_upgrade_request() {
    let upgrade = b"GET /ws?username=alice HTTP/1.1\r\nHost: x\r\nConnection: Upgrade\r\nUpgrade: websocket\r\n\r\n";
    assert!(is_upgrade_request(upgrade));

    // Header names are case-insensitive on the wire.
    let mixed = b"GET /ws HTTP/1.1\r\nUPGRADE: WebSocket\r\n\r\n";
    assert!(is_upgrade_request(mixed));

    let plain = b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n";
    assert!(!is_upgrade_request(plain));
    assert!(!is_upgrade_request(b""));
}

#[test]
fn test_request_target() {
    assert_eq!(
        request_target("GET / HTTP/1.1\r\nHost: x\r\n\r\n"),
        Some("/".to_string())
    );
    assert_eq!(
        request_target("GET /app.js?v=3 HTTP/1.1\r\n"),
        Some("/app.js".to_string())
    );
    assert_eq!(request_target("POST / HTTP/1.1\r\n"), None);
    assert_eq!(request_target(""), None);
}

#[test]
fn test_resolve_paths() {
    let root = Path::new("/srv/static");
    assert_eq!(
        resolve(root, "/"),
        Some(root.join("index.html")),
    );
    assert_eq!(resolve(root, "/app.js"), Some(root.join("app.js")));
    assert_eq!(resolve(root, "/../etc/passwd"), None);
    assert_eq!(resolve(root, "/a/../../b"), None);
}

#[test]
fn test_content_types() {
    assert_eq!(
        content_type(Path::new("index.html")),
        "text/html; charset=utf-8"
    );
    assert_eq!(content_type(Path::new("app.js")), "text/javascript; charset=utf-8");
    assert_eq!(content_type(Path::new("logo.png")), "image/png");
    assert_eq!(content_type(Path::new("mystery")), "application/octet-stream");
}

#[tokio::test]
async fn test_load_reads_files_from_root() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("index.html"), "<h1>hi</h1>")
        .await
        .unwrap();

    let path = resolve(dir.path(), "/").unwrap();
    let body = tokio::fs::read(&path).await.unwrap();
    assert_eq!(body, b"<h1>hi</h1>");

    // A miss stays a miss.
    let missing = resolve(dir.path(), "/nope.html").unwrap();
    assert!(tokio::fs::read(&missing).await.is_err());
}
