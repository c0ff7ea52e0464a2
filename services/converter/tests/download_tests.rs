//! Download tests against a one-shot local HTTP server.

use converter::{ensure_dataset, partial_path, DownloadOutcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single request with `status` and `body`, then close.
async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();

        let header = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/sst.mnmean.nc", addr)
}

#[tokio::test]
async fn test_download_writes_file() {
    let body: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    let url = serve_once("200 OK", body.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data/sst.mnmean.nc");

    let outcome = ensure_dataset(&url, &path, false).await.unwrap();
    assert_eq!(outcome, DownloadOutcome::Downloaded { bytes: 100_000 });
    assert_eq!(std::fs::read(&path).unwrap(), body);
    assert!(!partial_path(&path).exists());
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let url = serve_once("404 Not Found", b"missing".to_vec()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sst.mnmean.nc");

    let err = ensure_dataset(&url, &path, false).await.unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(!path.exists());
}
