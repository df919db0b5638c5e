//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use hash_router::dom::{MemoryDocument, RecordingScriptHost};
use hash_router::fetch::Fetcher;
use hash_router::ViewLoader;

pub const SITE_NAME: &str = "LandonSoft";

/// Document, script recorder and loader wired to `fetcher`.
#[allow(dead_code)]
pub struct Page {
    pub document: Arc<MemoryDocument>,
    pub scripts: Arc<RecordingScriptHost>,
    pub loader: Arc<ViewLoader>,
}

#[allow(dead_code)]
pub fn page(fetcher: Arc<dyn Fetcher>) -> Page {
    let scripts = Arc::new(RecordingScriptHost::new());
    let document = Arc::new(
        MemoryDocument::builder()
            .title(SITE_NAME)
            .script_host(scripts.clone())
            .build(),
    );
    let loader = Arc::new(ViewLoader::new(document.clone(), fetcher, SITE_NAME));
    Page {
        document,
        scripts,
        loader,
    }
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// `f` receives the request path and returns status and body.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let request = String::from_utf8_lossy(&buf[..n]);
                        let path = request
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
