//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use edge_gateway::config::GatewayConfig;
use edge_gateway::mail::{MailError, MailTransport};
use edge_gateway::HttpServer;

/// Start a mock autoconfig upstream that echoes the request line.
///
/// Each response body is "METHOD TARGET", so tests can assert exactly
/// what reached the upstream. Returns the bound address and a hit
/// counter.
#[allow(dead_code)]
pub async fn start_mock_upstream() -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let hit_counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    hit_counter.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        let (head, _body) = read_request(&mut socket).await;
                        let request_line = head.lines().next().unwrap_or_default();
                        let echo = request_line
                            .rsplit_once(' ')
                            .map(|(method_and_target, _version)| method_and_target)
                            .unwrap_or(request_line)
                            .to_string();

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            echo.len(),
                            echo
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Start a fake siteverify endpoint answering with the given success
/// flag. Returns the bound address, a call counter, and the last
/// received form body.
#[allow(dead_code)]
pub async fn start_fake_siteverify(
    success: bool,
) -> (SocketAddr, Arc<AtomicU32>, Arc<Mutex<Option<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let last_body = Arc::new(Mutex::new(None));

    let call_counter = calls.clone();
    let body_slot = last_body.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    call_counter.fetch_add(1, Ordering::SeqCst);
                    let body_slot = body_slot.clone();
                    tokio::spawn(async move {
                        let (_head, body) = read_request(&mut socket).await;
                        *body_slot.lock().unwrap() =
                            Some(String::from_utf8_lossy(&body).into_owned());

                        let payload = format!("{{\"success\":{}}}", success);
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            payload.len(),
                            payload
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls, last_body)
}

/// Read one HTTP request (head + content-length body) off a socket.
async fn read_request(socket: &mut TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return (String::from_utf8_lossy(&buf).into_owned(), Vec::new()),
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).into_owned();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            let mut body = buf[pos + 4..].to_vec();
            while body.len() < content_length {
                let n = match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                body.extend_from_slice(&chunk[..n]);
            }
            return (head, body);
        }
    }
}

/// A mail transport that records every dispatched message.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

#[allow(dead_code)]
pub struct SentMail {
    pub from: String,
    pub to: String,
    pub raw: String,
}

#[async_trait::async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, from: &str, to: &str, raw: &[u8]) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            from: from.to_string(),
            to: to.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        });
        Ok(())
    }
}

/// A mail transport that always fails.
#[allow(dead_code)]
pub struct FailingMailer;

#[async_trait::async_trait]
impl MailTransport for FailingMailer {
    async fn send(&self, _from: &str, _to: &str, _raw: &[u8]) -> Result<(), MailError> {
        Err(MailError::Transport("injected failure".to_string()))
    }
}

/// Spawn a gateway with the given config and mail transport; returns
/// its bound address.
pub async fn spawn_gateway(
    config: GatewayConfig,
    mailer: Arc<dyn MailTransport>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::with_transport(config, mailer);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Create an asset root under the system temp directory with an index
/// page and one plain file.
#[allow(dead_code)]
pub fn create_asset_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("edge-gateway-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("index.html"), "<h1>data at work</h1>\n").unwrap();
    std::fs::write(root.join("hello.txt"), "hello from the asset root\n").unwrap();
    root
}
