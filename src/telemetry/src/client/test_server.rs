//! In-process ingest endpoint for exercising the transport paths.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub(crate) struct Reply {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

impl Reply {
    pub(crate) fn status(status: u16, body: &'static str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay: Duration::ZERO,
        }
    }

    /// Answers 200 only after `delay`, long enough for the client to give up
    pub(crate) fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::status(200, "late")
        }
    }
}

#[derive(Clone)]
pub(crate) struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

type Responder = dyn Fn(usize) -> Reply + Send + Sync;

struct ServerState {
    hits: AtomicUsize,
    requests: Mutex<Vec<CapturedRequest>>,
    respond: Box<Responder>,
}

pub(crate) struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    task: JoinHandle<()>,
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    // 1-based hit number
    let hit = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    state
        .requests
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, body });

    let reply = (state.respond)(hit);
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (reply.status, reply.body)
}

impl TestServer {
    /// `respond` receives the 1-based hit number and picks the reply
    pub(crate) async fn start(respond: impl Fn(usize) -> Reply + Send + Sync + 'static) -> Self {
        let state = Arc::new(ServerState {
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            task,
        }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}/ingest", self.addr)
    }

    pub(crate) fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap()
}

/// A URL on a port nothing listens on
pub(crate) async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/ingest", addr)
}

const TRUNCATED_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nshort";

/// Raw TCP endpoint that promises a 100 byte body, sends 5 bytes and hangs up
pub(crate) struct TruncatedBodyServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

// Drains the whole request so closing the socket doesn't reset the connection
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

impl TruncatedBodyServer {
    pub(crate) async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let task = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                read_request(&mut socket).await;
                let _ = socket.write_all(TRUNCATED_RESPONSE).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { addr, hits, task }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}/ingest", self.addr)
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TruncatedBodyServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Collects formatted log output for the current thread while the guard lives
#[derive(Clone, Default)]
pub(crate) struct LogCapture {
    logs: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        self.logs.lock().unwrap().join("")
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
