use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Clone, Debug)]
pub struct Received {
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct IngestState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Received>>>,
}

/// Minimal ingest endpoint that records every request and answers with a fixed status
pub struct IngestServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
    task: JoinHandle<()>,
}

async fn ingest(State(state): State<IngestState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    state.received.lock().unwrap().push(Received { headers, body });
    state.status
}

impl IngestServer {
    pub async fn launch(status: u16) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = IngestState {
            status: StatusCode::from_u16(status).unwrap(),
            received: received.clone(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(ingest).with_state(state);
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            received,
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for IngestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
