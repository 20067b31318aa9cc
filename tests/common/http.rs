//! A fake HTTP tracker on the loopback interface.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

struct Answer {
    status: StatusCode,
    body: Vec<u8>,
    last_query: Mutex<Option<String>>,
}

pub struct FakeHttpTracker {
    pub addr: SocketAddr,
    answer: Arc<Answer>,
    handle: JoinHandle<()>,
}

impl FakeHttpTracker {
    /// Answers every announce with `status` and `body`.
    pub async fn start(status: StatusCode, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let answer = Arc::new(Answer {
            status,
            body,
            last_query: Mutex::new(None),
        });

        let app = Router::new().route("/announce", get(announce)).with_state(answer.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, answer, handle }
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{path}", self.addr)).unwrap()
    }

    /// The query string of the last announce.
    pub fn last_query(&self) -> Option<String> {
        self.answer.last_query.lock().clone()
    }
}

impl Drop for FakeHttpTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn announce(State(answer): State<Arc<Answer>>, RawQuery(query): RawQuery) -> (StatusCode, Vec<u8>) {
    *answer.last_query.lock() = query;
    (answer.status, answer.body.clone())
}
