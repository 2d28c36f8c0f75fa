// In-process bitcoind stand-in for the integration tests
// Serves canned JSON-RPC bodies per method and records every call it sees
//
// Numan Thabit 2025 Nov

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lncm_gateway::bitcoind::BitcoindClient;
use lncm_gateway::config::BitcoindConfig;

pub const RPC_USER: &str = "lncm";
pub const RPC_PASS: &str = "hunter2";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct NodeState {
    replies: HashMap<String, (StatusCode, String)>,
    calls: Vec<RecordedCall>,
}

#[derive(Clone, Default)]
pub struct MockNode {
    state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub fn new() -> Self {
        let node = Self::default();
        node.reply("getblockcount", r#"{"result":700000,"error":null}"#);
        node
    }

    /// Answer `method` with `body` and status 200.
    pub fn reply(&self, method: &str, body: &str) {
        self.reply_with_status(method, StatusCode::OK, body);
    }

    pub fn reply_with_status(&self, method: &str, status: StatusCode, body: &str) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(method.to_string(), (status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    /// Bind on an ephemeral port and return the config pointing at it.
    pub async fn start(&self) -> BitcoindConfig {
        let app = Router::new()
            .route("/", post(handle))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        BitcoindConfig {
            host: "127.0.0.1".to_string(),
            port,
            user: RPC_USER.to_string(),
            pass: RPC_PASS.to_string(),
        }
    }

    /// Start the node and connect a client to it.
    pub async fn client(&self) -> BitcoindClient {
        let conf = self.start().await;
        BitcoindClient::connect(&conf).await.unwrap()
    }
}

async fn handle(State(node): State<MockNode>, headers: HeaderMap, Json(req): Json<Value>) -> Response {
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut state = node.state.lock().unwrap();
    state.calls.push(RecordedCall {
        method: method.clone(),
        params: req["params"].clone(),
        authorization,
    });
    let (status, body) = state.replies.get(&method).cloned().unwrap_or((
        StatusCode::NOT_FOUND,
        r#"{"result":null,"error":{"code":-32601,"message":"Method not found"}}"#.to_string(),
    ));
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// Status and decoded JSON body of a router response.
pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
