use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use super::{interpret, ApiRequest, Transport, TransportError};

type RouteKey = (Method, String);

#[derive(Clone, Debug)]
enum Canned {
    Reply(StatusCode, Option<Value>),
    Unreachable(String),
}

/// Scripted transport. Responses are keyed by method and path. A route
/// registered as `path?k=v&..` matches that exact query first.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<RouteKey, Canned>>,
    gates: Mutex<HashMap<RouteKey, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, status: StatusCode, body: Option<Value>) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Canned::Reply(status, body));
    }

    pub fn on_get(&self, path: &str, body: Value) {
        self.on(Method::GET, path, StatusCode::OK, Some(body));
    }

    pub fn fail_get(&self, path: &str, status: StatusCode, message: Option<&str>) {
        let body = match message {
            Some(m) => json!({ "status": status.as_u16(), "message": m }),
            None => json!({ "status": status.as_u16() }),
        };
        self.on(Method::GET, path, status, Some(body));
    }

    pub fn unreachable_get(&self, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((Method::GET, path.to_string()), Canned::Unreachable("mock".into()));
    }

    /// Holds the next request to `path` until the returned sender fires.
    /// Dropping the sender releases it as well; keep it alive for a request
    /// that should never settle.
    pub fn gate_get(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert((Method::GET, path.to_string()), rx);
        tx
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, req: ApiRequest) -> Result<Option<Value>, TransportError> {
        self.calls.lock().unwrap().push(req.clone());
        let plain = (req.method.clone(), req.path.clone());
        let full = (req.method.clone(), with_query(&req));

        let gate = {
            let mut gates = self.gates.lock().unwrap();
            gates.remove(&full).or_else(|| gates.remove(&plain))
        };
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        let canned = {
            let routes = self.routes.lock().unwrap();
            routes.get(&full).or_else(|| routes.get(&plain)).cloned()
        };
        match canned {
            Some(Canned::Reply(status, body)) => {
                let bytes = body.map(|b| serde_json::to_vec(&b).unwrap()).unwrap_or_default();
                interpret(status, &bytes)
            }
            Some(Canned::Unreachable(host)) => Err(TransportError::Unreachable(host)),
            None => Err(TransportError::from_status(
                StatusCode::NOT_FOUND,
                br#"{"message":"no mock route"}"#,
            )),
        }
    }
}

fn with_query(req: &ApiRequest) -> String {
    if req.query.is_empty() {
        return req.path.clone();
    }
    let pairs: Vec<String> = req.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", req.path, pairs.join("&"))
}
