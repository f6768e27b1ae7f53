// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process mock backend for exercising the real HTTP client.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{GatewayClient, GatewayConfig};

pub const TEST_TOKEN: &str = "1|test-token";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(GatewayConfig::new(&self.base_url, TEST_TOKEN))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests: Vec<RecordedRequest> = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

async fn record_and_respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    let recorded: RecordedRequest = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        authorization: header_text(header::AUTHORIZATION),
        accept: header_text(header::ACCEPT),
        body: serde_json::from_slice(&body).ok(),
    };

    let (status, text) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    (status, [(header::CONTENT_TYPE, "application/json")], text).into_response()
}

/// Starts a backend on a random local port that answers every request
/// through `responder`.
pub async fn start_backend<F>(responder: F) -> MockBackend
where
    F: Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
{
    let state: MockState = MockState {
        responder: Arc::new(responder),
        requests: Arc::new(Mutex::new(Vec::new())),
    };
    let requests: Arc<Mutex<Vec<RecordedRequest>>> = state.requests.clone();
    let app: Router = Router::new().fallback(record_and_respond).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Starts a backend that answers every request with the same response.
pub async fn start_fixed_backend(status: StatusCode, body: Value) -> MockBackend {
    let text: String = body.to_string();
    start_backend(move |_| (status, text.clone())).await
}

/// Returns an origin nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn book_json(id: u64, title: &str) -> Value {
    serde_json::json!({
        "id": id,
        "titulo": title,
        "autores": [{"id": 1, "nombre": "Frank", "apellido": "Herbert"}],
        "año_publicacion": 1965,
        "stock_disponible": 3
    })
}

pub fn loan_json(id: u64, status: &str) -> Value {
    serde_json::json!({
        "id": id,
        "usuario_id": 3,
        "libro_id": 7,
        "fecha_prestamo": "2026-03-01",
        "fecha_devolucion_estimada": "2026-03-15",
        "fecha_devolucion_real": null,
        "estado": status
    })
}

pub fn page_json(items: Vec<Value>, total: u64, resource: &str) -> Value {
    serde_json::json!({
        "data": items,
        "links": [
            {"url": null, "label": "&laquo; Anterior", "active": false},
            {"url": format!("http://localhost:8000/api/{resource}?page=1"), "label": "1", "active": true},
            {"url": format!("http://localhost:8000/api/{resource}?page=2"), "label": "Siguiente &raquo;", "active": false}
        ],
        "total": total
    })
}
