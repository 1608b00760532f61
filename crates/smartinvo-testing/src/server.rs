//! Canned HTTP service on a loopback port.
//!
//! Serves one request per connection (`Connection: close`) from a background
//! thread. Routes are keyed by [`Operation`] and, optionally, by the value of
//! the first query parameter.

use anyhow::{Context, Result};
use serde_json::Value;
use smartinvo_backend::Operation;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

/// One request received by the server
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Decoded value of the first query parameter
    pub fn query_value(&self) -> Option<String> {
        first_query_value(self.query.as_deref()?)
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
}

#[derive(Default)]
struct ServerState {
    routes: HashMap<(Operation, Option<String>), Canned>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<ServerState>>;

fn lock(state: &Shared) -> MutexGuard<'_, ServerState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct StubServer {
    addr: SocketAddr,
    state: Shared,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind stub server")?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::default();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = std::thread::Builder::new()
            .name("stub-server".to_string())
            .spawn({
                let state = state.clone();
                let stop = stop.clone();
                move || {
                    for stream in listener.incoming() {
                        if stop.load(Ordering::SeqCst) {
                            break;
                        }
                        if let Ok(stream) = stream {
                            let _ = serve(stream, &state);
                        }
                    }
                }
            })?;

        Ok(Self {
            addr,
            state,
            stop,
            handle: Some(handle),
        })
    }

    /// Start a server answering every endpoint with the standard fixtures
    pub fn with_fixtures() -> Result<Self> {
        use crate::fixtures;

        let server = Self::start()?;
        server
            .route(Operation::Recommend, 200, fixtures::full_recommendation())
            .route(Operation::ShelfLife, 200, fixtures::shelf_life_milk())
            .route(Operation::GlobalWaste, 200, fixtures::global_waste())
            .route(Operation::GlobalWasteSteps, 200, fixtures::transformation_steps())
            .route(Operation::StoreSpoiled, 200, fixtures::store_stats_singapore())
            .route(Operation::DeleteStoreSpoiled, 200, serde_json::json!({"status": "deleted"}))
            .route(Operation::ModelInfo, 200, fixtures::model_info())
            .route(Operation::Weather, 200, fixtures::weather_singapore())
            .route(Operation::Health, 200, fixtures::health());
        Ok(server)
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn route(&self, operation: Operation, status: u16, body: Value) -> &Self {
        lock(&self.state).routes.insert(
            (operation, None),
            Canned {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Route only requests whose first query parameter equals `value`
    pub fn route_for(&self, operation: Operation, value: &str, status: u16, body: Value) -> &Self {
        lock(&self.state).routes.insert(
            (operation, Some(value.to_string())),
            Canned {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Route with a raw, possibly non-JSON body
    pub fn route_raw(&self, operation: Operation, status: u16, body: &str) -> &Self {
        lock(&self.state).routes.insert(
            (operation, None),
            Canned {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    pub fn requests_for(&self, operation: Operation) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| Operation::route(&r.method, &r.path) == Some(operation))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // Unblock the accept loop
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(stream: TcpStream, state: &Shared) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    if method.is_empty() {
        return Ok(());
    }

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.clone(), None),
    };

    let recorded = RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        body: serde_json::from_slice(&body).ok(),
    };

    let canned = {
        let mut state = lock(state);
        let value = recorded.query_value();
        state.requests.push(recorded);
        Operation::route(&method, &path).and_then(|op| {
            state
                .routes
                .get(&(op, value))
                .or_else(|| state.routes.get(&(op, None)))
                .cloned()
        })
    };

    let canned = canned.unwrap_or(Canned {
        status: 404,
        body: r#"{"detail":"Not Found"}"#.to_string(),
    });

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        reason(canned.status),
        canned.body.len(),
        canned.body
    );
    let mut stream = stream;
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn first_query_value(query: &str) -> Option<String> {
    let pair = query.split('&').next()?;
    let (_, value) = pair.split_once('=')?;
    Some(percent_decode(value))
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("S%C3%A3o+Paulo"), "São Paulo");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(first_query_value("city=New+York&x=1").as_deref(), Some("New York"));
    }
}
