//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed route table (path → status, content type, body) and records
//! every request's target and headers so tests can assert what was sent.
//! Unknown paths get 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Advertise the full Content-Length but close after sending this many
    /// fewer bytes.
    pub truncate_by: usize,
}

impl Route {
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.into(),
            truncate_by: 0,
        }
    }

    pub fn html(body: &str) -> Self {
        Self::ok("text/html; charset=utf-8", body)
    }

    pub fn json(body: &str) -> Self {
        Self::ok("application/json", body)
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: format!("status {status}").into_bytes(),
            truncate_by: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request target as sent, including any query string.
    pub target: String,
    /// Lowercased header name → value.
    pub headers: HashMap<String, String>,
}

pub struct PageServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/".
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl PageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most recent request whose path (without query) is `path`.
    pub fn last_request_to(&self, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| strip_query(&r.target) == path)
    }
}

/// Starts a server in a background thread. Routes are keyed by absolute path
/// without query ("/video/1"). The server runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &routes, &recorded));
        }
    });
    PageServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(head) = read_head(&mut stream) else {
        return;
    };
    let Some(request) = parse_request(&head) else {
        return;
    };
    let route = routes
        .get(strip_query(&request.target))
        .cloned()
        .unwrap_or_else(|| Route::status(404));
    recorded.lock().unwrap().push(request);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let sent = route.body.len().saturating_sub(route.truncate_by);
    let _ = stream.write_all(&route.body[..sent]);
    let _ = stream.flush();
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
        if data.len() > 64 * 1024 {
            break;
        }
    }
    String::from_utf8(data).ok()
}

fn parse_request(head: &str) -> Option<RecordedRequest> {
    let mut lines = head.lines();
    let target = lines.next()?.split_whitespace().nth(1)?.to_string();
    let mut headers = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }
    Some(RecordedRequest { target, headers })
}

fn strip_query(target: &str) -> &str {
    target.split('?').next().unwrap_or(target)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
