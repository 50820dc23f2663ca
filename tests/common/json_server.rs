//! Minimal HTTP/1.1 server that answers GETs with canned JSON for integration tests.
//!
//! Routes match on the raw request path without its query string, so
//! percent-encoded segments must be registered encoded. Unrouted paths get a
//! 404. Every request target (path and query) is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
pub struct JsonServer {
    routes: HashMap<String, Reply>,
}

/// Handle to a running server.
pub struct Running {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Running {
    /// Request targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl JsonServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with 200 and `body`.
    pub fn route(self, path: &str, body: &str) -> Self {
        self.route_status(path, 200, body)
    }

    pub fn route_status(self, path: &str, status: u16, body: &str) -> Self {
        self.insert(path, status, body, Duration::ZERO)
    }

    /// Answer `path` with 200 and `body`, but only after `delay`.
    pub fn route_delayed(self, path: &str, delay: Duration, body: &str) -> Self {
        self.insert(path, 200, body, delay)
    }

    fn insert(mut self, path: &str, status: u16, body: &str, delay: Duration) -> Self {
        self.routes.insert(
            path.to_string(),
            Reply {
                status,
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    /// Starts the server in a background thread. The returned base URL has
    /// an `/api` prefix and no trailing slash, like the real service root.
    pub fn start(self) -> Running {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        Running {
            base_url: format!("http://127.0.0.1:{port}/api"),
            requests,
        }
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Reply>, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("/");
    let path = path.strip_prefix("/api").unwrap_or(path);
    let reply = routes.get(path).cloned().unwrap_or(Reply {
        status: 404,
        body: r#"{"error":"not found"}"#.to_string(),
        delay: Duration::ZERO,
    });
    if !reply.delay.is_zero() {
        thread::sleep(reply.delay);
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason(reply.status),
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
