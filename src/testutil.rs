// Minimal blocking HTTP server used by the client and orchestration tests,
// standing in for the real RMS API.
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::utils::logging::Logger;

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        MockResponse {
            status: 200,
            reason: "OK",
            body: body.into(),
        }
    }

    pub fn status(status: u16, reason: &'static str) -> Self {
        MockResponse {
            status,
            reason,
            body: String::new(),
        }
    }
}

pub struct MockServer {
    addr: SocketAddr,
    done: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind mock server");
        let addr = listener.local_addr().expect("mock server has no address");
        let done = Arc::new(AtomicBool::new(false));
        let done_flag = Arc::clone(&done);

        let handle = std::thread::spawn(move || {
            for stream in listener.incoming() {
                if done_flag.load(Ordering::SeqCst) {
                    break;
                }
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(_) => continue,
                };
                if let Some(request) = read_request(&stream) {
                    let response = handler(&request);
                    write_response(&stream, &response);
                }
            }
        });

        MockServer {
            addr,
            done,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.done.store(true, Ordering::SeqCst);
        // Wake the accept loop so the thread can observe the flag
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_request(stream: &TcpStream) -> Option<MockRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            match name.to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value.to_string()),
                _ => {}
            }
        }
    }

    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).ok()?;
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (target, String::new()),
    };

    Some(MockRequest {
        method,
        path,
        query,
        authorization,
    })
}

fn write_response(mut stream: &TcpStream, response: &MockResponse) {
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes());
    let _ = stream.flush();
}

/// Logger that records messages instead of printing them.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    pub messages: Vec<String>,
    pub debug_messages: Vec<String>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        RecordingLogger::default()
    }
}

impl Logger for RecordingLogger {
    fn log(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn debug_log(&mut self, message: &str) {
        self.debug_messages.push(message.to_string());
    }
}
