//! One-shot HTTP stub for exercising the reqwest clients.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// A one-shot HTTP server answering a single request with a canned response.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    /// Wait for the request to be served and return it verbatim.
    pub fn request(self) -> String {
        self.handle.join().expect("stub server thread panicked")
    }
}

/// Serve one request, replying with `status` (e.g. `200 OK`) and a JSON `body`.
pub fn serve_once(status: &str, body: &str) -> StubServer {
    serve_raw(format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
}

/// Serve one request, replying with `response` byte for byte and then closing.
pub fn serve_raw(response: String) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept should succeed");
        let request = read_request(&mut stream);
        stream
            .write_all(response.as_bytes())
            .expect("write should succeed");
        stream.flush().expect("flush should succeed");
        request
    });

    StubServer { url, handle }
}

/// An address nothing listens on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read should succeed");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).expect("read should succeed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
