//! Minimal HTTP/1.1 server that serves a fixed set of files for integration tests.
//!
//! GET of a known path returns 200 with the body; anything else is 404.
//! A file may advertise a longer `Content-Length` than its body to simulate
//! a connection dropped mid-transfer.
//! Every request is counted so tests can assert that no-clobber skips the network.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
pub struct FileServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FileServer {
    /// Paths requested so far, in order (e.g. "/enwik8.bz2").
    pub fn requests(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

/// Body served for one path and the `Content-Length` announced for it.
struct Served {
    status: &'static str,
    body: Vec<u8>,
    content_length: usize,
}

/// Starts a server in a background thread serving `files` (name → body) at `/<name>`.
/// The server runs until the process exits.
pub fn start(files: Vec<(&str, Vec<u8>)>) -> FileServer {
    start_with_lengths(
        files
            .into_iter()
            .map(|(name, body)| {
                let len = body.len();
                (name, body, len)
            })
            .collect(),
    )
}

/// Like `start` but each entry announces its own `Content-Length`. A length
/// larger than the body makes the server close the connection early.
pub fn start_with_lengths(files: Vec<(&str, Vec<u8>, usize)>) -> FileServer {
    serve(
        files
            .into_iter()
            .map(|(name, body, content_length)| {
                (
                    name,
                    Served {
                        status: "200 OK",
                        body,
                        content_length,
                    },
                )
            })
            .collect(),
    )
}

/// Serves a single file with a custom status line (e.g. "302 Found").
pub fn start_with_status(name: &str, status: &'static str, body: Vec<u8>) -> FileServer {
    let content_length = body.len();
    serve(vec![(
        name,
        Served {
            status,
            body,
            content_length,
        },
    )])
}

fn serve(files: Vec<(&str, Served)>) -> FileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashMap<String, Served>> = Arc::new(
        files
            .into_iter()
            .map(|(name, served)| (format!("/{}", name), served))
            .collect(),
    );
    let hits = Arc::new(Mutex::new(Vec::new()));
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &files, &hits));
        }
    });
    FileServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Served>,
    hits: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    hits.lock().unwrap().push(path.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    match files.get(&path) {
        Some(served) => {
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                served.status, served.content_length
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&served.body);
        }
        None => {
            let body = b"not found";
            let header = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
    }
}
