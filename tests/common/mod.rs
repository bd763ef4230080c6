//! Common test utilities for integration tests

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// Helper function to create a test ZIP file in memory with specified files
#[allow(dead_code)]
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Lists the file names directly inside `dir`, sorted.
#[allow(dead_code)]
pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Builds a listing page with one anchor per href.
#[allow(dead_code)]
pub fn listing_html(hrefs: &[&str]) -> Vec<u8> {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("    <li><a href=\"{href}\">{href}</a></li>\n"))
        .collect();
    format!("<html>\n<body>\n  <ul>\n{anchors}  </ul>\n</body>\n</html>\n").into_bytes()
}

#[derive(Clone)]
struct Route {
    status: u16,
    body: Arc<Vec<u8>>,
}

/// Minimal HTTP/1.1 server for integration tests.
///
/// Serves fixed bodies per path, answers 404 for unknown paths, and counts the
/// GET requests received for each path. Runs until the process exits.
pub struct TestServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Starts a server for `(path, status, body)` routes in a background thread.
    pub fn start(routes: Vec<(&str, u16, Vec<u8>)>) -> Self {
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, status, body)| {
                (
                    path.to_string(),
                    Route {
                        status,
                        body: Arc::new(body),
                    },
                )
            })
            .collect();
        let routes = Arc::new(routes);
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let server_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&server_hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            hits,
        }
    }

    /// Absolute URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = path.split('?').next().unwrap_or(path).to_string();

    *hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        body: Arc::new(b"not found".to_vec()),
    });
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
