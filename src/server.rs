// src/server.rs

use crate::error::{GuestbookError, Result};
use crate::handlers::{self, App};
use std::io::Read;
use std::sync::Arc;
use std::thread;

const WORKERS: usize = 4;

/// Binds the listener and serves requests until the process is stopped.
pub fn run(addr: &str, app: App) -> Result<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|e| GuestbookError::InvalidInput(format!("cannot bind {}: {}", addr, e)))?;
    tracing::info!(addr, "guest book listening");

    let server = Arc::new(server);
    let app = Arc::new(app);
    let mut workers = Vec::with_capacity(WORKERS);
    for _ in 0..WORKERS {
        let server = Arc::clone(&server);
        let app = Arc::clone(&app);
        workers.push(thread::spawn(move || loop {
            let request = match server.recv() {
                Ok(request) => request,
                Err(e) => {
                    tracing::error!(error = %e, "listener stopped accepting requests");
                    break;
                }
            };
            if let Err(e) = serve_one(&app, request) {
                tracing::error!(error = %e, "failed to answer a request");
            }
        }));
    }
    for worker in workers {
        let _ = worker.join();
    }
    Ok(())
}

/// Reads one wire request, runs it through the handlers, writes the response.
fn serve_one(app: &App, mut request: tiny_http::Request) -> Result<()> {
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;

    let req = to_http_request(&request, body)?;
    tracing::debug!(method = %req.method(), path = req.uri().path(), "handling request");
    let resp = handlers::handle(app, &req);

    let (parts, body) = resp.into_parts();
    let mut out = tiny_http::Response::from_data(body).with_status_code(parts.status.as_u16());
    for (name, value) in parts.headers.iter() {
        if let Ok(h) = tiny_http::Header::from_bytes(name.as_str().as_bytes(), value.as_bytes()) {
            out = out.with_header(h);
        }
    }
    request.respond(out)?;
    Ok(())
}

fn to_http_request(request: &tiny_http::Request, body: Vec<u8>) -> Result<http::Request<Vec<u8>>> {
    let method = http::Method::from_bytes(request.method().to_string().as_bytes())
        .map_err(|e| GuestbookError::InvalidInput(format!("unsupported method: {}", e)))?;
    Ok(http::Request::builder()
        .method(method)
        .uri(request.url())
        .body(body)?)
}
