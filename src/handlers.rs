// src/handlers.rs

use crate::codec;
use crate::error::{GuestbookError, Result};
use crate::render;
use crate::store::{self, BlobStore};
use chrono::Local;
use http::{header, Method, Request, Response, StatusCode};
use std::sync::{Mutex, PoisonError};

/// Shared request-handling state. The store sits behind a mutex that is held
/// across the whole read-modify-write of a submission, so two overlapping
/// submissions cannot overwrite each other's entry.
pub struct App {
    store: Mutex<Box<dyn BlobStore>>,
}

impl App {
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Current log blob.
    pub fn log(&self) -> Result<String> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.load(store::DATA_BLOB)
    }

    /// Prepends one freshly encoded record to the log and persists the
    /// result, returning the updated log text.
    pub fn submit(&self, record: &str) -> Result<String> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = store.load(store::DATA_BLOB)?;
        let updated = format!("{}{}", record, previous);
        store.store(store::DATA_BLOB, &updated)?;
        Ok(updated)
    }

    /// Loads a static blob, falling back to compiled-in markup when the blob
    /// was never uploaded.
    pub fn blob_or(&self, name: &str, default: &str) -> Result<String> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let content = store.load(name)?;
        if content.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(content)
        }
    }

    /// Renders the given log text as a full page.
    pub fn page(&self, log: &str) -> Result<String> {
        let page_header = self.blob_or(store::HEADER_BLOB, render::DEFAULT_HEADER)?;
        let page_footer = self.blob_or(store::FOOTER_BLOB, render::DEFAULT_FOOTER)?;
        Ok(render::render_page(&page_header, log, &page_footer))
    }
}

/// Entry point for one request. Failures of the store or response builder end
/// up here; the client gets a generic 500 and the detail goes to the log.
pub fn handle(app: &App, req: &Request<Vec<u8>>) -> Response<Vec<u8>> {
    match route(app, req) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, path = req.uri().path(), "request failed");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(b"internal error".to_vec())
                .unwrap()
        }
    }
}

fn route(app: &App, req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
    match req.uri().path() {
        "/api/HttpExample" => hello(req),
        "/api/getForm" => get_form(app, req),
        "/api/write" => write(app, req),
        _ => text_response(StatusCode::NOT_FOUND, "not found"),
    }
}

/// GET/POST /api/HttpExample: greets by name, taken from the request body if
/// present, otherwise from the "name" query parameter.
fn hello(req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
    let body = std::str::from_utf8(req.body()).ok().filter(|s| !s.is_empty());
    let name = match body {
        Some(text) => Some(text.to_string()),
        None => query_param(req, "name"),
    };
    match name {
        Some(name) => text_response(StatusCode::OK, &format!("Hello, {}", name)),
        None => text_response(
            StatusCode::BAD_REQUEST,
            "Please pass a name on the query string or in the request body",
        ),
    }
}

/// GET /api/getForm: the submission form page.
fn get_form(app: &App, req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
    if req.method() != Method::GET {
        return text_response(StatusCode::METHOD_NOT_ALLOWED, "only GET is supported here");
    }
    let form = app.blob_or(store::FORM_BLOB, render::DEFAULT_FORM)?;
    html_response(StatusCode::OK, &form)
}

/// GET/POST /api/write: lists the guest book; POST also adds an entry first.
fn write(app: &App, req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
    let log = if req.method() == Method::POST {
        let message = match decode_body(req.body()) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting submission with undecodable body");
                return text_response(
                    StatusCode::BAD_REQUEST,
                    &format!("could not decode request body: {}", e),
                );
            }
        };
        let record = codec::encode_entry(&message, Local::now());
        app.submit(&record)?
    } else {
        app.log()?
    };
    html_response(StatusCode::OK, &app.page(&log)?)
}

fn decode_body(body: &[u8]) -> Result<String> {
    let raw = std::str::from_utf8(body)
        .map_err(|e| GuestbookError::Decode(format!("request body is not valid UTF-8: {}", e)))?;
    codec::decode_form_body(raw)
}

/// Extracts and percent-decodes one query parameter.
fn query_param(req: &Request<Vec<u8>>, key: &str) -> Option<String> {
    let query = req.uri().query()?;
    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            return codec::percent_decode(v).ok();
        }
    }
    None
}

fn text_response(status: StatusCode, body: &str) -> Result<Response<Vec<u8>>> {
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body.as_bytes().to_vec())?)
}

fn html_response(status: StatusCode, body: &str) -> Result<Response<Vec<u8>>> {
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(body.as_bytes().to_vec())?)
}
