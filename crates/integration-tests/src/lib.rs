//! Integration tests for the Rocket Shoes cart.
//!
//! The tests drive a real [`rocket_shoes_cart::HttpCatalog`] against
//! [`FakeInventory`], an in-process axum server that serves
//! `products/{id}` and `stock/{id}` the way the inventory API does.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-shoes-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tokio::task::JoinHandle;

/// Shared state behind the fake inventory routes.
#[derive(Debug, Default)]
struct InventoryState {
    stock: Mutex<HashMap<i64, u32>>,
    product_hits: AtomicUsize,
    stock_hits: AtomicUsize,
    /// When non-zero, every request answers 429 with this `Retry-After`.
    retry_after: AtomicU64,
    authorization: Mutex<Option<String>>,
}

impl InventoryState {
    fn available(&self, id: i64) -> Option<u32> {
        self.stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
    }

    fn record_request(&self, headers: &HeaderMap) -> Option<Response> {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self
            .authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = authorization;

        let retry_after = self.retry_after.load(Ordering::SeqCst);
        if retry_after == 0 {
            return None;
        }
        let mut response = StatusCode::TOO_MANY_REQUESTS.into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        Some(response)
    }
}

/// In-process inventory API.
///
/// The server task is aborted when the value is dropped.
pub struct FakeInventory {
    base_url: String,
    state: Arc<InventoryState>,
    server: JoinHandle<()>,
}

impl FakeInventory {
    /// Start a server on an ephemeral local port with `(id, available)` products.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(entries: &[(i64, u32)]) -> std::io::Result<Self> {
        let state = Arc::new(InventoryState {
            stock: Mutex::new(entries.iter().copied().collect()),
            ..InventoryState::default()
        });

        let app = Router::new()
            .route("/products/{id}", get(product))
            .route("/stock/{id}", get(stock))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        })
    }

    /// Base URL to configure the catalog client with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Title served for `id`.
    #[must_use]
    pub fn title(id: i64) -> String {
        format!("Tênis Rocket {id}")
    }

    /// Price served for `id`, in cents.
    #[must_use]
    pub const fn price_cents(id: i64) -> i64 {
        9990 + id * 1000
    }

    /// Change the available stock for `id`, adding it if unknown.
    pub fn set_stock(&self, id: i64, available: u32) {
        self.state
            .stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, available);
    }

    /// Answer every request with 429 and `Retry-After: seconds`; zero turns it off.
    pub fn set_rate_limited(&self, seconds: u64) {
        self.state.retry_after.store(seconds, Ordering::SeqCst);
    }

    /// Number of `products/{id}` requests served.
    #[must_use]
    pub fn product_hits(&self) -> usize {
        self.state.product_hits.load(Ordering::SeqCst)
    }

    /// Number of `stock/{id}` requests served.
    #[must_use]
    pub fn stock_hits(&self) -> usize {
        self.state.stock_hits.load(Ordering::SeqCst)
    }

    /// `Authorization` header of the last request, if any.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.state
            .authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for FakeInventory {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn product(
    State(state): State<Arc<InventoryState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(limited) = state.record_request(&headers) {
        return limited;
    }
    if state.available(id).is_none() {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }

    Json(json!({
        "id": id,
        "title": FakeInventory::title(id),
        // The API sends prices as JSON numbers
        "price": cents_to_number(FakeInventory::price_cents(id)),
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
    }))
    .into_response()
}

async fn stock(
    State(state): State<Arc<InventoryState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.stock_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(limited) = state.record_request(&headers) {
        return limited;
    }
    match state.available(id) {
        Some(amount) => Json(json!({ "id": id, "amount": amount })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn cents_to_number(cents: i64) -> f64 {
    cents as f64 / 100.0
}
