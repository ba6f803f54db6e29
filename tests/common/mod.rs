//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::sync::Arc;

use itemdesk::api::{AuthApi, ItemsApi};
use itemdesk::config::{ApiConfig, Config, MemoryTokenStore, TokenStore};
use itemdesk::Client;
use itemdesk::store::{ItemStore, SessionStore};
use itemdesk::transport::Transport;
use serde_json::{json, Value};

use mock_backend::MockBackend;

/// API settings pointing at the mock server.
pub fn api_config(mock: &MockBackend) -> ApiConfig {
    ApiConfig {
        base_url: mock.base_url(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

/// Full client against the mock server. Must run inside a tokio runtime.
pub fn client(mock: &MockBackend, tokens: Arc<dyn TokenStore>) -> Client {
    let config = Config {
        api: api_config(mock),
        ..Config::default()
    };
    Client::new(&config, tokens).expect("client")
}

pub fn transport(mock: &MockBackend, tokens: Arc<dyn TokenStore>) -> Transport {
    Transport::new(&api_config(mock), tokens).expect("transport")
}

/// Item container with an empty in-memory token store.
pub fn item_store(mock: &MockBackend) -> ItemStore {
    item_store_with(mock, Arc::new(MemoryTokenStore::new()))
}

pub fn item_store_with(mock: &MockBackend, tokens: Arc<dyn TokenStore>) -> ItemStore {
    ItemStore::new(ItemsApi::new(transport(mock, tokens)))
}

pub fn session_store(mock: &MockBackend, tokens: Arc<dyn TokenStore>) -> SessionStore {
    SessionStore::new(AuthApi::new(transport(mock, tokens)))
}

pub fn item(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

/// List endpoint body (data, meta, links) for the given ids.
pub fn page_body(ids: &[u64], current_page: u32, last_page: u32, per_page: u32, total: u64) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| item(*id, &format!("item-{}", id))).collect();
    json!({
        "data": data,
        "meta": {
            "current_page": current_page,
            "last_page": last_page,
            "per_page": per_page,
            "total": total,
        },
        "links": {
            "first": "http://localhost/api/items?page=1",
            "last": format!("http://localhost/api/items?page={}", last_page),
            "prev": null,
            "next": null,
        },
    })
}

pub fn user_body(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{}@example.com", name) })
}
