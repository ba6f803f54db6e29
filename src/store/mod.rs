//! State containers mediating between callers and the resource clients.

pub mod items;
pub mod mvi;
pub mod session;

pub use items::{FetchOptions, FetchOutcome, ItemListState, ItemStore};
pub use session::{SessionState, SessionStore};
