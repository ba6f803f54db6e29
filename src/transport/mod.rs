//! HTTP transport against the remote item service.
//!
//! Attaches JSON headers and the bearer credential to every request and
//! turns `401` responses into a token teardown plus a [`SessionEvent`].

mod client;
mod error;

pub use client::{SessionEvent, TimeoutConfig, Transport};
pub use error::ApiError;
