//! Model-View-Intent (MVI) primitives for the state containers.
//!
//! # Architecture
//!
//! ```text
//! Operation ──→ Intent ──→ Reducer ──→ State ──→ Snapshot
//!     ↑                                             │
//!     └─────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Plain data describing what the container currently holds
//! - **Intent**: Something that happened (request started, page loaded, ...)
//! - **Reducer**: Pure function that transforms state based on intents
//!
//! The async containers only perform I/O and dispatch intents; every state
//! transition lives in a reducer and can be tested without a server.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
