//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Request lifecycle events (started, finished, failed)
/// - Server responses (page loaded, item created)
/// - Session events (signed out)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
