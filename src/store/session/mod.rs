//! Authentication session container.

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::SessionIntent;
pub use reducer::SessionReducer;
pub use state::SessionState;
pub use store::SessionStore;
