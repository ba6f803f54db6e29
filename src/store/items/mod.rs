//! Paginated item list container.

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::ItemListIntent;
pub use reducer::ItemListReducer;
pub use state::ItemListState;
pub use store::{FetchOptions, FetchOutcome, ItemStore, ID_SORT_KEY, ROW_NUMBER_SORT_KEY};
