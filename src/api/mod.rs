//! Resource clients for the remote service.

mod auth;
mod items;
mod types;

pub use auth::AuthApi;
pub use items::ItemsApi;
pub use types::{
    AuthResponse, Credentials, Item, ItemId, ListQuery, Page, PageLinks, Pagination,
    Registration, SortDirection, User,
};
