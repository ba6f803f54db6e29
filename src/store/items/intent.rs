use crate::api::{Item, ItemId, Page, SortDirection};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ItemListIntent {
    /// A request was issued. Clears `error`.
    RequestStarted,
    /// A request settled, successfully or not.
    RequestFinished,
    /// Persist the sort preference. `None` keeps the stored value.
    SortChanged {
        field: Option<String>,
        direction: Option<SortDirection>,
    },
    SearchChanged { query: String },
    /// A list page arrived. `reverse` flips it for display.
    PageLoaded { page: Page<Item>, reverse: bool },
    ItemLoaded { item: Item },
    ItemCreated { item: Item },
    ItemUpdated { id: ItemId, item: Item },
    ItemDeleted { id: ItemId },
    Failed { message: String },
    /// Drop all data. In-flight bookkeeping is kept.
    Reset,
}

impl Intent for ItemListIntent {}
