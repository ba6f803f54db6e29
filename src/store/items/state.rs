use crate::api::{Item, ItemId, PageLinks, Pagination, SortDirection};
use crate::store::mvi::StoreState;

/// Snapshot of the item list container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemListState {
    /// Current page in server order, adjusted by local mutations.
    pub items: Vec<Item>,
    pub pagination: Pagination,
    pub links: PageLinks,
    /// Active sort key as the caller named it (may be the virtual row-number key).
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub search_query: String,
    pub current_item: Option<Item>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Requests currently in flight. `is_loading` mirrors `in_flight > 0`.
    pub in_flight: u32,
}

impl StoreState for ItemListState {}

impl ItemListState {
    /// Position of the entry with identifier `id`.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn has_more_pages(&self) -> bool {
        self.pagination.current_page < self.pagination.last_page
    }
}
