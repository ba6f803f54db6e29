use crate::store::items::intent::ItemListIntent;
use crate::store::items::state::ItemListState;
use crate::store::mvi::Reducer;

pub struct ItemListReducer;

impl Reducer for ItemListReducer {
    type State = ItemListState;
    type Intent = ItemListIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ItemListIntent::RequestStarted => {
                state.in_flight = state.in_flight.saturating_add(1);
                state.is_loading = true;
                state.error = None;
            }
            ItemListIntent::RequestFinished => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.is_loading = state.in_flight > 0;
            }
            ItemListIntent::SortChanged { field, direction } => {
                if let Some(field) = field {
                    state.sort_field = field;
                }
                if let Some(direction) = direction {
                    state.sort_direction = direction;
                }
            }
            ItemListIntent::SearchChanged { query } => {
                state.search_query = query;
            }
            ItemListIntent::PageLoaded { page, reverse } => {
                let mut items = page.data;
                if reverse {
                    items.reverse();
                }
                state.items = items;
                state.pagination = page.meta;
                state.links = page.links;
            }
            ItemListIntent::ItemLoaded { item } => {
                state.current_item = Some(item);
            }
            ItemListIntent::ItemCreated { item } => {
                // The server may hand back an id already on this page
                // (e.g. after a refetch raced the create).
                state.items.retain(|existing| existing.id != item.id);
                state.items.insert(0, item);
            }
            ItemListIntent::ItemUpdated { id, item } => {
                if let Some(slot) = state.items.iter_mut().find(|existing| existing.id == id) {
                    *slot = item.clone();
                }
                state.current_item = Some(item);
            }
            ItemListIntent::ItemDeleted { id } => {
                state.items.retain(|existing| existing.id != id);
            }
            ItemListIntent::Failed { message } => {
                state.error = Some(message);
            }
            ItemListIntent::Reset => {
                state = ItemListState {
                    in_flight: state.in_flight,
                    is_loading: state.is_loading,
                    ..ItemListState::default()
                };
            }
        }
        state
    }
}
