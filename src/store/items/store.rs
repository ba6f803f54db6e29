use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use crate::api::{Item, ItemId, ItemsApi, ListQuery, SortDirection};
use crate::store::items::intent::ItemListIntent;
use crate::store::items::reducer::ItemListReducer;
use crate::store::items::state::ItemListState;
use crate::store::mvi::Reducer;
use crate::transport::ApiError;

/// Client-only sort key meaning "display row number".
///
/// The server has no such column; it is sent as [`ID_SORT_KEY`] and the
/// received page is reordered locally.
pub const ROW_NUMBER_SORT_KEY: &str = "row_number";

/// Server column the row-number key is translated to.
pub const ID_SORT_KEY: &str = "id";

/// Options for [`ItemStore::fetch_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub page: u32,
    pub per_page: u32,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub search: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort_by: None,
            sort_direction: None,
            search: String::new(),
        }
    }
}

impl FetchOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Any printable value is accepted and sent in its string form.
    pub fn search(mut self, value: impl fmt::Display) -> Self {
        self.search = value.to_string();
        self
    }
}

/// How a [`ItemStore::fetch_items`] call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was written into the state.
    Committed,
    /// A newer fetch was issued meanwhile; this result was discarded.
    Superseded,
    /// The request failed; `error` holds the message and the previous page stays.
    Failed { message: String },
}

/// State container for the paginated item list.
///
/// Operations may overlap. Only the most recently issued `fetch_items` may
/// commit its result; older ones are discarded when they settle.
pub struct ItemStore {
    api: ItemsApi,
    state: Mutex<ItemListState>,
    epoch: AtomicU64,
}

impl ItemStore {
    pub fn new(api: ItemsApi) -> Self {
        Self {
            api,
            state: Mutex::new(ItemListState::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ItemListState {
        self.state.lock().clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.lock().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Drop all data and invalidate fetches still in flight. Called when the
    /// owning session ends.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.dispatch(ItemListIntent::Reset);
    }

    /// Load a page of items.
    ///
    /// Failures are recorded in `error` and reported through the outcome;
    /// they are not returned as `Err`. A 401 also drops the list, since the
    /// session that owned it is gone.
    pub async fn fetch_items(&self, options: FetchOptions) -> FetchOutcome {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = self.begin();

        self.dispatch(ItemListIntent::SortChanged {
            field: options.sort_by.clone(),
            direction: options.sort_direction,
        });
        self.dispatch(ItemListIntent::SearchChanged {
            query: options.search.clone(),
        });

        let (query, reverse) = {
            let state = self.state.lock();
            build_query(&options, &state)
        };

        let result = self.api.list(&query).await;

        let mut state = self.state.lock();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(epoch, page = query.page, "Discarding superseded item page");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(page) => {
                tracing::debug!(
                    page = page.meta.current_page,
                    count = page.data.len(),
                    total = page.meta.total,
                    "Item page loaded"
                );
                reduce_in_place(&mut state, ItemListIntent::PageLoaded { page, reverse });
                FetchOutcome::Committed
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(
                    operation = "fetch_items",
                    error_type = e.error_type(),
                    error = %e,
                    "Item request failed"
                );
                if matches!(e, ApiError::Unauthorized { .. }) {
                    self.epoch.fetch_add(1, Ordering::SeqCst);
                    reduce_in_place(&mut state, ItemListIntent::Reset);
                }
                reduce_in_place(
                    &mut state,
                    ItemListIntent::Failed {
                        message: message.clone(),
                    },
                );
                FetchOutcome::Failed { message }
            }
        }
    }

    /// Load one item into `current_item`.
    pub async fn fetch_item(&self, id: ItemId) -> Result<Item, ApiError> {
        let _loading = self.begin();
        let item = self
            .api
            .get(id)
            .await
            .map_err(|e| self.record_failure("fetch_item", e))?;
        self.dispatch(ItemListIntent::ItemLoaded { item: item.clone() });
        Ok(item)
    }

    /// Create an item and put it at the front of the list.
    pub async fn create_item<B>(&self, data: &B) -> Result<Item, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let _loading = self.begin();
        let item = self
            .api
            .create(data)
            .await
            .map_err(|e| self.record_failure("create_item", e))?;
        self.dispatch(ItemListIntent::ItemCreated { item: item.clone() });
        Ok(item)
    }

    /// Update an item, replacing it in place when it is on the current page.
    pub async fn update_item<B>(&self, id: ItemId, data: &B) -> Result<Item, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let _loading = self.begin();
        let item = self
            .api
            .update(id, data)
            .await
            .map_err(|e| self.record_failure("update_item", e))?;
        self.dispatch(ItemListIntent::ItemUpdated {
            id,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Delete an item and drop every entry with its id from the list.
    pub async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        let _loading = self.begin();
        self.api
            .delete(id)
            .await
            .map_err(|e| self.record_failure("delete_item", e))?;
        self.dispatch(ItemListIntent::ItemDeleted { id });
        Ok(())
    }

    fn dispatch(&self, intent: ItemListIntent) {
        let mut state = self.state.lock();
        reduce_in_place(&mut state, intent);
    }

    /// Marks a request in flight until the returned guard drops, which also
    /// covers a caller dropping the future mid-request.
    fn begin(&self) -> scopeguard::ScopeGuard<(), impl FnOnce(()) + '_> {
        self.dispatch(ItemListIntent::RequestStarted);
        scopeguard::guard((), move |_| self.dispatch(ItemListIntent::RequestFinished))
    }

    /// Record `error` in the state. A rejected credential ends the session,
    /// so the list is dropped first.
    fn record_failure(&self, operation: &'static str, error: ApiError) -> ApiError {
        tracing::warn!(
            operation,
            error_type = error.error_type(),
            error = %error,
            "Item request failed"
        );
        if matches!(error, ApiError::Unauthorized { .. }) {
            self.reset();
        }
        self.dispatch(ItemListIntent::Failed {
            message: error.user_message(),
        });
        error
    }
}

fn reduce_in_place(state: &mut ItemListState, intent: ItemListIntent) {
    let current = std::mem::take(state);
    *state = ItemListReducer::reduce(current, intent);
}

/// Build the wire query from the options and the stored sort preference.
///
/// Returns the query and whether the received page must be reversed.
fn build_query(options: &FetchOptions, state: &ItemListState) -> (ListQuery, bool) {
    let sort_field = (!state.sort_field.is_empty()).then(|| state.sort_field.clone());
    let direction = if sort_field.is_some() {
        Some(state.sort_direction)
    } else {
        options.sort_direction
    };

    let by_row_number = sort_field.as_deref() == Some(ROW_NUMBER_SORT_KEY);
    let sort_by = sort_field.map(|field| {
        if field == ROW_NUMBER_SORT_KEY {
            ID_SORT_KEY.to_string()
        } else {
            field
        }
    });

    let query = ListQuery {
        page: options.page,
        per_page: options.per_page,
        sort_by,
        sort_direction: direction,
        search: Some(options.search.clone()),
    };
    let reverse = by_row_number && direction == Some(SortDirection::Desc);
    (query, reverse)
}
