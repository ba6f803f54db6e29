use serde::Serialize;

use crate::api::types::{Envelope, Item, ItemId, ListQuery, Page};
use crate::transport::{ApiError, Transport};

const ITEMS_PATH: &str = "/items";

/// Typed client for the item resource.
///
/// Stateless: every call is a single request, never retried or cached.
#[derive(Clone)]
pub struct ItemsApi {
    transport: Transport,
}

impl ItemsApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// `GET /items` with paging, sorting and search parameters.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Item>, ApiError> {
        self.transport.get(ITEMS_PATH, Some(query)).await
    }

    /// `GET /items/{id}`.
    pub async fn get(&self, id: ItemId) -> Result<Item, ApiError> {
        let envelope: Envelope<Item> = self
            .transport
            .get::<_, ()>(&item_path(id), None)
            .await?;
        Ok(envelope.into_inner())
    }

    /// `POST /items`.
    pub async fn create<B>(&self, data: &B) -> Result<Item, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<Item> = self.transport.post(ITEMS_PATH, Some(data)).await?;
        Ok(envelope.into_inner())
    }

    /// `PUT /items/{id}`.
    pub async fn update<B>(&self, id: ItemId, data: &B) -> Result<Item, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<Item> = self.transport.put(&item_path(id), data).await?;
        Ok(envelope.into_inner())
    }

    /// `DELETE /items/{id}`.
    pub async fn delete(&self, id: ItemId) -> Result<(), ApiError> {
        self.transport.delete(&item_path(id)).await
    }
}

fn item_path(id: ItemId) -> String {
    format!("{}/{}", ITEMS_PATH, id)
}
