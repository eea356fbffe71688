//! Async Resource Client: one `ItemClient` build/parse pair around one
//! `Transport` round-trip per operation.
//!
//! No caching, retries or request deduplication. Errors from the transport
//! and from parsing are returned unchanged.

use tracing::debug;

use crate::client::ItemClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Item;

pub struct ItemService<T> {
    client: ItemClient,
    transport: T,
}

impl<T: Transport> ItemService<T> {
    pub fn new(client: ItemClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ItemClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        let response = self.send(self.client.build_list_items()).await?;
        self.client.parse_list_items(response)
    }

    pub async fn get(&self, id: i64) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_get_item(id)).await?;
        self.client.parse_get_item(response)
    }

    /// Not idempotent: submitting the same draft twice creates two records.
    pub async fn create(&self, draft: &Item) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_create_item(draft)?).await?;
        self.client.parse_create_item(response)
    }

    pub async fn update(&self, id: i64, item: &Item) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_update_item(id, item)?).await?;
        self.client.parse_update_item(response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_item(id)).await?;
        self.client.parse_delete_item(response)
    }

    /// Matching semantics belong to the server.
    pub async fn search(&self, name: &str) -> Result<Vec<Item>, ApiError> {
        let response = self.send(self.client.build_search_items(name)).await?;
        self.client.parse_search_items(response)
    }

    /// Execute a prebuilt request without interpreting the response.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
