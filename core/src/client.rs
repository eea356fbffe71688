//! Stateless HTTP request builder and response parser for the item API.
//!
//! # Design
//! `ItemClient` holds only the resource URL (`<apiUrl>/items`) and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. A `Transport` performs the round-trip in between, so the
//! client itself stays deterministic and free of I/O.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Item;

/// Synchronous, stateless client for the item API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    items_url: String,
}

impl ItemClient {
    /// `api_url` is the API root, e.g. `http://localhost:8080/api`.
    pub fn new(api_url: &str) -> Self {
        Self {
            items_url: format!("{}/items", api_url.trim_end_matches('/')),
        }
    }

    pub fn items_url(&self) -> &str {
        &self.items_url
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.items_url.clone())
    }

    /// No validation of `id`; the server decides what a valid id is.
    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_item(&self, item: &Item) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, self.items_url.clone(), item)
    }

    pub fn build_update_item(&self, id: i64, item: &Item) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.item_url(id), item)
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn build_search_items(&self, name: &str) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("name", name)
            .finish();
        self.bodyless(HttpMethod::Get, format!("{}/search?{query}", self.items_url))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.items_url)
    }

    fn bodyless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(&self, method: HttpMethod, path: String, item: &Item) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(item).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ItemClient {
        ItemClient::new("http://localhost:8080/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/items");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_item_appends_id() {
        let req = client().build_get_item(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/items/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_item_sends_draft_as_json() {
        let draft = Item::draft("Book", Some("A book".to_string()));
        let req = client().build_create_item(&draft).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/items");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Book");
        assert_eq!(body["description"], "A book");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_item_sends_full_body() {
        let item = Item {
            id: Some(7),
            name: "Lamp".to_string(),
            description: None,
            created_at: Some("2024-05-01T10:00:00".to_string()),
            updated_at: None,
        };
        let req = client().build_update_item(7, &item).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/items/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 7);
        assert_eq!(body["name"], "Lamp");
        assert_eq!(body["createdAt"], "2024-05-01T10:00:00");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn build_delete_item_produces_correct_request() {
        let req = client().build_delete_item(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/items/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_search_items_encodes_name() {
        let req = client().build_search_items("tea & cake");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:8080/api/items/search?name=tea+%26+cake"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ItemClient::new("http://localhost:8080/api/");
        assert_eq!(client.items_url(), "http://localhost:8080/api/items");
        assert_eq!(client.build_list_items().path, "http://localhost:8080/api/items");
    }

    #[test]
    fn parse_list_items_preserves_order() {
        let items = client()
            .parse_list_items(response(200, r#"[{"id":2,"name":"B"},{"id":1,"name":"A"}]"#))
            .unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
    }

    #[test]
    fn parse_get_item_not_found() {
        let err = client().parse_get_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_item_accepts_any_2xx() {
        let body = r#"{"id":1,"name":"New"}"#;
        assert_eq!(client().parse_create_item(response(201, body)).unwrap().id, Some(1));
        assert_eq!(client().parse_create_item(response(200, body)).unwrap().name, "New");
    }

    #[test]
    fn parse_create_item_server_error() {
        let err = client()
            .parse_create_item(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_update_item_validation_error() {
        let err = client().parse_update_item(response(400, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
    }

    #[test]
    fn parse_delete_item_ignores_body() {
        assert!(client().parse_delete_item(response(204, "")).is_ok());
        assert!(client().parse_delete_item(response(200, "ok")).is_ok());
    }

    #[test]
    fn parse_delete_item_not_found() {
        let err = client().parse_delete_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_search_items_bad_json() {
        let err = client().parse_search_items(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
