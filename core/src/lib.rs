//! API client core for the item service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` performs the
//! round-trip; `ItemService` composes the two into async operations and
//! `ListView` turns their outcomes into displayable state.
//!
//! # Design
//! - `ItemClient` is stateless: it holds only the `/items` URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ListView` is constructed with its `ItemService`; nothing is looked up
//!   globally.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;
pub mod view;

pub use client::ItemClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::ItemService;
pub use transport::{Transport, UreqTransport};
pub use types::Item;
pub use view::{Action, ListView, Pending};
