//! List View: owns the displayed items and the create-form draft, and turns
//! `ItemService` outcomes into UI-visible state.
//!
//! # Design
//! Every action is split the same way the client is: `begin_*` applies the
//! guard and builds the request, `complete` applies the outcome. The async
//! `initialize` / `submit_create` / `request_delete` wrappers compose the two
//! around one transport round-trip. Callers that need several requests in
//! flight at once (two quick deletes) can drive `begin_*` / `complete`
//! themselves; completions are applied in whatever order they arrive.
//!
//! State only changes after a confirmed outcome. A failure never touches
//! `items`, so there is nothing to roll back.

use std::fmt::Write;

use tracing::error;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::service::ItemService;
use crate::transport::Transport;
use crate::types::Item;

pub const LOAD_FAILED: &str = "Failed to load items";
pub const CREATE_FAILED: &str = "Failed to create item";
pub const DELETE_FAILED: &str = "Failed to delete item";

/// Which user action a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Delete(i64),
}

/// A request issued by the view and awaiting its outcome.
#[derive(Debug, Clone)]
pub struct Pending {
    pub action: Action,
    pub request: HttpRequest,
}

pub struct ListView<T> {
    service: ItemService<T>,
    items: Vec<Item>,
    draft: Item,
    loading: bool,
    error: Option<String>,
}

impl<T> ListView<T> {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn draft(&self) -> &Item {
        &self.draft
    }

    /// The create form binds here.
    pub fn draft_mut(&mut self) -> &mut Item {
        &mut self.draft
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T: Transport> ListView<T> {
    pub fn new(service: ItemService<T>) -> Self {
        Self {
            service,
            items: Vec::new(),
            draft: Item::default(),
            loading: false,
            error: None,
        }
    }

    pub fn service(&self) -> &ItemService<T> {
        &self.service
    }

    /// Load the list on first display.
    pub async fn initialize(&mut self) {
        let pending = self.begin_load();
        self.dispatch(pending).await;
    }

    /// Submit the draft. A blank name is ignored without surfacing an error.
    pub async fn submit_create(&mut self) {
        if let Some(pending) = self.begin_create() {
            self.dispatch(pending).await;
        }
    }

    /// Delete by id. `None` and `0` are ignored.
    pub async fn request_delete(&mut self, id: Option<i64>) {
        if let Some(pending) = self.begin_delete(id) {
            self.dispatch(pending).await;
        }
    }

    async fn dispatch(&mut self, pending: Pending) {
        let outcome = self.service.send(pending.request).await;
        self.complete(pending.action, outcome);
    }

    pub fn begin_load(&mut self) -> Pending {
        self.loading = true;
        Pending {
            action: Action::Load,
            request: self.service.client().build_list_items(),
        }
    }

    pub fn begin_create(&mut self) -> Option<Pending> {
        if !self.draft.has_name() {
            return None;
        }
        match self.service.client().build_create_item(&self.draft) {
            Ok(request) => Some(Pending {
                action: Action::Create,
                request,
            }),
            Err(err) => {
                self.fail(CREATE_FAILED, &err);
                None
            }
        }
    }

    pub fn begin_delete(&mut self, id: Option<i64>) -> Option<Pending> {
        let id = id.filter(|id| *id != 0)?;
        Some(Pending {
            action: Action::Delete(id),
            request: self.service.client().build_delete_item(id),
        })
    }

    /// Apply the outcome of a request started by one of the `begin_*` methods.
    pub fn complete(&mut self, action: Action, outcome: Result<HttpResponse, ApiError>) {
        let client = self.service.client();
        match action {
            Action::Load => {
                self.loading = false;
                match outcome.and_then(|response| client.parse_list_items(response)) {
                    Ok(items) => {
                        self.items = items;
                        self.error = None;
                    }
                    Err(err) => self.fail(LOAD_FAILED, &err),
                }
            }
            Action::Create => match outcome.and_then(|response| client.parse_create_item(response)) {
                Ok(item) => {
                    self.items.push(item);
                    self.draft = Item::default();
                    self.error = None;
                }
                Err(err) => self.fail(CREATE_FAILED, &err),
            },
            Action::Delete(id) => match outcome.and_then(|response| client.parse_delete_item(response)) {
                Ok(()) => {
                    // Already-absent ids are fine: a second delete of the same
                    // item removes nothing.
                    self.items.retain(|item| item.id != Some(id));
                    self.error = None;
                }
                Err(err) => self.fail(DELETE_FAILED, &err),
            },
        }
    }

    fn fail(&mut self, message: &str, err: &ApiError) {
        error!(error = %err, "{message}");
        self.error = Some(message.to_string());
    }
}

impl<T> ListView<T> {
    /// Text rendering of the current state.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.loading {
            out.push_str("Loading items...\n");
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "Error: {error}");
        }
        if self.items.is_empty() && !self.loading {
            out.push_str("No items yet.\n");
        }
        for item in &self.items {
            match item.id {
                Some(id) => {
                    let _ = write!(out, "#{id} {}", item.name);
                }
                None => out.push_str(&item.name),
            }
            if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = write!(out, ": {description}");
            }
            out.push('\n');
        }
        out
    }
}
