//! Favorites provider: an in-memory list of saved places.
//!
//! The list is shared by every in-flight call, so it sits behind a
//! [`tokio::sync::RwLock`] owned by the handler.

use async_trait::async_trait;
use atlas_application::provider::{HandlerProvider, ToolHandler};
use atlas_domain::tool::{
    entities::{ToolCall, ToolDescriptor},
    schema::{InputSchema, SchemaType},
    value_objects::{ToolError, ToolOutput},
};
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

/// Tool name constants
pub const ADD: &str = "add";
pub const LIST: &str = "list";
pub const REMOVE: &str = "remove";

pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// A saved place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub place: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub fn add_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(ADD, "Save a place to favorites, or update its note").with_schema(
        InputSchema::object()
            .required_property("place", SchemaType::String, "Name of the place")
            .property("note", SchemaType::String, "Free-form note"),
    )
}

pub fn list_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(LIST, "List saved places in the order they were added")
}

pub fn remove_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(REMOVE, "Remove a place from favorites").with_schema(
        InputSchema::object().required_property("place", SchemaType::String, "Name of the place"),
    )
}

/// Handler behind the `favorites` provider.
#[derive(Debug)]
pub struct FavoritesHandler {
    max_entries: usize,
    entries: RwLock<Vec<Favorite>>,
}

impl FavoritesHandler {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn add(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let place = call.get_string("place").unwrap_or_default().trim();
        if place.is_empty() {
            return Err(ToolError::execution_failed("place must not be empty"));
        }
        let note = call.get_string("note").map(str::to_string);

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.iter_mut().find(|f| f.place == place) {
            existing.note = note;
            return Ok(ToolOutput::text(format!("Updated '{}' in favorites", place)));
        }

        if entries.len() >= self.max_entries {
            return Err(ToolError::execution_failed(format!(
                "favorites are full ({} entries); remove one first",
                self.max_entries
            )));
        }

        entries.push(Favorite {
            place: place.to_string(),
            note,
        });
        debug!(place, total = entries.len(), "Added favorite");
        Ok(ToolOutput::text(format!("Added '{}' to favorites", place)))
    }

    async fn list(&self) -> ToolOutput {
        let entries = self.entries.read().await;
        ToolOutput::json(json!({
            "count": entries.len(),
            "favorites": &*entries,
        }))
    }

    async fn remove(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let place = call.get_string("place").unwrap_or_default().trim();

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|f| f.place != place);
        if entries.len() == before {
            return Err(ToolError::execution_failed(format!(
                "'{}' is not in favorites",
                place
            )));
        }
        Ok(ToolOutput::text(format!("Removed '{}' from favorites", place)))
    }
}

impl Default for FavoritesHandler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl ToolHandler for FavoritesHandler {
    fn display_name(&self) -> &str {
        "Favorites"
    }

    fn descriptors(&self) -> Vec<ToolDescriptor> {
        vec![add_descriptor(), list_descriptor(), remove_descriptor()]
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        match call.name.as_str() {
            ADD => self.add(call).await,
            LIST => Ok(self.list().await),
            REMOVE => self.remove(call).await,
            other => Err(ToolError::ToolNotFound(other.to_string())),
        }
    }
}

/// The favorites provider.
pub type FavoritesProvider = HandlerProvider<FavoritesHandler>;

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_domain::tool::provider::ToolProvider;
    use std::sync::Arc;

    async fn provider(max_entries: usize) -> FavoritesProvider {
        let provider = HandlerProvider::new(FavoritesHandler::new(max_entries));
        provider.initialize().await.unwrap();
        provider
    }

    fn add(place: &str) -> ToolCall {
        ToolCall::new(ADD).with_arg("place", place)
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let provider = provider(10).await;

        provider.execute_tool(&add("Louvre")).await.unwrap();
        provider
            .execute_tool(&add("Prado").with_arg("note", "book tickets"))
            .await
            .unwrap();

        let listed = provider.execute_tool(&ToolCall::new(LIST)).await.unwrap();
        let text = listed.to_message_text();
        assert!(text.contains("\"count\":2"));
        assert!(text.contains("book tickets"));

        let removed = provider
            .execute_tool(&ToolCall::new(REMOVE).with_arg("place", "Louvre"))
            .await
            .unwrap();
        assert!(removed.is_success());
        assert_eq!(provider.handler().len().await, 1);
    }

    #[tokio::test]
    async fn test_add_existing_updates_note() {
        let provider = provider(1).await;
        provider.execute_tool(&add("Prado")).await.unwrap();

        let result = provider
            .execute_tool(&add("Prado").with_arg("note", "Mondays closed"))
            .await
            .unwrap();
        assert!(result.is_success());
        assert!(result.first_text().unwrap().starts_with("Updated"));
        assert_eq!(provider.handler().len().await, 1);
    }

    #[tokio::test]
    async fn test_full_list_is_a_domain_error() {
        let provider = provider(1).await;
        provider.execute_tool(&add("Louvre")).await.unwrap();

        let result = provider.execute_tool(&add("Prado")).await.unwrap();
        assert!(result.is_error);
        assert!(result.to_message_text().contains("favorites are full"));
    }

    #[tokio::test]
    async fn test_remove_unknown_place() {
        let provider = provider(5).await;
        let result = provider
            .execute_tool(&ToolCall::new(REMOVE).with_arg("place", "Atlantis"))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.to_message_text().contains("'Atlantis' is not in favorites"));
    }

    #[tokio::test]
    async fn test_missing_place_argument() {
        let provider = provider(5).await;
        let result = provider.execute_tool(&ToolCall::new(ADD)).await.unwrap();
        assert!(result.is_error);
        assert!(result.to_message_text().contains("'place'"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_respect_capacity() {
        let provider = Arc::new(provider(5).await);
        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move {
                    provider
                        .execute_tool(&add(&format!("place-{i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut added = 0;
        for task in tasks {
            if task.await.unwrap().is_success() {
                added += 1;
            }
        }
        assert_eq!(added, 5);
        assert_eq!(provider.handler().len().await, 5);
    }
}
