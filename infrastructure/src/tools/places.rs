//! Places provider: `search` over a configured list of points of interest.

use async_trait::async_trait;
use atlas_application::provider::{HandlerProvider, ToolHandler};
use atlas_domain::tool::{
    entities::{ToolCall, ToolDescriptor},
    schema::{InputSchema, SchemaType},
    value_objects::{ToolError, ToolOutput},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Tool name constants
pub const SEARCH: &str = "search";

/// Results returned when the call does not set `limit`
const DEFAULT_LIMIT: usize = 10;

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl PlaceEntry {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            category: category.into(),
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    fn matches(&self, query: &str, city: Option<&str>) -> bool {
        let query = query.to_lowercase();
        let hit = self.name.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query);
        hit && city.is_none_or(|c| self.city.eq_ignore_ascii_case(c))
    }
}

/// Entries used when the configuration does not list any.
pub fn sample_places() -> Vec<PlaceEntry> {
    vec![
        PlaceEntry::new("Louvre", "Paris", "museum").with_rating(4.7),
        PlaceEntry::new("Musée d'Orsay", "Paris", "museum").with_rating(4.8),
        PlaceEntry::new("Le Comptoir du Relais", "Paris", "restaurant").with_rating(4.3),
        PlaceEntry::new("Prado", "Madrid", "museum").with_rating(4.8),
        PlaceEntry::new("Mercado de San Miguel", "Madrid", "market").with_rating(4.4),
        PlaceEntry::new("Tsukiji Outer Market", "Tokyo", "market").with_rating(4.5),
    ]
}

/// Get the tool descriptor for search
pub fn search_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        SEARCH,
        "Find places whose name or category matches a query, best rated first",
    )
    .with_schema(
        InputSchema::object()
            .required_property("query", SchemaType::String, "Name or category to look for")
            .property("city", SchemaType::String, "Only return places in this city")
            .property("limit", SchemaType::Integer, "Maximum number of results"),
    )
}

/// Handler behind the `places` provider.
#[derive(Debug, Clone)]
pub struct PlacesHandler {
    entries: Vec<PlaceEntry>,
}

impl PlacesHandler {
    pub fn new(entries: Vec<PlaceEntry>) -> Self {
        Self { entries }
    }

    fn search(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let query = call.get_string("query").unwrap_or_default().trim();
        let city = call.get_string("city");
        let limit = match call.get_i64("limit") {
            None => DEFAULT_LIMIT,
            Some(n) if n > 0 => n as usize,
            Some(n) => {
                return Err(ToolError::execution_failed(format!(
                    "limit must be positive, got {}",
                    n
                )));
            }
        };

        let mut results: Vec<&PlaceEntry> = self
            .entries
            .iter()
            .filter(|p| p.matches(query, city))
            .collect();
        results.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
                .then_with(|| a.name.cmp(&b.name))
        });
        results.truncate(limit);

        debug!(query, ?city, found = results.len(), "Place search");
        Ok(ToolOutput::json(json!({
            "query": query,
            "count": results.len(),
            "results": results,
        })))
    }
}

#[async_trait]
impl ToolHandler for PlacesHandler {
    fn display_name(&self) -> &str {
        "Places"
    }

    fn descriptors(&self) -> Vec<ToolDescriptor> {
        vec![search_descriptor()]
    }

    async fn handle(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        match call.name.as_str() {
            SEARCH => self.search(call),
            other => Err(ToolError::ToolNotFound(other.to_string())),
        }
    }
}

/// The places provider.
pub type PlacesProvider = HandlerProvider<PlacesHandler>;
