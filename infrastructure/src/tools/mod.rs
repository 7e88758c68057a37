//! Tool gateway and bundled providers
//!
//! ## Providers
//!
//! - `places`: searches a configured list of points of interest
//! - `favorites`: in-memory list of saved places
//!
//! Both are built on [`atlas_application::provider::HandlerProvider`]; any
//! other [`atlas_domain::tool::provider::ToolProvider`] can be registered
//! alongside them.

pub mod favorites;
pub mod naming;
pub mod places;

mod gateway;
mod schema;

pub use favorites::{FavoritesHandler, FavoritesProvider};
pub use gateway::{
    ConfigurationError, GatewayStats, InitializationError, ToolGateway, ToolGatewayBuilder,
};
pub use naming::{qualify, split_qualified_name};
pub use places::{PlaceEntry, PlacesHandler, PlacesProvider, sample_places};
pub use schema::{ApiFlavor, JsonSchemaToolConverter};
