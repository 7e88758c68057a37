//! Tool Gateway
//!
//! The [`ToolGateway`] aggregates independently built tool providers behind
//! one catalog and routes calls back to them. It implements
//! [`ToolGatewayPort`].
//!
//! # Usage
//!
//! ```ignore
//! use atlas_infrastructure::tools::{ToolGatewayBuilder, FavoritesProvider, PlacesProvider};
//!
//! let gateway = ToolGatewayBuilder::new()
//!     .register("places", PlacesProvider::new(entries))
//!     .register("favorites", FavoritesProvider::new(100))
//!     .initialize_all()
//!     .await?;
//!
//! // Every tool is published as `<provider>_<tool>`
//! assert!(gateway.has_tool("places_search"));
//!
//! let call = ToolCall::new("places_search").with_arg("query", "museum");
//! let result = gateway.execute_tool(&call).await?;
//! ```
//!
//! # Lifecycle
//!
//! The builder is the uninitialized state: providers are registered but
//! their catalogs are unknown. [`ToolGatewayBuilder::initialize_all`] awaits
//! every provider's `initialize()` and yields a ready [`ToolGateway`] only if
//! all of them succeeded. The provider set is immutable afterwards, so
//! concurrent calls read the routing table without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use atlas_application::{
    config::GatewayConfig,
    ports::tool_gateway::{GatewayError, ToolGatewayPort},
    provider::describe_panic,
};
use atlas_domain::tool::{
    entities::{FunctionSpec, ToolCall, ToolDescriptor},
    provider::{ProviderError, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use futures::future::join_all;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::naming::{is_valid_provider_id, qualify, split_qualified_name};

/// Startup-time registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("provider '{0}' is already registered")]
    DuplicateProvider(String),

    #[error("invalid provider id '{0}': use ASCII letters, digits or '-'")]
    InvalidProviderId(String),
}

/// One or more providers failed to initialize; the gateway never became ready.
#[derive(Debug)]
pub struct InitializationError {
    pub failures: Vec<(String, ProviderError)>,
}

impl InitializationError {
    pub fn provider_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|(id, _)| id.as_str()).collect()
    }
}

impl fmt::Display for InitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} provider(s) failed to initialize",
            self.failures.len()
        )?;
        for (id, error) in &self.failures {
            write!(f, "; {}: {}", id, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for InitializationError {}

/// Providers registered, not yet initialized.
pub struct ToolGatewayBuilder {
    providers: BTreeMap<String, Arc<dyn ToolProvider>>,
    config: GatewayConfig,
}

impl ToolGatewayBuilder {
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
            config: GatewayConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a provider under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered or is not a valid provider id.
    /// Use [`try_register`](Self::try_register) when ids come from user input.
    pub fn register<P: ToolProvider + 'static>(self, id: impl Into<String>, provider: P) -> Self {
        match self.try_register(id, provider) {
            Ok(builder) => builder,
            Err(e) => panic!("{e}"),
        }
    }

    /// Register a provider, rejecting duplicate or invalid ids.
    pub fn try_register<P: ToolProvider + 'static>(
        self,
        id: impl Into<String>,
        provider: P,
    ) -> Result<Self, ConfigurationError> {
        self.try_register_arc(id, Arc::new(provider))
    }

    /// Register a shared provider (Arc version)
    pub fn try_register_arc(
        mut self,
        id: impl Into<String>,
        provider: Arc<dyn ToolProvider>,
    ) -> Result<Self, ConfigurationError> {
        let id = id.into();
        if !is_valid_provider_id(&id) {
            return Err(ConfigurationError::InvalidProviderId(id));
        }
        if self.providers.contains_key(&id) {
            return Err(ConfigurationError::DuplicateProvider(id));
        }

        debug!(provider = %id, name = provider.display_name(), "Registered provider");
        self.providers.insert(id, provider);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Initialize every provider concurrently.
    ///
    /// Fails with every provider's error if any of them failed.
    pub async fn initialize_all(self) -> Result<ToolGateway, InitializationError> {
        let outcomes = join_all(self.providers.iter().map(|(id, provider)| async move {
            (id.clone(), provider.initialize().await)
        }))
        .await;

        let failures: Vec<(String, ProviderError)> = outcomes
            .into_iter()
            .filter_map(|(id, outcome)| outcome.err().map(|e| (id, e)))
            .collect();

        if !failures.is_empty() {
            for (id, error) in &failures {
                warn!(provider = %id, error = %error, "Provider failed to initialize");
            }
            return Err(InitializationError { failures });
        }

        let catalog = build_catalog(&self.providers);
        info!(
            providers = self.providers.len(),
            tools = catalog.len(),
            "Tool gateway ready"
        );

        Ok(ToolGateway {
            providers: self.providers,
            catalog,
            config: self.config,
        })
    }
}

impl Default for ToolGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Qualified descriptors of every provider, ordered by provider id then tool name.
fn build_catalog(providers: &BTreeMap<String, Arc<dyn ToolProvider>>) -> Vec<ToolDescriptor> {
    let mut catalog = Vec::new();
    for (id, provider) in providers {
        let mut tools = provider.tools();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        catalog.extend(tools.into_iter().map(|tool| ToolDescriptor {
            name: qualify(id, &tool.name),
            description: format!("[{}] {}", id, tool.description),
            input_schema: tool.input_schema,
        }));
    }
    catalog
}

/// Ready gateway: stable catalog, immutable routing table.
pub struct ToolGateway {
    providers: BTreeMap<String, Arc<dyn ToolProvider>>,
    catalog: Vec<ToolDescriptor>,
    config: GatewayConfig,
}

impl ToolGateway {
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Registered provider ids, sorted
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> GatewayStats {
        let tools_per_provider = self
            .providers
            .iter()
            .map(|(id, provider)| (id.clone(), provider.tools().len()))
            .collect();

        GatewayStats {
            total_providers: self.providers.len(),
            total_tools: self.catalog.len(),
            tools_per_provider,
        }
    }

    /// Resolve a qualified call to `(provider id, provider, bare tool name)`.
    fn resolve<'a>(
        &self,
        call: &'a ToolCall,
    ) -> Result<(&'a str, &Arc<dyn ToolProvider>, &'a str), GatewayError> {
        let (provider_id, tool) = split_qualified_name(&call.name)?;
        let provider =
            self.providers
                .get(provider_id)
                .ok_or_else(|| GatewayError::ProviderNotFound {
                    provider: provider_id.to_string(),
                    name: call.name.clone(),
                })?;
        Ok((provider_id, provider, tool))
    }

    /// Resolve a call and start it on its own runtime task.
    fn spawn_call(&self, call: &ToolCall) -> Result<PendingCall, GatewayError> {
        let (provider_id, provider, tool) = self.resolve(call)?;
        let provider = Arc::clone(provider);
        let local_call = call.renamed(tool);
        debug!(tool = %call.name, "Executing tool");

        let handle = tokio::spawn(async move { provider.execute_tool(&local_call).await });
        Ok(PendingCall {
            name: call.name.clone(),
            provider: provider_id.to_string(),
            tool: tool.to_string(),
            handle,
        })
    }

    /// Wait for a spawned call, bounded by the call timeout.
    ///
    /// The timer runs on the caller's task, so a provider that blocks its
    /// worker thread still gets its slot filled once the bound elapses.
    async fn settle(&self, pending: PendingCall) -> Result<ToolResult, GatewayError> {
        let PendingCall {
            name,
            provider,
            tool,
            mut handle,
        } = pending;

        let joined = match tokio::time::timeout(self.config.call_timeout, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                warn!(
                    tool = %name,
                    timeout_ms = self.config.call_timeout.as_millis() as u64,
                    "Tool call timed out"
                );
                return Ok(ToolResult::from(ToolError::Timeout {
                    tool: name,
                    after: self.config.call_timeout,
                }));
            }
        };

        match joined {
            Ok(Ok(result)) => {
                if result.is_error {
                    debug!(tool = %name, "Tool returned an error result");
                }
                Ok(result)
            }
            Ok(Err(ToolError::ToolNotFound(_))) => {
                Err(GatewayError::ToolNotFound { provider, tool })
            }
            Ok(Err(error)) => Ok(ToolResult::from(error)),
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    describe_panic(join_error.into_panic().as_ref())
                } else {
                    join_error.to_string()
                };
                let error = ToolError::Panicked { tool: name, message };
                warn!(error = %error, "Tool task failed");
                Ok(ToolResult::from(error))
            }
        }
    }

    async fn run_guarded(&self, call: &ToolCall) -> Result<ToolResult, GatewayError> {
        let pending = self.spawn_call(call)?;
        self.settle(pending).await
    }
}

/// A call running on its own task.
struct PendingCall {
    name: String,
    provider: String,
    tool: String,
    handle: JoinHandle<Result<ToolResult, ToolError>>,
}

#[async_trait]
impl ToolGatewayPort for ToolGateway {
    fn all_tools(&self) -> Vec<ToolDescriptor> {
        self.catalog.clone()
    }

    fn has_tool(&self, qualified_name: &str) -> bool {
        self.catalog.iter().any(|t| t.name == qualified_name)
    }

    fn to_function_calling_schema(&self) -> Vec<FunctionSpec> {
        self.catalog.iter().cloned().map(FunctionSpec::from).collect()
    }

    async fn execute_tool(&self, call: &ToolCall) -> Result<ToolResult, GatewayError> {
        self.run_guarded(call).await.inspect_err(|e| {
            debug!(tool = %call.name, error = %e, "Routing failed");
        })
    }

    async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        info!(calls = calls.len(), "Executing tool batch");

        // Every call is on the runtime before any of them is awaited
        let pending: Vec<_> = calls.iter().map(|call| self.spawn_call(call)).collect();

        join_all(pending.into_iter().zip(calls).map(|(pending, call)| async move {
            let outcome = match pending {
                Ok(pending) => self.settle(pending).await,
                Err(e) => Err(e),
            };
            outcome.unwrap_or_else(|e| {
                debug!(tool = %call.name, error = %e, "Routing failed");
                e.to_result()
            })
        }))
        .await
    }
}

/// Statistics about the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayStats {
    pub total_providers: usize,
    pub total_tools: usize,
    pub tools_per_provider: BTreeMap<String, usize>,
}
