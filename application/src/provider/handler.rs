//! Reusable provider base.
//!
//! [`HandlerProvider`] implements the whole [`ToolProvider`] contract around
//! a [`ToolHandler`], which only has to declare descriptors and run domain
//! logic. The base owns the internal descriptor registry, descriptor
//! checks, argument validation, panic capture and result normalization.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::OnceLock;

use async_trait::async_trait;
use atlas_domain::tool::{
    entities::{ToolCall, ToolDescriptor, ToolSpec},
    provider::{ProviderError, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolOutput, ToolResult},
};
use futures::FutureExt;
use tracing::{debug, trace, warn};

/// Domain logic of a provider.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Descriptors this handler serves. Read once, at initialization.
    fn descriptors(&self) -> Vec<ToolDescriptor>;

    /// Optional readiness check run before descriptors are registered
    /// (credentials present, backend reachable, ...).
    async fn prepare(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Run `call` against already validated arguments.
    ///
    /// `call.name` is always one of the declared descriptors.
    async fn handle(&self, call: &ToolCall) -> Result<ToolOutput, ToolError>;
}

/// [`ToolProvider`] implementation wrapping a [`ToolHandler`].
pub struct HandlerProvider<H> {
    handler: H,
    spec: OnceLock<ToolSpec>,
}

impl<H: ToolHandler> HandlerProvider<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            spec: OnceLock::new(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn is_initialized(&self) -> bool {
        self.spec.get().is_some()
    }

    fn build_spec(&self) -> Result<ToolSpec, ProviderError> {
        let mut spec = ToolSpec::new();
        for descriptor in self.handler.descriptors() {
            descriptor
                .check()
                .map_err(|source| ProviderError::MalformedDescriptor {
                    tool: descriptor.name.clone(),
                    source,
                })?;

            let name = descriptor.name.clone();
            if spec.insert(descriptor).is_some() {
                return Err(ProviderError::DuplicateTool(name));
            }
        }
        Ok(spec)
    }

    async fn run_handler(&self, call: &ToolCall) -> ToolResult {
        let outcome = AssertUnwindSafe(self.handler.handle(call))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(output)) => ToolResult::from(output),
            Ok(Err(error)) => {
                warn!(
                    provider = self.handler.display_name(),
                    tool = %call.name,
                    code = error.code(),
                    error = %error,
                    "Tool returned an error"
                );
                ToolResult::from(error)
            }
            Err(payload) => {
                let error = ToolError::Panicked {
                    tool: call.name.clone(),
                    message: describe_panic(payload.as_ref()),
                };
                warn!(
                    provider = self.handler.display_name(),
                    tool = %call.name,
                    error = %error,
                    "Tool panicked"
                );
                ToolResult::from(error)
            }
        }
    }
}

#[async_trait]
impl<H: ToolHandler> ToolProvider for HandlerProvider<H> {
    fn display_name(&self) -> &str {
        self.handler.display_name()
    }

    async fn initialize(&self) -> Result<(), ProviderError> {
        if self.is_initialized() {
            return Ok(());
        }

        self.handler.prepare().await?;
        let spec = self.build_spec()?;
        debug!(
            provider = self.handler.display_name(),
            tools = spec.len(),
            "Registered provider tools"
        );

        // A concurrent initialize may have won the race; both built the same spec.
        let _ = self.spec.set(spec);
        Ok(())
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        self.spec
            .get()
            .map(|spec| spec.all().cloned().collect())
            .unwrap_or_default()
    }

    fn has_tool(&self, tool_name: &str) -> bool {
        self.spec
            .get()
            .is_some_and(|spec| spec.contains(tool_name))
    }

    async fn execute_tool(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let descriptor = self
            .spec
            .get()
            .and_then(|spec| spec.get(&call.name))
            .ok_or_else(|| ToolError::ToolNotFound(call.name.clone()))?;

        trace!(tool = %call.name, arguments = ?call.arguments, "Validating arguments");
        if let Err(error) = DefaultToolValidator.validate(call, descriptor) {
            debug!(tool = %call.name, error = %error, "Rejected invalid arguments");
            return Ok(ToolResult::from(error));
        }

        Ok(self.run_handler(call).await)
    }
}

/// Best-effort message from a panic payload.
pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
