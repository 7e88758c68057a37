//! Application-level configuration.
//!
//! Runtime knobs of the gateway that are independent of where they were
//! loaded from (file, environment, CLI flags).

use std::time::Duration;

/// Default upper bound for a single tool call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Maximum time one call may run before its slot becomes a timeout error.
    pub call_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Creates a GatewayConfig with the call timeout given in milliseconds.
    pub fn from_millis(call_timeout_ms: u64) -> Self {
        Self {
            call_timeout: Duration::from_millis(call_timeout_ms),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        assert_eq!(GatewayConfig::default().call_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_millis() {
        let config = GatewayConfig::from_millis(250);
        assert_eq!(config.call_timeout, Duration::from_millis(250));
    }
}
