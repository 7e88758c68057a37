//! Qualified tool names: `<provider>_<tool>`.
//!
//! Provider ids never contain the separator, so splitting at its first
//! occurrence is unambiguous even when the tool name contains it
//! (`places_search_nearby` is provider `places`, tool `search_nearby`).

use atlas_application::ports::tool_gateway::{GatewayError, QUALIFIER_SEPARATOR};

/// Join a provider id and a bare tool name.
pub fn qualify(provider_id: &str, tool_name: &str) -> String {
    format!("{provider_id}{QUALIFIER_SEPARATOR}{tool_name}")
}

/// Split a qualified name into `(provider_id, tool_name)`.
///
/// Both halves must be non-empty.
pub fn split_qualified_name(name: &str) -> Result<(&str, &str), GatewayError> {
    match name.split_once(QUALIFIER_SEPARATOR) {
        Some((provider, tool)) if !provider.is_empty() && !tool.is_empty() => {
            Ok((provider, tool))
        }
        _ => Err(GatewayError::MalformedToolName(name.to_string())),
    }
}

/// Whether `id` can be used as a provider id.
pub fn is_valid_provider_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(QUALIFIER_SEPARATOR)
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
