//! Tool visibility controls for the MCP server

/// Allow/deny filter over tool names.
///
/// Patterns are `*`, an exact name, `prefix*` or `*suffix`.
#[derive(Debug, Clone, Default)]
pub struct GovernanceConfig {
    /// Tool must match one of these when non-empty
    pub allow_patterns: Vec<String>,
    /// Tool must match none of these
    pub deny_patterns: Vec<String>,
}

impl GovernanceConfig {
    pub fn new(allow_patterns: Vec<String>, deny_patterns: Vec<String>) -> Self {
        Self { allow_patterns, deny_patterns }
    }

    /// Check if a tool is allowed by governance policies
    pub fn is_tool_allowed(&self, tool_name: &str) -> bool {
        if !self.allow_patterns.is_empty()
            && !self.allow_patterns.iter().any(|p| matches_pattern(tool_name, p))
        {
            return false;
        }

        !self.deny_patterns.iter().any(|p| matches_pattern(tool_name, p))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allow_patterns.is_empty() && self.deny_patterns.is_empty()
    }
}

fn matches_pattern(tool_name: &str, pattern: &str) -> bool {
    if pattern == "*" || pattern == tool_name {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return tool_name.starts_with(prefix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return tool_name.ends_with(suffix);
    }

    false
}
