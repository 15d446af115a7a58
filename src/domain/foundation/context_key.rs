//! Identifier for a monitored context.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifies one independently scored context: what kind of thing is being
/// watched (`context_type`), the deployment or tenant boundary (`scope`) and
/// the domain it serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextKey {
    context_type: String,
    scope: String,
    domain: String,
}

impl ContextKey {
    /// Creates a key, rejecting blank components.
    pub fn new(
        context_type: impl Into<String>,
        scope: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let context_type = non_blank("context_type", context_type.into())?;
        let scope = non_blank("scope", scope.into())?;
        let domain = non_blank("domain", domain.into())?;
        Ok(Self {
            context_type,
            scope,
            domain,
        })
    }

    pub fn context_type(&self) -> &str {
        &self.context_type
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.context_type, self.scope, self.domain)
    }
}

impl FromStr for ContextKey {
    type Err = ValidationError;

    /// Parses the `type/scope/domain` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(scope), Some(domain)) => Self::new(t, scope, domain),
            _ => Err(ValidationError::invalid_format(
                "context_key",
                format!("expected 'type/scope/domain', got '{}'", s),
            )),
        }
    }
}
