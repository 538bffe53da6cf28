use std::fmt;

use super::AutopilotError;

/// Identifier of the tenant on whose behalf an operation runs.
///
/// Never blank; construct with [`Tenant::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tenant(String);

impl Tenant {
    pub fn new(id: impl Into<String>) -> Result<Self, AutopilotError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AutopilotError::Unauthenticated);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
