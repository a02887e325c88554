use crate::options::InterceptOptions;
use crate::origin::{AllowedOrigins, PatternError};
use serde::{Deserialize, Serialize};

/// Stored user preferences as the embedding application persists them.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub enabled_at_startup: bool,
    pub static_origin: String,
    /// One allowed origin prefix (or `/pattern/`) per line.
    pub activation_whitelist: String,
}

impl Preferences {
    pub fn allowed_origins(&self) -> Result<AllowedOrigins, PatternError> {
        AllowedOrigins::parse_lines(&self.activation_whitelist)
    }
}

impl TryFrom<&Preferences> for InterceptOptions {
    type Error = PatternError;

    fn try_from(preferences: &Preferences) -> Result<Self, Self::Error> {
        Ok(InterceptOptions {
            static_origin: preferences.static_origin.trim().to_string(),
            allowed_origins: preferences.allowed_origins()?,
            ..InterceptOptions::default()
        })
    }
}

impl TryFrom<Preferences> for InterceptOptions {
    type Error = PatternError;

    fn try_from(preferences: Preferences) -> Result<Self, Self::Error> {
        InterceptOptions::try_from(&preferences)
    }
}

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;
