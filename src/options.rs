use crate::origin::{AllowedOrigins, EmptyAllowlist};
use crate::util::is_header_value;
use std::time::Duration;
use thiserror::Error;

/// How `access-control-allow-credentials` is set on rewritten responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialsPolicy {
    /// Always emit `true`, even alongside a `*` origin. Browsers reject that
    /// pairing for credentialed requests; kept as the default for
    /// compatibility with existing deployments.
    #[default]
    Always,
    /// Emit `true` only when a concrete origin was echoed; with a `*` origin
    /// the credentials header keeps its previous value.
    OmitWithWildcard,
}

#[derive(Clone, Debug)]
pub struct InterceptOptions {
    /// Value forced onto the request `origin` header. Empty disables the override.
    pub static_origin: String,
    pub allowed_origins: AllowedOrigins,
    pub empty_allowlist: EmptyAllowlist,
    pub credentials: CredentialsPolicy,
    /// Age after which an uncorrelated transaction may be swept. `None` keeps
    /// transactions until their response arrives or the store is cleared.
    pub max_transaction_age: Option<Duration>,
}

impl Default for InterceptOptions {
    fn default() -> Self {
        Self {
            static_origin: String::new(),
            allowed_origins: AllowedOrigins::default(),
            empty_allowlist: EmptyAllowlist::default(),
            credentials: CredentialsPolicy::default(),
            max_transaction_age: None,
        }
    }
}

impl InterceptOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_header_value(&self.static_origin) {
            return Err(ValidationError::InvalidStaticOrigin(
                self.static_origin.clone(),
            ));
        }

        if let Some(position) = self
            .allowed_origins
            .matchers()
            .iter()
            .position(|matcher| matcher.is_blank())
        {
            return Err(ValidationError::BlankAllowedOrigin { position });
        }

        if self.max_transaction_age == Some(Duration::ZERO) {
            return Err(ValidationError::ZeroTransactionAge);
        }

        Ok(())
    }

    pub fn has_allowlist(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The static origin {0:?} contains characters that are not allowed in a header value.")]
    InvalidStaticOrigin(String),
    #[error("Allowed origin entry at position {position} is blank and would match every URL.")]
    BlankAllowedOrigin { position: usize },
    #[error("The maximum transaction age must be greater than zero.")]
    ZeroTransactionAge,
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
