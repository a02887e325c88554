use crate::headers::Headers;
use thiserror::Error;

/// Why the response hook returned the headers it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// CORS headers were synthesized.
    Rewritten,
    /// The initiating URL is not on the allowlist.
    NotAllowed,
    /// No transaction was recorded for this id.
    CorrelationMiss,
    /// The engine is disabled.
    Disabled,
    /// An internal fault was caught; the headers are the host's originals.
    Faulted,
}

/// Headers emitted by the response hook together with how they were produced.
#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    pub headers: Headers,
    pub disposition: ResponseDisposition,
}

impl ResponseOutcome {
    pub(crate) fn new(headers: Headers, disposition: ResponseDisposition) -> Self {
        Self {
            headers,
            disposition,
        }
    }

    pub fn is_rewritten(&self) -> bool {
        self.disposition == ResponseDisposition::Rewritten
    }
}

/// Faults raised inside a hook. Never surfaced to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterceptError {
    #[error("interceptor panicked while handling request {request_id}: {message}")]
    Panicked { request_id: String, message: String },
}
