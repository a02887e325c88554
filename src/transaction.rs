use crate::headers::{HeaderList, Headers};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Host supplied identifier shared by the request and response callbacks of
/// one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// What the host hands to the request hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    #[serde(rename = "requestId")]
    pub id: RequestId,
    #[serde(default, rename = "originUrl")]
    pub origin_url: Option<String>,
    #[serde(default, rename = "requestHeaders")]
    pub headers: Headers,
}

impl RequestDetails {
    pub fn new<I: Into<RequestId>>(id: I) -> Self {
        Self {
            id: id.into(),
            origin_url: None,
            headers: Headers::new(),
        }
    }

    pub fn origin_url<S: Into<String>>(mut self, url: S) -> Self {
        self.origin_url = Some(url.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }
}

/// What the host hands to the response hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDetails {
    #[serde(rename = "requestId")]
    pub id: RequestId,
    #[serde(default, rename = "responseHeaders")]
    pub headers: Headers,
}

impl ResponseDetails {
    pub fn new<I: Into<RequestId>>(id: I) -> Self {
        Self {
            id: id.into(),
            headers: Headers::new(),
        }
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }
}

/// Correlation record for one in-flight exchange.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: RequestId,
    origin_url: Option<String>,
    request_headers: HeaderList,
    created_at: Instant,
    epoch: u64,
}

impl Transaction {
    pub fn new(id: RequestId, origin_url: Option<String>, request_headers: HeaderList) -> Self {
        Self {
            id,
            origin_url,
            request_headers,
            created_at: Instant::now(),
            epoch: 0,
        }
    }

    pub fn from_request(request: RequestDetails) -> Self {
        Self::new(
            request.id,
            request.origin_url,
            HeaderList::from_headers(request.headers),
        )
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn origin_url(&self) -> Option<&str> {
        self.origin_url.as_deref()
    }

    pub fn request_headers(&self) -> &HeaderList {
        &self.request_headers
    }

    pub(crate) fn request_headers_mut(&mut self) -> &mut HeaderList {
        &mut self.request_headers
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Activation epoch the transaction was recorded in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: std::time::Duration) {
        if let Some(earlier) = self.created_at.checked_sub(by) {
            self.created_at = earlier;
        }
    }
}
