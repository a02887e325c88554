/// Canonical (lower-cased) header names used as lookup keys.
pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "access-control-allow-origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "access-control-allow-methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "access-control-allow-headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "access-control-allow-credentials";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "access-control-request-headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "access-control-request-method";
    pub const ORIGIN: &str = "origin";

    /// Response headers the rewriter guarantees, in the order they are appended.
    pub const CORS_RESPONSE_HEADERS: [&str; 4] = [
        ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ];
}

pub mod value {
    pub const PLACEHOLDER: &str = "null";
    pub const WILDCARD: &str = "*";
    pub const TRUE: &str = "true";
}
