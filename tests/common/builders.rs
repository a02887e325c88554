#![allow(dead_code)]

use bunner_cors_intercept::{
    AllowedOrigins, CredentialsPolicy, EmptyAllowlist, Header, Headers, InterceptOptions,
    Interceptor, OriginMatcher, RequestDetails, ResponseDetails, ResponseOutcome,
};
use std::time::Duration;

#[derive(Default)]
pub struct InterceptorBuilder {
    static_origin: Option<String>,
    allowed_origins: Vec<OriginMatcher>,
    empty_allowlist: Option<EmptyAllowlist>,
    credentials: Option<CredentialsPolicy>,
    max_transaction_age: Option<Duration>,
    disabled: bool,
}

impl InterceptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn static_origin(mut self, origin: impl Into<String>) -> Self {
        self.static_origin = Some(origin.into());
        self
    }

    pub fn allow<M: Into<OriginMatcher>>(mut self, matcher: M) -> Self {
        self.allowed_origins.push(matcher.into());
        self
    }

    pub fn empty_allowlist(mut self, policy: EmptyAllowlist) -> Self {
        self.empty_allowlist = Some(policy);
        self
    }

    pub fn credentials(mut self, policy: CredentialsPolicy) -> Self {
        self.credentials = Some(policy);
        self
    }

    pub fn max_transaction_age(mut self, age: Duration) -> Self {
        self.max_transaction_age = Some(age);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn options(self) -> InterceptOptions {
        let InterceptOptions {
            static_origin: default_static_origin,
            empty_allowlist: default_empty_allowlist,
            credentials: default_credentials,
            max_transaction_age: default_max_age,
            ..
        } = InterceptOptions::default();

        InterceptOptions {
            static_origin: self.static_origin.unwrap_or(default_static_origin),
            allowed_origins: AllowedOrigins::list(self.allowed_origins),
            empty_allowlist: self.empty_allowlist.unwrap_or(default_empty_allowlist),
            credentials: self.credentials.unwrap_or(default_credentials),
            max_transaction_age: self.max_transaction_age.or(default_max_age),
        }
    }

    pub fn build(self) -> Interceptor {
        let disabled = self.disabled;
        let interceptor = Interceptor::new(self.options()).expect("valid intercept options");
        if !disabled {
            interceptor.set_enabled(true);
        }
        interceptor
    }
}

pub struct ExchangeBuilder {
    id: String,
    origin_url: Option<String>,
    request_headers: Headers,
    response_headers: Headers,
}

impl ExchangeBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            origin_url: None,
            request_headers: Headers::new(),
            response_headers: Headers::new(),
        }
    }

    pub fn origin_url(mut self, url: impl Into<String>) -> Self {
        self.origin_url = Some(url.into());
        self
    }

    pub fn origin(self, origin: impl Into<String>) -> Self {
        self.request_header("Origin", origin)
    }

    pub fn request_method(self, method: impl Into<String>) -> Self {
        self.request_header("Access-Control-Request-Method", method)
    }

    pub fn request_headers(self, headers: impl Into<String>) -> Self {
        self.request_header("Access-Control-Request-Headers", headers)
    }

    pub fn request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.push(Header::new(name, value));
        self
    }

    pub fn response_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response_headers.push(Header::new(name, value));
        self
    }

    pub fn request(&self) -> RequestDetails {
        let request = RequestDetails::new(self.id.as_str()).headers(self.request_headers.clone());
        match &self.origin_url {
            Some(url) => request.origin_url(url.as_str()),
            None => request,
        }
    }

    pub fn response(&self) -> ResponseDetails {
        ResponseDetails::new(self.id.as_str()).headers(self.response_headers.clone())
    }

    pub fn response_headers_list(&self) -> Headers {
        self.response_headers.clone()
    }

    /// Runs both hooks and returns the response outcome.
    pub fn run(self, interceptor: &Interceptor) -> ResponseOutcome {
        interceptor.record_request(self.request());
        interceptor.process_response(self.response())
    }
}

pub fn interceptor() -> InterceptorBuilder {
    InterceptorBuilder::new()
}

pub fn exchange(id: impl Into<String>) -> ExchangeBuilder {
    ExchangeBuilder::new(id)
}
