use crate::constants::{header, value};
use crate::headers::HeaderList;
use crate::options::{CredentialsPolicy, InterceptOptions};

/// Synthesizes the CORS response headers for one correlated exchange.
pub(crate) struct ResponseRewriter<'a> {
    options: &'a InterceptOptions,
}

impl<'a> ResponseRewriter<'a> {
    pub(crate) fn new(options: &'a InterceptOptions) -> Self {
        Self { options }
    }

    pub(crate) fn rewrite(&self, request: &HeaderList, mut response: HeaderList) -> HeaderList {
        Self::ensure_placeholders(&mut response);
        let wildcard = Self::apply_allow_origin(request, &mut response);
        Self::mirror_request_value(
            request,
            header::ACCESS_CONTROL_REQUEST_METHOD,
            &mut response,
            header::ACCESS_CONTROL_ALLOW_METHODS,
        );
        Self::mirror_request_value(
            request,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            &mut response,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
        );
        self.apply_credentials(wildcard, &mut response);
        response
    }

    pub(crate) fn ensure_placeholders(response: &mut HeaderList) {
        for name in header::CORS_RESPONSE_HEADERS {
            response.ensure(name, value::PLACEHOLDER);
        }
    }

    /// Echoes the request origin, falling back to `*`. Returns whether the
    /// wildcard was used.
    fn apply_allow_origin(request: &HeaderList, response: &mut HeaderList) -> bool {
        match request.value(header::ORIGIN) {
            Some(origin) => {
                response.set_value(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                false
            }
            None => {
                response.set_value(header::ACCESS_CONTROL_ALLOW_ORIGIN, value::WILDCARD);
                true
            }
        }
    }

    fn mirror_request_value(
        request: &HeaderList,
        request_name: &str,
        response: &mut HeaderList,
        response_name: &str,
    ) {
        if let Some(requested) = request.value(request_name) {
            response.set_value(response_name, requested);
        }
    }

    fn apply_credentials(&self, wildcard: bool, response: &mut HeaderList) {
        let emit = match self.options.credentials {
            CredentialsPolicy::Always => true,
            CredentialsPolicy::OmitWithWildcard => !wildcard,
        };
        if emit {
            response.set_value(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, value::TRUE);
        }
    }
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod rewrite_test;
