use bunner_cors_intercept::{
    HookRegistry, RequestDetails, RequestInterceptor, ResponseDetails, ResponseInterceptor,
    headers_from_map, headers_to_map,
};
use http::HeaderMap;
use std::sync::{Arc, RwLock};

type Hooks = (Arc<dyn RequestInterceptor>, Arc<dyn ResponseInterceptor>);

/// A stand-in for a browser network layer. Exchanges flow through the
/// installed hooks when present and untouched otherwise.
#[derive(Clone, Default)]
pub struct SimulatedHost {
    hooks: Arc<RwLock<Option<Hooks>>>,
}

impl SimulatedHost {
    pub fn send_request(&self, id: u64, origin_url: &str, headers: &HeaderMap) -> HeaderMap {
        let Some((request_hook, _)) = self.current_hooks() else {
            return headers.clone();
        };
        let request = RequestDetails::new(id)
            .origin_url(origin_url)
            .headers(headers_from_map(headers));
        headers_to_map(&request_hook.on_request_headers(request))
    }

    pub fn receive_response(&self, id: u64, headers: &HeaderMap) -> HeaderMap {
        let Some((_, response_hook)) = self.current_hooks() else {
            return headers.clone();
        };
        let response = ResponseDetails::new(id).headers(headers_from_map(headers));
        headers_to_map(&response_hook.on_response_headers(response))
    }

    fn current_hooks(&self) -> Option<Hooks> {
        self.hooks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl HookRegistry for SimulatedHost {
    fn install(
        &mut self,
        request: Arc<dyn RequestInterceptor>,
        response: Arc<dyn ResponseInterceptor>,
    ) {
        *self
            .hooks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some((request, response));
    }

    fn uninstall(&mut self) {
        *self
            .hooks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
