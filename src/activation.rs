use crate::interceptor::{Interceptor, RequestInterceptor, ResponseInterceptor};
use std::sync::Arc;
use tracing::info;

/// The host side of hook registration. Implemented by whatever network layer
/// embeds the interceptor.
pub trait HookRegistry {
    fn install(
        &mut self,
        request: Arc<dyn RequestInterceptor>,
        response: Arc<dyn ResponseInterceptor>,
    );

    fn uninstall(&mut self);
}

/// Couples the interceptor's activation state with hook registration on the
/// host.
pub struct Activation<R: HookRegistry> {
    interceptor: Arc<Interceptor>,
    registry: R,
    enabled_at_startup: bool,
}

impl<R: HookRegistry> Activation<R> {
    pub fn new(interceptor: Arc<Interceptor>, registry: R, enabled_at_startup: bool) -> Self {
        Self {
            interceptor,
            registry,
            enabled_at_startup,
        }
    }

    /// Applies the startup preference. Does nothing when the interceptor
    /// should start disabled.
    pub fn start(&mut self) {
        if self.enabled_at_startup {
            self.set_enabled(true);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.interceptor.set_enabled(enabled);
        self.sync_registry(enabled);
    }

    /// Flips activation and returns the new state.
    pub fn toggle(&mut self) -> bool {
        let enabled = self.interceptor.toggle();
        self.sync_registry(enabled);
        enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.interceptor.is_enabled()
    }

    pub fn has_allowlist(&self) -> bool {
        self.interceptor.has_allowlist()
    }

    pub fn interceptor(&self) -> &Arc<Interceptor> {
        &self.interceptor
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn sync_registry(&mut self, enabled: bool) {
        if enabled {
            let request: Arc<dyn RequestInterceptor> = self.interceptor.clone();
            let response: Arc<dyn ResponseInterceptor> = self.interceptor.clone();
            self.registry.install(request, response);
        } else {
            self.registry.uninstall();
        }
        info!(
            enabled,
            allowlist = self.interceptor.has_allowlist(),
            "interception hooks updated"
        );
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod activation_test;
