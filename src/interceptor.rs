use crate::constants::header;
use crate::headers::{HeaderList, Headers};
use crate::options::{InterceptOptions, ValidationError};
use crate::result::{InterceptError, ResponseDisposition, ResponseOutcome};
use crate::rewrite::ResponseRewriter;
use crate::store::TransactionStore;
use crate::transaction::{RequestId, RequestDetails, ResponseDetails, Transaction};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// Hook the host calls before a request leaves.
pub trait RequestInterceptor: Send + Sync {
    /// Returns the headers to send. Never fails.
    fn on_request_headers(&self, request: RequestDetails) -> Headers;
}

/// Hook the host calls before a response reaches the requester.
pub trait ResponseInterceptor: Send + Sync {
    /// Returns the headers to deliver. Never fails.
    fn on_response_headers(&self, response: ResponseDetails) -> Headers;
}

/// Correlates intercepted requests with their responses and rewrites the
/// response CORS headers for allowed exchanges.
///
/// The engine starts disabled. Enabling or disabling it starts a new epoch and
/// discards every in-flight transaction, so an exchange that straddles the
/// switch passes through untouched. A transaction stamped with an older epoch
/// never correlates, even when it was stored after the store was cleared.
#[derive(Debug)]
pub struct Interceptor {
    options: InterceptOptions,
    enabled: AtomicBool,
    epoch: AtomicU64,
    transactions: TransactionStore,
}

impl Interceptor {
    pub fn new(options: InterceptOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self {
            options,
            enabled: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            transactions: TransactionStore::new(),
        })
    }

    pub fn options(&self) -> &InterceptOptions {
        &self.options
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn has_allowlist(&self) -> bool {
        self.options.has_allowlist()
    }

    /// Number of activation changes so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Sets the activation state and clears all correlation state, returning
    /// how many transactions were discarded.
    pub fn set_enabled(&self, enabled: bool) -> usize {
        self.enabled.store(enabled, Ordering::SeqCst);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let discarded = self.transactions.clear();
        debug!(enabled, discarded, "interceptor activation changed");
        discarded
    }

    /// Flips the activation state, returning the new state.
    pub fn toggle(&self) -> bool {
        let enabled = !self.enabled.fetch_xor(true, Ordering::SeqCst);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let discarded = self.transactions.clear();
        debug!(enabled, discarded, "interceptor activation toggled");
        enabled
    }

    /// Drops transactions older than the configured maximum age. Returns the
    /// number removed, always zero when no maximum age is configured.
    pub fn sweep_abandoned(&self) -> usize {
        let Some(max_age) = self.options.max_transaction_age else {
            return 0;
        };
        let removed = self.transactions.sweep(max_age);
        if removed > 0 {
            debug!(removed, ?max_age, "swept abandoned transactions");
        }
        removed
    }

    /// Records `request` for later correlation and returns the headers to send.
    pub fn record_request(&self, request: RequestDetails) -> Headers {
        let id = request.id.clone();
        let fallback = request.headers.clone();
        match guarded(&id, || self.record_request_unguarded(request)) {
            Ok(headers) => headers,
            Err(err) => {
                warn!(request_id = %id, error = %err, "request passed through after fault");
                fallback
            }
        }
    }

    /// Correlates `response` with its request and applies the rewrite policy.
    pub fn process_response(&self, response: ResponseDetails) -> ResponseOutcome {
        let id = response.id.clone();
        let fallback = response.headers.clone();
        match guarded(&id, || self.process_response_unguarded(response)) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.transactions.remove(&id);
                warn!(request_id = %id, error = %err, "response passed through after fault");
                ResponseOutcome::new(fallback, ResponseDisposition::Faulted)
            }
        }
    }

    fn record_request_unguarded(&self, request: RequestDetails) -> Headers {
        // Read before the flag: a switch landing in between bumps the epoch.
        let epoch = self.epoch();
        if !self.is_enabled() {
            trace!(request_id = %request.id, "interceptor disabled, request not recorded");
            return request.headers;
        }

        let mut transaction = Transaction::from_request(request).with_epoch(epoch);
        self.apply_static_origin(transaction.request_headers_mut());
        let headers = transaction.request_headers().as_slice().to_vec();

        let id = transaction.id().clone();
        if self.transactions.put(transaction).is_some() {
            debug!(request_id = %id, "request id reused, previous transaction replaced");
        } else {
            trace!(request_id = %id, "request recorded");
        }
        headers
    }

    fn apply_static_origin(&self, request_headers: &mut HeaderList) {
        let static_origin = self.options.static_origin.as_str();
        if static_origin.is_empty() {
            return;
        }
        if !request_headers.set_value(header::ORIGIN, static_origin) {
            trace!("request carries no origin header, static origin not applied");
        }
    }

    fn process_response_unguarded(&self, response: ResponseDetails) -> ResponseOutcome {
        let ResponseDetails { id, headers } = response;
        let transaction = self.transactions.remove(&id);

        if !self.is_enabled() {
            trace!(request_id = %id, "interceptor disabled, response passed through");
            return ResponseOutcome::new(headers, ResponseDisposition::Disabled);
        }

        let Some(transaction) = transaction else {
            debug!(request_id = %id, "no transaction for response, passed through");
            return ResponseOutcome::new(headers, ResponseDisposition::CorrelationMiss);
        };

        if transaction.epoch() != self.epoch() {
            debug!(
                request_id = %id,
                recorded = transaction.epoch(),
                current = self.epoch(),
                "transaction predates activation change, passed through"
            );
            return ResponseOutcome::new(headers, ResponseDisposition::CorrelationMiss);
        }

        if !self
            .options
            .allowed_origins
            .allows(transaction.origin_url(), self.options.empty_allowlist)
        {
            debug!(
                request_id = %id,
                origin_url = transaction.origin_url().unwrap_or_default(),
                "initiator not on allowlist, response passed through"
            );
            return ResponseOutcome::new(headers, ResponseDisposition::NotAllowed);
        }

        let rewritten = ResponseRewriter::new(&self.options)
            .rewrite(transaction.request_headers(), HeaderList::from_headers(headers));
        trace!(request_id = %id, "response headers rewritten");
        ResponseOutcome::new(rewritten.into_headers(), ResponseDisposition::Rewritten)
    }
}

impl RequestInterceptor for Interceptor {
    fn on_request_headers(&self, request: RequestDetails) -> Headers {
        self.record_request(request)
    }
}

impl ResponseInterceptor for Interceptor {
    fn on_response_headers(&self, response: ResponseDetails) -> Headers {
        self.process_response(response).headers
    }
}

fn guarded<T>(id: &RequestId, work: impl FnOnce() -> T) -> Result<T, InterceptError> {
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| InterceptError::Panicked {
        request_id: id.to_string(),
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;
