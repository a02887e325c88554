pub mod constants;
mod activation;
mod headers;
#[cfg(feature = "http")]
mod http_interop;
mod interceptor;
mod options;
mod origin;
mod preferences;
mod result;
mod rewrite;
mod store;
mod transaction;
mod util;

pub use activation::{Activation, HookRegistry};
pub use headers::{Header, HeaderList, Headers};
#[cfg(feature = "http")]
pub use http_interop::{headers_from_map, headers_to_map};
pub use interceptor::{Interceptor, RequestInterceptor, ResponseInterceptor};
pub use options::{CredentialsPolicy, InterceptOptions, ValidationError};
pub use origin::{AllowedOrigins, EmptyAllowlist, OriginMatcher, PatternError};
pub use preferences::Preferences;
pub use result::{InterceptError, ResponseDisposition, ResponseOutcome};
pub use store::TransactionStore;
pub use transaction::{RequestDetails, RequestId, ResponseDetails, Transaction};
pub use util::normalize_lower;
