use crate::headers::{Header, Headers};
use crate::util::is_http_token;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;

/// Converts a `HeaderMap` into the interceptor's header sequence.
///
/// Values are decoded byte for byte as ISO-8859-1, so obs-text such as a
/// Latin-1 filename survives and [`headers_to_map`] writes the same bytes back.
pub fn headers_from_map(map: &HeaderMap) -> Headers {
    map.iter()
        .map(|(name, value)| Header::new(name.as_str(), isomorphic_decode(value.as_bytes())))
        .collect()
}

/// Builds a `HeaderMap` from a header sequence. Repeated names are appended in
/// order. Headers without a value, with a non-token name, or with a value that
/// cannot be encoded are dropped.
pub fn headers_to_map(headers: &[Header]) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for header in headers {
        let Some(value) = header.value() else {
            continue;
        };
        if !is_http_token(&header.name) {
            trace!(name = %header.name, "dropping header with invalid name");
            continue;
        }
        match (
            HeaderName::from_bytes(header.name.as_bytes()),
            HeaderValue::from_bytes(&encode_value(value)),
        ) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            _ => trace!(name = %header.name, "dropping header that cannot be encoded"),
        }
    }
    map
}

fn isomorphic_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Inverse of [`isomorphic_decode`]. Values holding characters beyond U+00FF
/// did not come from the wire and are written as UTF-8.
fn encode_value(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|ch| u8::try_from(u32::from(ch)).ok())
        .collect::<Option<Vec<u8>>>()
        .unwrap_or_else(|| value.as_bytes().to_vec())
}

#[cfg(test)]
#[path = "http_interop_test.rs"]
mod http_interop_test;
