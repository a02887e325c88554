#![allow(dead_code)]

use bunner_cors_intercept::Header;
use bunner_cors_intercept::constants::header;

pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .and_then(Header::value)
}

pub fn has_header(headers: &[Header], name: &str) -> bool {
    headers.iter().any(|h| h.name.eq_ignore_ascii_case(name))
}

pub fn count_named(headers: &[Header], name: &str) -> usize {
    headers
        .iter()
        .filter(|h| h.name.eq_ignore_ascii_case(name))
        .count()
}

pub fn has_any_cors_header(headers: &[Header]) -> bool {
    header::CORS_RESPONSE_HEADERS
        .iter()
        .any(|name| has_header(headers, name))
}

pub fn render(headers: &[Header]) -> String {
    headers
        .iter()
        .map(|h| format!("{}: {}", h.name, h.value().unwrap_or("<none>")))
        .collect::<Vec<_>>()
        .join("\n")
}
