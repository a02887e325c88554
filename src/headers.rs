use crate::util::lookup_key;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single header as seen by the host: the name keeps its wire casing and the
/// value may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: Option<String>,
}

impl Header {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn without_value<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

pub type Headers = Vec<Header>;

/// Ordered header sequence with a lower-cased name index.
///
/// When a name occurs more than once the index points at the last occurrence,
/// so lookups and updates act on the header a later writer would have won.
#[derive(Debug, Default, Clone)]
pub struct HeaderList {
    headers: Headers,
    index: IndexMap<String, usize>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_headers(headers: Headers) -> Self {
        let mut index = IndexMap::with_capacity(headers.len());
        for (position, header) in headers.iter().enumerate() {
            index.insert(lookup_key(&header.name).into_owned(), position);
        }
        Self { headers, index }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(lookup_key(name).as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&Header> {
        self.index
            .get(lookup_key(name).as_ref())
            .and_then(|&position| self.headers.get(position))
    }

    /// Value of `name` when the header exists and carries a value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Header::value)
    }

    /// Appends `name: value` unless a header with that name already exists.
    /// Returns whether a header was created.
    pub fn ensure(&mut self, name: &str, value: &str) -> bool {
        let key = lookup_key(name);
        if self.index.contains_key(key.as_ref()) {
            return false;
        }
        let key = key.into_owned();
        self.headers.push(Header::new(name, value));
        self.index.insert(key, self.headers.len() - 1);
        true
    }

    /// Replaces the value of an existing header. Returns `false` and leaves the
    /// list untouched when no header named `name` exists.
    pub fn set_value<V: Into<String>>(&mut self, name: &str, value: V) -> bool {
        match self.index.get(lookup_key(name).as_ref()) {
            Some(&position) => {
                self.headers[position].value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Lower-cased names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    pub fn as_slice(&self) -> &[Header] {
        &self.headers
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

impl From<Headers> for HeaderList {
    fn from(headers: Headers) -> Self {
        Self::from_headers(headers)
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
