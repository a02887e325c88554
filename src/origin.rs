use regex_automata::meta::{BuildError, Regex};
use regex_automata::{Anchored, Input};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum PatternError {
    Build(Box<BuildError>),
    Timeout { elapsed: Duration, budget: Duration },
    TooLong { length: usize, max: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Build(_) => write!(f, "failed to compile origin pattern"),
            PatternError::Timeout { .. } => {
                write!(f, "compiling origin pattern exceeded the configured budget")
            }
            PatternError::TooLong { length, max } => write!(
                f,
                "origin pattern length {} exceeds maximum allowed {}",
                length, max
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Build(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;

/// One allowlist entry, matched against the URL of the document that
/// initiated a request.
#[derive(Clone, Debug)]
pub enum OriginMatcher {
    /// Case-sensitive prefix of the initiating URL.
    Prefix(String),
    /// Case-insensitive regular expression matched from the start of the
    /// initiating URL.
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn prefix<S: Into<String>>(value: S) -> Self {
        Self::Prefix(value.into())
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, PATTERN_COMPILE_BUDGET).map(Self::Pattern)
    }

    fn compile_pattern(pattern: &str, budget: Duration) -> Result<Regex, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        let regex = Regex::new(&format!("(?i:{pattern})"))
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout { elapsed, budget });
        }

        Ok(regex)
    }

    #[cfg(test)]
    pub(crate) fn pattern_str_with_budget(
        pattern: &str,
        budget: Duration,
    ) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, budget).map(Self::Pattern)
    }

    /// Parses one line of allowlist text. `/expr/` is a pattern, anything else
    /// a prefix. Patterns are anchored at the start of the URL, so `/expr/`
    /// behaves like a prefix written as a regular expression.
    pub fn parse(line: &str) -> Result<Self, PatternError> {
        let line = line.trim();
        match line
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(pattern) if !pattern.is_empty() => Self::pattern_str(pattern),
            _ => Ok(Self::prefix(line)),
        }
    }

    pub fn matches(&self, origin_url: &str) -> bool {
        match self {
            OriginMatcher::Prefix(prefix) => origin_url.starts_with(prefix.as_str()),
            OriginMatcher::Pattern(regex) => {
                regex.is_match(Input::new(origin_url).anchored(Anchored::Yes))
            }
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, OriginMatcher::Prefix(prefix) if prefix.trim().is_empty())
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Prefix(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Prefix(value.to_owned())
    }
}

/// What an empty allowlist means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyAllowlist {
    /// Rewrite every exchange (the allowlist acts as an opt-in filter).
    #[default]
    AllowAll,
    /// Rewrite nothing until at least one entry is configured.
    AllowNone,
}

/// Ordered allowlist of initiating-URL matchers.
#[derive(Clone, Debug, Default)]
pub struct AllowedOrigins {
    matchers: Vec<OriginMatcher>,
}

impl AllowedOrigins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        Self {
            matchers: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses newline separated allowlist text, skipping blank lines.
    pub fn parse_lines(text: &str) -> Result<Self, PatternError> {
        let matchers = text
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(OriginMatcher::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn matchers(&self) -> &[OriginMatcher] {
        &self.matchers
    }

    pub fn push<T: Into<OriginMatcher>>(&mut self, matcher: T) {
        self.matchers.push(matcher.into());
    }

    /// Decides whether an exchange initiated from `origin_url` may be rewritten.
    pub fn allows(&self, origin_url: Option<&str>, when_empty: EmptyAllowlist) -> bool {
        if self.matchers.is_empty() {
            return when_empty == EmptyAllowlist::AllowAll;
        }

        origin_url.is_some_and(|url| self.matchers.iter().any(|matcher| matcher.matches(url)))
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
