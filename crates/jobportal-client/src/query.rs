//! Query string construction for list endpoints.

use url::form_urlencoded;

/// Builds a percent-encoded query string.
///
/// Absent and empty values are omitted entirely. Array-valued fields are
/// encoded as repeated `key=value` pairs — `jobType=full_time&jobType=remote`
/// — which is the one convention this client commits to.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pair. Empty values are dropped.
    pub fn push(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Append a pair only when a value is present.
    pub fn push_opt(self, key: &str, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Append one pair per value, repeating the key.
    pub fn push_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        for value in values {
            self = self.push(key, value);
        }
        self
    }

    /// Append pre-built pairs, e.g. from a filter type's `query_pairs()`.
    pub fn extend<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        for (key, value) in pairs {
            self = self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Finish into a percent-encoded query string, without a leading `?`.
    pub fn build(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}
