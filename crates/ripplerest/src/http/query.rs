/*
[INPUT]:  Named query parameters, possibly unset
[OUTPUT]: application/x-www-form-urlencoded query strings
[POS]:    HTTP layer - query string encoding
[UPDATE]: When parameter value kinds change
*/

use url::form_urlencoded;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Dropped before encoding
    Unset,
    /// Encoded as the literal `true` or `false`
    Bool(bool),
    Text(String),
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Unset, Into::into)
    }
}

/// Ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.push((key.into(), value.into()));
    }

    /// True when no parameter would be sent.
    pub fn is_empty(&self) -> bool {
        self.params
            .iter()
            .all(|(_, value)| matches!(value, QueryValue::Unset))
    }

    /// Encode the set parameters, or `None` when nothing is left to send.
    pub fn encode(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            match value {
                QueryValue::Unset => {}
                QueryValue::Bool(flag) => {
                    serializer.append_pair(key, if *flag { "true" } else { "false" });
                }
                QueryValue::Text(text) => {
                    serializer.append_pair(key, text);
                }
            }
        }
        Some(serializer.finish())
    }
}
