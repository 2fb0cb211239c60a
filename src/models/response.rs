use std::collections::HashMap;

/// One form response, keyed by the response sheet's column titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseRow {
    fields: HashMap<String, String>,
}

impl ResponseRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, or an empty string when the column is absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}
