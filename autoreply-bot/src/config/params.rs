//! Stream parameters file.
//!
//! ```toml
//! [params]
//! track = """
//! rust,
//! tokio,
//! """
//! language = ["en", "ja"]
//! ```
//!
//! Each value becomes one request parameter whose terms are joined with `,`.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamsFile {
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// A parameter given either as comma-separated lines or as an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Lines(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Individual terms with surrounding commas and whitespace removed.
    pub fn terms(&self) -> Vec<&str> {
        fn clean(s: &str) -> &str {
            s.trim_matches(|c: char| c == ',' || c.is_whitespace())
        }
        let raw: Vec<&str> = match self {
            ParamValue::Lines(text) => text.lines().map(clean).collect(),
            ParamValue::List(items) => items.iter().map(|s| clean(s)).collect(),
        };
        raw.into_iter().filter(|term| !term.is_empty()).collect()
    }
}

impl ParamsFile {
    /// Request parameters in key order; empty values are dropped.
    pub fn request_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter_map(|(key, value)| {
                let terms = value.terms();
                (!terms.is_empty()).then(|| (key.clone(), terms.join(",")))
            })
            .collect()
    }
}
