use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `GET <host>/search/_status`. Only the key set of `indices` matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub indices: Map<String, Value>,
}

impl StatusResponse {
    pub fn index_names(&self) -> BTreeSet<String> {
        self.indices.keys().cloned().collect()
    }
}
