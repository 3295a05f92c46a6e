//! Shared test utilities for integration tests
#![allow(dead_code)]

use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builder for one search hit's `_source` document
#[derive(Default)]
pub struct HitBuilder {
    fields: Map<String, Value>,
}

impl HitBuilder {
    pub fn new(pid: &str) -> Self {
        Self::default().field("pid", pid)
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn title(self, title: &str) -> Self {
        self.field("title", title)
    }

    pub fn creator(self, creator: &str) -> Self {
        self.field("creator", creator)
    }

    pub fn year(self, year: &str) -> Self {
        self.field("year", year)
    }

    pub fn api_url(self, url: &str) -> Self {
        self.field("apiUrl", url)
    }

    pub fn to_json(&self) -> Value {
        json!({ "_index": "edoweb", "_source": Value::Object(self.fields.clone()) })
    }
}

/// Search response body with `total` hits of which `hits` are on this page
pub fn search_body(total: u64, hits: &[HitBuilder]) -> Value {
    json!({
        "took": 3,
        "hits": {
            "total": total,
            "hits": hits.iter().map(HitBuilder::to_json).collect::<Vec<_>>(),
        }
    })
}

/// `n` numbered hits starting at `first`
pub fn numbered_hits(first: usize, n: usize) -> Vec<HitBuilder> {
    (first..first + n)
        .map(|i| HitBuilder::new(&format!("edoweb:{}", i)).title(&format!("Cat study {}", i)))
        .collect()
}

/// Status response body listing `names`
pub fn status_body(names: &[&str]) -> Value {
    let indices: Map<String, Value> =
        names.iter().map(|name| (name.to_string(), json!({ "primaries": {} }))).collect();
    json!({ "ok": true, "indices": indices })
}

/// Mount the status endpoint on `server`
pub async fn mount_status(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/search/_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(names)))
        .mount(server)
        .await;
}

/// Mount a search endpoint answering every POST to `search_path`
pub async fn mount_search(server: &MockServer, search_path: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(search_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
