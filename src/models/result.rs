use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hit's `_source` document.
///
/// Every field is optional. Empty strings decode as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(rename = "pid", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub year: Option<String>,
    #[serde(rename = "apiUrl", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub uri: Option<String>,
    #[serde(rename = "thumbnail", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "lobidUrl", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub catalog_url: Option<String>,
    #[serde(rename = "alephid", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub external_id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub doi: Option<String>,
    #[serde(rename = "ddc", default, deserialize_with = "crate::parsers::deserializers::lenient_text")]
    pub classification: Option<String>,
    /// Kept from the document but never rendered.
    #[serde(rename = "hasPart", default)]
    pub has_part: Option<Value>,
}

impl ResultItem {
    /// Link target: the object URL, falling back to the plain URI.
    pub fn object_url(&self) -> Option<&str> {
        self.api_url.as_deref().or(self.uri.as_deref())
    }

    /// List label: the title, falling back to the identifier.
    pub fn label(&self) -> &str {
        self.title.as_deref().or(self.id.as_deref()).unwrap_or("")
    }

    /// Metadata fields in display order. Creator falls back to `unknown`.
    pub fn metadata_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.creator.as_deref().unwrap_or("unknown")];
        fields.extend(
            [
                &self.year,
                &self.item_type,
                &self.classification,
                &self.id,
                &self.external_id,
                &self.doi,
            ]
            .into_iter()
            .filter_map(|field| field.as_deref()),
        );
        fields
    }
}

/// One page of hits as returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPage {
    pub total_hits: u64,
    pub items: Vec<ResultItem>,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.total_hits == 0
    }
}
