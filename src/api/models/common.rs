use serde::{Deserialize, Serialize};

/// Pagination descriptor of the last fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

impl PageMeta {
    /// Number of items covered by the pages fetched so far
    pub fn loaded(&self) -> u64 {
        u64::from(self.current_page) * u64::from(self.items_per_page)
    }

    /// True once every item has been fetched
    pub fn is_end_of_list(&self) -> bool {
        self.loaded() >= self.total_items
    }
}

/// End-of-list check that treats missing metadata as `0 × 1 ≥ 0`
pub fn is_end_of_list(meta: Option<&PageMeta>) -> bool {
    meta.map_or(true, PageMeta::is_end_of_list)
}

/// `{ data, meta? }` wrapper returned by list and detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Default> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            meta: None,
        }
    }
}

/// Body of a failed response: `{ meta: { message } }`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub meta: Option<ErrorMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorMeta {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract `meta.message` from a raw body; anything unparsable yields `None`
    pub fn message_from(raw: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.meta)
            .and_then(|meta| meta.message)
            .filter(|message| !message.is_empty())
    }
}
