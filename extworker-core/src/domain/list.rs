//! Paged list results

use serde::{Deserialize, Serialize};

/// One page of a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub start: u64,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    pub size: u64,
}

impl<T> ListResult<T> {
    /// Whether more items exist beyond this page
    pub fn has_more(&self) -> bool {
        self.start + self.size < self.total
    }
}
