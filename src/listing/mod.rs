//! Paged listing state shared by the list screens

use serde::{Deserialize, Serialize};

/// Query string of a list screen: `?busca=...&pagina=...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub busca: Option<String>,
    #[serde(default)]
    pub pagina: Option<u32>,
    /// Id of a record just created from the detail form
    #[serde(default)]
    pub criado: Option<u64>,
}

impl ListParams {
    /// Trimmed search text, empty when absent
    pub fn filter(&self) -> String {
        self.busca.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    /// 1-based page, never below 1
    pub fn page(&self) -> u32 {
        self.pagina.unwrap_or(1).max(1)
    }
}

/// Page links shown at once
pub const PAGER_WINDOW: u32 = 10;

/// Pager shown under a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// The pager only shows up when there is more than one page
    pub fn show_pagination(&self) -> bool {
        self.total > u64::from(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Page numbers for the pager links, at most [`PAGER_WINDOW`] around the current page
    pub fn pages(&self) -> Vec<u32> {
        let count = self.page_count();
        if count == 0 {
            return Vec::new();
        }
        let current = self.page.min(count);
        let half = PAGER_WINDOW / 2;
        let last = current.saturating_add(half).max(PAGER_WINDOW).min(count);
        let first = last.saturating_sub(PAGER_WINDOW - 1).max(1);
        (first..=last).collect()
    }
}
