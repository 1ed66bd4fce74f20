//! Shared query parameter types for API handlers.

use envelope_core::coerce::coerce_str_int;
use serde::Deserialize;

/// Page selection parameters (`?page=&pagesize=`).
///
/// Kept as raw text and cast loosely, so `?page=abc` or `?pagesize=-3` fall
/// back to defaults in the paginator instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub pagesize: Option<String>,
}

impl PageParams {
    /// Requested page, `0` when absent.
    pub fn page(&self) -> i64 {
        self.page.as_deref().map_or(0, coerce_str_int)
    }

    /// Requested page size, `0` (use the default) when absent.
    pub fn pagesize(&self) -> i64 {
        self.pagesize.as_deref().map_or(0, coerce_str_int)
    }
}

/// Optional explicit message (`?message=`).
#[derive(Debug, Default, Deserialize)]
pub struct MessageParams {
    pub message: Option<String>,
}
