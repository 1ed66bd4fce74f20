//! Pagination metadata for list endpoints.
//!
//! [`Paginator::paginate`] turns raw counters into a [`PaginationBlock`]. All
//! inputs are clamped rather than rejected, so the call never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::coerce_int;
use crate::error::CoreError;

/// Page size used when the caller omits one.
pub const DEFAULT_PAGE_SIZE: i64 = 8;

/// Position of one page within a larger result set.
///
/// On the wire `more` is written as `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationBlock {
    pub total_record: i64,
    /// 1-based.
    pub page: i64,
    pub pagesize: i64,
    /// Items actually returned on this page.
    pub count: i64,
    pub page_count: i64,
    #[serde(with = "flag")]
    pub more: bool,
}

impl PaginationBlock {
    /// Number of records skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.pagesize)
    }
}

/// Computes pagination blocks against a configured default page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    default_page_size: i64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    /// Sizes below 1 fall back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(default_page_size: i64) -> Self {
        Self::try_new(default_page_size).unwrap_or_default()
    }

    pub fn try_new(default_page_size: i64) -> Result<Self, CoreError> {
        if default_page_size < 1 {
            return Err(CoreError::InvalidPageSize(default_page_size));
        }
        Ok(Self { default_page_size })
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }

    /// Build the pagination block for one page of results.
    ///
    /// `total_record`, `pagesize` and `count` are clamped to be non-negative,
    /// `page` to at least 1, and a zero `pagesize` means the default.
    ///
    /// `count` must be the number of items returned for *this* page, and pages
    /// are assumed to be walked in increasing order; `more` is derived from
    /// `total_record - (page - 1) * pagesize > count` and is meaningless if
    /// `count` is anything else (for example the size of the whole dataset).
    pub fn paginate(
        &self,
        total_record: i64,
        page: i64,
        pagesize: i64,
        count: i64,
    ) -> PaginationBlock {
        let total_record = total_record.max(0);
        let page = if page > 0 { page } else { 1 };
        let pagesize = if pagesize > 0 {
            pagesize
        } else {
            self.default_page_size
        };
        let count = count.max(0);

        if total_record == 0 {
            return PaginationBlock {
                total_record: 0,
                page: 1,
                pagesize,
                count: 0,
                page_count: 0,
                more: false,
            };
        }

        let skipped = (page - 1).saturating_mul(pagesize);
        let more = total_record.saturating_sub(skipped) > count;
        let page_count = total_record / pagesize + i64::from(total_record % pagesize != 0);

        PaginationBlock {
            total_record,
            page,
            pagesize,
            count,
            page_count,
            more,
        }
    }

    /// Like [`paginate`](Self::paginate), but each argument is first coerced
    /// from an untyped value (numeric strings, booleans, null, ...).
    pub fn paginate_values(
        &self,
        total_record: &Value,
        page: &Value,
        pagesize: &Value,
        count: &Value,
    ) -> PaginationBlock {
        self.paginate(
            coerce_int(total_record),
            coerce_int(page),
            coerce_int(pagesize),
            coerce_int(count),
        )
    }
}

/// `bool` written as `1` / `0`; reads either form back.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => b,
            Raw::Int(i) => i != 0,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
