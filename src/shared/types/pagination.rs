use serde::Serialize;
use utoipa::ToSchema;

use super::errors::DomainError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page window resolved from `page` / `pageSize` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub page_size: u64,
}

impl PaginationParams {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Parse raw query values. Absent values fall back to the defaults,
    /// malformed or non-positive ones are rejected, oversized pages are capped.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Result<Self, DomainError> {
        let page = parse_positive("page", page)?.unwrap_or(1);
        let page_size = parse_positive("pageSize", page_size)?
            .unwrap_or(default_page_size)
            .min(max_page_size);

        let params = Self { page, page_size };
        params.ensure_in_range()?;
        Ok(params)
    }

    /// Rejects windows whose offset overflows or cannot be bound as an SQL
    /// `i64`.
    pub fn ensure_in_range(&self) -> Result<(), DomainError> {
        let fits = self
            .page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(self.page_size))
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if fits {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "page {} is out of range for pageSize {}",
                self.page, self.page_size
            )))
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

fn parse_positive(field: &str, raw: Option<&str>) -> Result<Option<u64>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(DomainError::Validation(format!(
            "{} must be a positive integer, got '{}'",
            field, raw
        ))),
        Ok(v) => Ok(Some(v)),
    }
}

/// Pagination metadata returned alongside a page of records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub count: u64,
}

impl PaginationMeta {
    pub fn new(params: PaginationParams, count: u64) -> Self {
        Self {
            page: params.page,
            page_size: params.page_size,
            page_count: count.div_ceil(params.page_size),
            count,
        }
    }
}

/// One page of items plus the total count under the same filter
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, count: u64, params: PaginationParams) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(params, count),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
