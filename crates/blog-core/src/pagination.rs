//! Page-number pagination shared by every listing.

use crate::error::DomainError;

/// Posts per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest number of rows a listing may skip; SQL `OFFSET` is a signed bigint.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Build a request; missing or zero values fall back to page 1 / one item.
    pub fn new(number: Option<u64>, per_page: u64) -> Self {
        Self {
            number: number.filter(|n| *n > 0).unwrap_or(1),
            per_page: per_page.max(1),
        }
    }

    /// Like [`PageRequest::new`], but a page starting beyond [`MAX_OFFSET`]
    /// is reported as not found instead of reaching a repository.
    pub fn bounded(number: Option<u64>, per_page: u64) -> Result<Self, DomainError> {
        let request = Self::new(number, per_page);
        match request.index().checked_mul(request.per_page) {
            Some(offset) if offset <= MAX_OFFSET => Ok(request),
            _ => Err(DomainError::not_found("page", request.number)),
        }
    }

    /// Zero-based index of the page.
    pub fn index(&self) -> u64 {
        self.number - 1
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number,
            per_page: request.per_page,
            total_items,
            total_pages: total_items.div_ceil(request.per_page),
        }
    }

    /// Slice an already filtered and ordered collection.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.per_page as usize)
            .collect();
        Self::new(items, request, total)
    }

    /// Page 1 always exists, even when empty; any later page must hold items.
    pub fn ensure_exists(self) -> Result<Self, DomainError> {
        if self.number > 1 && self.number > self.total_pages {
            return Err(DomainError::not_found("page", self.number));
        }
        Ok(self)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}
