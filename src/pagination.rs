//! Page-window computation over filtered query results.
//!
//! Repositories ask a [`Paginator`] for the SQL window (`limit`/`offset`)
//! and hand back the total count plus the fetched slice; the paginator
//! assembles the [`Page`] envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Page selection taken from query parameters.
///
/// Both fields are optional: omitting `per_page` returns the entire
/// filtered result as a single page.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageRequest {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page; absent means everything on one page
    pub per_page: Option<i64>,
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: i64,
    pub number_of_pages: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Convert the item type, keeping the page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page: self.page,
            per_page: self.per_page,
            number_of_pages: self.number_of_pages,
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Computes the slice window and page metadata for one list request.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page: i64,
    per_page: Option<i64>,
}

impl Paginator {
    /// Validates the request; `page < 1` or `per_page < 1` would produce
    /// nonsense offsets, so they are rejected outright.
    pub fn new(request: &PageRequest) -> AppResult<Self> {
        let page = request.page.unwrap_or(1);

        if page < 1 {
            return Err(AppError::Validation(format!(
                "page must be >= 1, got {}",
                page
            )));
        }
        if let Some(per_page) = request.per_page {
            if per_page < 1 {
                return Err(AppError::Validation(format!(
                    "per_page must be >= 1, got {}",
                    per_page
                )));
            }
        }

        Ok(Self {
            page,
            per_page: request.per_page,
        })
    }

    /// Row limit for the current page; `None` fetches everything.
    pub fn limit(&self) -> Option<i64> {
        self.per_page
    }

    /// Row offset of the current page; `None` when unpaginated.
    pub fn offset(&self) -> Option<i64> {
        self.per_page.map(|per_page| (self.page - 1) * per_page)
    }

    /// Assemble the response envelope from the total count and the slice
    /// fetched with [`limit`](Self::limit)/[`offset`](Self::offset).
    pub fn paginate<T>(&self, total_count: i64, items: Vec<T>) -> Page<T> {
        Page {
            page: self.page,
            per_page: self.per_page.unwrap_or(total_count),
            number_of_pages: self.number_of_pages(total_count),
            total_count,
            items,
        }
    }

    fn number_of_pages(&self, total_count: i64) -> i64 {
        let Some(per_page) = self.per_page else {
            return 1;
        };

        let quotient = total_count / per_page;
        if total_count % per_page == 0 {
            quotient
        } else {
            quotient + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: Option<i64>, per_page: Option<i64>) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn window_is_exactly_one_page() {
        // Page 3 of size 10 must fetch rows 20..30, nothing more.
        let paginator = Paginator::new(&request(Some(3), Some(10))).unwrap();
        assert_eq!(paginator.limit(), Some(10));
        assert_eq!(paginator.offset(), Some(20));
    }

    #[test]
    fn first_page_is_default() {
        let paginator = Paginator::new(&request(None, Some(25))).unwrap();
        assert_eq!(paginator.limit(), Some(25));
        assert_eq!(paginator.offset(), Some(0));
    }

    #[test]
    fn absent_per_page_fetches_everything() {
        let paginator = Paginator::new(&request(None, None)).unwrap();
        assert_eq!(paginator.limit(), None);
        assert_eq!(paginator.offset(), None);

        let page = paginator.paginate(7, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page.number_of_pages, 1);
        assert_eq!(page.per_page, 7);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.items.len(), 7);
    }

    #[test]
    fn page_count_rounds_up_on_remainder() {
        let paginator = Paginator::new(&request(Some(1), Some(10))).unwrap();
        assert_eq!(paginator.paginate(0, Vec::<i32>::new()).number_of_pages, 0);
        assert_eq!(paginator.paginate(9, Vec::<i32>::new()).number_of_pages, 1);
        assert_eq!(paginator.paginate(10, Vec::<i32>::new()).number_of_pages, 1);
        assert_eq!(paginator.paginate(11, Vec::<i32>::new()).number_of_pages, 2);
        assert_eq!(paginator.paginate(30, Vec::<i32>::new()).number_of_pages, 3);
    }

    #[test]
    fn degenerate_requests_are_rejected() {
        assert!(Paginator::new(&request(Some(0), Some(10))).is_err());
        assert!(Paginator::new(&request(Some(-1), Some(10))).is_err());
        assert!(Paginator::new(&request(Some(1), Some(0))).is_err());
        assert!(Paginator::new(&request(Some(1), Some(-5))).is_err());
    }

    #[test]
    fn map_keeps_metadata() {
        let paginator = Paginator::new(&request(Some(2), Some(2))).unwrap();
        let page = paginator.paginate(5, vec![3, 4]).map(|n| n * 10);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.number_of_pages, 3);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items, vec![30, 40]);
    }
}
