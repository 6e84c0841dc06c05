//! Result pagination
//!
//! Pure page-window arithmetic. The paginator is stateless: filter
//! criteria travel with the request and the caller recomputes the total
//! against the current filter on every call, so a filter change can never
//! leave a stale count behind. Out-of-range pages are a caller error;
//! clamp with [`clamp_page`] before calling [`paginate`].

/// Window of one result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub page_count: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Compute the window for `page` (1-based) over `total_count` results.
///
/// `page_count` is at least 1 even for an empty result set; callers check
/// `total_count` separately before rendering "no results".
pub fn paginate(total_count: i64, page: i64, page_size: i64) -> PageWindow {
    let page_count = page_count(total_count, page_size);
    PageWindow {
        offset: (page - 1) * page_size,
        page_count,
        has_prev: page > 1,
        has_next: page < page_count,
    }
}

/// `max(1, ceil(total_count / page_size))`
pub fn page_count(total_count: i64, page_size: i64) -> i64 {
    ((total_count + page_size - 1) / page_size).max(1)
}

/// Clamp a requested page into `[1, page_count]`.
pub fn clamp_page(page: i64, total_count: i64, page_size: i64) -> i64 {
    page.clamp(1, page_count(total_count, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_with_floor_of_one() {
        assert_eq!(page_count(0, 5), 1);
        assert_eq!(page_count(1, 5), 1);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(11, 1), 11);
    }

    #[test]
    fn offsets_walk_the_result_set() {
        let window = paginate(11, 1, 5);
        assert_eq!(window.offset, 0);
        assert!(!window.has_prev);
        assert!(window.has_next);

        let window = paginate(11, 2, 5);
        assert_eq!(window.offset, 5);
        assert!(window.has_prev);
        assert!(window.has_next);

        let window = paginate(11, 3, 5);
        assert_eq!(window.offset, 10);
        assert!(window.has_prev);
        assert!(!window.has_next);
    }

    #[test]
    fn last_page_covers_the_tail() {
        // offset + page_size >= total_count whenever page == page_count
        for (total, size) in [(0i64, 1i64), (1, 1), (7, 3), (10, 5), (11, 5), (23, 7)] {
            let count = page_count(total, size);
            let window = paginate(total, count, size);
            assert!(
                window.offset + size >= total,
                "total={total} size={size}: offset {} leaves a tail",
                window.offset
            );
        }
    }

    #[test]
    fn empty_result_set_still_has_one_page() {
        let window = paginate(0, 1, 1);
        assert_eq!(window.page_count, 1);
        assert_eq!(window.offset, 0);
        assert!(!window.has_prev);
        assert!(!window.has_next);
    }

    #[test]
    fn clamp_page_bounds_requests() {
        assert_eq!(clamp_page(0, 11, 5), 1);
        assert_eq!(clamp_page(-3, 11, 5), 1);
        assert_eq!(clamp_page(2, 11, 5), 2);
        assert_eq!(clamp_page(99, 11, 5), 3);
        assert_eq!(clamp_page(1, 0, 5), 1);
    }
}
