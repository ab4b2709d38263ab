use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page of results returned by list endpoints, with a page window the
/// dashboard tables can render directly.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total.div_ceil(per_page.max(1));

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_gaps() {
        let paginated = Paginated::new(vec![1, 2, 3], 1, 3, 50);
        assert_eq!(paginated.pages, vec![Some(1)]);
        assert_eq!(paginated.page, 1);
        assert_eq!(paginated.total, 3);
    }

    #[test]
    fn middle_page_elides_distant_pages() {
        let paginated = Paginated::new(vec![0; 50], 10, 1000, 50);
        assert!(paginated.pages.contains(&None));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(paginated.pages.contains(&Some(20)));
    }

    #[test]
    fn zero_page_is_clamped_to_first() {
        let paginated = Paginated::new(Vec::<i32>::new(), 0, 0, 50);
        assert_eq!(paginated.page, 1);
        assert!(paginated.pages.is_empty());
    }
}
