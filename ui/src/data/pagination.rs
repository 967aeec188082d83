//! Page slicing and the Table's local UI state.

use super::filter::FilterCriteria;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// 1-indexed, already clamped.
    pub page_number: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// Zero-based index of `rows[0]` in the full list.
    pub start_index: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn showing_label(&self) -> String {
        if self.total_rows == 0 {
            return "Showing 0 to 0 of 0 entries".to_string();
        }
        let from = self.start_index + 1;
        let to = self.start_index + self.rows.len();
        format!("Showing {from} to {to} of {} entries", self.total_rows)
    }
}

pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

/// Slice out one page. Out-of-range page numbers are clamped to
/// `[1, max(total_pages, 1)]`.
pub fn paginate<T: Clone>(rows: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_pages(total_rows, page_size);
    let page_number = page_number.clamp(1, total_pages.max(1));

    let start_index = (page_number - 1) * page_size;
    let end = (start_index + page_size).min(total_rows);
    let rows = rows.get(start_index..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        rows,
        page_number,
        total_pages,
        total_rows,
        start_index,
    }
}

/// What the page number was computed against. A change in either resets the
/// table to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStamp {
    pub criteria: FilterCriteria,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub page: usize,
    pub expanded: Option<String>,
    pub selected: Option<String>,
    stamp: Option<TableStamp>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            expanded: None,
            selected: None,
            stamp: None,
        }
    }
}

impl TableState {
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
            self.expanded = None;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.expanded = None;
        }
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
        self.expanded = None;
    }

    /// Reset the page when the criteria or dataset differ from the last sync.
    /// Returns whether a reset happened.
    pub fn sync(&mut self, criteria: &FilterCriteria, generation: u64) -> bool {
        let stale = self
            .stamp
            .as_ref()
            .map(|stamp| stamp.criteria != *criteria || stamp.generation != generation)
            .unwrap_or(true);
        if stale {
            if self.stamp.is_some() {
                self.reset_page();
            }
            self.stamp = Some(TableStamp {
                criteria: criteria.clone(),
                generation,
            });
        }
        stale
    }

    pub fn toggle_expanded(&mut self, row_key: &str) {
        if self.expanded.as_deref() == Some(row_key) {
            self.expanded = None;
        } else {
            self.expanded = Some(row_key.to_string());
        }
    }

    pub fn is_expanded(&self, row_key: &str) -> bool {
        self.expanded.as_deref() == Some(row_key)
    }

    pub fn select(&mut self, row_key: &str) {
        self.selected = Some(row_key.to_string());
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let rows = numbers(25);
        let page = paginate(&rows, 12, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows, vec![25]);
        assert_eq!(page.showing_label(), "Showing 25 to 25 of 25 entries");
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let rows = numbers(25);
        assert_eq!(paginate(&rows, 12, 4).page_number, 3);
        let first = paginate(&rows, 12, 0);
        assert_eq!(first.page_number, 1);
        assert_eq!(first.rows.len(), 12);
        assert_eq!(first.showing_label(), "Showing 1 to 12 of 25 entries");
        assert!(!first.has_previous());
    }

    #[test]
    fn empty_input_is_single_empty_page() {
        let page = paginate::<usize>(&[], 12, 5);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.rows.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.showing_label(), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn page_moves_stop_at_boundaries_and_collapse() {
        let mut state = TableState::default();
        state.previous_page();
        assert_eq!(state.page, 1);

        state.toggle_expanded("0-1");
        state.next_page(2);
        assert_eq!(state.page, 2);
        assert_eq!(state.expanded, None);

        state.toggle_expanded("1-0");
        state.next_page(2);
        assert_eq!(state.page, 2);
        assert!(state.is_expanded("1-0"));
    }

    #[test]
    fn criteria_or_dataset_change_resets_page() {
        let mut state = TableState::default();
        let criteria = FilterCriteria::default();
        assert!(state.sync(&criteria, 1));
        state.next_page(3);
        assert!(!state.sync(&criteria, 1));
        assert_eq!(state.page, 2);

        let mut narrowed = criteria.clone();
        narrowed.toggle_network("1mbps");
        assert!(state.sync(&narrowed, 1));
        assert_eq!(state.page, 1);

        state.next_page(3);
        assert!(state.sync(&narrowed, 2));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn closing_detail_keeps_page_and_expansion() {
        let mut state = TableState::default();
        state.next_page(3);
        state.toggle_expanded("2-0");
        state.select("2-0");
        state.close_detail();
        assert_eq!(state.selected, None);
        assert_eq!(state.page, 2);
        assert!(state.is_expanded("2-0"));
    }
}
