//! Page-number window for the pagination bar.

/// Most page buttons shown at once.
pub const MAX_VISIBLE_PAGES: u64 = 5;

/// Buttons to render around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Consecutive page numbers, ascending.
    pub pages: Vec<u64>,
    /// Show a shortcut to page 1 before the window.
    pub show_first: bool,
    /// Show an ellipsis between the page 1 shortcut and the window.
    pub leading_gap: bool,
    /// Show a shortcut to the last page after the window.
    pub show_last: bool,
    /// Show an ellipsis between the window and the last page shortcut.
    pub trailing_gap: bool,
}

/// Page buttons for `current` out of `total_pages`, or `None` when there is
/// at most one page and the bar is hidden.
///
/// The window pins to the first five pages near the start, the last five
/// near the end, and is otherwise centred on `current`.
///
/// # Examples
///
/// ```
/// use contacts_client::visible_pages;
///
/// let window = visible_pages(6, 10).expect("more than one page");
/// assert_eq!(window.pages, vec![4, 5, 6, 7, 8]);
/// assert!(window.show_first && window.leading_gap);
/// assert!(window.show_last && window.trailing_gap);
/// ```
#[must_use]
pub fn visible_pages(current: u64, total_pages: u64) -> Option<PageWindow> {
    if total_pages <= 1 {
        return None;
    }

    let wide = total_pages > MAX_VISIBLE_PAGES;
    let (start, end) = if !wide {
        (1, total_pages)
    } else if current <= 3 {
        (1, MAX_VISIBLE_PAGES)
    } else if current.saturating_add(2) >= total_pages {
        (total_pages - (MAX_VISIBLE_PAGES - 1), total_pages)
    } else {
        (current - 2, current + 2)
    };

    let show_first = wide && current > 3;
    let show_last = wide && current.saturating_add(2) < total_pages;
    Some(PageWindow {
        pages: (start..=end).collect(),
        show_first,
        leading_gap: show_first && current > 4,
        show_last,
        trailing_gap: show_last && current.saturating_add(3) < total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0)]
    #[case(1, 1)]
    fn single_page_hides_the_bar(#[case] current: u64, #[case] total: u64) {
        assert_eq!(visible_pages(current, total), None);
    }

    #[rstest]
    #[case(2, 4, &[1, 2, 3, 4])]
    #[case(1, 10, &[1, 2, 3, 4, 5])]
    #[case(3, 10, &[1, 2, 3, 4, 5])]
    #[case(4, 10, &[2, 3, 4, 5, 6])]
    #[case(8, 10, &[6, 7, 8, 9, 10])]
    #[case(10, 10, &[6, 7, 8, 9, 10])]
    fn window_tracks_current_page(
        #[case] current: u64,
        #[case] total: u64,
        #[case] expected: &[u64],
    ) {
        let window = visible_pages(current, total).expect("bar visible");
        assert_eq!(window.pages, expected);
    }

    #[rstest]
    #[case(2, 4, false, false, false, false)]
    #[case(3, 10, false, false, true, true)]
    #[case(4, 10, true, false, true, true)]
    #[case(5, 10, true, true, true, true)]
    #[case(7, 10, true, true, true, false)]
    #[case(8, 10, true, true, false, false)]
    fn shortcuts_appear_only_when_pages_are_hidden(
        #[case] current: u64,
        #[case] total: u64,
        #[case] show_first: bool,
        #[case] leading_gap: bool,
        #[case] show_last: bool,
        #[case] trailing_gap: bool,
    ) {
        let window = visible_pages(current, total).expect("bar visible");
        assert_eq!(
            (
                window.show_first,
                window.leading_gap,
                window.show_last,
                window.trailing_gap
            ),
            (show_first, leading_gap, show_last, trailing_gap)
        );
    }
}
