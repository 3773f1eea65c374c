//! Pure pagination math and page-window shaping helpers.
//!
//! Page indices are zero-based; user-facing page numbers are one-based.

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return start/end item indices for the page at `index`.
pub fn page_window(total_items: usize, per_page: usize, index: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = index.saturating_mul(safe_per_page).min(total_items);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start, end)
}

/// Build a bullet-list description for one page window.
///
/// Lines containing `highlight` (case-insensitive) are rendered in bold.
pub fn bulleted_description(items: &[String], highlight: Option<&str>) -> String {
    let needle = highlight
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());

    items
        .iter()
        .map(|item| match needle.as_deref() {
            Some(needle) if item.to_lowercase().contains(needle) => format!("- **{item}**"),
            _ => format!("- {item}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(24, 5), 5);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn last_window_is_partial() {
        assert_eq!(page_window(24, 5, 0), (0, 5));
        assert_eq!(page_window(24, 5, 4), (20, 24));
        assert_eq!(page_window(24, 5, 9), (24, 24));
    }

    #[test]
    fn highlight_bolds_matching_lines() {
        let items = vec!["alpha".to_owned(), "Beta".to_owned()];
        assert_eq!(bulleted_description(&items, None), "- alpha\n- Beta");
        assert_eq!(
            bulleted_description(&items, Some("beta")),
            "- alpha\n- **Beta**"
        );
    }
}
