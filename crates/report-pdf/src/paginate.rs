//! Pagination
//!
//! Entries fill pages strictly in order at the template's fixed capacity.
//! The last page holds the remainder; an exact multiple produces no empty
//! trailing page. Page numbering and the continuous entry numbering both
//! derive from here and nowhere else.

use crate::normalize::ProcessedEntry;
use crate::template::TemplateSpec;

/// One page worth of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// 1-based page number
    pub page_number: usize,
    /// Total pages in the document (same on every page)
    pub total_pages: usize,
    /// Position of `entries[0]` in the full entry list (0-based); cell `i`
    /// on this page is entry number `start_index + i + 1`
    pub start_index: usize,
    pub entries: &'a [ProcessedEntry],
}

/// Number of pages `entry_count` entries occupy at `entries_per_page`.
pub fn total_page_count(entry_count: usize, entries_per_page: usize) -> usize {
    (entry_count + entries_per_page - 1) / entries_per_page
}

/// Split entries into pages for the given template.
pub fn paginate<'a>(entries: &'a [ProcessedEntry], spec: &TemplateSpec) -> Vec<Page<'a>> {
    let per_page = spec.entries_per_page();
    let total_pages = total_page_count(entries.len(), per_page);
    entries
        .chunks(per_page)
        .enumerate()
        .map(|(index, chunk)| Page {
            page_number: index + 1,
            total_pages,
            start_index: index * per_page,
            entries: chunk,
        })
        .collect()
}
