use crate::paginate::total_page_count;
use crate::template::TemplateId;
use crate::types::ReportEntry;

/// What a generation run will produce, computed without rendering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStatistics {
    pub entry_count: usize,
    /// Entries that carry a photo reference
    pub photo_count: usize,
    pub pages: usize,
    pub entries_per_page: usize,
    pub columns: usize,
    pub rows: usize,
}

/// Calculate statistics for an entry list under a template
pub fn report_statistics(entries: &[ReportEntry], template: TemplateId) -> ReportStatistics {
    let spec = template.spec();
    let entries_per_page = spec.entries_per_page();

    ReportStatistics {
        entry_count: entries.len(),
        photo_count: entries.iter().filter(|e| e.photo.is_some()).count(),
        pages: total_page_count(entries.len(), entries_per_page),
        entries_per_page,
        columns: spec.columns,
        rows: spec.rows,
    }
}
