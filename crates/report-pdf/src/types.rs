use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No entries to lay out")]
    NoEntries,
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Where a cell photo comes from: a file on disk or an inline
/// `data:image/...;base64,` URI (the form mobile capture flows hand over).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Path(PathBuf),
    DataUri(String),
}

impl ImageRef {
    /// Classify a raw source string.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("data:") {
            ImageRef::DataUri(source.to_string())
        } else {
            ImageRef::Path(PathBuf::from(source))
        }
    }

    /// The string form this reference round-trips through (CSV cells,
    /// JSON job files).
    pub fn as_source(&self) -> String {
        match self {
            ImageRef::Path(path) => path.display().to_string(),
            ImageRef::DataUri(uri) => uri.clone(),
        }
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_source())
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Ok(ImageRef::parse(&source))
    }
}

/// One report item: a location line, free-text observations, an optional
/// photo and an optional capture timestamp.
///
/// Empty strings are treated as missing at render time (the layout engine
/// substitutes "No Location" / "No observations"). A `timestamp` without a
/// `photo` is valid data but is never rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportEntry {
    pub location: String,
    pub observations: String,
    pub photo: Option<ImageRef>,
    /// Rendered verbatim in the image corner; callers that stamp at capture
    /// time can use [`crate::format_capture_timestamp`].
    pub timestamp: Option<String>,
}

impl ReportEntry {
    pub fn new(location: impl Into<String>, observations: impl Into<String>) -> Self {
        ReportEntry {
            location: location.into(),
            observations: observations.into(),
            photo: None,
            timestamp: None,
        }
    }

    pub fn with_photo(mut self, photo: ImageRef) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Report-level metadata shown in the full page header.
///
/// Every field is optional; the renderer substitutes the documented fallback
/// when a field is `None` or empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderMetadata {
    /// Fallback: "Company Name"
    pub company: Option<String>,
    /// Fallback: "Inspector"
    pub created_by: Option<String>,
    /// Fallback: "Client"
    pub report_for: Option<String>,
    /// Doubles as the document title. Fallback: "Inspection Report"
    pub type_of_report: Option<String>,
    /// Fallback: the current date, `M/D/YYYY`
    pub date: Option<String>,
}

/// `None` and `""` both fall through, matching how the metadata is filled
/// in by form frontends.
pub(crate) fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}
