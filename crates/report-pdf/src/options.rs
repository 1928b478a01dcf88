use serde::{Deserialize, Serialize};

use crate::template::DEFAULT_TEMPLATE;
use crate::types::{HeaderMetadata, ReportError, Result};

/// Everything a generation run needs besides the entries themselves.
///
/// Serializes to the JSON job-file format, so saved options can be reloaded
/// for the next report. `template` stays a string here; it is resolved
/// through the registry at generation time and unknown ids fall back to the
/// default grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Template id, e.g. `"A4Portrait2x2"`
    pub template: String,

    /// Full metadata header on every page, or just the minimal title
    pub include_header: bool,

    /// Report-level metadata for the page header
    pub header: HeaderMetadata,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.as_str().to_string(),
            include_header: true,
            header: HeaderMetadata::default(),
        }
    }
}

impl GenerationOptions {
    /// Load options from a JSON job file
    pub async fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse options: {e}")))?;
        Ok(options)
    }

    /// Save options to a JSON job file
    pub async fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.template.is_empty() {
            return Err(ReportError::Config("No template specified".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(options.template, "A4Portrait2x2");
        assert!(options.include_header);
        assert_eq!(options.header, HeaderMetadata::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_empty_template_is_rejected() {
        let options = GenerationOptions {
            template: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ReportError::Config(message)) if message.contains("template")
        ));
    }

    #[test]
    fn test_json_shape() {
        let options = GenerationOptions {
            template: "A4Landscape3x2".to_string(),
            include_header: false,
            header: HeaderMetadata {
                company: Some("Acme".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: GenerationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
        assert!(json.contains("\"template\":\"A4Landscape3x2\""));
    }
}
