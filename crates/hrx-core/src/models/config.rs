//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the hrx pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HrxConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Report extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for HrxConfig {
    fn default() -> Self {
        Self {
            pdf: PdfConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum decoded text length before the document is flagged as
    /// likely scanned (image-only, no text layer).
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Report extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Department names recognized when splitting roster sections.
    /// Matching is case-insensitive.
    pub departments: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            departments: vec![
                "Fênix".to_string(),
                "Pessoal".to_string(),
                "Comercial".to_string(),
                "Escrita".to_string(),
                "Contábil".to_string(),
                "Economic".to_string(),
            ],
        }
    }
}

impl HrxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
