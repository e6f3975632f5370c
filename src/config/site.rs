//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site metadata
    pub title: String,
    pub site_url: String,
    pub author: String,
    pub description: String,
    pub language: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Content
    pub content_extensions: Vec<String>,
    pub words_per_minute: usize,
    pub autolink_headings: bool,

    // Date format used when displaying parsed post dates
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "JS & React Blog".to_string(),
            site_url: "http://example.com".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
            language: "en".to_string(),

            source_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            content_extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],
            words_per_minute: 200,
            autolink_headings: true,

            date_format: "%B %-d, %Y".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a file extension names a content file
    pub fn is_content_extension(&self, ext: &str) -> bool {
        self.content_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
