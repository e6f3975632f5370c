//! The ContentItem model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::ReadingTime;

/// One published post, as discovered by a content source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique, URL-safe identifier
    pub slug: String,

    /// Display title
    pub title: String,

    /// Publication date, exactly as written in the front-matter
    pub date: String,

    /// Declared or estimated reading time
    pub reading_time: ReadingTime,

    /// Short summary shown in listings
    pub spoiler: String,

    /// Raw Markdown/MDX body (front-matter removed)
    pub body: String,

    /// Source file path relative to the content root
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(default)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl ContentItem {
    /// Create an item with the fields every post needs
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            source: PathBuf::from(format!("{}.mdx", slug)),
            slug,
            title: title.into(),
            date: date.into(),
            reading_time: ReadingTime::Minutes(1),
            spoiler: String::new(),
            body: String::new(),
            extra: HashMap::new(),
        }
    }

    pub fn with_spoiler(mut self, spoiler: impl Into<String>) -> Self {
        self.spoiler = spoiler.into();
        self
    }

    pub fn with_reading_time(mut self, reading_time: ReadingTime) -> Self {
        self.reading_time = reading_time;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }
}
