//! Content loader - reads every post under the content root

use anyhow::{Context, Result as AnyResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentItem, FrontMatter, MarkdownRenderer, ReadingTime};
use crate::error::{Error, Result};
use crate::Blog;

/// Anything that can produce the full set of posts for one build
pub trait ContentSource {
    /// Load every content item. Any failure fails the whole query.
    fn load_all_content(&self) -> Result<Vec<ContentItem>>;
}

impl ContentSource for Vec<ContentItem> {
    fn load_all_content(&self) -> Result<Vec<ContentItem>> {
        Ok(self.clone())
    }
}

/// Loads posts from the blog's source directory
pub struct FsContentSource<'a> {
    blog: &'a Blog,
}

impl<'a> FsContentSource<'a> {
    /// Create a new content source
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load a single post from a file
    fn load_item(&self, path: &Path) -> AnyResult<ContentItem> {
        let content = fs::read_to_string(path).context("Failed to read file")?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let source = path
            .strip_prefix(&self.blog.source_dir)
            .unwrap_or(path)
            .to_path_buf();

        let title = fm.title.unwrap_or_else(|| fallback_title(path));

        let reading_time = fm.reading_time.unwrap_or_else(|| {
            ReadingTime::estimate(
                MarkdownRenderer::count_words(body),
                self.blog.config.words_per_minute,
            )
        });

        Ok(ContentItem {
            slug: fm.slug.unwrap_or_default().trim().to_string(),
            title,
            date: fm.date.unwrap_or_default(),
            reading_time,
            spoiler: fm.spoiler.unwrap_or_default(),
            body: body.to_string(),
            source,
            extra: fm.extra,
        })
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.blog.config.is_content_extension(e))
            .unwrap_or(false)
    }
}

impl ContentSource for FsContentSource<'_> {
    fn load_all_content(&self) -> Result<Vec<ContentItem>> {
        let root = &self.blog.source_dir;
        if !root.exists() {
            tracing::warn!("Content directory {:?} does not exist", root);
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let mut errors = Vec::new();

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    errors.push(e.to_string());
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.is_content_file(path) {
                continue;
            }

            match self.load_item(path) {
                Ok(item) => {
                    tracing::debug!("Loaded {:?} (slug: {})", item.source, item.slug);
                    items.push(item);
                }
                Err(e) => errors.push(format!("{}: {:#}", path.display(), e)),
            }
        }

        if !errors.is_empty() {
            return Err(Error::InventoryQuery { errors });
        }

        Ok(items)
    }
}

/// Title from the file name, or the directory name for `<dir>/index.mdx`
fn fallback_title(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let name = match stem {
        Some("index") => path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str()),
        other => other,
    };
    name.unwrap_or("Untitled").to_string()
}
