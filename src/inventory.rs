//! The immutable per-build collection of posts

use std::collections::HashMap;

use crate::content::{ContentItem, ContentSource};
use crate::error::{Error, Result};

/// Every post of one build, validated and indexed by slug.
///
/// Built once at the start of a build and then only shared by reference.
/// Every item has a non-empty, trimmed slug that stays inside the output
/// directory, and no two items share one.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<ContentItem>,
    by_slug: HashMap<String, usize>,
}

impl Inventory {
    /// Validate and index a set of content items
    pub fn new(mut items: Vec<ContentItem>) -> Result<Self> {
        let mut by_slug = HashMap::with_capacity(items.len());

        for item in items.iter_mut() {
            let trimmed = item.slug.trim();
            if trimmed.len() != item.slug.len() {
                item.slug = trimmed.to_string();
            }
        }

        for (index, item) in items.iter().enumerate() {
            if item.slug.is_empty() {
                return Err(Error::MissingSlug {
                    path: item.source.clone(),
                });
            }
            if !is_safe_slug(&item.slug) {
                return Err(Error::InvalidSlug {
                    slug: item.slug.clone(),
                    path: item.source.clone(),
                });
            }
            if let Some(&first) = by_slug.get(&item.slug) {
                let first: &ContentItem = &items[first];
                return Err(Error::DuplicateSlug {
                    slug: item.slug.clone(),
                    first: first.source.clone(),
                    second: item.source.clone(),
                });
            }
            by_slug.insert(item.slug.clone(), index);
        }

        Ok(Self { items, by_slug })
    }

    /// Query a content source and build the inventory from its answer
    pub fn load<S: ContentSource + ?Sized>(source: &S) -> Result<Self> {
        let items = source.load_all_content()?;
        let inventory = Self::new(items)?;
        tracing::debug!("Inventory holds {} posts", inventory.len());
        Ok(inventory)
    }

    /// Items in source order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Look an item up by slug
    pub fn get(&self, slug: &str) -> Option<&ContentItem> {
        self.by_slug.get(slug).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A slug becomes a directory under the public dir, so it must stay inside it
fn is_safe_slug(slug: &str) -> bool {
    !slug.starts_with('/')
        && !slug.contains('\\')
        && slug.split('/').all(|part| part != ".." && part != ".")
}
