//! everyday-blog: a static blog generator for Markdown and MDX posts
//!
//! Posts are loaded once into an immutable [`Inventory`], turned into one
//! `articles/<slug>` route each, and listed newest first on the articles page.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod inventory;
pub mod listing;
pub mod routes;
pub mod templates;

pub use error::{Error, Result};
pub use inventory::Inventory;
pub use listing::{list_posts, ListingEntry};
pub use routes::{generate_routes, Route, RouteRegistry, RouteTable};

use std::path::{Path, PathBuf};

/// A blog rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Open a blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Load the content inventory for one build
    pub fn inventory(&self) -> Result<Inventory> {
        Inventory::load(&content::FsContentSource::new(self))
    }

    /// Generate the static site
    pub fn generate(&self) -> anyhow::Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_blog_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.source_dir, dir.path().join("posts"));
        assert_eq!(blog.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_blog_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Everyday React\nsource_dir: content\npublic_dir: dist\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "Everyday React");
        assert_eq!(blog.source_dir, dir.path().join("content"));
        assert_eq!(blog.public_dir, dir.path().join("dist"));
    }
}
