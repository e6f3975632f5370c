//! Generator module - writes the static site using the built-in Tera templates
//!
//! Generation is two-phase: every route is registered first, then each route
//! is rendered. Nothing is written until the inventory has been accepted.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::MarkdownRenderer;
use crate::error::Error;
use crate::inventory::Inventory;
use crate::listing::{list_posts, ListingEntry};
use crate::routes::{generate_routes, Route, RouteTable, ROUTE_PREFIX};
use crate::templates::{ArticleData, PostData, SiteData, TemplateRenderer};
use crate::Blog;

/// Number of posts shown on the home page
const RECENT_POSTS: usize = 3;

/// What a build produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Article routes registered
    pub routes: usize,
    /// HTML files written
    pub pages: usize,
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    site: SiteData,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(blog.config.autolink_headings);
        let site = SiteData::from(&blog.config);

        Ok(Self {
            blog: blog.clone(),
            renderer,
            markdown,
            site,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, inventory: &Inventory) -> Result<BuildReport> {
        // Phase one: bind every post to its page
        let mut table = RouteTable::new();
        let routes = generate_routes(inventory, &mut table);

        // The listing is computed up front so a bad date fails before any write
        let listing = list_posts(inventory)?;

        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        // Phase two: render what was registered
        let mut pages = 0;
        for route in table {
            self.generate_route(inventory, &route)?;
            pages += 1;
        }

        self.generate_listing_page(&listing)?;
        self.generate_home_page(&listing)?;
        pages += 2;

        Ok(BuildReport { routes, pages })
    }

    /// Render one article route
    fn generate_route(&self, inventory: &Inventory, route: &Route) -> Result<()> {
        let item = inventory
            .get(&route.context.slug)
            .ok_or_else(|| Error::UnknownSlug(route.context.slug.clone()))?;

        let content = self.markdown.render(&item.body);

        let mut context = self.base_context();
        context.insert("post", &PostData::new(item, content));
        context.insert("current_path", &route.path);

        let html = self
            .renderer
            .render(route.template.file_name(), &context)
            .with_context(|| format!("Failed to render {}", route.path))?;

        let out_dir = self.blog.public_dir.join(&route.path);
        self.write_page(&out_dir, &html)?;
        self.copy_post_assets(&item.source, &out_dir)?;

        Ok(())
    }

    /// Render the articles listing page
    fn generate_listing_page(&self, listing: &[ListingEntry]) -> Result<()> {
        let articles: Vec<ArticleData> = listing.iter().map(ArticleData::from).collect();

        let mut context = self.base_context();
        context.insert("articles", &articles);
        context.insert("current_path", ROUTE_PREFIX);

        let html = self.renderer.render("articles.html", &context)?;
        self.write_page(&self.blog.public_dir.join(ROUTE_PREFIX), &html)
    }

    /// Render the home page with the most recent posts
    fn generate_home_page(&self, listing: &[ListingEntry]) -> Result<()> {
        let recent: Vec<ArticleData> = listing
            .iter()
            .take(RECENT_POSTS)
            .map(ArticleData::from)
            .collect();

        let mut context = self.base_context();
        context.insert("recent", &recent);
        context.insert("current_path", "");

        let html = self.renderer.render("index.html", &context)?;
        self.write_page(&self.blog.public_dir, &html)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }

    /// Write `<dir>/index.html`
    fn write_page(&self, dir: &Path, html: &str) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", dir, e))?;
        let output_path = dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the files living next to a post that has its own directory
    /// (`<dir>/index.mdx` plus images) into the post's output directory.
    /// Subdirectories holding a post of their own are left to that post.
    fn copy_post_assets(&self, source: &Path, out_dir: &Path) -> Result<()> {
        let is_index = source
            .file_stem()
            .map(|s| s == "index")
            .unwrap_or(false);
        let Some(parent) = source.parent().filter(|p| is_index && !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let asset_dir: PathBuf = self.blog.source_dir.join(parent);
        let walker = WalkDir::new(&asset_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_type().is_dir() || !self.holds_post(e.path())
            });
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to read assets of {:?}", asset_dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if self.blog.config.is_content_extension(ext) {
                continue;
            }

            let relative = path.strip_prefix(&asset_dir)?;
            let dest = out_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied asset: {:?}", dest);
        }

        Ok(())
    }

    /// Whether a directory has an `index.<content extension>` post
    fn holds_post(&self, dir: &Path) -> bool {
        self.blog
            .config
            .content_extensions
            .iter()
            .any(|ext| dir.join(format!("index.{}", ext)).is_file())
    }
}
