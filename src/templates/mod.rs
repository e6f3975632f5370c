//! Built-in templates using the Tera template engine
//!
//! The layout, article page, listing page and home page are embedded in the
//! binary, so a blog only needs its posts and a `_config.yml`.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::ContentItem;
use crate::error::Result;
use crate::listing::{parse_post_date, ListingEntry};

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Bodies are already HTML and paths must stay unescaped
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("default/layout.html")),
            ("post.html", include_str!("default/post.html")),
            ("articles.html", include_str!("default/articles.html")),
            ("index.html", include_str!("default/index.html")),
            (
                "partials/article_link.html",
                include_str!("default/partials/article_link.html"),
            ),
        ])?;

        tera.register_filter("format_date", format_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: reformat a post date with a chrono format string.
/// Dates that do not parse are shown as written.
fn format_date_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("format_date", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("format_date", "format", String, val),
        None => return Ok(tera::Value::String(s)),
    };

    let formatted = match parse_post_date(&s) {
        Some(date) => date.format(&format).to_string(),
        None => s,
    };
    Ok(tera::Value::String(formatted))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub site_url: String,
    pub author: String,
    pub description: String,
    pub language: String,
    pub date_format: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            site_url: config.site_url.clone(),
            author: config.author.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub date: String,
    pub reading_time: String,
    pub content: String,
}

impl PostData {
    pub fn new(item: &ContentItem, content: String) -> Self {
        Self {
            title: item.title.clone(),
            date: item.date.clone(),
            reading_time: item.reading_time.to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub date: String,
    pub reading_time: String,
    pub spoiler: String,
    pub path: String,
}

impl From<&ListingEntry> for ArticleData {
    fn from(entry: &ListingEntry) -> Self {
        Self {
            title: entry.title.clone(),
            date: entry.date.clone(),
            reading_time: entry.reading_time.to_string(),
            spoiler: entry.spoiler.clone(),
            path: entry.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ReadingTime;

    fn site() -> SiteData {
        SiteData::from(&SiteConfig::default())
    }

    #[test]
    fn test_render_post() {
        let renderer = TemplateRenderer::new().unwrap();
        let item = ContentItem::new("a", "How React Works", "2020-07-12")
            .with_reading_time(ReadingTime::Minutes(5));

        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("post", &PostData::new(&item, "<p>Body</p>".to_string()));

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains(r#"<h1 class="post-title">How React Works</h1>"#));
        assert!(html.contains("July 12, 2020 - 📖 5 min"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_format_date_filter_keeps_unparsable_text() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), tera::Value::String("%Y".to_string()));

        let parsed = format_date_filter(&tera::Value::String("July 12, 2020".into()), &args);
        assert_eq!(parsed.unwrap(), tera::Value::String("2020".into()));

        let raw = format_date_filter(&tera::Value::String("someday".into()), &args);
        assert_eq!(raw.unwrap(), tera::Value::String("someday".into()));
    }
}
