//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post file and return its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&blog.source_dir)?;
    let file_path = blog.source_dir.join(format!("{}.mdx", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\nslug: {}\ndate: {}\nspoiler: ''\n---\n\n",
        yaml_string(title),
        slug,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so YAML reads it back verbatim
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "JavaScript: Fundamentals", None).unwrap();
        assert_eq!(path, blog.source_dir.join("javascript-fundamentals.mdx"));

        let inventory = blog.inventory().unwrap();
        let item = inventory.get("javascript-fundamentals").unwrap();
        assert_eq!(item.title, "JavaScript: Fundamentals");
        assert!(crate::listing::parse_post_date(&item.date).is_some());
    }

    #[test]
    fn test_create_post_with_explicit_slug() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "How React Works", Some("react internals")).unwrap();
        assert!(path.ends_with("react-internals.mdx"));
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        create_post(&blog, "Same", None).unwrap();
        assert!(create_post(&blog, "Same", None).is_err());
    }
}
