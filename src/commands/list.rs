//! List site content

use anyhow::Result;
use std::io::Write;

use crate::listing::list_posts;
use crate::routes::{generate_routes, RouteTable};
use crate::Blog;

/// Print the post listing or the route table
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let stdout = std::io::stdout();
    write_listing(blog, content_type, &mut stdout.lock())
}

fn write_listing<W: Write>(blog: &Blog, content_type: &str, out: &mut W) -> Result<()> {
    let inventory = blog.inventory()?;

    match content_type {
        "post" | "posts" => {
            let entries = list_posts(&inventory)?;
            writeln!(out, "Posts ({}):", entries.len())?;
            for entry in entries {
                writeln!(
                    out,
                    "  {} - {} ({}) [{}]",
                    entry.published().format("%Y-%m-%d"),
                    entry.title,
                    entry.reading_time,
                    entry.slug
                )?;
            }
        }
        "route" | "routes" => {
            let mut table = RouteTable::new();
            generate_routes(&inventory, &mut table);
            writeln!(out, "Routes ({}):", table.len())?;
            for route in table.routes() {
                writeln!(out, "  {} -> {}", route.path, route.template)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn blog() -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("a.md"),
            "---\ntitle: Old\nslug: a\ndate: 2020-06-06\nreadingTime: 4\n---\n",
        )
        .unwrap();
        fs::write(
            posts.join("b.md"),
            "---\ntitle: New\nslug: b\ndate: 2020-07-10\nreadingTime: 2\n---\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_list_posts_newest_first() {
        let (_dir, blog) = blog();
        let mut out = Vec::new();
        write_listing(&blog, "post", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Posts (2):");
        assert_eq!(lines[1], "  2020-07-10 - New (2 min) [b]");
        assert_eq!(lines[2], "  2020-06-06 - Old (4 min) [a]");
    }

    #[test]
    fn test_list_routes() {
        let (_dir, blog) = blog();
        let mut out = Vec::new();
        write_listing(&blog, "routes", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Routes (2):"));
        assert!(text.contains("  articles/a -> post.html"));
        assert!(text.contains("  articles/b -> post.html"));
    }

    #[test]
    fn test_unknown_type() {
        let (_dir, blog) = blog();
        assert!(write_listing(&blog, "tags", &mut Vec::new()).is_err());
    }
}
