//! Generate static files

use anyhow::{Context, Result};
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::{BuildReport, Generator};
use crate::Blog;

/// Build the whole site. Any content error aborts the build before output.
pub fn run(blog: &Blog) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    let inventory = blog.inventory()?;
    tracing::info!("Loaded {} posts", inventory.len());

    let generator = Generator::new(blog)?;
    let report = generator.generate(&inventory)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} routes and {} pages in {:.2}s",
        report.routes,
        report.pages,
        duration.as_secs_f64()
    );

    Ok(report)
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if blog.source_dir.exists() {
        watcher
            .watch(&blog.source_dir, notify::RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {:?}", blog.source_dir))?;
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // The config may have changed too
                    let result = Blog::new(&blog.base_dir)
                        .map_err(anyhow::Error::from)
                        .and_then(|blog| run(&blog));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_duplicate_slug_aborts_build() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("one.md"), "---\nslug: x\ndate: 2020-06-06\n---\n").unwrap();
        fs::write(posts.join("two.md"), "---\nslug: x\ndate: 2020-07-10\n---\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let err = run(&blog).unwrap_err();

        assert!(err.to_string().contains("Duplicate slug `x`"));
        assert!(!blog.public_dir.exists());
    }

    #[test]
    fn test_missing_slug_aborts_build() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("orphan.md"), "---\ntitle: Orphan\ndate: 2020-06-06\n---\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let err = run(&blog).unwrap_err();

        assert!(err.to_string().contains("has no slug"));
        assert!(!blog.public_dir.exists());
    }

    #[test]
    fn test_run_reports_routes() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("a.md"), "---\nslug: a\ndate: 2020-06-06\n---\nHi\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let report = run(&blog).unwrap();

        assert_eq!(report.routes, 1);
        assert!(blog.public_dir.join("articles/a/index.html").exists());
    }
}
