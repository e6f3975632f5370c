//! Initialize a new blog

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Blog configuration

# Site
title: JS & React Blog
site_url: http://example.com
author: John Doe
description: ''
language: en

# Directory
source_dir: posts
public_dir: public

# Content
content_extensions: [md, mdx, markdown]
words_per_minute: 200
autolink_headings: true

# Date format (chrono) used when displaying post dates
date_format: '%B %-d, %Y'
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A blog already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let first_post = format!(
        r#"---
title: My First Ever Post!!!
slug: my-first-post
date: {}
spoiler: Welcome to the blog
---

Welcome! This post lives in `posts/my-first-post.mdx`.

## Writing posts

Create a new one with:

```bash
$ everyday-blog new "My New Post"
```

## Building

```bash
$ everyday-blog generate
```
"#,
        today
    );

    fs::write(target_dir.join("posts/my-first-post.mdx"), first_post)?;

    Ok(())
}
