//! Content module - posts, front-matter, Markdown rendering and loading

mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use frontmatter::{FrontMatter, ReadingTime};
pub use item::ContentItem;
pub use loader::{ContentSource, FsContentSource};
pub use markdown::MarkdownRenderer;
