//! Markdown/MDX rendering

use lazy_static::lazy_static;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

lazy_static! {
    /// Top-level MDX module statements (`import X from "y"`, `export const meta = ...`)
    static ref ESM_LINE: Regex = Regex::new(r"^(import|export)\s").unwrap();
    static ref CODE_FENCE: Regex = Regex::new(r"^\s{0,3}(```|~~~)").unwrap();
}

/// Markdown renderer for post bodies
pub struct MarkdownRenderer {
    autolink_headings: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            autolink_headings: true,
        }
    }

    /// Create with custom settings
    pub fn with_options(autolink_headings: bool) -> Self {
        Self { autolink_headings }
    }

    /// Render a Markdown or MDX body to HTML
    pub fn render(&self, markdown: &str) -> String {
        let source = strip_esm(markdown);

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(&source, options);

        let mut html_output = String::new();
        if self.autolink_headings {
            html::push_html(&mut html_output, autolink_h2(parser).into_iter());
        } else {
            html::push_html(&mut html_output, parser);
        }
        html_output
    }

    /// Count the words of a body, ignoring MDX module statements
    pub fn count_words(markdown: &str) -> usize {
        strip_esm(markdown).split_whitespace().count()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop top-level `import`/`export` statements, leaving code fences intact.
///
/// A statement runs until its brackets balance at the end of a line, or
/// until a blank line.
fn strip_esm(markdown: &str) -> String {
    let mut in_fence = false;
    let mut in_esm = false;
    let mut depth: i32 = 0;
    let mut out = String::with_capacity(markdown.len());

    for line in markdown.lines() {
        if in_esm {
            if line.trim().is_empty() {
                in_esm = false;
            } else {
                depth += bracket_balance(line);
                in_esm = depth > 0;
                continue;
            }
        } else if CODE_FENCE.is_match(line) {
            in_fence = !in_fence;
        } else if !in_fence && ESM_LINE.is_match(line) {
            depth = bracket_balance(line);
            in_esm = depth > 0;
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

fn bracket_balance(line: &str) -> i32 {
    line.chars().fold(0, |acc, c| match c {
        '{' | '(' | '[' => acc + 1,
        '}' | ')' | ']' => acc - 1,
        _ => acc,
    })
}

/// Opening `<h2>` tag, keeping `{#id .class key=value}` heading attributes
fn h2_open_tag(id: &str, classes: &[CowStr], attrs: &[(CowStr, Option<CowStr>)]) -> String {
    let mut tag = format!(r#"<h2 id="{}""#, html_escape(id));
    if !classes.is_empty() {
        let classes: Vec<&str> = classes.iter().map(|c| &**c).collect();
        tag.push_str(&format!(r#" class="{}""#, html_escape(&classes.join(" "))));
    }
    for (key, value) in attrs {
        match value {
            Some(value) => tag.push_str(&format!(r#" {}="{}""#, html_escape(key), html_escape(value))),
            None => tag.push_str(&format!(" {}", html_escape(key))),
        }
    }
    tag.push('>');
    tag
}

/// Heading attributes and buffered content of the h2 being rewritten
struct OpenHeading<'a> {
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
}

/// Give every h2 an id and a trailing anchor link
fn autolink_h2<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut heading: Option<OpenHeading<'a>> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                id,
                classes,
                attrs,
            }) => {
                heading = Some(OpenHeading {
                    id,
                    classes,
                    attrs,
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                let Some(open) = heading.take() else {
                    continue;
                };
                let text: String = open
                    .inner
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(t) | Event::Code(t) => Some(&**t),
                        _ => None,
                    })
                    .collect();
                let id = open
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| slug::slugify(&text));

                events.push(Event::Html(CowStr::from(h2_open_tag(
                    &id,
                    &open.classes,
                    &open.attrs,
                ))));
                events.extend(open.inner);
                events.push(Event::Html(CowStr::from(format!(
                    r##"<a class="anchor after" href="#{}" aria-hidden="true">#</a></h2>"##,
                    html_escape(&id)
                ))));
                events.push(Event::Html(CowStr::from("\n")));
            }
            other => match heading.as_mut() {
                Some(open) => open.inner.push(other),
                None => events.push(other),
            },
        }
    }

    events
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_h2_gets_anchor() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## The Virtual DOM\n\nText.");
        assert!(html.contains(r#"<h2 id="the-virtual-dom">The Virtual DOM"#));
        assert!(html.contains(r##"href="#the-virtual-dom""##));
        assert!(html.contains("<p>Text.</p>"));
    }

    #[test]
    fn test_anchor_can_be_disabled() {
        let renderer = MarkdownRenderer::with_options(false);
        let html = renderer.render("## Plain");
        assert!(html.contains("<h2>Plain</h2>"));
    }

    #[test]
    fn test_mdx_imports_are_stripped() {
        let renderer = MarkdownRenderer::new();
        let body = "import Chart from \"../components/Chart\"\nexport const meta = {}\n\nHello.\n";
        let html = renderer.render(body);
        assert!(!html.contains("import"));
        assert!(!html.contains("export"));
        assert!(html.contains("<p>Hello.</p>"));
    }

    #[test]
    fn test_multiline_import_is_stripped() {
        let renderer = MarkdownRenderer::new();
        let body = "import {\n  Chart,\n  Table\n} from \"../components\"\n\nHello.\n";
        let html = renderer.render(body);
        assert!(!html.contains("Chart"));
        assert!(!html.contains("Table"));
        assert!(!html.contains("components"));
        assert!(html.contains("<p>Hello.</p>"));
    }

    #[test]
    fn test_multiline_export_is_stripped() {
        let renderer = MarkdownRenderer::new();
        let body = "export const meta = {\n  title: \"x\",\n  tags: [\"a\", \"b\"]\n}\nHello.\n";
        let html = renderer.render(body);
        assert!(!html.contains("title"));
        assert!(!html.contains("tags"));
        assert!(html.contains("<p>Hello.</p>"));
        assert_eq!(MarkdownRenderer::count_words(body), 1);
    }

    #[test]
    fn test_h2_keeps_heading_attributes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Setup {.note data-x=1}\n\nText.");
        assert!(html.contains(r#"<h2 id="setup" class="note" data-x="1">Setup"#), "{html}");

        let html = renderer.render("## Setup {#custom .a .b}");
        assert!(html.contains(r#"<h2 id="custom" class="a b">"#), "{html}");
        assert!(html.contains(r##"href="#custom""##));
    }

    #[test]
    fn test_imports_inside_code_fence_are_kept() {
        let renderer = MarkdownRenderer::new();
        let body = "```js\nimport React from \"react\";\n```\n";
        let html = renderer.render(body);
        assert!(html.contains("import React from"));
    }

    #[test]
    fn test_count_words() {
        assert_eq!(MarkdownRenderer::count_words("import X from \"y\"\none two three"), 3);
    }
}
