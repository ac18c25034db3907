//! Markdown to HTML renderer.

use std::collections::HashMap;
use std::fmt::Write;

use fieldnotes_pages::TocEntry;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::links::resolve_link;

/// Result of rendering a markdown note body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 heading (if enabled).
    pub title: Option<String>,
    /// Table of contents entries (headings level 2-6).
    pub toc: Vec<TocEntry>,
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Derive an anchor id from heading text.
fn slugify(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            id.extend(ch.to_lowercase());
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !id.ends_with('-') {
            id.push('-');
        }
    }
    let id = id.trim_matches('-');
    if id.is_empty() { "section".to_owned() } else { id.to_owned() }
}

/// Heading being captured between start and end events.
struct HeadingCapture {
    level: u8,
    text: String,
    html: String,
}

/// Code block being captured.
struct CodeCapture {
    lang: Option<String>,
    content: String,
}

/// Markdown renderer with heading anchors and link resolution.
///
/// GFM tables, strikethrough and task lists are always enabled. A renderer
/// is created per page; it is not reusable across documents because anchor
/// id deduplication is per-render state.
pub struct MarkdownRenderer {
    output: String,
    base_path: Option<String>,
    extract_title: bool,
    title: Option<String>,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
    heading: Option<HeadingCapture>,
    code: Option<CodeCapture>,
    image_alt: Option<String>,
    pending_image: Option<String>,
    in_table_head: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            base_path: None,
            extract_title: false,
            title: None,
            toc: Vec::new(),
            id_counts: HashMap::new(),
            heading: None,
            code: None,
            image_alt: None,
            pending_image: None,
            in_table_head: false,
        }
    }

    /// Extract the page title from the first H1 heading.
    ///
    /// The H1 is still rendered into the body.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Set the base path for resolving relative links.
    ///
    /// The base is the URL path of the directory the page lives in,
    /// without leading slash (empty for root-level pages).
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Render a markdown document.
    pub fn render(&mut self, markdown: &str) -> RenderResult {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        for event in Parser::new_ext(markdown, options) {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.title.take(),
            toc: std::mem::take(&mut self.toc),
        }
    }

    /// Push inline content to the active heading buffer or the output.
    fn push(&mut self, content: &str) {
        match &mut self.heading {
            Some(heading) => heading.html.push_str(content),
            None => self.output.push_str(content),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let inline = format!("<code>{}</code>", escape_html(&code));
                if let Some(heading) = &mut self.heading {
                    heading.text.push_str(&code);
                }
                self.push(&inline);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.push("\n"),
            Event::HardBreak => self.push("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                self.heading = Some(HeadingCapture {
                    level: *level as u8,
                    text: String::new(),
                    html: String::new(),
                });
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => {
                        info.split_whitespace().next().map(ToOwned::to_owned)
                    }
                    _ => None,
                };
                self.code = Some(CodeCapture {
                    lang,
                    content: String::new(),
                });
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(_) => self.output.push_str("<table>"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => self.output.push_str("<tr>"),
            Tag::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.push("<em>"),
            Tag::Strong => self.push("<strong>"),
            Tag::Strikethrough => self.push("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = resolve_link(dest_url, self.base_path.as_deref());
                let link = format!(r#"<a href="{}">"#, escape_html(&href));
                self.push(&link);
            }
            Tag::Image { dest_url, .. } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some(dest_url.to_string());
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => self.end_heading(),
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    match code.lang {
                        Some(lang) => write!(
                            self.output,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&code.content)
                        )
                        .unwrap(),
                        None => write!(
                            self.output,
                            "<pre><code>{}</code></pre>",
                            escape_html(&code.content)
                        )
                        .unwrap(),
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.push("</em>"),
            TagEnd::Strong => self.push("</strong>"),
            TagEnd::Strikethrough => self.push("</s>"),
            TagEnd::Link => self.push("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some(src) = self.pending_image.take() {
                    write!(
                        self.output,
                        r#"<img src="{}" alt="{}">"#,
                        escape_html(&src),
                        escape_html(&alt)
                    )
                    .unwrap();
                }
            }
            _ => {}
        }
    }

    fn end_heading(&mut self) {
        let Some(heading) = self.heading.take() else {
            return;
        };

        let id = self.unique_id(&slugify(&heading.text));
        write!(
            self.output,
            r#"<h{level} id="{id}">{html}</h{level}>"#,
            level = heading.level,
            html = heading.html.trim()
        )
        .unwrap();

        if heading.level == 1 {
            if self.extract_title && self.title.is_none() {
                self.title = Some(heading.text.trim().to_owned());
            }
        } else {
            self.toc.push(TocEntry {
                level: heading.level,
                title: heading.text.trim().to_owned(),
                id,
            });
        }
    }

    /// Deduplicate anchor ids: `faq`, `faq-1`, `faq-2`.
    fn unique_id(&mut self, id: &str) -> String {
        let count = self.id_counts.entry(id.to_owned()).or_insert(0);
        let unique = if *count == 0 {
            id.to_owned()
        } else {
            format!("{id}-{count}")
        };
        *count += 1;
        unique
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(text);
        } else if let Some(alt) = &mut self.image_alt {
            alt.push_str(text);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
