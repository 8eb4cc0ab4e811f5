//! Markdown → HTML rendering and the standalone document template

use pulldown_cmark::{html, Event, Options, Parser, Tag};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

fn render<'a>(markdown: &str, events: impl Iterator<Item = Event<'a>>) -> String {
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, events);
    body
}

/// Convert markdown to an HTML fragment; raw HTML in the markdown passes through
pub fn markdown_to_html(markdown: &str) -> String {
    render(markdown, Parser::new_ext(markdown, options()))
}

/// Convert markdown to an HTML fragment safe to embed in a live page
///
/// Raw HTML is shown as text and `javascript:` link targets are dropped.
pub fn markdown_to_safe_html(markdown: &str) -> String {
    let events = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: "#".into(),
            title,
            id,
        }),
        other => other,
    });
    render(markdown, events)
}

fn is_script_url(url: &str) -> bool {
    url.trim_start()
        .get(..11)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

/// Escape text for use inside HTML elements and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: "Georgia", serif; line-height: 1.7; background: #f5f5f5; color: #333; padding: 0 20px; }
a { color: #1a73e8; text-decoration: none; }
a:hover { text-decoration: underline; }
.container { max-width: 800px; margin: 50px auto; background: #fff; padding: 50px; box-shadow: 0 8px 24px rgba(0,0,0,0.1); border-radius: 8px; }
h1 { font-size: 2.5em; margin-bottom: 20px; font-weight: bold; line-height: 1.2; }
h2, h3 { margin-top: 30px; margin-bottom: 15px; font-weight: bold; color: #222; }
p { margin-bottom: 20px; }
ul { margin-bottom: 20px; padding-left: 20px; }
li { margin-bottom: 10px; }
blockquote { border-left: 4px solid #1a73e8; padding-left: 15px; color: #555; font-style: italic; margin: 20px 0; }
code { background: #f4f4f4; padding: 2px 6px; border-radius: 4px; font-family: monospace; }
img { max-width: 100%; margin: 20px 0; border-radius: 6px; }
.footer { margin-top: 50px; padding-top: 20px; border-top: 1px solid #ddd; text-align: center; color: #777; font-size: 0.9em; }
@media (max-width: 600px) { h1 { font-size: 2em; } h2 { font-size: 1.5em; } }"#;

/// Shared stylesheet, also used by the web UI
pub fn stylesheet() -> &'static str {
    STYLE
}

/// Wrap an HTML body in the styled document shell
///
/// The body is inserted verbatim between the `container` opening tag and
/// the footer; only the title is escaped.
pub fn render_document(title: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<div class="container">
{body}
<div class="footer">&copy; Crafted with AI</div>
</div>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body_html,
    )
}
