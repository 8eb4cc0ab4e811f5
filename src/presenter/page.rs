//! HTML pages for the web UI

use crate::output::html::{escape_html, markdown_to_safe_html, stylesheet};
use crate::presenter::{
    image::ImageOutcome,
    options::{Language, Tone},
    session::{BlogRequest, Presentation},
};
use std::fmt::Write;

const TITLE: &str = "📝 Multi-Agent AI Blog Generator";

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Multi-Agent AI Blog Generator</title>
<style>
{style}
form label {{ display: block; margin: 15px 0 5px; font-weight: bold; }}
form input, form select {{ width: 100%; padding: 8px; font-size: 1em; }}
form button {{ margin-top: 20px; padding: 10px 20px; font-size: 1em; cursor: pointer; }}
.warning {{ background: #fff4e5; border-left: 4px solid #f0a020; padding: 10px 15px; margin: 20px 0; }}
.error {{ background: #fdecea; border-left: 4px solid #d93025; padding: 10px 15px; margin: 20px 0; }}
.caption {{ text-align: center; color: #777; font-size: 0.9em; }}
</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<p>Autonomously generate blogs with AI agents.</p>
{body}
</div>
</body>
</html>
"#,
        style = stylesheet(),
        title = TITLE,
        body = body,
    )
}

fn select<T: Copy + PartialEq + std::fmt::Display>(name: &str, options: &[T], selected: T) -> String {
    let mut html = format!(r#"<select id="{name}" name="{name}">"#);
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{option}"{marker}>{option}</option>"#);
    }
    html.push_str("</select>");
    html
}

fn form(request: &BlogRequest) -> String {
    format!(
        r#"<form method="post" action="/generate">
<label for="topic">Enter a blog topic:</label>
<input id="topic" name="topic" type="text" value="{topic}">
<label for="tone">Choose a writing tone:</label>
{tone}
<label for="language">Choose language:</label>
{language}
<button type="submit">Generate Blog</button>
</form>"#,
        topic = escape_html(&request.topic),
        tone = select("tone", &Tone::ALL, request.tone),
        language = select("language", &Language::ALL, request.language),
    )
}

/// Landing page with the input form
pub fn render_form(request: &BlogRequest) -> String {
    layout(&form(request))
}

/// Form plus the generated blog and the image (or a warning)
pub fn render_presentation(request: &BlogRequest, presentation: &Presentation) -> String {
    let mut body = form(request);

    body.push_str("\n<h2>✅ Generated Blog</h2>\n");
    body.push_str(&markdown_to_safe_html(&presentation.markdown));

    body.push_str("\n<h2>🖼 Suggested Image</h2>\n");
    match &presentation.image {
        ImageOutcome::Found { url } => {
            let caption = escape_html(&format!("Image related to {}", presentation.topic));
            let _ = write!(
                body,
                r#"<img src="{}" alt="{caption}">
<p class="caption">{caption}</p>"#,
                escape_html(url),
            );
        }
        ImageOutcome::NotFound | ImageOutcome::Failed { .. } => {
            let _ = write!(
                body,
                r#"<div class="warning">{}</div>"#,
                escape_html(&presentation.image_warning().unwrap_or_default())
            );
        }
    }

    layout(&body)
}

/// Form plus an error message
pub fn render_error(request: &BlogRequest, message: &str) -> String {
    let body = format!(
        r#"{}
<div class="error">{}</div>"#,
        form(request),
        escape_html(message)
    );
    layout(&body)
}
