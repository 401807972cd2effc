//! HTML rendering of the single page.
//!
//! Steps are revealed as the session advances: step 2 once a page is
//! scraped, step 3 once a draft exists, step 4 once feedback was accepted.

use msight_session::{SessionSnapshot, SessionState};
use std::fmt::Write;

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: #f5f6fa;
            margin: 0;
            padding: 2rem;
        }
        .container { max-width: 860px; margin: 0 auto; }
        header { margin-bottom: 2rem; }
        h1 { color: #4f46e5; margin: 0; }
        .tagline { color: #6b7280; margin-top: 0.25rem; }
        .panel {
            background: white;
            border-radius: 0.75rem;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
            box-shadow: 0 4px 12px rgba(0,0,0,0.06);
        }
        .error {
            background: #fee2e2;
            color: #991b1b;
            border-radius: 0.5rem;
            padding: 1rem;
            margin-bottom: 1.5rem;
        }
        .assistant {
            background: #eef2ff;
            border-left: 4px solid #4f46e5;
            border-radius: 0.5rem;
            padding: 1rem;
            white-space: pre-wrap;
        }
        .muted { color: #6b7280; }
        input[type=text], textarea { width: 100%; padding: 0.5rem; margin-bottom: 0.75rem; }
        button { background: #4f46e5; color: white; border: 0; border-radius: 0.5rem; padding: 0.6rem 1.2rem; }
        .cancel button { background: #6b7280; }
"#;

/// Escape text for safe inclusion in HTML content and attribute values.
///
/// # Examples
///
/// ```
/// use msight_server::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the page for `snapshot`, with an optional error banner.
pub fn render(snapshot: &SessionSnapshot, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(message) = error {
        let _ = write!(
            body,
            r#"<div class="error" role="alert">{}</div>"#,
            escape_html(message)
        );
    }

    body.push_str(&url_step(snapshot));
    if snapshot.state >= SessionState::Scraped {
        body.push_str(&draft_step(snapshot));
    }
    if snapshot.state >= SessionState::Drafted {
        body.push_str(&feedback_step(snapshot));
    }
    if snapshot.state >= SessionState::FeedbackSubmitted {
        body.push_str(&video_step(snapshot));
    }
    body.push_str(
        r#"<form class="cancel" method="post" action="/cancel"><button type="submit">Cancel running step</button></form>"#,
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>M-Sight</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{STYLE}</style>
</head>
<body>
<div class="container">
<header>
    <h1>M-Sight</h1>
    <div class="tagline">AI Creator in your Pocket!</div>
</header>
{body}
</div>
</body>
</html>
"#
    )
}

fn url_step(snapshot: &SessionSnapshot) -> String {
    let url = snapshot.url.as_deref().unwrap_or_default();
    let mut html = format!(
        r#"<section class="panel" id="step-1">
<h2>1. Enter a website URL</h2>
<form method="post" action="/scrape">
<input type="text" name="url" placeholder="https://example.com" value="{}">
<button type="submit">Load Website Data</button>
</form>
"#,
        escape_html(url)
    );

    if let Some(content) = &snapshot.content {
        html.push_str("<h3>Titles</h3>\n");
        html.push_str(&list(content.titles()));
        html.push_str("<h3>Paragraphs</h3>\n");
        html.push_str(&list(content.paragraphs()));
    }
    html.push_str("</section>\n");
    html
}

fn draft_step(snapshot: &SessionSnapshot) -> String {
    let mut html = String::from(
        r#"<section class="panel" id="step-2">
<h2>2. Generate a draft prompt</h2>
<form method="post" action="/draft">
<button type="submit">Generate Draft Prompt</button>
</form>
"#,
    );
    if let Some(draft) = &snapshot.draft_text {
        html.push_str(&assistant(draft));
    }
    if let Some(gaps) = &snapshot.gaps_text {
        let _ = write!(
            html,
            "<details><summary>Content gaps</summary>{}</details>\n",
            assistant(gaps)
        );
    }
    html.push_str("</section>\n");
    html
}

fn feedback_step(snapshot: &SessionSnapshot) -> String {
    let feedback = snapshot.feedback.as_deref().unwrap_or_default();
    let mut html = format!(
        r#"<section class="panel" id="step-3">
<h2>3. Refine with feedback</h2>
<form method="post" action="/feedback">
<textarea name="feedback" rows="4" placeholder="What should change?">{}</textarea>
<button type="submit">Submit Feedback</button>
</form>
"#,
        escape_html(feedback)
    );
    if let Some(refined) = &snapshot.refined_text {
        html.push_str(&assistant(refined));
    }
    html.push_str("</section>\n");
    html
}

fn video_step(snapshot: &SessionSnapshot) -> String {
    let mut html = String::from(
        r#"<section class="panel" id="step-4">
<h2>4. Generate the video</h2>
<form method="post" action="/video">
<button type="submit">Generate Video</button>
</form>
"#,
    );
    if let Some(video) = &snapshot.video {
        let _ = write!(
            html,
            "<p class=\"muted\">{}</p>\n",
            escape_html(&video.to_string())
        );
    }
    html.push_str("</section>\n");
    html
}

fn assistant(text: &str) -> String {
    format!("<div class=\"assistant\">{}</div>\n", escape_html(text))
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        return "<p class=\"muted\">None found.</p>\n".to_string();
    }
    let mut html = String::from("<ul>\n");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>\n");
    html
}
