//! Pixiv novel markup to HTML.
//!
//! Novel bodies are plain text with a handful of bracket tags. Everything
//! outside a recognized tag is HTML-escaped and line breaks become `<br>`.

use htmlescape::encode_minimal;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\[newpage\]",
        r"|\[chapter:(?P<chapter>[^\]]*)\]",
        r"|\[\[rb:(?P<rb_base>[^>\]]*)>(?P<rb_ruby>[^\]]*)\]\]",
        r"|\[\[jumpuri:(?P<uri_text>[^>\]]*)>(?P<uri>[^\]]*)\]\]",
        r"|\[jump:(?P<jump>\d+)\]",
        r"|\[pixivimage:(?P<image>\d+)(?:-\d+)?\]",
    ))
    .expect("novel markup pattern is valid")
});

/// Converts a novel body to HTML.
pub fn novel_text_to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + text.len() / 4);
    let mut last = 0;

    for caps in MARKUP.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut html, &text[last..whole.start()]);
        push_tag(&mut html, &caps);
        last = whole.end();
    }
    push_text(&mut html, &text[last..]);

    html
}

fn push_tag(html: &mut String, caps: &Captures<'_>) {
    if let Some(title) = caps.name("chapter") {
        html.push_str("<h2>");
        html.push_str(&encode_minimal(title.as_str().trim()));
        html.push_str("</h2>");
    } else if let (Some(base), Some(ruby)) = (caps.name("rb_base"), caps.name("rb_ruby")) {
        html.push_str("<ruby>");
        html.push_str(&encode_minimal(base.as_str().trim()));
        html.push_str("<rp>(</rp><rt>");
        html.push_str(&encode_minimal(ruby.as_str().trim()));
        html.push_str("</rt><rp>)</rp></ruby>");
    } else if let (Some(label), Some(uri)) = (caps.name("uri_text"), caps.name("uri")) {
        let label = encode_minimal(label.as_str().trim());
        let uri = uri.as_str().trim();
        if uri.starts_with("https://") || uri.starts_with("http://") {
            html.push_str(&format!("<a href=\"{}\">{}</a>", encode_minimal(uri), label));
        } else {
            html.push_str(&label);
        }
    } else if let Some(page) = caps.name("jump") {
        html.push_str(&format!("[Jump to page {}]", page.as_str()));
    } else if let Some(id) = caps.name("image") {
        html.push_str(&format!(
            "<img src=\"https://embed.pixiv.net/artwork.php?illust_id={id}\" alt=\"illust {id}\">",
            id = id.as_str()
        ));
    } else {
        html.push_str("<hr>");
    }
}

fn push_text(html: &mut String, text: &str) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        html.push_str(&encode_minimal(first.trim_end_matches('\r')));
    }
    for line in lines {
        html.push_str("<br>");
        html.push_str(&encode_minimal(line.trim_end_matches('\r')));
    }
}
