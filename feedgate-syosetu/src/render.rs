//! HTML description for a search hit.

use htmlescape::encode_minimal;

use crate::client::Novel;
use crate::genre::{genre_name, nocgenre_name};

pub(crate) fn render_description(novel: &Novel) -> String {
    let mut html = String::new();

    html.push_str("<p>");
    html.push_str(&multiline(&novel.story));
    html.push_str("</p>");

    html.push_str("<ul>");
    if let Some(genre) = genre_label(novel) {
        push_row(&mut html, "Genre", &encode_minimal(&genre));
    }
    push_row(&mut html, "Type", status_label(novel));
    if novel.novel_type != 2 {
        push_row(&mut html, "Episodes", &novel.general_all_no.to_string());
    }
    push_row(&mut html, "Length", &format!("{} characters", novel.length));
    if let Some(last) = &novel.general_lastup {
        push_row(&mut html, "Last updated", &encode_minimal(last));
    }
    if !novel.keyword.trim().is_empty() {
        push_row(&mut html, "Keywords", &encode_minimal(novel.keyword.trim()));
    }
    html.push_str("</ul>");

    html
}

fn push_row(html: &mut String, label: &str, value: &str) {
    html.push_str("<li><b>");
    html.push_str(label);
    html.push_str(":</b> ");
    html.push_str(value);
    html.push_str("</li>");
}

fn multiline(text: &str) -> String {
    text.lines().map(encode_minimal).collect::<Vec<_>>().join("<br>")
}

fn genre_label(novel: &Novel) -> Option<String> {
    if let Some(code) = novel.nocgenre {
        return Some(nocgenre_name(code).map(str::to_string).unwrap_or_else(|| code.to_string()));
    }
    novel
        .genre
        .map(|code| genre_name(code).map(str::to_string).unwrap_or_else(|| code.to_string()))
}

fn status_label(novel: &Novel) -> &'static str {
    match (novel.novel_type, novel.end) {
        (2, _) => "Short story",
        (_, 0) => "Completed serial",
        _ => "Ongoing serial",
    }
}
