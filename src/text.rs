use regex::Regex;
use scraper::Html;

/// Extract plain text from an HTML fragment: strip tags, decode entities,
/// collapse whitespace. Plain input comes back with whitespace collapsed
/// but otherwise untouched.
pub fn sanitize(text: &str) -> String {
    let markup = Regex::new(r"<[^>]+>|&[#a-zA-Z0-9]+;").unwrap();
    if !markup.is_match(text) {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let document = Html::parse_fragment(text);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        if let Some(element) = node.value().as_element() {
            // Space after block elements to preserve word boundaries
            if matches!(element.name(), "p" | "br" | "div" | "li") {
                out.push(' ');
            }
            continue;
        }
        if let Some(text_node) = node.value().as_text() {
            let ignored = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .map(|element| matches!(element.name(), "script" | "style"))
                .unwrap_or(false);
            if !ignored {
                out.push_str(text_node);
            }
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_chars` characters, appending "..." when anything was
/// cut. Counts characters, not bytes, so multibyte input never splits.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
