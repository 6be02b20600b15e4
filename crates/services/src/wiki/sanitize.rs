use std::collections::{HashMap, HashSet};

/// Strips scripts and other active content from article HTML.
///
/// Article markup comes from an uncontrolled external source, so this
/// runs on every fetched payload before it is considered renderable.
/// Encyclopedic structure (headings, tables, lists, anchors, images)
/// survives; anchors keep `href` so the link filter can see navigation
/// targets, images keep `src`/`alt`, and `class`/`id` survive for
/// styling hooks.
#[must_use]
pub fn sanitize_article_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "hr", "em", "strong", "b", "i", "u", "s", "small", "sup",
        "sub", "code", "pre", "blockquote", "ul", "ol", "li", "dl", "dt", "dd", "table",
        "caption", "thead", "tbody", "tfoot", "tr", "th", "td", "h1", "h2", "h3", "h4", "h5",
        "h6", "a", "img", "abbr", "cite", "q", "figure", "figcaption",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href", "title"].into_iter().collect());
    attributes.insert("img", ["src", "alt", "width", "height"].into_iter().collect());
    attributes.insert("th", ["colspan", "rowspan"].into_iter().collect());
    attributes.insert("td", ["colspan", "rowspan"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .generic_attributes(["class", "id"].into_iter().collect())
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_stripped() {
        let html = r#"<p>Paper</p><script>alert(1)</script>"#;
        let clean = sanitize_article_html(html);
        assert!(clean.contains("<p>Paper</p>"));
        assert!(!clean.contains("script"));
        assert!(!clean.contains("alert"));
    }

    #[test]
    fn event_handlers_are_stripped() {
        let html = r#"<a href="/wiki/Paper" onclick="steal()">Paper</a>"#;
        let clean = sanitize_article_html(html);
        assert!(clean.contains(r#"href="/wiki/Paper""#));
        assert!(!clean.contains("onclick"));
    }

    #[test]
    fn internal_links_survive_with_href() {
        let html = r#"<a href="/wiki/%E7%B4%99" title="紙">紙</a>"#;
        let clean = sanitize_article_html(html);
        assert!(clean.contains(r#"href="/wiki/%E7%B4%99""#));
    }

    #[test]
    fn images_keep_source_but_lose_handlers() {
        // Wikipedia serves thumbnails from protocol-relative URLs.
        let html = r#"<img src="//upload.wikimedia.org/a/denim.jpg" alt="denim" onerror="x()">"#;
        let clean = sanitize_article_html(html);
        assert!(clean.contains(r#"src="//upload.wikimedia.org/a/denim.jpg""#));
        assert!(clean.contains(r#"alt="denim""#));
        assert!(!clean.contains("onerror"));
    }

    #[test]
    fn tables_and_headings_survive() {
        let html = "<h2>History</h2><table><tr><td>cell</td></tr></table>";
        let clean = sanitize_article_html(html);
        assert!(clean.contains("<h2>History</h2>"));
        assert!(clean.contains("<td>cell</td>"));
    }
}
