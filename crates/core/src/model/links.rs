use percent_encoding::percent_decode_str;

/// Path prefix that marks an internal article link.
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Decides whether a clicked href is an in-game navigation.
///
/// Valid hrefs start with [`ARTICLE_PATH_PREFIX`] and contain no colon
/// anywhere; the colon marks namespace pages (categories, files, talk
/// pages) which are never game targets. Returns the percent-decoded
/// article title with the prefix stripped, or `None` when the click
/// should be ignored.
#[must_use]
pub fn link_target(href: &str) -> Option<String> {
    let rest = href.strip_prefix(ARTICLE_PATH_PREFIX)?;
    if rest.is_empty() || href.contains(':') {
        return None;
    }
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_article_links() {
        assert_eq!(link_target("/wiki/Paper"), Some("Paper".to_string()));
    }

    #[test]
    fn decodes_percent_encoded_titles() {
        // 紙 ("paper") as it appears in ja.wikipedia hrefs.
        assert_eq!(
            link_target("/wiki/%E7%B4%99"),
            Some("紙".to_string())
        );
    }

    #[test]
    fn rejects_namespace_links() {
        assert_eq!(link_target("/wiki/Category:Paper"), None);
        assert_eq!(link_target("/wiki/Help:Contents"), None);
        assert_eq!(link_target("/wiki/%E3%83%95%E3%82%A1%E3%82%A4%E3%83%AB:X.png"), None);
    }

    #[test]
    fn rejects_foreign_prefixes() {
        assert_eq!(link_target("https://example.com/wiki/Paper"), None);
        assert_eq!(link_target("/w/index.php?title=Paper"), None);
        assert_eq!(link_target("#cite_note-1"), None);
    }

    #[test]
    fn rejects_bare_prefix() {
        assert_eq!(link_target("/wiki/"), None);
    }

    #[test]
    fn rejects_invalid_percent_sequences() {
        assert_eq!(link_target("/wiki/%FF%FE"), None);
    }
}
