//! Hyperlink extraction from HTML fragments.
//!
//! The scanner never fails. Markup it cannot make sense of is ignored, and
//! `href` values are reported as written apart from character references.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Target of one anchor element, as it appeared in the document.
pub type Link = String;

/// Regions whose content is not markup.
static RE_OPAQUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>").unwrap()
});

/// An `<a ...>` start tag; group 1 holds its attribute list.
///
/// Attributes may be separated by whitespace, slashes or nothing at all after
/// a quoted value, and the tag may close with any run of those before `>`.
static RE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<a(?:[\s/]((?:[\s/]*[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)[\s/]*)?>"#,
    )
    .unwrap()
});

/// One attribute: name, then a double-quoted, single-quoted or bare value.
static RE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
});

static RE_CHAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());

/// Returns the `href` of every anchor in `html`, in document order.
///
/// Duplicates are kept. Anchors without an `href` are skipped; an `href`
/// with no value yields an empty link.
pub fn extract_links(html: &str) -> Vec<Link> {
    let markup = RE_OPAQUE.replace_all(html, "");

    RE_ANCHOR
        .captures_iter(&markup)
        .filter_map(|anchor| anchor.get(1).and_then(|attrs| href_of(attrs.as_str())))
        .collect()
}

fn href_of(attributes: &str) -> Option<Link> {
    RE_ATTRIBUTE
        .captures_iter(attributes)
        .find(|attr| attr[1].eq_ignore_ascii_case("href"))
        .map(|attr| {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map_or("", |m| m.as_str());
            decode_char_refs(value)
        })
}

/// Decodes numeric and the common named character references.
/// Unknown references are left untouched.
fn decode_char_refs(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    RE_CHAR_REF
        .replace_all(value, |caps: &Captures| {
            let reference = &caps[1];
            let decoded = if let Some(hex) = reference
                .strip_prefix("#x")
                .or_else(|| reference.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = reference.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_char(reference)
            };

            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_char(name: &str) -> Option<char> {
    match name {
        "amp" | "AMP" => Some('&'),
        "lt" | "LT" => Some('<'),
        "gt" | "GT" => Some('>'),
        "quot" | "QUOT" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order_with_duplicates() {
        let html = r#"<p><a href="http://x.test">x</a> and <a href="http://y.test">y</a>
                      again <a href="http://x.test">x</a></p>"#;
        assert_eq!(
            extract_links(html),
            vec!["http://x.test", "http://y.test", "http://x.test"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">top</a><a id="x" href="/rel">rel</a>"#;
        assert_eq!(extract_links(html), vec!["/rel"]);
    }

    #[test]
    fn test_no_anchors() {
        assert!(extract_links("<p>Hello <b>world</b></p>").is_empty());
        assert!(extract_links("").is_empty());
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        assert!(extract_links("<a href=\"http://unterminated").is_empty());
        assert!(extract_links("<<<a>>> </a <div <a").is_empty());
        assert!(extract_links("<a href=").is_empty());
    }

    #[test]
    fn test_unclosed_anchor_still_counts() {
        let html = r#"<div><a href="http://open.test">never closed<div>"#;
        assert_eq!(extract_links(html), vec!["http://open.test"]);
    }

    #[test]
    fn test_quote_styles_and_case() {
        let html = r#"<A HREF='single.html'>1</A><a class=btn href=bare.html>2</a><a href = "spaced.html">3</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["single.html", "bare.html", "spaced.html"]
        );
    }

    #[test]
    fn test_values_passed_through_verbatim() {
        let html = r#"<a href="mailto:me@example.com">m</a><a href="not a url">n</a><a href="../up">u</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["mailto:me@example.com", "not a url", "../up"]
        );
    }

    #[test]
    fn test_char_refs_decoded() {
        let html = r#"<a href="http://x.test/?a=1&amp;b=2&#38;c=&#x33;&bogus;">q</a>"#;
        assert_eq!(extract_links(html), vec!["http://x.test/?a=1&b=2&c=3&bogus;"]);
    }

    #[test]
    fn test_gt_inside_quoted_attribute() {
        let html = r#"<a title="a > b" href="http://gt.test">x</a>"#;
        assert_eq!(extract_links(html), vec!["http://gt.test"]);
    }

    #[test]
    fn test_similar_tags_not_anchors() {
        let html = r#"<abbr href="no">x</abbr><area href="no"><link href="no.css">"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_comments_and_scripts_skipped() {
        let html = r#"<!-- <a href="commented">c</a> -->
            <script>document.write('<a href="scripted">s</a>')</script>
            <a href="real">r</a>"#;
        assert_eq!(extract_links(html), vec!["real"]);
    }

    #[test]
    fn test_empty_href() {
        assert_eq!(extract_links(r#"<a href="">e</a><a href>v</a>"#), vec!["", ""]);
    }

    #[test]
    fn test_attribute_without_separator() {
        let html = r#"<a class="btn"href="http://adj.test">x</a>"#;
        assert_eq!(extract_links(html), vec!["http://adj.test"]);
    }

    #[test]
    fn test_slashes_around_attributes() {
        assert_eq!(
            extract_links(r#"<a href="http://sp.test" / >x</a>"#),
            vec!["http://sp.test"]
        );
        assert_eq!(
            extract_links(r#"<a/href="http://slash.test">x</a><a href="http://self.test"/>"#),
            vec!["http://slash.test", "http://self.test"]
        );
    }

    #[test]
    fn test_first_href_wins() {
        assert_eq!(
            extract_links(r#"<a href="one" href="two">x</a>"#),
            vec!["one"]
        );
    }
}
