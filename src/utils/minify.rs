//! XML minification.
//!
//! Sitemaps are indented for readability by default; `[sitemap] minify = true`
//! strips the whitespace between tags before publishing.

use std::borrow::Cow;

/// Minify XML content if enabled.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify(xml: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        Cow::Owned(minify_xml_inner(xml))
    } else {
        Cow::Borrowed(xml)
    }
}

/// Minify XML by dropping whitespace that only separates markup.
///
/// A whitespace run is dropped when it sits between `>` (or the start) and
/// `<` (or the end). Runs touching text content are kept verbatim.
fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(xml.len());
    let mut i = 0;

    while i < xml.len() {
        if !xml[i].is_ascii_whitespace() {
            out.push(xml[i]);
            i += 1;
            continue;
        }

        let end = xml[i..]
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map_or(xml.len(), |n| i + n);
        let after_markup = matches!(out.last(), None | Some(b'>'));
        let before_markup = matches!(xml.get(end), None | Some(b'<'));
        if !(after_markup && before_markup) {
            out.extend_from_slice(&xml[i..end]);
        }
        i = end;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_xml_basic() {
        let xml = br#"<?xml version="1.0"?>
<root>
  <item>Hello</item>
</root>"#;
        let result = minify(xml, true);

        assert_eq!(
            &*result,
            br#"<?xml version="1.0"?><root><item>Hello</item></root>"#
        );
    }

    #[test]
    fn test_minify_xml_removes_indentation() {
        let xml = b"  <tag>  content  </tag>  ";
        let result = minify(xml, true);

        assert_eq!(&*result, b"<tag>  content  </tag>");
    }

    #[test]
    fn test_minify_xml_removes_empty_lines() {
        let xml = b"<root>\n\n  <item/>\n\n</root>";
        let result = minify(xml, true);

        assert_eq!(&*result, b"<root><item/></root>");
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let xml = b"<root>\n  <item/>\n</root>";
        let result = minify(xml, false);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, xml.as_slice());
    }

    #[test]
    fn test_minify_xml_sitemap_like() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url>
    <loc>https://example.com/en</loc>
    <lastmod>2025-01-01T00:00:00+00:00</lastmod>
    <xhtml:link rel="alternate" hreflang="fr" href="https://example.com/fr"/>
  </url>
</urlset>"#;
        let result = minify(xml, true);
        let result_str = String::from_utf8_lossy(&result);

        assert!(!result_str.contains('\n'));
        assert!(!result_str.contains("  "));
        assert!(result_str.contains("<loc>https://example.com/en</loc>"));
        assert!(result_str.contains(r#"hreflang="fr" href="https://example.com/fr"/>"#));
    }

    #[test]
    fn test_minify_xml_keeps_text_newlines() {
        let xml = b"<image:image>\n  <image:title>Hello\nWorld</image:title>\n</image:image>";
        let result = minify(xml, true);

        assert_eq!(
            &*result,
            b"<image:image><image:title>Hello\nWorld</image:title></image:image>".as_slice()
        );
    }
}
