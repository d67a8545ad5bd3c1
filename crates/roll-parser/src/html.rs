//! Label lookup in HTML pages.
//!
//! Student registration pages show the RA as a pair of sibling labels:
//!
//! ```html
//! <label>Número da RA:</label>
//! <label>99887-6 - João</label>
//! ```
//!
//! The document is parsed with the ast-grep HTML grammar. The first `label`
//! whose text, trimmed, equals the marker is located in document order; its
//! next sibling element is used only if that element is also a `label`.

use ast_grep_core::Node;
use ast_grep_language::{LanguageExt, SupportLang};

/// Node kinds that are elements for sibling navigation.
const ELEMENT_KINDS: &[&str] = &["element", "script_element", "style_element"];

/// Text of the `label` immediately following the marker `label`.
///
/// Entities are decoded; whitespace is preserved.
#[must_use]
pub fn find_label_after(source: &str, marker: &str) -> Option<String> {
    let root = SupportLang::Html.ast_grep(source);
    let root_node = root.root();
    let marker = marker.trim();

    let marker_label = find_marker_label(&root_node, marker)?;
    let next = marker_label
        .next_all()
        .find(|n| ELEMENT_KINDS.contains(&n.kind().as_ref()))?;
    if !tag_name(&next).is_some_and(|t| t.eq_ignore_ascii_case("label")) {
        return None;
    }
    Some(element_text(&next))
}

/// RA shown after `marker`: the trimmed text before the first `-`.
#[must_use]
pub fn extract_ra(source: &str, marker: &str) -> Option<String> {
    let text = find_label_after(source, marker)?;
    let ra = text.split('-').next().unwrap_or_default().trim();
    Some(ra.to_string())
}

/// Pre-order walk, so the first hit is the first marker label in the document.
fn find_marker_label<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    marker: &str,
) -> Option<Node<'r, D>> {
    if node.kind().as_ref() == "element"
        && tag_name(node).is_some_and(|t| t.eq_ignore_ascii_case("label"))
        && element_text(node).trim() == marker
    {
        return Some(node.clone());
    }

    let children: Vec<_> = node.children().collect();
    children
        .iter()
        .find_map(|child| find_marker_label(child, marker))
}

fn tag_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    node.children()
        .find(|c| matches!(c.kind().as_ref(), "start_tag" | "self_closing_tag"))?
        .children()
        .find(|c| c.kind().as_ref() == "tag_name")
        .map(|t| t.text().to_string())
}

/// Concatenated text content: inner source with tags and comments removed.
fn element_text<D: ast_grep_core::Doc>(node: &Node<D>) -> String {
    let outer = node.text();
    let base = node.range().start;

    let mut start = None;
    let mut end = None;
    for child in node.children() {
        match child.kind().as_ref() {
            "start_tag" => start = Some(child.range().end - base),
            "end_tag" => end = Some(child.range().start - base),
            _ => {}
        }
    }
    let Some(start) = start else {
        return String::new();
    };
    let end = end.unwrap_or(outer.len());
    let inner = outer.get(start..end).unwrap_or_default();

    decode_entities(&strip_markup(inner))
}

fn strip_markup(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let close = if tail.starts_with("<!--") {
            tail.find("-->").map(|i| i + 3)
        } else {
            tail.find('>').map(|i| i + 1)
        };
        match close {
            Some(skip) => rest = &tail[skip..],
            None => {
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode numeric references and the named entities Portuguese pages use.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "aacute" => 'á',
        "Aacute" => 'Á',
        "acirc" => 'â',
        "Acirc" => 'Â',
        "atilde" => 'ã',
        "Atilde" => 'Ã',
        "agrave" => 'à',
        "Agrave" => 'À',
        "eacute" => 'é',
        "Eacute" => 'É',
        "ecirc" => 'ê',
        "Ecirc" => 'Ê',
        "iacute" => 'í',
        "Iacute" => 'Í',
        "oacute" => 'ó',
        "Oacute" => 'Ó',
        "ocirc" => 'ô',
        "Ocirc" => 'Ô',
        "otilde" => 'õ',
        "Otilde" => 'Õ',
        "uacute" => 'ú',
        "Uacute" => 'Ú',
        "uuml" => 'ü',
        "ccedil" => 'ç',
        "Ccedil" => 'Ç',
        "ordm" => 'º',
        "ordf" => 'ª',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const MARKER: &str = "Número da RA:";

    #[test]
    fn reads_ra_from_sibling_label() {
        let html = "<label>Número da RA:</label><label>99887-6 - João</label>";
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("99887"));
    }

    #[test]
    fn missing_marker_finds_nothing() {
        let html = "<div><label>Nome:</label><label>João</label></div>";
        assert_eq!(extract_ra(html, MARKER), None);
    }

    #[test]
    fn marker_without_following_label_finds_nothing() {
        let html = "<div><label>Número da RA:</label><span>99887-6</span></div>";
        assert_eq!(extract_ra(html, MARKER), None);

        let html = "<div><label>Número da RA:</label></div><label>99887-6</label>";
        assert_eq!(extract_ra(html, MARKER), None);
    }

    #[test]
    fn nested_page_with_whitespace() {
        let html = r#"<!DOCTYPE html>
<html>
  <body>
    <form id="aluno">
      <div class="row">
        <label for="nome">Nome:</label>
        <label>Maria</label>
      </div>
      <div class="row">
        <label class="title">
          Número da RA:
        </label>
        <!-- valor -->
        <label class="value">  000123456-7 / SP </label>
      </div>
    </form>
  </body>
</html>"#;
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("000123456"));
    }

    #[test]
    fn entities_in_marker_are_decoded() {
        let html = "<label>N&uacute;mero da RA:</label><label>4455-1</label>";
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("4455"));

        let html = "<label>N&#250;mero da RA:</label><label>4455</label>";
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("4455"));
    }

    #[test]
    fn first_marker_wins() {
        let html = "<label>Número da RA:</label><label>111-1</label>\
                    <label>Número da RA:</label><label>222-2</label>";
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("111"));
    }

    #[test]
    fn inline_markup_inside_label_is_text() {
        let html = "<label>Número da RA:</label><label><b>777</b>-0</label>";
        assert_eq!(find_label_after(html, MARKER).as_deref(), Some("777-0"));
        assert_eq!(extract_ra(html, MARKER).as_deref(), Some("777"));
    }

    #[test]
    fn custom_marker() {
        let html = "<label>Matrícula</label><label>A-1</label>";
        assert_eq!(extract_ra(html, "Matrícula").as_deref(), Some("A"));
    }

    #[rstest]
    #[case("a &amp; b", "a & b")]
    #[case("&lt;x&gt;", "<x>")]
    #[case("S&atilde;o Jo&atilde;o", "São João")]
    #[case("&#x41;&#66;", "AB")]
    #[case("5 & 6", "5 & 6")]
    #[case("&unknown;", "&unknown;")]
    fn entities(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(input), expected);
    }

    #[test]
    fn comments_and_tags_are_stripped() {
        assert_eq!(strip_markup("a<!-- b -->c<i>d</i>"), "acd");
    }
}
