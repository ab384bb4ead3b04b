use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Flattens a status body's HTML into plain, newline-structured text.
///
/// Paragraph ends become a blank line (two consecutive newlines), `<br>`
/// becomes a single newline, every other tag is dropped and only its text
/// survives. Leading and trailing whitespace of the whole result is trimmed,
/// so the command grammars can anchor on individual lines.
///
/// The underlying parser is error-tolerant: malformed markup degrades to
/// whatever text can be recovered and never fails.
pub fn plain_text(html: &str) -> String {
    let doc: Html = Html::parse_fragment(html);
    let mut out: String = String::with_capacity(html.len());
    collect_text(doc.tree.root(), &mut out);
    out.trim().to_string()
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(element) => {
                if element.name() == "br" {
                    out.push('\n');
                }
                collect_text(child, out);
                if element.name() == "p" {
                    out.push_str("\n\n");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_blank_lines() {
        let text = plain_text("<p>first</p><p>second</p>");
        assert_eq!(text, "first\n\nsecond");
    }

    #[test]
    fn line_breaks_become_single_newlines() {
        let text = plain_text("<p>one<br>two<br />three</p>");
        assert_eq!(text, "one\ntwo\nthree");
    }

    #[test]
    fn inline_markup_is_stripped() {
        let text = plain_text("<p><span>#deleteit</span> <b>1h</b></p>");
        assert_eq!(text, "#deleteit 1h");
    }

    #[test]
    fn entities_are_decoded() {
        let text = plain_text("<p>a &amp; b</p>");
        assert_eq!(text, "a & b");
    }

    #[test]
    fn malformed_markup_degrades_to_text() {
        let text = plain_text("<p>#deleteit 1h</div><p>leftover");
        assert!(text.contains("#deleteit 1h"));
        assert!(text.contains("leftover"));
    }

    #[test]
    fn bare_text_passes_through() {
        assert_eq!(plain_text("  #deleteit 3-15  "), "#deleteit 3-15");
    }
}
