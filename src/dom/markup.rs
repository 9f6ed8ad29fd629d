//! HTML fragment parsing and serialization.
//!
//! The parser is deliberately forgiving: stray `<` is text, unknown end tags
//! are dropped, and elements left open are closed at the end of the fragment.
//! Elements keep their start tag verbatim so serialization reproduces parsed
//! markup exactly, apart from text escaping.

use logos::{Lexer, Logos};

use super::node::{NodeData, NodeId, NodeKind};
use super::tree::Dom;

/// Markup token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum MarkupToken {
    /// `<!-- ... -->`, running to end of input if unterminated.
    #[token("<!--", lex_comment)]
    Comment,

    /// `<!DOCTYPE html>` and similar declarations. Ignored.
    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    /// `</name>`
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\n\r\f]*>")]
    EndTag,

    /// `<name attr="..." ...>` including `/>`.
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9-]*([^>"']|"[^"]*"|'[^']*')*>"#)]
    StartTag,

    /// A `<` that does not begin a tag.
    #[token("<")]
    StrayLt,

    /// Character data.
    #[regex(r"[^<]+")]
    Text,
}

fn lex_comment(lex: &mut Lexer<MarkupToken>) -> bool {
    let consumed = lex
        .remainder()
        .find("-->")
        .map_or(lex.remainder().len(), |end| end + 3);
    lex.bump(consumed);
    true
}

/// Token inside a start tag, after the tag name.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum AttrToken {
    #[regex(r#"[^ \t\n\r\f"'<>/=]+"#)]
    Name,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[token("/")]
    Slash,
}

/// Parse `markup` and append the resulting nodes as children of `parent`.
pub fn parse_fragment(dom: &mut Dom, parent: NodeId, markup: &str) {
    // Open elements, innermost last. `parent` is the floor of the stack.
    let mut open: Vec<NodeId> = vec![parent];
    let mut pending_text = String::new();

    let mut lexer = MarkupToken::lexer(markup);
    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let current = *open.last().unwrap_or(&parent);
        match result {
            Ok(MarkupToken::Text) | Ok(MarkupToken::StrayLt) | Err(()) => {
                pending_text.push_str(slice);
            }
            Ok(MarkupToken::Comment) => {
                flush_text(dom, current, &mut pending_text);
                let body = slice.trim_start_matches("<!--");
                let body = body.strip_suffix("-->").unwrap_or(body);
                dom.insert_child(current, NodeData::comment(body));
            }
            Ok(MarkupToken::Declaration) => {
                flush_text(dom, current, &mut pending_text);
            }
            Ok(MarkupToken::StartTag) => {
                flush_text(dom, current, &mut pending_text);
                let data = parse_start_tag(slice);
                let keeps_open = !data.is_void() && !data.self_closing;
                if let Some(id) = dom.insert_child(current, data) {
                    if keeps_open {
                        open.push(id);
                    }
                }
            }
            Ok(MarkupToken::EndTag) => {
                flush_text(dom, current, &mut pending_text);
                let name = slice[2..slice.len() - 1].trim().to_ascii_lowercase();
                // Close up to the nearest matching open element; ignore strays.
                if let Some(pos) = open
                    .iter()
                    .skip(1)
                    .rposition(|&id| dom.get(id).is_some_and(|d| d.tag == name))
                {
                    if let Some(data) = dom.get_mut(open[pos + 1]) {
                        data.source_end_tag = Some(slice.to_owned());
                    }
                    open.truncate(pos + 1);
                }
            }
        }
    }

    let current = *open.last().unwrap_or(&parent);
    flush_text(dom, current, &mut pending_text);

    seed_textarea_values(dom, parent);
}

fn flush_text(dom: &mut Dom, parent: NodeId, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let mut data = NodeData::text(decode_entities(pending));
    data.source_text = Some(std::mem::take(pending));
    dom.insert_child(parent, data);
}

/// A `<textarea>`'s value slot starts out as its text content.
fn seed_textarea_values(dom: &mut Dom, root: NodeId) {
    for id in dom.walk_depth_first(root) {
        let is_textarea = dom.get(id).is_some_and(|d| d.is_element() && d.tag == "textarea");
        if is_textarea {
            let text = dom.text_content(id);
            if let Some(data) = dom.get_mut(id) {
                data.value = Some(text);
            }
        }
    }
}

/// Build element data from a raw start tag such as `<input id="x" disabled />`.
fn parse_start_tag(raw: &str) -> NodeData {
    let inner = &raw[1..raw.len() - 1];
    let name_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(inner.len());
    let mut data = NodeData::element(&inner[..name_end]);
    data.self_closing = inner.trim_end().ends_with('/');

    let mut lexer = AttrToken::lexer(&inner[name_end..]);
    let mut pending_name: Option<String> = None;
    let mut awaiting_value = false;

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        match result {
            Ok(AttrToken::Name) if awaiting_value => {
                if let Some(name) = pending_name.take() {
                    data.set_attribute(&name, decode_entities(slice));
                }
                awaiting_value = false;
            }
            Ok(AttrToken::DoubleQuoted | AttrToken::SingleQuoted) if awaiting_value => {
                if let Some(name) = pending_name.take() {
                    data.set_attribute(&name, decode_entities(&slice[1..slice.len() - 1]));
                }
                awaiting_value = false;
            }
            Ok(AttrToken::Equals) if pending_name.is_some() => awaiting_value = true,
            Ok(AttrToken::Name) => {
                if let Some(name) = pending_name.replace(slice.to_owned()) {
                    data.set_attribute(&name, String::new());
                }
            }
            // Slashes, stray quotes and stray `=` carry no attribute.
            _ => {}
        }
    }
    if let Some(name) = pending_name {
        data.set_attribute(&name, String::new());
    }

    data.source_tag = Some(raw.to_owned());
    data
}

/// Decode the handful of character references templates commonly use.
///
/// Unknown or malformed references are left as-is.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let hex = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escape text for placement between tags.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Serialize the children of `id`.
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Serialize `id` itself and its subtree.
pub fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(data) = dom.get(id) else {
        return;
    };
    match &data.kind {
        NodeKind::Document => {
            out.push_str(&inner_html(dom, id));
        }
        NodeKind::Text(text) => match &data.source_text {
            Some(raw) if decode_entities(raw) == *text => out.push_str(raw),
            _ => out.push_str(&escape_text(text)),
        },
        NodeKind::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        NodeKind::Element => {
            match &data.source_tag {
                Some(raw) => out.push_str(raw),
                None => write_start_tag(data, out),
            }
            if data.is_void() || data.self_closing {
                return;
            }
            for &child in dom.children(id) {
                write_node(dom, child, out);
            }
            match &data.source_end_tag {
                Some(raw) => out.push_str(raw),
                None => {
                    out.push_str("</");
                    out.push_str(&data.tag);
                    out.push('>');
                }
            }
        }
    }
}

/// Start tag for elements built programmatically rather than parsed.
fn write_start_tag(data: &NodeData, out: &mut String) {
    out.push('<');
    out.push_str(&data.tag);
    if let Some(id) = &data.id {
        out.push_str(&format!(" id=\"{}\"", escape_attribute(id)));
    }
    if !data.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_attribute(&data.classes.join(" "))));
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            out.push_str(&format!(" {name}"));
        } else {
            out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
        }
    }
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(markup: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::document());
        parse_fragment(&mut dom, root, markup);
        (dom, root)
    }

    fn round_trip(markup: &str) -> String {
        let (dom, root) = parse(markup);
        inner_html(&dom, root)
    }

    #[test]
    fn parses_nested_elements() {
        let (dom, root) = parse(r#"<div id="a"><p class="x y">hi</p></div>"#);
        let div = dom.children(root)[0];
        assert_eq!(dom.get(div).unwrap().id.as_deref(), Some("a"));
        let p = dom.children(div)[0];
        assert_eq!(dom.get(p).unwrap().classes, vec!["x", "y"]);
        assert_eq!(dom.text_content(p), "hi");
    }

    #[test]
    fn void_elements_do_not_nest() {
        let (dom, root) = parse(r#"<input id="f" type="text"><span>after</span>"#);
        assert_eq!(dom.children(root).len(), 2);
    }

    #[test]
    fn self_closing_syntax() {
        let (dom, root) = parse(r#"<input id="f" /><div/><b>x</b>"#);
        assert_eq!(dom.children(root).len(), 3);
        let div = dom.children(root)[1];
        assert!(dom.get(div).unwrap().self_closing);
    }

    #[test]
    fn attribute_forms() {
        let (dom, root) = parse(r#"<input type=text disabled value='v' data-x="a&amp;b">"#);
        let input = dom.get(dom.children(root)[0]).unwrap();
        assert_eq!(input.attribute("type").as_deref(), Some("text"));
        assert_eq!(input.attribute("disabled").as_deref(), Some(""));
        assert_eq!(input.attribute("data-x").as_deref(), Some("a&b"));
        assert_eq!(input.value.as_deref(), Some("v"));
    }

    #[test]
    fn quoted_gt_inside_attribute() {
        let (dom, root) = parse(r#"<a title="a>b">x</a>"#);
        let a = dom.get(dom.children(root)[0]).unwrap();
        assert_eq!(a.attribute("title").as_deref(), Some("a>b"));
    }

    #[test]
    fn unclosed_elements_close_at_end() {
        let (dom, root) = parse("<div><p>one");
        let div = dom.children(root)[0];
        let p = dom.children(div)[0];
        assert_eq!(dom.text_content(p), "one");
        assert_eq!(inner_html(&dom, root), "<div><p>one</p></div>");
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        assert_eq!(round_trip("<b>x</i></b>"), "<b>x</b>");
    }

    #[test]
    fn end_tag_closes_intermediate_elements() {
        let (dom, root) = parse("<div><span>a</div>b");
        assert_eq!(dom.children(root).len(), 2);
        assert_eq!(inner_html(&dom, root), "<div><span>a</span></div>b");
    }

    #[test]
    fn stray_lt_is_text() {
        let (dom, root) = parse("1 < 2");
        assert_eq!(dom.text_content(root), "1 < 2");
        assert_eq!(inner_html(&dom, root), "1 < 2");
    }

    #[test]
    fn comments_preserved() {
        assert_eq!(round_trip("<!-- note --><p>x</p>"), "<!-- note --><p>x</p>");
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        let (dom, root) = parse("<p>a</p><!-- open");
        assert_eq!(dom.children(root).len(), 2);
    }

    #[test]
    fn doctype_is_dropped() {
        assert_eq!(round_trip("<!DOCTYPE html><p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn textarea_value_seeded_from_text() {
        let (dom, root) = parse("<textarea id=t>draft</textarea>");
        let t = dom.get(dom.children(root)[0]).unwrap();
        assert_eq!(t.value.as_deref(), Some("draft"));
    }

    #[test]
    fn round_trip_is_verbatim() {
        let template = r#"
    <div>
      <p id="msg">Hello</p>
      <input id="inputField" type="text" placeholder="Enter text" />
      <button id="increment">Increment</button>
    </div>
  "#;
        assert_eq!(round_trip(template), template);
    }

    #[test]
    fn entities_decode_and_reencode() {
        let (dom, root) = parse("a &amp; b &lt;c&gt; &#65;&#x42; &bogus; &");
        assert_eq!(dom.text_content(root), "a & b <c> AB &bogus; &");
        assert_eq!(inner_html(&dom, root), "a &amp; b &lt;c&gt; &#65;&#x42; &bogus; &");
    }

    #[test]
    fn parsed_markup_serializes_as_written() {
        for markup in [
            "a > b",
            "<P>x</P>",
            "<p>&#65;</p>",
            "<b>x</b >",
            "x\u{a0}y",
            "<DIV class=\"k\">Tom &amp; Jerry &gt; <SPAN>&nbsp;</Span></DIV>",
        ] {
            assert_eq!(round_trip(markup), markup);
        }
    }

    #[test]
    fn edited_text_is_escaped_again() {
        let (mut dom, root) = parse("<p>a &gt; b</p>");
        let p = dom.children(root)[0];
        let text = dom.children(p)[0];
        dom.set_text_content(text, "1 < 2");
        assert_eq!(inner_html(&dom, root), "<p>1 &lt; 2</p>");
    }

    #[test]
    fn implicitly_closed_elements_get_lowercase_end_tags() {
        assert_eq!(round_trip("<UL><LI>a</UL>"), "<UL><LI>a</li></UL>");
    }

    #[test]
    fn programmatic_element_serialization() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::document());
        let p = dom
            .insert_child(
                root,
                NodeData::element("p")
                    .with_id("a")
                    .with_class("x")
                    .with_attribute("hidden", "")
                    .with_attribute("title", "say \"hi\""),
            )
            .unwrap();
        dom.insert_child(p, NodeData::text("<ok>"));
        assert_eq!(
            outer_html(&dom, p),
            r#"<p id="a" class="x" hidden title="say &quot;hi&quot;">&lt;ok&gt;</p>"#
        );
    }
}
