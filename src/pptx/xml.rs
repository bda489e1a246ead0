//! Small helpers shared by the part writers.

use std::borrow::Cow;
use std::fmt::Write;

use super::Paragraph;

pub const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_C: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Escape text content, dropping characters XML 1.0 cannot carry.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_forbidden) {
        let cleaned: String = text.chars().filter(|c| !is_forbidden(*c)).collect();
        Cow::Owned(quick_xml::escape::escape(cleaned.as_str()).into_owned())
    } else {
        quick_xml::escape::escape(text)
    }
}

fn is_forbidden(c: char) -> bool {
    (c.is_control() && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

/// Write one `<a:p>` element. Vertical tabs become line breaks inside the paragraph.
pub fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> std::fmt::Result {
    xml.push_str("<a:p>");
    if paragraph.level > 0 {
        write!(xml, r#"<a:pPr lvl="{}"/>"#, paragraph.level)?;
    }

    for (i, line) in paragraph.text.split('\u{b}').enumerate() {
        if i > 0 {
            xml.push_str("<a:br><a:rPr lang=\"en-US\"/></a:br>");
        }
        if !line.is_empty() {
            write!(
                xml,
                r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r>"#,
                escape_text(line)
            )?;
        }
    }

    xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    Ok(())
}

pub fn write_paragraphs(xml: &mut String, paragraphs: &[Paragraph]) -> std::fmt::Result {
    if paragraphs.is_empty() {
        xml.push_str("<a:p><a:endParaRPr lang=\"en-US\"/></a:p>");
        return Ok(());
    }
    for paragraph in paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("bell\u{7}"), "bell");
        assert_eq!(escape_text("bad\u{FFFF}title\u{FFFE}"), "badtitle");
    }

    #[test]
    fn test_write_paragraph_with_level() {
        let mut xml = String::new();
        write_paragraph(&mut xml, &Paragraph::with_level("Point", 2)).unwrap();
        assert!(xml.starts_with(r#"<a:p><a:pPr lvl="2"/>"#));
        assert!(xml.contains("<a:t>Point</a:t>"));
    }

    #[test]
    fn test_write_paragraph_vertical_tab_breaks() {
        let mut xml = String::new();
        write_paragraph(&mut xml, &Paragraph::new("one\u{b}two")).unwrap();
        assert!(xml.contains("<a:t>one</a:t></a:r><a:br>"));
        assert!(xml.contains("<a:t>two</a:t>"));
    }

    #[test]
    fn test_empty_paragraph_list_still_emits_paragraph() {
        let mut xml = String::new();
        write_paragraphs(&mut xml, &[]).unwrap();
        assert_eq!(xml, "<a:p><a:endParaRPr lang=\"en-US\"/></a:p>");
    }
}
