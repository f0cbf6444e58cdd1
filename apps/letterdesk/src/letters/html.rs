//! HTML preview renderer.
//!
//! Produces a fragment (no `<html>`/`<head>`) that the preview pane drops in
//! as-is. All user-supplied text is escaped.

use std::fmt::Write;

use crate::letters::document::{Block, DetailList, LetterDocument, Letterhead, Signature};
use crate::layout::DISCLAIMER;

/// Renders the block sequence in order.
pub fn render_html(doc: &LetterDocument) -> String {
    let mut html = String::new();
    let _ = writeln!(html, r#"<div class="letter letter-{}">"#, doc.letter_type);

    for block in &doc.blocks {
        match block {
            Block::AddressBlock(head) => render_letterhead(&mut html, head),
            Block::DateLine(text) => {
                let _ = writeln!(html, r#"  <p class="date-line">{}</p>"#, html_escape(text));
            }
            Block::Heading(text) => {
                let _ = writeln!(html, r#"  <h3 class="letter-title">{}</h3>"#, html_escape(text));
            }
            Block::Salutation(text) => {
                let _ = writeln!(html, r#"  <p class="salutation">{}</p>"#, html_escape(text));
            }
            Block::Paragraph(text) => {
                let _ = writeln!(html, "  <p>{}</p>", html_escape(text));
            }
            Block::DetailList(list) => render_details(&mut html, list),
            Block::SignatureBlock(sig) => render_signature(&mut html, sig),
        }
    }

    let _ = writeln!(html, r#"  <p class="disclaimer">{}</p>"#, html_escape(DISCLAIMER));
    html.push_str("</div>\n");
    html
}

fn render_letterhead(html: &mut String, head: &Letterhead) {
    html.push_str("  <div class=\"letterhead\">\n");
    let _ = writeln!(html, "    <h2>{}</h2>", html_escape(&head.name));
    for line in &head.lines {
        let _ = writeln!(html, "    <p>{}</p>", html_escape(line));
    }
    html.push_str("  </div>\n  <hr>\n");
}

fn render_details(html: &mut String, list: &DetailList) {
    html.push_str("  <div class=\"details\">\n");
    let _ = writeln!(html, "    <h4>{}</h4>", html_escape(&list.title));
    html.push_str("    <table>\n");
    for item in &list.items {
        let _ = writeln!(
            html,
            "      <tr><th>{}</th><td>{}</td></tr>",
            html_escape(&item.label),
            html_escape(&item.value)
        );
    }
    html.push_str("    </table>\n  </div>\n");
}

fn render_signature(html: &mut String, sig: &Signature) {
    html.push_str("  <div class=\"signature\">\n");
    let _ = writeln!(html, "    <p>{}</p>", html_escape(&sig.closing));
    let _ = writeln!(html, "    <p>{}</p>", html_escape(&sig.company_line));
    let _ = writeln!(
        html,
        r#"    <p class="signatory"><strong>{}</strong></p>"#,
        html_escape(&sig.signatory)
    );
    let _ = writeln!(html, "    <p>{}</p>", html_escape(&sig.designation));
    html.push_str("  </div>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::document::build_document;
    use crate::models::company::CompanyProfile;
    use crate::models::letter::{EmployeeInfo, FormData, LetterFields, RelievingFields};

    fn form(company: &str, employee: &str) -> FormData {
        FormData {
            company: CompanyProfile {
                name: company.to_string(),
                ..Default::default()
            },
            employee: EmployeeInfo {
                name: employee.to_string(),
                ..Default::default()
            },
            fields: LetterFields::Relieving(RelievingFields {
                joining_date: "2020-01-01".to_string(),
                relieving_date: "2023-01-01".to_string(),
                letter_date: "2023-01-02".to_string(),
                reason_for_leaving: String::new(),
            }),
        }
    }

    #[test]
    fn test_relieving_preview_contains_title_and_employee() {
        let html = render_html(&build_document(&form("Acme", "Jane Doe")));
        assert!(html.contains("RELIEVING LETTER"));
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("3 years 1 day"));
        assert!(html.starts_with(r#"<div class="letter letter-relieving">"#));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_html(&build_document(&form("A&B <Ltd>", "O'Neil")));
        assert!(html.contains("A&amp;B &lt;Ltd&gt;"));
        assert!(html.contains("O&#39;Neil"));
        assert!(!html.contains("<Ltd>"));
    }

    #[test]
    fn test_blocks_render_in_model_order() {
        let html = render_html(&build_document(&form("Acme", "Jane Doe")));
        let head = html.find("letterhead").unwrap();
        let title = html.find("letter-title").unwrap();
        let details = html.find("class=\"details\"").unwrap();
        let signature = html.find("class=\"signature\"").unwrap();
        assert!(head < title && title < details && details < signature);
    }

    #[test]
    fn test_html_escape_all_special_chars() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
