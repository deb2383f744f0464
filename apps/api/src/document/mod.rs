//! Document preview: the plan rendered as three printable pages.
//!
//! Mirrors the form's data into fixed sentences. Layout and pagination belong to
//! whatever prints the output; this module only produces the page text.

pub mod handlers;

use serde::Serialize;

use crate::models::plan::PlanRecord;
use crate::signature::decode_data_url;

pub const DOCUMENT_TITLE: &str = "Employment Plan Builder";
pub const SIGNATURE_PLACEHOLDER: &str = "Sign in Planner";

const BLANK_SHORT: &str = "___________";
const BLANK_MEDIUM: &str = "_____________";
const BLANK_COMPANY: &str = "______________________";
const BLANK_REASON: &str = "____________________";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub name: String,
    pub pages: Vec<DocumentPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    pub number: u32,
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: String,
}

/// A question with its answer, or a bare paragraph when `question` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub question: Option<String>,
    pub answer: String,
}

impl Section {
    fn qa(question: &str, answer: String) -> Self {
        Self {
            question: Some(question.to_string()),
            answer,
        }
    }

    fn text(answer: String) -> Self {
        Self {
            question: None,
            answer,
        }
    }
}

pub fn render_document(record: &PlanRecord) -> PlanDocument {
    let footer = record.full_name();
    let page = |number: u32, title: &str, sections: Vec<Section>| DocumentPage {
        number,
        title: title.to_string(),
        sections,
        footer: footer.clone(),
    };

    PlanDocument {
        name: record.document_name(),
        pages: vec![
            page(1, "My Folder", vec![Section::text(record.folder_label())]),
            page(2, "Employment Considerations", considerations(record)),
            page(3, "My Future Employment", future_employment(record)),
        ],
    }
}

fn considerations(record: &PlanRecord) -> Vec<Section> {
    vec![
        Section::qa(
            "What position, and in which field, would you like to seek employment?",
            format!(
                "I would like to seek employment as a {} in the {} field.",
                record.selected_job_option, record.field
            ),
        ),
        Section::qa(
            "What is the web address of a business or organization that hires for this position?",
            format!(
                "{} hires for this position. Their website is {}.",
                record.company, record.company_url
            ),
        ),
        Section::qa(
            "What are the requirements you will likely need for this position?",
            format!(
                "The requirements likely include {}.",
                record.requirements.join(", ").to_lowercase()
            ),
        ),
    ]
}

fn future_employment(record: &PlanRecord) -> Vec<Section> {
    let statement = format!(
        "I would like to work as a/an {} in the {} field in the city/region of {}. \
         I would like to apply to jobs with {} because {}.",
        or_blank(&record.selected_job_option, BLANK_SHORT),
        or_blank(&record.field, BLANK_MEDIUM),
        or_blank(&record.location, BLANK_MEDIUM),
        or_blank(&record.company, BLANK_COMPANY),
        or_blank(&record.reason, BLANK_REASON),
    );

    vec![
        Section::text(statement),
        Section::text(signature_line(record.signature_data.as_deref())),
        Section::text(record.date.clone()),
    ]
}

fn or_blank<'a>(value: &'a str, blank: &'a str) -> &'a str {
    if value.is_empty() {
        blank
    } else {
        value
    }
}

/// The signature image, or the placeholder when absent or not a decodable PNG.
fn signature_line(signature: Option<&str>) -> String {
    match signature {
        Some(url) if decode_data_url(url).is_ok() => url.to_string(),
        Some(_) => {
            tracing::warn!("Stored signature is not a valid PNG data URL");
            SIGNATURE_PLACEHOLDER.to_string()
        }
        None => SIGNATURE_PLACEHOLDER.to_string(),
    }
}

/// Plain markdown rendering, one `##` block per page.
pub fn render_markdown(document: &PlanDocument) -> String {
    let mut md = format!("# {}\n\n", document.name);
    for page in &document.pages {
        md.push_str(&format!(
            "---\n\n_Page {} · {}_\n\n## {}\n\n",
            page.number, DOCUMENT_TITLE, page.title
        ));
        for section in &page.sections {
            if let Some(question) = &section.question {
                md.push_str(&format!("*{question}*\n\n"));
            }
            if section.answer.starts_with("data:image/") {
                md.push_str(&format!("![Signature]({})\n\n", section.answer));
            } else {
                md.push_str(&format!("{}\n\n", section.answer));
            }
        }
        md.push_str(&format!("{}\n\n", page.footer));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{StrokePoint, Surface};

    fn sample() -> PlanRecord {
        PlanRecord::with_date("October 14, 2026")
    }

    #[test]
    fn test_three_pages_with_name_footer() {
        let doc = render_document(&sample());
        assert_eq!(doc.name, "Employment_Plan_Joel_[YourLastname]");
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(
            doc.pages.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(doc.pages.iter().all(|p| p.footer == "Joel [YourLastname]"));
        assert_eq!(
            doc.pages[0].sections[0].answer,
            "Google Doc Task[Joel_[YourLastname]]"
        );
    }

    #[test]
    fn test_requirements_are_joined_and_lowercased() {
        let doc = render_document(&sample());
        assert_eq!(
            doc.pages[1].sections[2].answer,
            "The requirements likely include degree in procurement or supply chain management, \
             experience with supplier management, compliance knowledge, strong reporting skills."
        );
    }

    #[test]
    fn test_empty_requirements_render_as_empty_text() {
        let mut record = sample();
        record.requirements.clear();
        let doc = render_document(&record);
        assert_eq!(
            doc.pages[1].sections[2].answer,
            "The requirements likely include ."
        );
    }

    #[test]
    fn test_blank_fields_show_underscores() {
        let mut record = sample();
        record.location.clear();
        record.reason.clear();
        let statement = &render_document(&record).pages[2].sections[0].answer;
        assert!(statement.contains("city/region of _____________."));
        assert!(statement.ends_with("because ____________________."));
    }

    #[test]
    fn test_signature_placeholder_and_image() {
        let doc = render_document(&sample());
        assert_eq!(doc.pages[2].sections[1].answer, SIGNATURE_PLACEHOLDER);
        assert_eq!(doc.pages[2].sections[2].answer, "October 14, 2026");

        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(1.0, 1.0), StrokePoint::new(30.0, 30.0));
        let url = surface.encode().unwrap().into_string();
        let mut record = sample();
        record.signature_data = Some(url.clone());
        let doc = render_document(&record);
        assert_eq!(doc.pages[2].sections[1].answer, url);

        record.signature_data = Some("garbage".to_string());
        let doc = render_document(&record);
        assert_eq!(doc.pages[2].sections[1].answer, SIGNATURE_PLACEHOLDER);
    }

    #[test]
    fn test_markdown_has_page_headers_and_sentences() {
        let md = render_markdown(&render_document(&sample()));
        assert!(md.starts_with("# Employment_Plan_Joel_[YourLastname]"));
        assert!(md.contains("_Page 2 · Employment Plan Builder_"));
        assert!(md.contains(
            "I would like to seek employment as a Procurement Officer \
             in the Supply chain and logistics field."
        ));
        assert!(md.contains(
            "Startup Lions hires for this position. Their website is https://startuplions.org."
        ));
    }
}
