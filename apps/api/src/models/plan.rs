use chrono::Local;
use serde::{Deserialize, Serialize};

/// Every field of an employment plan, including the captured signature.
///
/// Serialized with camelCase keys; this is the exact shape written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub first_name: String,
    pub last_name: String,
    pub field: String,
    pub position: String,
    pub company: String,
    pub company_url: String,
    pub requirements: Vec<String>,
    pub location: String,
    pub reason: String,
    pub job_options: Vec<String>,
    pub selected_job_option: String,
    /// `data:image/png;base64,...` URL, or `None` when there is no signature.
    #[serde(default)]
    pub signature_data: Option<String>,
    pub date: String,
}

impl Default for PlanRecord {
    fn default() -> Self {
        Self::with_date(today())
    }
}

impl PlanRecord {
    /// Sample plan with a fixed date string.
    pub fn with_date(date: impl Into<String>) -> Self {
        Self {
            first_name: "Joel".to_string(),
            last_name: "[YourLastname]".to_string(),
            field: "Supply chain and logistics".to_string(),
            position: "Procurement Officer".to_string(),
            company: "Startup Lions".to_string(),
            company_url: "https://startuplions.org".to_string(),
            requirements: vec![
                "Degree in procurement or supply chain management".to_string(),
                "Experience with supplier management".to_string(),
                "Compliance knowledge".to_string(),
                "Strong reporting skills".to_string(),
            ],
            location: "Nairobi, Kenya".to_string(),
            reason: "they focus on sustainable development and innovation, \
                     which aligns with my career goals"
                .to_string(),
            job_options: vec![
                "Procurement Officer".to_string(),
                "Supply Chain Analyst".to_string(),
                "Logistics Coordinator".to_string(),
            ],
            selected_job_option: "Procurement Officer".to_string(),
            signature_data: None,
            date: date.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// File-style name used for the exported document, e.g. `Employment_Plan_Joel_Doe`.
    pub fn document_name(&self) -> String {
        format!("Employment_Plan_{}_{}", self.first_name, self.last_name)
    }

    pub fn folder_label(&self) -> String {
        format!("Google Doc Task[{}_{}]", self.first_name, self.last_name)
    }

    /// True when the selected job title is one of the listed options (or none are listed).
    /// Not enforced on edit.
    pub fn has_listed_selection(&self) -> bool {
        self.job_options.is_empty() || self.job_options.contains(&self.selected_job_option)
    }
}

/// Today's local date, e.g. "October 14, 2026".
pub fn today() -> String {
    Local::now().format("%B %-d, %Y").to_string()
}
