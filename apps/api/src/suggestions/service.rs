//! Suggestion service seam and the store-side application of its results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::plan::{PlanEdit, PlanStore};
use crate::suggestions::prompts::{build_suggestions_prompt, SUGGESTIONS_SYSTEM};

/// Notice shown when generation fails.
pub const FAILURE_NOTICE: &str = "AI was unable to generate suggestions.";
/// Notice shown when there is no field of interest to generate from.
pub const MISSING_INTEREST_NOTICE: &str =
    "Please enter a field of interest first (e.g., Software Engineering)";

const EXPECTED_TITLES: usize = 3;
const EXPECTED_REQUIREMENTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub job_titles: Vec<String>,
    pub company_url: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("No field of interest to generate suggestions for")]
    MissingInterest,

    #[error("Suggestions are not configured (no API key)")]
    NotConfigured,

    #[error("Suggestion response contained no job titles")]
    NoJobTitles,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl SuggestionError {
    /// The user-visible notice for this failure.
    pub fn notice(&self) -> &'static str {
        match self {
            SuggestionError::MissingInterest => MISSING_INTEREST_NOTICE,
            _ => FAILURE_NOTICE,
        }
    }
}

/// Generates suggestions for a free-text interest.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn generate(&self, interest: &str) -> Result<Suggestions, SuggestionError>;
}

/// LLM-backed suggestions.
pub struct LlmSuggestionService {
    llm: LlmClient,
}

impl LlmSuggestionService {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SuggestionService for LlmSuggestionService {
    async fn generate(&self, interest: &str) -> Result<Suggestions, SuggestionError> {
        let prompt = build_suggestions_prompt(interest);
        Ok(self.llm.call_json(&prompt, SUGGESTIONS_SYSTEM).await?)
    }
}

/// Used when no API key is configured.
pub struct DisabledSuggestionService;

#[async_trait]
impl SuggestionService for DisabledSuggestionService {
    async fn generate(&self, _interest: &str) -> Result<Suggestions, SuggestionError> {
        Err(SuggestionError::NotConfigured)
    }
}

fn check_shape(suggestions: &Suggestions) -> Result<(), SuggestionError> {
    if suggestions.job_titles.is_empty() {
        return Err(SuggestionError::NoJobTitles);
    }
    if suggestions.job_titles.len() != EXPECTED_TITLES
        || suggestions.requirements.len() != EXPECTED_REQUIREMENTS
    {
        warn!(
            "Suggestion counts differ from request: {} titles, {} requirements",
            suggestions.job_titles.len(),
            suggestions.requirements.len()
        );
    }
    Ok(())
}

/// Fills job options, the selected option, the company URL and requirements from the
/// store's current field of interest.
///
/// Blank interests are rejected before any call. On failure the record is untouched.
pub async fn apply_suggestions(
    store: &tokio::sync::Mutex<PlanStore>,
    service: &dyn SuggestionService,
) -> Result<Suggestions, SuggestionError> {
    let interest = store.lock().await.record().field.clone();
    if interest.trim().is_empty() {
        return Err(SuggestionError::MissingInterest);
    }

    let suggestions = match service.generate(&interest).await {
        Ok(s) => s,
        Err(e) => {
            warn!("Suggestion generation failed for '{interest}': {e}");
            return Err(e);
        }
    };
    check_shape(&suggestions)?;

    let mut store = store.lock().await;
    store.apply_edits(suggestion_edits(&suggestions));
    info!(
        "Applied {} job options for '{interest}'",
        suggestions.job_titles.len()
    );
    Ok(suggestions)
}

fn suggestion_edits(suggestions: &Suggestions) -> Vec<PlanEdit> {
    let mut edits = vec![
        PlanEdit::JobOptions(suggestions.job_titles.clone()),
        PlanEdit::CompanyUrl(suggestions.company_url.clone()),
        PlanEdit::Requirements(suggestions.requirements.clone()),
    ];
    if let Some(first) = suggestions.job_titles.first() {
        edits.push(PlanEdit::SelectedJobOption(first.clone()));
    }
    edits
}
