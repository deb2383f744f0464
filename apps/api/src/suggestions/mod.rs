// Suggestion generation: job titles, a hiring company URL and likely requirements
// for a field of interest. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod service;

pub use service::{
    apply_suggestions, DisabledSuggestionService, LlmSuggestionService, SuggestionError,
    SuggestionService, Suggestions, FAILURE_NOTICE, MISSING_INTEREST_NOTICE,
};
