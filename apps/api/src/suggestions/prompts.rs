// Prompts for suggestion generation.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const SUGGESTIONS_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Filled with `{interest}`.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Provide 3 specific job titles,
a typical hiring company website URL, and 5 key requirements for a person interested in: {interest}.

Return a JSON object with exactly this shape:
{
  "jobTitles": ["<title>", "<title>", "<title>"],
  "companyUrl": "<a valid website URL of a company in this field>",
  "requirements": [
    "<requirement>", "<requirement>", "<requirement>", "<requirement>", "<requirement>"
  ]
}"#;

pub fn build_suggestions_prompt(interest: &str) -> String {
    SUGGESTIONS_PROMPT_TEMPLATE.replace("{interest}", interest.trim())
}
