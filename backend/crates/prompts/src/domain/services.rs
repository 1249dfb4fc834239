//! Domain Services
//!
//! Input validation shared by the create and edit paths.

use crate::domain::value_objects::{LanguageId, PromptType};
use crate::error::{PromptError, PromptResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const CONTENT_MAX_LENGTH: usize = 20_000;

/// Reject absent or blank fields, naming the field
pub fn required(field: &str, value: Option<String>) -> PromptResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PromptError::Validation(format!(
            "Missing required field: {field}"
        ))),
    }
}

pub fn validate_title(title: String) -> PromptResult<String> {
    let title = title.trim().to_string();
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(PromptError::Validation(format!(
            "Title must be at most {TITLE_MAX_LENGTH} characters"
        )));
    }
    Ok(title)
}

pub fn validate_content(content: String) -> PromptResult<String> {
    if content.chars().count() > CONTENT_MAX_LENGTH {
        return Err(PromptError::Validation(format!(
            "Content must be at most {CONTENT_MAX_LENGTH} characters"
        )));
    }
    Ok(content)
}

/// A language reference that is not even an id can never resolve
pub fn parse_language_id(raw: &str) -> PromptResult<LanguageId> {
    LanguageId::parse_str(raw.trim()).ok_or(PromptError::InvalidLanguage)
}

pub fn parse_prompt_type(raw: Option<&str>) -> PromptResult<PromptType> {
    match raw {
        None => Ok(PromptType::default()),
        Some(code) => PromptType::from_code(code)
            .ok_or_else(|| PromptError::Validation(format!("Invalid prompt type: {code}"))),
    }
}

/// Validated create/edit payload
#[derive(Debug, Clone)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    pub language_id: LanguageId,
}

impl PromptDraft {
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        language: Option<String>,
    ) -> PromptResult<Self> {
        let title = validate_title(required("title", title)?)?;
        let content = validate_content(required("content", content)?)?;
        let language_id = parse_language_id(&required("language", language)?)?;

        Ok(Self {
            title,
            content,
            language_id,
        })
    }
}
