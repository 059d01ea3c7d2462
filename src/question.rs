//! How to ask about a relationship.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::facts::Factlet;
use crate::timeline::ValueKind;

/// Question metadata for one askable relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub relationship: String,
    pub kind: ValueKind,
    /// Text with `{subj}` and `{obj}` placeholders.
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(relationship: impl Into<String>, kind: ValueKind, template: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            kind,
            template: template.into(),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Yes/no question for a relationship nobody described.
    pub fn fallback(relationship: &str) -> Self {
        Self::new(relationship, ValueKind::Boolean, format!("{{subj}} {relationship} {{obj}}"))
    }

    /// Question text for a concrete fact.
    pub fn text_for(&self, factlet: &Factlet) -> String {
        let object = factlet.object.as_ref().map(|o| o.id()).unwrap_or("");
        self.template
            .replace("{subj}", factlet.subject.id())
            .replace("{obj}", object)
            .trim()
            .to_string()
    }
}

/// Relationship name to question metadata.
#[derive(Debug, Clone, Default)]
pub struct QuestionBook {
    questions: HashMap<String, Question>,
}

impl QuestionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, question: Question) {
        self.questions.insert(question.relationship.clone(), question);
    }

    pub fn get(&self, relationship: &str) -> Option<&Question> {
        self.questions.get(relationship)
    }

    /// The registered question, or a boolean fallback.
    pub fn describe(&self, relationship: &str) -> Question {
        self.get(relationship)
            .cloned()
            .unwrap_or_else(|| Question::fallback(relationship))
    }
}
