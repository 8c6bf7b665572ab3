//! Review prompt construction.
//!
//! The system message pins the reply to one of two shapes the interpreter
//! understands; the user message carries the goals and the source file.

use crate::model::ChatMessage;

/// The ordered system and user messages for one review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPrompt {
    pub system: ChatMessage,
    pub user: ChatMessage,
}

impl ReviewPrompt {
    pub fn new(language: &str, code: &str) -> Self {
        let display = display_language(language);
        let tag = language.to_ascii_lowercase();

        let system = format!(
            "You are a senior {display} engineer.\n\
             Return ONLY ONE of the following:\n\
             A) STRICT JSON with keys: issues (list), improved_code_b64 (string)\n\
             or\n\
             B) A single {display} code block (```{tag} ... ```)\n\
             \n\
             No extra explanations."
        );

        let user = format!("{}\n\nCODE:\n{code}", goals(&tag, &display));

        Self {
            system: ChatMessage::system(system.trim()),
            user: ChatMessage::user(user.trim()),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![self.system.clone(), self.user.clone()]
    }
}

/// Improvement goals; Python gets the Flask-specific wording.
fn goals(tag: &str, display: &str) -> String {
    if tag == "python" {
        "Improve this Flask app:\n\
         - Use jsonify for responses\n\
         - Validate the 'name' parameter (non-empty string)\n\
         - Add basic try/except\n\
         - Keep it small and runnable"
            .to_string()
    } else {
        format!(
            "Improve this {display} app:\n\
             - Return JSON responses\n\
             - Validate the 'name' parameter (non-empty string)\n\
             - Add basic error handling\n\
             - Keep it small and runnable"
        )
    }
}

fn display_language(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
