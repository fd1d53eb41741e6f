use serde::{Deserialize, Serialize};

// ─── Message types ────────────────────────────────────────────────────────────

/// A single message in the conversation history.
///
/// The history is owned by the caller and only ever borrowed by the
/// generator; messages are never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into() }
    }

    /// `"<Role>: <content>"`, the line format used in prompts.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Capitalised speaker label.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

// ─── Generation parameters ───────────────────────────────────────────────────

/// Sampling parameters sent with every request as `generationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 1024 }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_user_sets_role_and_text() {
        let m = Message::user("hello");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.content, "hello");
    }

    #[test]
    fn transcript_line_capitalises_role() {
        assert_eq!(Message::user("hi").transcript_line(), "User: hi");
        assert_eq!(Message::assistant("yo").transcript_line(), "Assistant: yo");
    }

    #[test]
    fn transcript_line_keeps_empty_content() {
        assert_eq!(Message::user("").transcript_line(), "User: ");
    }

    #[test]
    fn role_serialises_lowercase() {
        let json = serde_json::to_string(&Message::assistant("x")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"x"}"#);
    }

    #[test]
    fn generation_config_uses_camel_case_keys() {
        let v = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(v["topK"], 40);
        assert_eq!(v["maxOutputTokens"], 1024);
        assert!(v.get("top_k").is_none());
        assert!((v["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((v["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }
}
