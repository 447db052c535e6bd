//! Prompt templates for Explain This.
//!
//! The default prompts can be replaced by a `prompts.toml` file placed in the
//! custom prompts directory. Missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Explanation depth requested by the caller.
///
/// Unrecognised names deserialize as [`ComplexityLevel::Student`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ComplexityLevel {
    Child,
    #[default]
    Student,
    Expert,
}

impl ComplexityLevel {
    /// Parse a level name, falling back to `Student` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name {
            "child" => ComplexityLevel::Child,
            "expert" => ComplexityLevel::Expert,
            _ => ComplexityLevel::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Child => "child",
            ComplexityLevel::Student => "student",
            ComplexityLevel::Expert => "expert",
        }
    }
}

impl From<String> for ComplexityLevel {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl std::str::FromStr for ComplexityLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// System message setting up the explainer persona.
    pub system: String,
    pub child: String,
    pub student: String,
    pub expert: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful teacher who explains complex topics clearly.".to_string(),
            child: "Explain this in very simple terms that a 12-year-old would understand. Use examples and avoid complex words:".to_string(),
            student: "Explain this clearly for a high school or college student. Use examples when helpful:".to_string(),
            expert: "Provide a comprehensive explanation suitable for someone with advanced knowledge in this field:".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, reading `prompts.toml` from `custom_dir` when it exists.
    pub fn load(custom_dir: Option<&Path>) -> crate::error::Result<Self> {
        if let Some(dir) = custom_dir {
            let path = dir.join("prompts.toml");
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                return Ok(toml::from_str(&content)?);
            }
        }

        Ok(Prompts::default())
    }

    /// Instruction prefix for the given level.
    pub fn for_level(&self, level: ComplexityLevel) -> &str {
        match level {
            ComplexityLevel::Child => &self.child,
            ComplexityLevel::Student => &self.student,
            ComplexityLevel::Expert => &self.expert,
        }
    }

    /// Build the user message sent alongside the system persona.
    pub fn render_user_message(&self, level: ComplexityLevel, content: &str) -> String {
        format!("{}\n\n{}", self.for_level(level), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.system.contains("helpful teacher"));
        assert!(prompts.for_level(ComplexityLevel::Child).contains("12-year-old"));
        assert!(prompts.for_level(ComplexityLevel::Expert).contains("advanced knowledge"));
    }

    #[test]
    fn test_unknown_level_behaves_as_student() {
        let prompts = Prompts::default();
        for name in ["", "Child", "phd", "STUDENT", "toddler"] {
            let level = ComplexityLevel::from_name(name);
            assert_eq!(level, ComplexityLevel::Student, "{name:?}");
            assert_eq!(prompts.for_level(level), prompts.student);
        }
    }

    #[test]
    fn test_level_deserialization_is_lenient() {
        let level: ComplexityLevel = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(level, ComplexityLevel::Expert);

        let level: ComplexityLevel = serde_json::from_str("\"wizard\"").unwrap();
        assert_eq!(level, ComplexityLevel::Student);

        assert_eq!(serde_json::to_string(&ComplexityLevel::Child).unwrap(), "\"child\"");
    }

    #[test]
    fn test_render_user_message() {
        let prompts = Prompts::default();
        let message = prompts.render_user_message(ComplexityLevel::Student, "Entropy always grows.");
        assert_eq!(
            message,
            format!("{}\n\nEntropy always grows.", prompts.student)
        );
    }

    #[test]
    fn test_custom_prompts_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("prompts.toml"),
            "child = \"Explain like I'm five:\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(Some(dir.path())).unwrap();
        assert_eq!(prompts.child, "Explain like I'm five:");
        assert_eq!(prompts.student, Prompts::default().student);
    }
}
