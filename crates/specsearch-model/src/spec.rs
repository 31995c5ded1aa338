//! Specification, scenario, and item types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A heading with the source line it appears on.
///
/// Scenario line numbers are unique within one specification file, which
/// is what makes them usable as document-identifier suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text.
    pub value: String,
    /// 1-based source line number.
    pub line_no: u32,
}

impl Heading {
    /// Create a heading.
    pub fn new(value: impl Into<String>, line_no: u32) -> Self {
        Self {
            value: value.into(),
            line_no,
        }
    }
}

/// A single executable step line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step text as written in the source.
    pub text: String,
    /// 1-based source line number.
    pub line_no: u32,
}

impl Step {
    /// Create a step.
    pub fn new(text: impl Into<String>, line_no: u32) -> Self {
        Self {
            text: text.into(),
            line_no,
        }
    }
}

/// A free-text comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text.
    pub value: String,
    /// 1-based source line number.
    pub line_no: u32,
}

impl Comment {
    /// Create a comment.
    pub fn new(value: impl Into<String>, line_no: u32) -> Self {
        Self {
            value: value.into(),
            line_no,
        }
    }
}

/// A scenario nested inside a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario heading and its line number.
    pub heading: Heading,
    /// Steps in source order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Comments in source order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Tags attached to the scenario; empty when untagged.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A specification file: heading, context steps, comments, tags, scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// Specification heading and its line number.
    pub heading: Heading,
    /// Absolute path of the source file.
    pub file_name: PathBuf,
    /// Context (setup) steps shared by every scenario, in source order.
    #[serde(default)]
    pub context_steps: Vec<Step>,
    /// Comments in source order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Tags attached to the specification; empty when untagged.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Scenarios in source order.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> Specification {
        Specification {
            heading: Heading::new("Customer login", 1),
            file_name: PathBuf::from("/project/specs/login.spec"),
            context_steps: vec![Step::new("Start the app", 3)],
            comments: vec![Comment::new("Covers the happy path", 2)],
            tags: vec!["smoke-test".to_string()],
            scenarios: vec![Scenario {
                heading: Heading::new("Valid credentials", 7),
                steps: vec![
                    Step::new("Enter name", 8),
                    Step::new("Enter password", 9),
                ],
                comments: vec![],
                tags: vec![],
            }],
        }
    }

    #[test]
    fn test_scenario_order_preserved() {
        let spec = sample_spec();
        let steps: Vec<&str> = spec.scenarios[0]
            .steps
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(steps, vec!["Enter name", "Enter password"]);
    }

    #[test]
    fn test_json_round_trip() {
        let spec = sample_spec();
        let json = serde_json::to_string(&spec).unwrap();
        let back: Specification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_optional_fields_default_empty() {
        let json = r#"{
            "heading": {"value": "Untagged", "line_no": 1},
            "file_name": "/project/specs/bare.spec"
        }"#;
        let spec: Specification = serde_json::from_str(json).unwrap();
        assert!(spec.tags.is_empty());
        assert!(spec.scenarios.is_empty());
        assert!(spec.context_steps.is_empty());
        assert!(spec.comments.is_empty());
    }
}
