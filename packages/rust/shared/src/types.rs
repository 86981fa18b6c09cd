//! Core domain types: programs, document links, and extracted curricula.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// One of the two master's programs the advisor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// "Artificial Intelligence".
    Ai,
    /// "AI Product" (product-track program).
    AiProduct,
}

impl Program {
    /// All programs in declaration order.
    pub const ALL: [Program; 2] = [Program::Ai, Program::AiProduct];

    /// Stable key used in artifacts and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Program::Ai => "ai",
            Program::AiProduct => "ai_product",
        }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Program {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(Program::Ai),
            "ai_product" => Ok(Program::AiProduct),
            other => Err(AdvisorError::validation(format!(
                "unknown program '{other}': expected 'ai' or 'ai_product'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Link discovery output
// ---------------------------------------------------------------------------

/// Program → document identifiers found on its page (`drive_links.json`).
pub type DocumentLinkSet = BTreeMap<Program, Vec<String>>;

// ---------------------------------------------------------------------------
// Extracted curricula
// ---------------------------------------------------------------------------

/// A single line of document text believed to describe a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// The literal extracted line, trimmed and non-empty.
    pub raw: String,
}

impl CourseRecord {
    /// Build a record from a text line. Returns `None` for blank lines.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                raw: trimmed.to_string(),
            })
        }
    }
}

/// Course lines extracted from one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCourses {
    /// Identifier of the source document.
    pub file_id: String,
    /// Course lines in document order, unique within this document.
    pub courses: Vec<CourseRecord>,
}

/// Program → per-document course lines (`curricula.json`).
pub type CurriculumStore = BTreeMap<Program, Vec<DocumentCourses>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_keys_roundtrip() {
        for program in Program::ALL {
            let parsed: Program = program.as_str().parse().expect("parse program");
            assert_eq!(parsed, program);
        }
        assert!("ml".parse::<Program>().is_err());
    }

    #[test]
    fn course_record_rejects_blank_lines() {
        assert!(CourseRecord::from_line("   \t ").is_none());
        let record = CourseRecord::from_line("  1. Машинное обучение — 6 зач. ед.  ").unwrap();
        assert_eq!(record.raw, "1. Машинное обучение — 6 зач. ед.");
    }

    #[test]
    fn store_uses_program_keys() {
        let mut store = CurriculumStore::new();
        store.insert(
            Program::AiProduct,
            vec![DocumentCourses {
                file_id: "abc".into(),
                courses: vec![CourseRecord {
                    raw: "Product Management 3 кредита".into(),
                }],
            }],
        );

        let json = serde_json::to_string(&store).expect("serialize");
        assert!(json.starts_with(r#"{"ai_product":[{"file_id":"abc","courses":[{"raw":"#));

        let parsed: CurriculumStore = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, store);
    }
}
