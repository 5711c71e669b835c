//! Checklist table loading and per-department lookup.
//!
//! The table has one row per question with at least a department column and a
//! question column. Extra columns are ignored.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChecklistConfig;

/// Checklist loading errors. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open checklist {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed checklist table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Checklist table has no '{0}' column")]
    MissingColumn(String),

    #[error("Empty '{column}' value on line {line}")]
    EmptyField { line: u64, column: String },

    #[error("Question '{question}' appears twice for department '{department}'")]
    DuplicateQuestion { department: String, question: String },
}

/// A single yes/no question belonging to one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub department: String,
    pub question: String,
}

impl ChecklistEntry {
    pub fn new(department: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            question: question.into(),
        }
    }
}

/// Immutable checklist table, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    entries: Vec<ChecklistEntry>,
}

impl Checklist {
    /// Build from entries, enforcing non-empty fields and per-department unique questions.
    pub fn from_entries(entries: Vec<ChecklistEntry>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for (idx, entry) in entries.iter().enumerate() {
            let line = idx as u64 + 1;
            if entry.department.trim().is_empty() {
                return Err(LoadError::EmptyField {
                    line,
                    column: "department".to_string(),
                });
            }
            if entry.question.trim().is_empty() {
                return Err(LoadError::EmptyField {
                    line,
                    column: "question".to_string(),
                });
            }
            if !seen.insert((entry.department.as_str(), entry.question.as_str())) {
                return Err(LoadError::DuplicateQuestion {
                    department: entry.department.clone(),
                    question: entry.question.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Load the checklist table named in the config.
    pub fn load(config: &ChecklistConfig) -> Result<Self, LoadError> {
        let file = std::fs::File::open(&config.path).map_err(|source| LoadError::Io {
            path: config.path.clone(),
            source,
        })?;
        let checklist = Self::from_reader(file, config)?;
        tracing::info!(
            "Loaded {} checklist items in {} departments from {:?}",
            checklist.len(),
            checklist.departments().len(),
            config.path
        );
        Ok(checklist)
    }

    /// Load a checklist from an explicit path using the default column names.
    pub fn load_path(path: &Path) -> Result<Self, LoadError> {
        Self::load(&ChecklistConfig {
            path: path.to_path_buf(),
            ..ChecklistConfig::default()
        })
    }

    /// Parse a CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R, config: &ChecklistConfig) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        let dept_idx = column(config.department_column.as_str())?;
        let question_idx = column(config.question_column.as_str())?;

        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let field = |idx: usize, name: &str| match record.get(idx) {
                Some(value) if !value.is_empty() => Ok(value.to_string()),
                _ => Err(LoadError::EmptyField {
                    line,
                    column: name.to_string(),
                }),
            };
            let department = field(dept_idx, config.department_column.as_str())?;
            let question = field(question_idx, config.question_column.as_str())?;

            if !seen.insert((department.clone(), question.clone())) {
                return Err(LoadError::DuplicateQuestion { department, question });
            }
            entries.push(ChecklistEntry { department, question });
        }

        Ok(Self { entries })
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct department names in first-seen order.
    pub fn departments(&self) -> Vec<String> {
        departments(&self.entries)
    }

    /// Question texts of one department in source order.
    pub fn questions_for(&self, department: &str) -> Vec<String> {
        for_department(&self.entries, department)
            .map(|e| e.question.clone())
            .collect()
    }
}

/// Distinct department names in first-seen order.
pub fn departments(entries: &[ChecklistEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(e.department.as_str()))
        .map(|e| e.department.clone())
        .collect()
}

/// Entries whose department equals `name`, preserving source order.
pub fn for_department<'a>(entries: &'a [ChecklistEntry], name: &'a str) -> impl Iterator<Item = &'a ChecklistEntry> {
    entries.iter().filter(move |e| e.department == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Department,Checklist\n\
        IT,Laptop works?\n\
        IT,VPN configured?\n\
        HR,ID issued?\n\
        Finance,Expense card issued?\n\
        HR,Contract signed?\n";

    fn sample() -> Checklist {
        Checklist::from_reader(SAMPLE.as_bytes(), &ChecklistConfig::default()).unwrap()
    }

    #[test]
    fn test_departments_first_seen_order() {
        assert_eq!(sample().departments(), vec!["IT", "HR", "Finance"]);
    }

    #[test]
    fn test_questions_for_preserves_source_order() {
        let checklist = sample();
        assert_eq!(checklist.questions_for("IT"), vec!["Laptop works?", "VPN configured?"]);
        assert_eq!(checklist.questions_for("HR"), vec!["ID issued?", "Contract signed?"]);
    }

    #[test]
    fn test_questions_for_never_leaks_other_departments() {
        let checklist = sample();
        for dept in checklist.departments() {
            let expected: Vec<_> = checklist
                .entries()
                .iter()
                .filter(|e| e.department == dept)
                .map(|e| e.question.clone())
                .collect();
            assert_eq!(checklist.questions_for(&dept), expected);
        }
        assert!(checklist.questions_for("Legal").is_empty());
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let data = "Id, Checklist ,Department,Owner\n1, Badge printed? , Security ,Ann\n";
        let checklist = Checklist::from_reader(data.as_bytes(), &ChecklistConfig::default()).unwrap();
        assert_eq!(checklist.entries(), &[ChecklistEntry::new("Security", "Badge printed?")]);
    }

    #[test]
    fn test_missing_column() {
        let data = "Dept,Checklist\nIT,Laptop works?\n";
        let err = Checklist::from_reader(data.as_bytes(), &ChecklistConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Department"));
    }

    #[test]
    fn test_empty_question_rejected() {
        let data = "Department,Checklist\nIT,\n";
        let err = Checklist::from_reader(data.as_bytes(), &ChecklistConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyField { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let data = "Department,Checklist\nIT,Laptop works?\nIT,Laptop works?\n";
        let err = Checklist::from_reader(data.as_bytes(), &ChecklistConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateQuestion { .. }));
    }

    #[test]
    fn test_same_question_in_two_departments_allowed() {
        let data = "Department,Checklist\nIT,Access granted?\nHR,Access granted?\n";
        let checklist = Checklist::from_reader(data.as_bytes(), &ChecklistConfig::default()).unwrap();
        assert_eq!(checklist.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Checklist::load_path(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Checklist.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(Checklist::load_path(&path).unwrap().len(), 5);
    }

    #[test]
    fn test_from_entries_validates() {
        assert!(Checklist::from_entries(vec![ChecklistEntry::new("IT", " ")]).is_err());
        assert!(Checklist::from_entries(vec![ChecklistEntry::new("IT", "Laptop works?")]).is_ok());
    }
}
