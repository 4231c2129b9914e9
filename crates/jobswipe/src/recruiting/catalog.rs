use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::questionnaire::{QuestionId, Questionnaire};

use super::domain::RoleConfig;

/// Seed document: the questionnaire seekers answer and the roles offerers can select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub questionnaire: Questionnaire,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not readable at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question '{0}' appears more than once")]
    DuplicateQuestion(String),
    #[error("question '{question}' belongs to questionnaire '{found}', expected '{expected}'")]
    ForeignQuestion {
        question: String,
        found: String,
        expected: String,
    },
    #[error("role '{0}' is defined more than once")]
    DuplicateRole(String),
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut question_ids: BTreeSet<&QuestionId> = BTreeSet::new();
        for question in &self.questionnaire.questions {
            if !question_ids.insert(&question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id.0.clone()));
            }
            if question.questionnaire_id != self.questionnaire.id {
                return Err(CatalogError::ForeignQuestion {
                    question: question.id.0.clone(),
                    found: question.questionnaire_id.0.clone(),
                    expected: self.questionnaire.id.0.clone(),
                });
            }
        }

        let mut role_ids = BTreeSet::new();
        let mut role_names = BTreeSet::new();
        for role in &self.roles {
            if !role_ids.insert(&role.id) {
                return Err(CatalogError::DuplicateRole(role.id.0.clone()));
            }
            if !role_names.insert(role.role_name.as_str()) {
                return Err(CatalogError::DuplicateRole(role.role_name.clone()));
            }
        }
        Ok(())
    }
}
