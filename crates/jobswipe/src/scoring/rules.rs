use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;

/// Validated rule set: the closed list of attributes the engine scores against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    version: Option<String>,
    attributes: Vec<AttributeDefinition>,
}

/// Display metadata attached to an attribute by the rule document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDefinition {
    pub attribute: Attribute,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    version: Option<String>,
    attributes: Vec<RuleAttribute>,
}

#[derive(Debug, Deserialize)]
struct RuleAttribute {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Failure to load the rule document. Always fatal for the caller.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("scoring rules not readable at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("scoring rules are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scoring rules define no attributes")]
    Empty,
    #[error("scoring rules reference unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("scoring rules list attribute '{0}' more than once")]
    DuplicateAttribute(Attribute),
}

impl RuleSet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, RuleSetError> {
        let document: RuleDocument = serde_json::from_str(raw)?;
        if document.attributes.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut attributes = Vec::with_capacity(document.attributes.len());
        for entry in document.attributes {
            let attribute: Attribute = entry
                .id
                .parse()
                .map_err(|_| RuleSetError::UnknownAttribute(entry.id.clone()))?;
            if !seen.insert(attribute) {
                return Err(RuleSetError::DuplicateAttribute(attribute));
            }
            attributes.push(AttributeDefinition {
                attribute,
                name: entry.name.unwrap_or_else(|| attribute.label().to_string()),
                description: entry.description,
            });
        }

        Ok(Self {
            version: document.version,
            attributes,
        })
    }

    /// Every known attribute with its default label. Used by tests and the offline CLI.
    pub fn standard() -> Self {
        Self {
            version: None,
            attributes: Attribute::ALL
                .into_iter()
                .map(|attribute| AttributeDefinition {
                    attribute,
                    name: attribute.label().to_string(),
                    description: None,
                })
                .collect(),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn definitions(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().map(|definition| definition.attribute)
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.attributes
            .iter()
            .any(|definition| definition.attribute == attribute)
    }
}
