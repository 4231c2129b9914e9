use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scoring dimensions a questionnaire answer can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    TechnicalSkills,
    Communication,
    Leadership,
    ProblemSolving,
    Adaptability,
    Teamwork,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::TechnicalSkills,
        Attribute::Communication,
        Attribute::Leadership,
        Attribute::ProblemSolving,
        Attribute::Adaptability,
        Attribute::Teamwork,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Attribute::TechnicalSkills => "technical_skills",
            Attribute::Communication => "communication",
            Attribute::Leadership => "leadership",
            Attribute::ProblemSolving => "problem_solving",
            Attribute::Adaptability => "adaptability",
            Attribute::Teamwork => "teamwork",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Attribute::TechnicalSkills => "Technical Skills",
            Attribute::Communication => "Communication",
            Attribute::Leadership => "Leadership",
            Attribute::ProblemSolving => "Problem Solving",
            Attribute::Adaptability => "Adaptability",
            Attribute::Teamwork => "Teamwork",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute id '{0}'")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Attribute::ALL
            .into_iter()
            .find(|attribute| attribute.id() == trimmed)
            .ok_or_else(|| UnknownAttribute(value.to_string()))
    }
}
