//! Questionnaire metadata and seeker answers as seen by the scoring engine.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::normalize::{DEFAULT_MAX, DEFAULT_MIN};
use crate::scoring::{AnswerValue, Attribute};

/// Identifier wrapper for questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionnaireId(pub String);

/// Identifier wrapper for seeker profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeekerId(pub String);

/// Question metadata indexed by id, as handed to the attribute scorer.
pub type QuestionLookup = HashMap<QuestionId, Question>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Scale,
    YesNo,
    MultipleChoice,
    Text,
}

/// Input range or choice list attached to a question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl QuestionOptions {
    pub fn scale(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// Valid input range, falling back to `0..=5` for each missing bound.
    pub fn range(&self) -> (f64, f64) {
        (
            self.min.unwrap_or(DEFAULT_MIN),
            self.max.unwrap_or(DEFAULT_MAX),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Which attribute a question feeds and how strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub attribute: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl ScoringRule {
    pub fn new(attribute: Attribute, weight: f64) -> Self {
        Self {
            attribute: attribute.id().to_string(),
            weight,
        }
    }

    /// The attribute this rule targets, or `None` when the id is not a known attribute.
    pub fn target(&self) -> Option<Attribute> {
        self.attribute.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub questionnaire_id: QuestionnaireId,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub options: Option<QuestionOptions>,
    #[serde(default)]
    pub scoring_config: Option<ScoringRule>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Question {
    pub fn range(&self) -> (f64, f64) {
        self.options
            .as_ref()
            .map(QuestionOptions::range)
            .unwrap_or((DEFAULT_MIN, DEFAULT_MAX))
    }
}

/// A questionnaire with its questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_version() -> u32 {
    1
}

impl Questionnaire {
    /// Questions sorted by display order; ties keep their stored order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by_key(|question| question.order);
        questions
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|question| &question.id == id)
    }

    pub fn lookup(&self) -> QuestionLookup {
        self.questions
            .iter()
            .map(|question| (question.id.clone(), question.clone()))
            .collect()
    }
}

/// Stored answer for one (seeker, question) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub seeker_id: SeekerId,
    pub question_id: QuestionId,
    pub value: AnswerValue,
    pub answered_at: DateTime<Utc>,
}

/// Single answer in a submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_without_options_uses_default_range() {
        let question: Question = serde_json::from_value(json!({
            "id": "q-1",
            "questionnaire_id": "general",
            "text": "Have you led a team?",
            "question_type": "yes_no",
            "order": 7,
            "options": {},
            "scoring_config": {"attribute": "leadership"}
        }))
        .expect("question parses");

        assert_eq!(question.range(), (0.0, 5.0));
        let rule = question.scoring_config.expect("rule present");
        assert_eq!(rule.weight, 1.0);
        assert_eq!(rule.target(), Some(Attribute::Leadership));
    }

    #[test]
    fn choice_questions_parse_their_choices() {
        let question: Question = serde_json::from_value(json!({
            "id": "q-11",
            "questionnaire_id": "general",
            "text": "How do you approach ambiguous problems?",
            "question_type": "multiple_choice",
            "options": {"choices": [
                {"value": "break_down", "label": "Break them into smaller parts", "score": 9}
            ]},
            "scoring_config": null
        }))
        .expect("question parses");

        let options = question.options.expect("options present");
        assert_eq!(options.choices[0].score, Some(9.0));
        assert!(question.scoring_config.is_none());
        assert!(question.is_active);
    }

    #[test]
    fn unknown_rule_attribute_has_no_target() {
        let rule = ScoringRule {
            attribute: "charisma".to_string(),
            weight: 1.0,
        };
        assert_eq!(rule.target(), None);
    }
}
