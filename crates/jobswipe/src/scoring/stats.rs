use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::attribute::Attribute;
use super::normalize::{normalize, weighted_mean};
use super::rules::RuleSet;
use crate::questionnaire::{Answer, QuestionLookup};

/// Attribute scores in `[0, 100]`, one per rule-set attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsSnapshot(BTreeMap<Attribute, f64>);

impl StatsSnapshot {
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.0.get(&attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        self.0.iter().map(|(attribute, score)| (*attribute, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Attribute, f64)> for StatsSnapshot {
    fn from_iter<I: IntoIterator<Item = (Attribute, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Weighted mean of the normalized answers that feed `attribute`, rounded to two decimals.
///
/// Answers without question metadata, without a scoring rule, with a rule for another
/// attribute, with an unusable weight, or without a numeric value contribute nothing.
pub fn attribute_score(answers: &[Answer], questions: &QuestionLookup, attribute: Attribute) -> f64 {
    weighted_mean(
        answers
            .iter()
            .filter_map(|answer| contribution(answer, questions, attribute)),
    )
}

/// Scores every attribute of the rule set independently.
pub fn compute_snapshot(
    rules: &RuleSet,
    answers: &[Answer],
    questions: &QuestionLookup,
) -> StatsSnapshot {
    rules
        .attributes()
        .map(|attribute| (attribute, attribute_score(answers, questions, attribute)))
        .collect()
}

fn contribution(
    answer: &Answer,
    questions: &QuestionLookup,
    attribute: Attribute,
) -> Option<(f64, f64)> {
    let question = questions.get(&answer.question_id)?;
    let rule = question.scoring_config.as_ref()?;
    if rule.target() != Some(attribute) {
        return None;
    }

    if !rule.weight.is_finite() || rule.weight < 0.0 {
        trace!(question = %answer.question_id.0, weight = rule.weight, "skipping answer with unusable weight");
        return None;
    }

    let Some(value) = answer.value.numeric_value() else {
        trace!(question = %answer.question_id.0, %attribute, "skipping non-numeric answer");
        return None;
    };

    let (min, max) = question.range();
    Some((normalize(value, min, max), rule.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{
        Question, QuestionId, QuestionOptions, QuestionType, QuestionnaireId, ScoringRule,
        SeekerId,
    };
    use crate::scoring::AnswerValue;
    use chrono::Utc;
    use serde_json::json;

    fn question(id: &str, range: Option<(f64, f64)>, rule: Option<ScoringRule>) -> Question {
        Question {
            id: QuestionId(id.to_string()),
            questionnaire_id: QuestionnaireId("general".to_string()),
            text: format!("question {id}"),
            question_type: QuestionType::Scale,
            order: 0,
            options: range.map(|(min, max)| QuestionOptions::scale(min, max)),
            scoring_config: rule,
            is_active: true,
        }
    }

    fn answer(question_id: &str, value: AnswerValue) -> Answer {
        Answer {
            seeker_id: SeekerId("seeker-1".to_string()),
            question_id: QuestionId(question_id.to_string()),
            value,
            answered_at: Utc::now(),
        }
    }

    fn lookup(questions: Vec<Question>) -> QuestionLookup {
        questions
            .into_iter()
            .map(|question| (question.id.clone(), question))
            .collect()
    }

    #[test]
    fn single_scale_answer_normalizes_across_range() {
        let questions = lookup(vec![question(
            "q1",
            Some((1.0, 5.0)),
            Some(ScoringRule::new(Attribute::TechnicalSkills, 1.0)),
        )]);
        let answers = vec![answer("q1", AnswerValue::Number(4.0))];

        assert_eq!(
            attribute_score(&answers, &questions, Attribute::TechnicalSkills),
            75.0
        );
    }

    #[test]
    fn weights_near_the_float_limit_stay_in_range() {
        let questions = lookup(vec![
            question(
                "q1",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::TechnicalSkills, 1e308)),
            ),
            question(
                "q2",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::TechnicalSkills, f64::MAX)),
            ),
        ]);
        let single = vec![answer("q1", AnswerValue::Number(4.0))];
        let both = vec![
            answer("q1", AnswerValue::Number(5.0)),
            answer("q2", AnswerValue::Number(5.0)),
        ];

        assert_eq!(
            attribute_score(&single, &questions, Attribute::TechnicalSkills),
            75.0
        );
        let score = attribute_score(&both, &questions, Attribute::TechnicalSkills);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn weights_combine_contributions() {
        let questions = lookup(vec![
            question(
                "q1",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::TechnicalSkills, 2.0)),
            ),
            question(
                "q2",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::TechnicalSkills, 1.0)),
            ),
        ]);
        let answers = vec![
            answer("q1", AnswerValue::Number(5.0)),
            answer("q2", AnswerValue::Number(3.0)),
        ];

        assert_eq!(
            attribute_score(&answers, &questions, Attribute::TechnicalSkills),
            83.33
        );
    }

    #[test]
    fn answers_for_other_attributes_are_ignored() {
        let questions = lookup(vec![
            question(
                "q1",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::TechnicalSkills, 1.0)),
            ),
            question(
                "q2",
                Some((1.0, 5.0)),
                Some(ScoringRule::new(Attribute::Communication, 1.0)),
            ),
        ]);
        let answers = vec![
            answer("q1", AnswerValue::Number(4.0)),
            answer("q2", AnswerValue::Number(2.0)),
        ];

        assert_eq!(
            attribute_score(&answers, &questions, Attribute::TechnicalSkills),
            75.0
        );
        assert_eq!(
            attribute_score(&answers, &questions, Attribute::Communication),
            25.0
        );
    }

    #[test]
    fn no_contributing_answers_scores_zero() {
        let questions = lookup(vec![question(
            "q1",
            None,
            Some(ScoringRule::new(Attribute::Leadership, 1.0)),
        )]);

        assert_eq!(attribute_score(&[], &questions, Attribute::Leadership), 0.0);
        let text_only = vec![answer("q1", AnswerValue::from("I led a team once"))];
        assert_eq!(
            attribute_score(&text_only, &questions, Attribute::Leadership),
            0.0
        );
    }

    #[test]
    fn unscoreable_answers_are_skipped_without_affecting_others() {
        let questions = lookup(vec![
            question(
                "scored",
                None,
                Some(ScoringRule::new(Attribute::Teamwork, 1.0)),
            ),
            question("unrated", None, None),
            question(
                "unknown-attribute",
                None,
                Some(ScoringRule {
                    attribute: "charisma".to_string(),
                    weight: 1.0,
                }),
            ),
            question(
                "negative-weight",
                None,
                Some(ScoringRule::new(Attribute::Teamwork, -2.0)),
            ),
        ]);
        let structured = serde_json::from_value(json!({"value": 4, "display": "4/5"}))
            .expect("structured answer");
        let answers = vec![
            answer("scored", structured),
            answer("unrated", AnswerValue::Number(5.0)),
            answer("unknown-attribute", AnswerValue::Number(5.0)),
            answer("negative-weight", AnswerValue::Number(0.0)),
            answer("missing-question", AnswerValue::Number(0.0)),
        ];

        assert_eq!(
            attribute_score(&answers, &questions, Attribute::Teamwork),
            80.0
        );
    }

    #[test]
    fn numeric_strings_use_default_range() {
        let questions = lookup(vec![question(
            "q1",
            None,
            Some(ScoringRule::new(Attribute::Adaptability, 0.5)),
        )]);
        let answers = vec![answer("q1", AnswerValue::from("2.5"))];

        assert_eq!(
            attribute_score(&answers, &questions, Attribute::Adaptability),
            50.0
        );
    }

    #[test]
    fn snapshot_covers_every_rule_attribute() {
        let rules = RuleSet::from_json(
            r#"{"attributes": [{"id": "technical_skills"}, {"id": "teamwork"}]}"#,
        )
        .expect("rules parse");
        let questions = lookup(vec![question(
            "q1",
            Some((1.0, 5.0)),
            Some(ScoringRule::new(Attribute::TechnicalSkills, 1.0)),
        )]);
        let answers = vec![answer("q1", AnswerValue::Number(5.0))];

        let snapshot = compute_snapshot(&rules, &answers, &questions);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(Attribute::TechnicalSkills), Some(100.0));
        assert_eq!(snapshot.get(Attribute::Teamwork), Some(0.0));
        assert_eq!(snapshot.get(Attribute::Leadership), None);
    }
}
