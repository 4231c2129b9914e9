use crate::questionnaire::{Answer, QuestionLookup};

use super::fit::{compute_fit_scores, FitScoreSet, RoleWeightVector};
use super::rules::RuleSet;
use super::stats::{compute_snapshot, StatsSnapshot};

/// Stateless evaluator bound to the rule set loaded at startup.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    rules: RuleSet,
}

impl ScoringEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn stats(&self, answers: &[Answer], questions: &QuestionLookup) -> StatsSnapshot {
        compute_snapshot(&self.rules, answers, questions)
    }

    pub fn fit_scores<'a, I>(&self, stats: &StatsSnapshot, roles: I) -> FitScoreSet
    where
        I: IntoIterator<Item = (&'a str, &'a RoleWeightVector)>,
    {
        compute_fit_scores(stats, roles)
    }

    /// Full recomputation: snapshot first, then every role against it.
    pub fn evaluate<'a, I>(
        &self,
        answers: &[Answer],
        questions: &QuestionLookup,
        roles: I,
    ) -> (StatsSnapshot, FitScoreSet)
    where
        I: IntoIterator<Item = (&'a str, &'a RoleWeightVector)>,
    {
        let stats = self.stats(answers, questions);
        let fit_scores = self.fit_scores(&stats, roles);
        (stats, fit_scores)
    }
}
