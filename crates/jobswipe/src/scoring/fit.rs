use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::normalize::weighted_mean;
use super::stats::StatsSnapshot;

/// Employer-defined weights keyed by attribute id. Weights need not sum to one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleWeightVector(BTreeMap<String, f64>);

impl RoleWeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: Attribute, weight: f64) -> Self {
        self.0.insert(attribute.id().to_string(), weight);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(id, weight)| (id.as_str(), *weight))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for RoleWeightVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fit score per role name, each in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitScoreSet(BTreeMap<String, f64>);

impl FitScoreSet {
    pub fn get(&self, role_name: &str) -> Option<f64> {
        self.0.get(role_name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(role, score)| (role.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for FitScoreSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Weighted mean of the snapshot scores the role cares about, rounded to two decimals.
///
/// Attributes the snapshot does not measure drop out of both the numerator and the
/// denominator rather than counting as zero. Non-positive weights are ignored.
pub fn fit_score(stats: &StatsSnapshot, weights: &RoleWeightVector) -> f64 {
    weighted_mean(weights.iter().filter_map(|(id, weight)| {
        if !weight.is_finite() || weight <= 0.0 {
            return None;
        }
        let attribute: Attribute = id.parse().ok()?;
        let score = stats.get(attribute)?;
        Some((score, weight))
    }))
}

/// Runs [`fit_score`] for every `(role name, weights)` pair.
pub fn compute_fit_scores<'a, I>(stats: &StatsSnapshot, roles: I) -> FitScoreSet
where
    I: IntoIterator<Item = (&'a str, &'a RoleWeightVector)>,
{
    roles
        .into_iter()
        .map(|(role_name, weights)| (role_name.to_string(), fit_score(stats, weights)))
        .collect()
}
