use jobswipe::config::ScoringConfig;
use jobswipe::error::AppError;
use jobswipe::recruiting::{Catalog, InMemoryRecruitingRepository};
use jobswipe::scoring::{RuleSet, ScoringEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ScoringEngine>,
}

/// Loads the rule set. Any failure here aborts startup.
pub(crate) fn load_engine(rules_path: &Path) -> Result<Arc<ScoringEngine>, AppError> {
    let rules = RuleSet::from_path(rules_path)?;
    info!(
        path = %rules_path.display(),
        version = rules.version().unwrap_or("unversioned"),
        attributes = rules.definitions().len(),
        "scoring rules loaded"
    );
    Ok(Arc::new(ScoringEngine::new(rules)))
}

pub(crate) fn bootstrap_repository(
    config: &ScoringConfig,
) -> Result<InMemoryRecruitingRepository, AppError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = Catalog::from_path(path)?;
            info!(
                path = %path.display(),
                questions = catalog.questionnaire.questions.len(),
                roles = catalog.roles.len(),
                "catalog seeded"
            );
            Ok(InMemoryRecruitingRepository::from_catalog(catalog))
        }
        None => {
            warn!("APP_CATALOG not set; starting without a questionnaire or role configurations");
            Ok(InMemoryRecruitingRepository::default())
        }
    }
}
