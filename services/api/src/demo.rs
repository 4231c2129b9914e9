use crate::infra::load_engine;
use clap::Args;
use jobswipe::config::DEFAULT_SCORING_RULES_PATH;
use jobswipe::error::AppError;
use jobswipe::questionnaire::{AnswerSubmission, SeekerId};
use jobswipe::recruiting::{
    import_answers_from_path, Catalog, InMemoryRecruitingRepository, OffererId, ProfileUpdate,
    RecruitingService, SeekerStatsView,
};
use jobswipe::scoring::{AnswerValue, ScoringEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CATALOG_PATH: &str = "config/catalog.json";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export with `question_id,value` rows for a single seeker
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Catalog JSON providing the questionnaire and role configurations
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    pub(crate) catalog: PathBuf,
    /// Rule set JSON listing the scored attributes
    #[arg(long, default_value = DEFAULT_SCORING_RULES_PATH)]
    pub(crate) rules: PathBuf,
    /// Print the stats payload as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Catalog JSON providing the questionnaire and role configurations
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    pub(crate) catalog: PathBuf,
    /// Rule set JSON listing the scored attributes
    #[arg(long, default_value = DEFAULT_SCORING_RULES_PATH)]
    pub(crate) rules: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        catalog,
        rules,
        json,
    } = args;

    let service = seeded_service(&catalog, &rules)?;
    let submissions = import_answers_from_path(&answers)?;
    let seeker_id = SeekerId("cli".to_string());

    let receipt = service.submit_answers(&seeker_id, submissions)?;
    let view = service.seeker_stats(&seeker_id, true)?;

    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Stats payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Scored {} ({} of {} questions answered, {:.2}% complete)",
        answers.display(),
        receipt.answered_questions,
        receipt.total_questions,
        receipt.completion_percent
    );
    render_stats(service.engine(), &view);
    Ok(())
}

/// Raw answer values on the seeded 1-10 scales for the sixteen questions, in display order.
const DEMO_SEEKERS: [(&str, &str, &str, [f64; 16]); 3] = [
    (
        "seeker-001",
        "Senior Software Engineer - Python Expert",
        "San Francisco, CA",
        [5.0, 5.0, 5.0, 4.0, 4.0, 4.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0, 5.0, 4.0, 4.0],
    ),
    (
        "seeker-002",
        "Sales Professional - B2B SaaS",
        "New York, NY",
        [3.0, 3.0, 3.0, 5.0, 5.0, 5.0, 2.0, 2.0, 2.0, 5.0, 5.0, 3.0, 3.0, 3.0, 5.0, 5.0],
    ),
    (
        "seeker-003",
        "Engineering Team Lead - 10+ years",
        "Austin, TX",
        [4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 4.0],
    ),
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = seeded_service(&args.catalog, &args.rules)?;
    let questionnaire = service.questionnaire()?;

    println!(
        "JobSwipe demo: {} ({} questions)",
        questionnaire.name,
        questionnaire.questions.len()
    );

    println!("\nSeekers");
    for (id, headline, location, pattern) in DEMO_SEEKERS {
        let seeker_id = SeekerId(id.to_string());
        let submissions = questionnaire
            .questions
            .iter()
            .zip(pattern)
            .map(|(question, value)| AnswerSubmission {
                question_id: question.id.clone(),
                value: AnswerValue::Number(value),
            })
            .collect();
        let receipt = service.submit_answers(&seeker_id, submissions)?;
        service.update_profile(
            &seeker_id,
            ProfileUpdate {
                headline: Some(headline.to_string()),
                location: Some(location.to_string()),
                bio: None,
            },
        )?;
        let view = service.seeker_stats(&seeker_id, true)?;
        println!(
            "- {} ({}) {:.0}% complete",
            headline, location, receipt.completion_percent
        );
        render_stats(service.engine(), &view);
    }

    let offerer = service.register_offerer("TechCorp")?;
    println!("\nOfferer {} ({})", offerer.company, offerer.id.0);
    for role in service.role_configs()? {
        service.select_role(&offerer.id, &role.id)?;
        let page = service.feed(&offerer.id, None, None)?;
        println!("Feed for {}:", role.role_name);
        for (rank, card) in page.candidates.iter().enumerate() {
            println!(
                "  {}. {} - fit {:.2}",
                rank + 1,
                card.headline.as_deref().unwrap_or(&card.seeker_id.0),
                card.fit_score
            );
        }
    }

    swipe_through_feed(&service, &offerer.id)
}

fn swipe_through_feed(
    service: &RecruitingService<InMemoryRecruitingRepository>,
    offerer_id: &OffererId,
) -> Result<(), AppError> {
    let page = service.feed(offerer_id, None, None)?;
    let Some((last, liked)) = page.candidates.split_last() else {
        println!("\nNo candidates available to swipe");
        return Ok(());
    };

    println!("\nSwipes");
    for card in liked {
        let receipt = service.swipe(offerer_id, &card.seeker_id, "like")?;
        println!("- {}: {}", card.seeker_id.0, receipt.message);
    }
    let receipt = service.swipe(offerer_id, &last.seeker_id, "pass")?;
    println!("- {}: {}", last.seeker_id.0, receipt.message);

    if let Some(top) = liked.first() {
        service.annotate(
            offerer_id,
            &top.seeker_id,
            Some("Schedule a technical screen".to_string()),
        )?;
    }

    let shortlist = service.shortlist(offerer_id)?;
    println!("\nShortlist ({} candidates)", shortlist.total);
    for entry in &shortlist.candidates {
        println!(
            "- {} | fit {:.2} | note: {}",
            entry.headline.as_deref().unwrap_or(&entry.seeker_id.0),
            entry.fit_score,
            entry.note.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn seeded_service(
    catalog: &Path,
    rules: &Path,
) -> Result<RecruitingService<InMemoryRecruitingRepository>, AppError> {
    let engine = load_engine(rules)?;
    let catalog = Catalog::from_path(catalog)?;
    let repository = Arc::new(InMemoryRecruitingRepository::from_catalog(catalog));
    Ok(RecruitingService::new(repository, engine))
}

fn render_stats(engine: &ScoringEngine, view: &SeekerStatsView) {
    for definition in engine.rules().definitions() {
        let score = view.stats.get(definition.attribute).unwrap_or(0.0);
        println!("    {:<18} {:>6.2}", definition.name, score);
    }
    if let Some(fit_scores) = &view.fit_scores {
        for (role, score) in fit_scores.iter() {
            println!("    fit: {:<18} {:>6.2}", role, score);
        }
    }
}
