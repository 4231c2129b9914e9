//! Bulk answer import from `question_id,value` CSV exports.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::questionnaire::{AnswerSubmission, QuestionId};
use crate::scoring::AnswerValue;

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingQuestionId { row: usize },
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answer export: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answer CSV data: {}", err),
            AnswerImportError::MissingQuestionId { row } => {
                write!(f, "answer row {} has no question_id", row)
            }
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
            AnswerImportError::MissingQuestionId { .. } => None,
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub fn import_answers_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<AnswerSubmission>, AnswerImportError> {
    let file = std::fs::File::open(path)?;
    parse_answers(file)
}

/// Reads one submission per row. Blank values are skipped; numeric cells become numbers and
/// everything else is kept as text.
pub fn parse_answers<R: Read>(reader: R) -> Result<Vec<AnswerSubmission>, AnswerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut submissions = Vec::new();

    for (index, record) in csv_reader.deserialize::<AnswerRow>().enumerate() {
        let row = record?;
        if row.question_id.is_empty() {
            return Err(AnswerImportError::MissingQuestionId { row: index + 1 });
        }
        let Some(raw) = row.value else {
            continue;
        };

        let value = match raw.parse::<f64>() {
            Ok(number) => AnswerValue::Number(number),
            Err(_) => AnswerValue::Text(raw),
        };
        submissions.push(AnswerSubmission {
            question_id: QuestionId(row.question_id),
            value,
        });
    }

    Ok(submissions)
}
