//! Quiz answer normalisation and evaluation.
//!
//! Clients send answers as option indices, letters, or option text. They are
//! normalised here into zero-based option indices before evaluation, and
//! evaluation always compares indices, never option text (two options may
//! share the same text).

use serde::Deserialize;

use crate::error::CoreError;
use crate::store::Question;

/// One submitted answer, in any of the shapes clients send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    /// A zero-based option index.
    Index(u64),
    /// The option text itself, or failing that a letter (`"A"`) or a
    /// decimal index (`"2"`).
    Text(String),
}

/// Result of grading one quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub all_correct: bool,
    pub correct_count: usize,
    pub total_questions: usize,
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Interpret a letter or decimal index. Letters are case-insensitive and
/// `A` is index 0.
fn letter_or_index(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some((c.to_ascii_uppercase() as u8 - b'A') as usize);
        }
    }
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    None
}

/// Parse a question's stored correct-answer marker into an option index.
///
/// An unreadable marker, or one pointing past the option list, means the
/// catalog is corrupt. The caller must not guess.
pub fn correct_option_index(question: &Question) -> Result<usize, CoreError> {
    let index = letter_or_index(&question.answer).ok_or_else(|| {
        CoreError::InvalidCatalogData(format!(
            "Question {} has unreadable answer marker '{}'",
            question.id, question.answer
        ))
    })?;

    if index >= question.options.len() {
        return Err(CoreError::InvalidCatalogData(format!(
            "Question {} answer marker '{}' is outside its {} options",
            question.id,
            question.answer,
            question.options.len()
        )));
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Normalise one submitted answer to a zero-based option index.
pub fn normalize_answer(question: &Question, input: &AnswerInput) -> Result<usize, CoreError> {
    let option_count = question.options.len();

    let index = match input {
        AnswerInput::Index(i) => usize::try_from(*i).unwrap_or(usize::MAX),
        AnswerInput::Text(text) => {
            let wanted = text.trim();
            let mut matches = question
                .options
                .iter()
                .enumerate()
                .filter(|(_, option)| option.trim() == wanted)
                .map(|(i, _)| i);
            // Exact option text wins over the letter/index reading.
            match (matches.next(), matches.next()) {
                (Some(i), None) => i,
                (Some(_), Some(_)) => {
                    return Err(CoreError::Validation(format!(
                        "Answer '{wanted}' matches more than one option of question {}",
                        question.id
                    )))
                }
                (None, _) => letter_or_index(wanted).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Answer '{wanted}' does not match any option of question {}",
                        question.id
                    ))
                })?,
            }
        }
    };

    if index >= option_count {
        return Err(CoreError::Validation(format!(
            "Answer index {index} is out of range for question {} ({option_count} options)",
            question.id
        )));
    }
    Ok(index)
}

/// Normalise a submission's answers, one slot per question in order.
///
/// `None` entries (and missing trailing entries) stay unanswered.
pub fn normalize_answers(
    questions: &[Question],
    answers: &[Option<AnswerInput>],
) -> Result<Vec<Option<usize>>, CoreError> {
    if answers.len() > questions.len() {
        return Err(CoreError::Validation(format!(
            "Received {} answers for {} questions",
            answers.len(),
            questions.len()
        )));
    }

    questions
        .iter()
        .enumerate()
        .map(|(i, question)| match answers.get(i) {
            Some(Some(input)) => normalize_answer(question, input).map(Some),
            _ => Ok(None),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Grade a submission against the questions it answers.
///
/// A video without questions trivially passes with zero correct answers.
/// Every question's marker is validated, answered or not.
pub fn evaluate(questions: &[Question], selected: &[Option<usize>]) -> Result<QuizOutcome, CoreError> {
    let mut correct_count = 0usize;

    for (i, question) in questions.iter().enumerate() {
        let correct = correct_option_index(question)?;
        if selected.get(i).copied().flatten() == Some(correct) {
            correct_count += 1;
        }
    }

    Ok(QuizOutcome {
        all_correct: correct_count == questions.len(),
        correct_count,
        total_questions: questions.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
