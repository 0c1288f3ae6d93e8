use serde::{Deserialize, Serialize};
use thiserror::Error;

// Shape requested by QUIZ_FORMAT_SUFFIX (version 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizFormatError {
    #[error("not valid quiz JSON: {0}")]
    Parse(String),

    #[error("quiz contains no questions")]
    Empty,

    #[error("question {0} has empty text")]
    BlankQuestion(usize),

    #[error("question {0} needs at least two options")]
    TooFewOptions(usize),

    #[error("answer of question {0} is not one of its options")]
    AnswerNotInOptions(usize),
}

/// Parse and check a model reply against the quiz contract.
pub fn parse_quiz(text: &str) -> Result<Quiz, QuizFormatError> {
    let quiz: Quiz =
        serde_json::from_str(text.trim()).map_err(|e| QuizFormatError::Parse(e.to_string()))?;

    if quiz.quiz.is_empty() {
        return Err(QuizFormatError::Empty);
    }

    for (i, q) in quiz.quiz.iter().enumerate() {
        // 1-based in messages
        let n = i + 1;
        if q.question.trim().is_empty() {
            return Err(QuizFormatError::BlankQuestion(n));
        }
        if q.options.len() < 2 {
            return Err(QuizFormatError::TooFewOptions(n));
        }
        if !q.options.iter().any(|o| o == &q.answer) {
            return Err(QuizFormatError::AnswerNotInOptions(n));
        }
    }

    Ok(quiz)
}
