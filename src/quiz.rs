//! Educational quiz mode
//!
//! Multiple-choice geography questions. Consecutive correct answers raise a
//! points multiplier (+10% per answer, capped at 3x). The finished quiz is
//! applied to the player's stats as tokens plus XP.

use serde::Serialize;

use crate::error::{GameError, GameResult};

/// Base points for a correct answer
pub const BASE_POINTS: u32 = 100;

/// Extra points per streak step (10% of the base)
pub const STREAK_BONUS_POINTS: u32 = 10;

/// Points ceiling (3x multiplier)
pub const MAX_POINTS: u32 = 300;

/// Tokens earned per correct answer
pub const TOKENS_PER_CORRECT_ANSWER: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: &'static str,
    pub options: [&'static str; 4],
    /// Index into `options`
    pub correct_answer: usize,
    pub fact: &'static str,
}

pub static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: 1,
        question: "Which country has the most islands in the world?",
        options: ["Philippines", "Indonesia", "Sweden", "Japan"],
        correct_answer: 2,
        fact: "Sweden has over 267,000 islands, more than any other country!",
    },
    QuizQuestion {
        id: 2,
        question: "What is the smallest country in the world?",
        options: ["Monaco", "Vatican City", "San Marino", "Liechtenstein"],
        correct_answer: 1,
        fact: "Vatican City is only 0.44 km² in area!",
    },
    QuizQuestion {
        id: 3,
        question: "Which desert is the largest in the world?",
        options: ["Sahara", "Arabian", "Gobi", "Antarctic"],
        correct_answer: 3,
        fact: "The Antarctic desert is the largest, covering 14 million km²!",
    },
];

/// Points for a correct answer given the current answer streak.
///
/// Equivalent to `100 * min(1 + 0.1 * streak, 3)` without floating point.
pub fn points_for_streak(streak: u32) -> u32 {
    BASE_POINTS
        .saturating_add(STREAK_BONUS_POINTS.saturating_mul(streak))
        .min(MAX_POINTS)
}

/// Feedback for a single answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: usize,
    pub points: u32,
    pub streak: u32,
    pub fact: &'static str,
}

/// What a finished quiz is worth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub correct_answers: u32,
    pub earned: f64,
    /// Total points, credited as XP
    pub xp: u32,
}

/// A quiz run over a fixed question list
#[derive(Debug, Clone)]
pub struct Quiz {
    questions: &'static [QuizQuestion],
    current: usize,
    answered: bool,
    finished: bool,
    streak: u32,
    score: u32,
    correct_answers: u32,
    earned: f64,
}

impl Quiz {
    pub fn new() -> Self {
        Self::with_questions(QUESTIONS)
    }

    pub fn with_questions(questions: &'static [QuizQuestion]) -> Self {
        Self {
            questions,
            current: 0,
            answered: false,
            finished: questions.is_empty(),
            streak: 0,
            score: 0,
            correct_answers: 0,
            earned: 0.0,
        }
    }

    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// (1-based question number, total questions)
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.questions.len())
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Answer the current question. Each question can be answered once.
    pub fn answer(&mut self, choice: usize) -> GameResult<AnswerOutcome> {
        if self.answered {
            return Err(GameError::QuizOutOfOrder);
        }
        let question = self.current_question().ok_or(GameError::QuizOutOfOrder)?;
        self.answered = true;

        let correct = choice == question.correct_answer;
        let points = if correct {
            let points = points_for_streak(self.streak);
            self.score += points;
            self.streak += 1;
            self.correct_answers += 1;
            self.earned += TOKENS_PER_CORRECT_ANSWER;
            points
        } else {
            self.streak = 0;
            0
        };

        Ok(AnswerOutcome {
            correct,
            correct_answer: question.correct_answer,
            points,
            streak: self.streak,
            fact: question.fact,
        })
    }

    /// Move past an answered question.
    ///
    /// Returns `Some(outcome)` once the last question has been passed.
    pub fn advance(&mut self) -> GameResult<Option<QuizOutcome>> {
        if self.finished || !self.answered {
            return Err(GameError::QuizOutOfOrder);
        }

        self.answered = false;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            return Ok(None);
        }

        self.finished = true;
        Ok(Some(QuizOutcome {
            correct_answers: self.correct_answers,
            earned: self.earned,
            xp: self.score,
        }))
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}
