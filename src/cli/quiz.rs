//! Quiz command: the educational quiz

use anyhow::{bail, Result};

use worldsnap::quiz::{Quiz, QuizQuestion};

use super::{read_line, App};

/// Run the quiz. `answers` are 1-based option numbers; missing ones are
/// read from stdin.
pub fn quiz_command(app: &App, answers: Vec<usize>) -> Result<()> {
    let mut session = app.load_session(None)?;
    let mut quiz = Quiz::new();
    let mut answers = answers.into_iter();

    let outcome = loop {
        let Some(question) = quiz.current_question() else {
            bail!("Quiz has no questions");
        };
        let (number, total) = quiz.position();
        print_question(question, number, total);

        let choice = match answers.next() {
            Some(choice) => choice,
            None => next_stdin_choice(question)?,
        };
        // Out-of-range choices simply count as wrong
        let feedback = quiz.answer(choice.wrapping_sub(1))?;

        if feedback.correct {
            println!("  Correct! +{} points (streak {})", feedback.points, feedback.streak);
        } else {
            println!(
                "  Wrong. The answer was {}.",
                question.options[feedback.correct_answer]
            );
        }
        println!("  {}", feedback.fact);

        if let Some(outcome) = quiz.advance()? {
            break outcome;
        }
    };

    let completion = session.record_quiz(outcome);
    println!(
        "\nQuiz complete: {}/{} correct, +{} XP, +{:.2} tokens",
        outcome.correct_answers,
        quiz.position().1,
        outcome.xp,
        outcome.earned
    );
    if let Some(level_up) = completion.level_up {
        println!("Level up! {} -> {}", level_up.old_level, level_up.new_level);
    }
    if let Some(warning) = completion.persistence_warning {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

fn print_question(question: &QuizQuestion, number: usize, total: usize) {
    println!("\nQuestion {}/{}: {}", number, total, question.question);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
}

fn next_stdin_choice(question: &QuizQuestion) -> Result<usize> {
    let max = question.options.len();
    loop {
        let Some(line) = read_line(&format!("Your answer (1-{}): ", max))? else {
            bail!("Ran out of answers before the quiz finished");
        };
        match line.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n),
            _ => eprintln!("Enter a number between 1 and {}", max),
        }
    }
}
