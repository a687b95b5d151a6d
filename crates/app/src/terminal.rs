use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use quiz_core::model::{Question, SessionResult};
use services::{QuizError, QuizHost};

/// Line-oriented prompt over any reader/writer pair.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_owned())
    }

    /// Show a question and return the zero-based option the user picked.
    pub fn ask_choice(
        &mut self,
        index: usize,
        total: usize,
        question: &Question,
    ) -> anyhow::Result<usize> {
        writeln!(self.output, "\nQuestion {} of {total}: {}", index + 1, question.prompt())?;
        for (n, option) in question.options().iter().enumerate() {
            writeln!(self.output, "  {}) {option}", n + 1)?;
        }

        let count = question.options().len();
        loop {
            write!(self.output, "Your answer [1-{count}]: ")?;
            self.output.flush()?;
            match self.read_line()?.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Please enter a number between 1 and {count}.")?,
            }
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool> {
        write!(self.output, "{prompt} [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    pub fn show_result(&mut self, result: &SessionResult) -> anyhow::Result<()> {
        writeln!(self.output, "\nTest completed")?;
        writeln!(
            self.output,
            "Your score: {} / {} ({}%)",
            result.score(),
            result.total(),
            result.percent()
        )?;

        if !result.missed().is_empty() {
            writeln!(self.output, "\nIncorrect questions:")?;
            for missed in result.missed() {
                writeln!(self.output, "  Question: {}", missed.prompt)?;
                writeln!(self.output, "    Your answer:    {}", missed.selected_answer)?;
                writeln!(self.output, "    Correct answer: {}", missed.correct_answer)?;
            }
        }
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Walk the user through every question of the host's session, then submit.
pub fn run_quiz<R: BufRead, W: Write>(
    host: &mut QuizHost,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()> {
    let view = host.view().ok_or(QuizError::NoSession)?;
    if view.questions.is_empty() {
        terminal.line("This flashcard set is empty.")?;
    }

    let total = view.questions.len();
    for (index, question) in view.questions.iter().enumerate() {
        let choice = terminal.ask_choice(index, total, question)?;
        host.select(index, &question.options()[choice])?;
    }

    let result = host.submit()?;
    terminal.show_result(result)
}
