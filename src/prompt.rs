/*!
 * Interactive questions asked before the text stage.
 *
 * A terminal gets `dialoguer` widgets. Piped input falls back to a plain
 * numbered menu read line by line, which is also what tests drive.
 */

use anyhow::{Result, anyhow};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::io::{BufRead, Write};

use crate::content::Prefix;

const SEARCH_TERM_QUESTION: &str = "Type a Wikipedia search term";
const PREFIX_QUESTION: &str = "Choose one option";

/// Source of the answers that seed a new document
pub trait Prompt {
    /// Non-empty topic to look up
    fn ask_search_term(&mut self) -> Result<String>;

    /// Phrasing prefix, or `None` when the user cancels
    fn ask_prefix(&mut self) -> Result<Option<Prefix>>;
}

/// Prompts rendered with dialoguer on an interactive terminal
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Prompt for TerminalPrompt {
    fn ask_search_term(&mut self) -> Result<String> {
        let term: String = Input::with_theme(&self.theme)
            .with_prompt(SEARCH_TERM_QUESTION)
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("The search term cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(term.trim().to_string())
    }

    fn ask_prefix(&mut self) -> Result<Option<Prefix>> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(PREFIX_QUESTION)
            .items(&Prefix::menu_labels())
            .default(0)
            .interact_opt()?;
        Ok(choice.map(|index| Prefix::ALL[index]))
    }
}

/// Line-oriented prompts over any reader and writer
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Input closed before an answer was given"));
        }
        Ok(line.trim().to_string())
    }

    /// Consume the prompt and give back the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask_search_term(&mut self) -> Result<String> {
        loop {
            write!(self.output, "{}: ", SEARCH_TERM_QUESTION)?;
            self.output.flush()?;
            let answer = self.read_answer()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "The search term cannot be empty.")?;
        }
    }

    fn ask_prefix(&mut self) -> Result<Option<Prefix>> {
        for (number, label) in Prefix::menu_labels().iter().enumerate() {
            writeln!(self.output, "[{}] {}", number + 1, label)?;
        }
        writeln!(self.output, "[0] CANCEL")?;

        loop {
            write!(self.output, "\n{} [1...{} / 0]: ", PREFIX_QUESTION, Prefix::ALL.len())?;
            self.output.flush()?;
            match self.read_answer()?.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= Prefix::ALL.len() => return Ok(Some(Prefix::ALL[n - 1])),
                _ => writeln!(self.output, "Please enter a number between 0 and {}.", Prefix::ALL.len())?,
            }
        }
    }
}
