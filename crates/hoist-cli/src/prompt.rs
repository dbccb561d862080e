//! Terminal implementation of the core `Prompt` port.
//!
//! With the `interactive` feature and a terminal on stdin, the question is
//! asked through `dialoguer`. Otherwise one line is read from stdin: `y` or
//! `yes` (any case) proceeds, anything else (including EOF) declines.

use std::io::{self, BufRead, Write};

use hoist_core::{
    application::ports::Prompt,
    error::{HoistError, HoistResult},
};

#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> HoistResult<bool> {
        #[cfg(feature = "interactive")]
        {
            use std::io::IsTerminal as _;
            if io::stdin().is_terminal() {
                return dialoguer::Confirm::new()
                    .with_prompt(question)
                    .default(false)
                    .interact()
                    .map_err(|e| HoistError::Internal {
                        message: format!("prompt failed: {e}"),
                    });
            }
        }

        let mut stderr = io::stderr();
        write!(stderr, "{question} [y/N] ")
            .and_then(|()| stderr.flush())
            .map_err(prompt_io)?;

        read_answer(io::stdin().lock())
    }
}

fn read_answer(mut input: impl BufRead) -> HoistResult<bool> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(prompt_io)?;
    Ok(is_yes(&line))
}

/// Any answer starting with `y` or `Y` proceeds.
fn is_yes(answer: &str) -> bool {
    answer.starts_with(['y', 'Y'])
}

fn prompt_io(e: io::Error) -> HoistError {
    HoistError::Internal {
        message: format!("failed to read confirmation: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_variants_proceed() {
        for answer in ["y\n", "Y\n", "yes\n", "YES \n", "yep\n", "Yeah\n"] {
            assert!(is_yes(answer), "{answer:?}");
        }
    }

    #[test]
    fn everything_else_declines() {
        for answer in ["", "\n", "n\n", "no\n", " yes\n", "okay\n"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }

    #[test]
    fn eof_declines() {
        assert!(!read_answer(io::empty()).unwrap());
        assert!(read_answer("yes\n".as_bytes()).unwrap());
    }
}
