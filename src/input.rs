//! Console input behind an injectable source, plus the validated prompt loops.
//!
//! Every interactive read goes through [`InputSource`] so the dialogs can be
//! driven by a finite scripted sequence in tests instead of blocking on a
//! terminal. The validation loops mirror the instrument tool's contract:
//! invalid input is absorbed with a diagnostic and a re-prompt, never
//! surfaced to the caller.

use std::collections::VecDeque;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::Error;

/// A line-oriented source of user input.
pub trait InputSource {
    /// Read one line, displaying `prompt`. Returns [`Error::InputClosed`]
    /// when the source has no more lines to give.
    fn read_line(&mut self, prompt: &str) -> Result<String, Error>;
}

/// Interactive console input (rustyline, with line editing).
pub struct ConsoleInput {
    editor: DefaultEditor,
}

impl ConsoleInput {
    pub fn new() -> Result<Self, Error> {
        let editor = DefaultEditor::new().map_err(|e| Error::Console(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl InputSource for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            // Ctrl-C / Ctrl-D end the session rather than looping forever.
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(Error::InputClosed),
            Err(e) => Err(Error::Console(e.to_string())),
        }
    }
}

/// A finite, pre-recorded input sequence. Exhaustion is an explicit end
/// condition (`InputClosed`), not a block.
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, Error> {
        self.lines.pop_front().ok_or(Error::InputClosed)
    }
}

/// Prompt until the user supplies a positive integer, optionally bounded by
/// `max` (inclusive). Non-numeric, fractional, non-positive, and
/// out-of-range entries each get their own diagnostic and a re-prompt.
pub fn read_valid_number(input: &mut dyn InputSource, max: Option<usize>) -> Result<usize, Error> {
    loop {
        if let Some(max) = max {
            println!("The maximum number is: {max}");
        }
        let line = input.read_line("Enter number: ")?;

        let value: f64 = match line.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Please enter an integer value.");
                continue;
            }
        };

        let mut valid = true;
        if value.fract() != 0.0 || !value.is_finite() {
            println!("Please enter an integer value.");
            valid = false;
        }
        let number = value as i64;
        if number <= 0 {
            println!("Please enter a value greater than 0.");
            valid = false;
        }
        if let Some(max) = max {
            if number > max as i64 {
                println!("Please enter a number less than {max}");
                valid = false;
            }
        }

        if valid {
            return Ok(number as usize);
        }
    }
}

/// Prompt until the user answers yes or no (case-insensitive, `y`/`n`
/// accepted). Returns `true` for yes.
pub fn read_yes_no(input: &mut dyn InputSource) -> Result<bool, Error> {
    loop {
        let choice = input.read_line("Enter choice: ")?.trim().to_lowercase();
        match choice.as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => println!("Invalid response. Please type 'yes' or 'no'."),
        }
    }
}
