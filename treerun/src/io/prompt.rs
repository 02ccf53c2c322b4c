//! Sources of prompt answers.
//!
//! The [`SelectionSource`] trait decouples the selection engine from where
//! answers come from. [`ConsoleSource`] reads standard input; [`ScriptedSource`]
//! replays a fixed list of answers (batch runs and tests).

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::Halt;

/// Abstraction over interactive input.
pub trait SelectionSource {
    /// Show `prompt` and read one answer with its line terminator removed.
    ///
    /// Returns `Ok(None)` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompts on stdout and reads lines from stdin.
pub struct ConsoleSource<R> {
    input: R,
}

impl ConsoleSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ConsoleSource<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> SelectionSource for ConsoleSource<R> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}").context("write prompt")?;
        stdout.flush().context("flush prompt")?;

        let mut line = String::new();
        let n = match self.input.read_line(&mut line) {
            Ok(n) => n,
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                return Err(Halt::SelectionAborted.into());
            }
        };
        if n == 0 {
            // Keep following output off the prompt line.
            writeln!(stdout).context("write newline")?;
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}

/// Replays queued answers; end of input once the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl SelectionSource for ScriptedSource {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front();
        debug!(prompt, answer = ?answer, "scripted answer");
        Ok(answer)
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_reads_lines_until_eof() {
        let mut source = ConsoleSource::new("2\r\n\nlast".as_bytes());
        assert_eq!(source.ask("? ").expect("ask"), Some("2".to_string()));
        assert_eq!(source.ask("? ").expect("ask"), Some(String::new()));
        assert_eq!(source.ask("? ").expect("ask"), Some("last".to_string()));
        assert_eq!(source.ask("? ").expect("ask"), None);
    }

    #[test]
    fn scripted_records_prompts_and_runs_dry() {
        let mut source = ScriptedSource::new(["1"]);
        assert_eq!(source.ask("first").expect("ask"), Some("1".to_string()));
        assert_eq!(source.ask("second").expect("ask"), None);
        assert_eq!(source.prompts(), ["first", "second"]);
        assert_eq!(source.remaining(), 0);
    }
}
