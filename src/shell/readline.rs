use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Source of shell command lines. `None` ends the session.
pub trait CommandLine {
    fn read(&mut self, prompt: &str) -> Result<Option<String>>;
}

const COMMANDS: &[&str] = &[
    "base", "download", "generate", "guide", "help", "ideas", "key", "level", "quit", "refine",
    "results", "save", "saved", "show", "status", "templates",
];

const SAVED_SUBCOMMANDS: &[&str] = &[
    "all", "base", "delete", "detailed", "download", "high-level", "refinement", "show",
];

/// Completes the command word, and the word after `saved`.
#[derive(Clone, Default)]
pub struct CommandHelper;

impl CommandHelper {
    fn candidates(line: &str) -> (usize, Vec<&'static str>) {
        let (start, word, table) = match line.strip_prefix("saved ") {
            Some(rest) if !rest.contains(' ') => (line.len() - rest.len(), rest, SAVED_SUBCOMMANDS),
            Some(_) => return (0, Vec::new()),
            None if !line.contains(' ') => (0, line, COMMANDS),
            None => return (0, Vec::new()),
        };
        (start, table.iter().copied().filter(|c| c.starts_with(word)).collect())
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, found) = Self::candidates(&line[..pos]);
        let pairs = found
            .into_iter()
            .map(|c| Pair { display: c.to_string(), replacement: c.to_string() })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, found) = Self::candidates(line);
        let typed = &line[start..];
        match found.as_slice() {
            [only] if !typed.is_empty() && only.len() > typed.len() => {
                Some(only[typed.len()..].to_string())
            }
            _ => None,
        }
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}

/// Line editing and in-memory history for the `stitch>` prompt.
pub struct ReadlineCommands {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl ReadlineCommands {
    pub fn new() -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CommandHelper));
        Ok(Self { editor })
    }
}

impl CommandLine for ReadlineCommands {
    fn read(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Ctrl-C detected. Type `quit` to exit.".yellow());
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_command_words() {
        let (start, found) = CommandHelper::candidates("sa");
        assert_eq!(start, 0);
        assert_eq!(found, vec!["save", "saved"]);
        assert_eq!(CommandHelper::candidates("gen").1, vec!["generate"]);
    }

    #[test]
    fn completes_saved_subcommands() {
        let (start, found) = CommandHelper::candidates("saved de");
        assert_eq!(start, 6);
        assert_eq!(found, vec!["delete", "detailed"]);
        assert!(CommandHelper::candidates("saved delete 1").1.is_empty());
        assert!(CommandHelper::candidates("show 2").1.is_empty());
    }
}
