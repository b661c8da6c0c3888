use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::errors::GenerationError;

pub mod forms;
pub mod reference;
pub mod results;

/// Line-oriented input over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// One line, without the trailing newline. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn ask(&mut self, label: &str, hint: &str) -> io::Result<String> {
        if hint.is_empty() {
            write!(self.output, "{}: ", label.bold())?;
        } else {
            write!(self.output, "{} {}: ", label.bold(), format!("({hint})").dimmed())?;
        }
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Lines until an empty line or end of input, joined with `\n`.
    pub fn ask_multiline(&mut self, label: &str, hint: &str) -> io::Result<String> {
        let hint = format!("({hint}; empty line to finish)");
        writeln!(self.output, "{} {}", label.bold(), hint.dimmed())?;
        self.output.flush()?;
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// Numbered single choice; blank input picks `default`.
    pub fn choose(&mut self, label: &str, options: &[&str], default: usize) -> io::Result<usize> {
        writeln!(self.output, "{}", label.bold())?;
        for (i, o) in options.iter().enumerate() {
            let marker = if i == default { "*" } else { " " };
            writeln!(self.output, " {marker}{}. {o}", i + 1)?;
        }
        loop {
            write!(self.output, "choice [{}]: ", default + 1)?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else { return Ok(default) };
            let line = line.trim();
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => {
                    let msg = format!("enter a number between 1 and {}", options.len());
                    writeln!(self.output, "{}", msg.yellow())?;
                }
            }
        }
    }

    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N]: ", label)?;
        self.output.flush()?;
        let ans = self.read_line()?.unwrap_or_default().trim().to_lowercase();
        Ok(ans == "y" || ans == "yes")
    }
}

/// Spinner shown while a provider call is in flight.
pub fn busy(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Inline message for a failed generation, worded per error kind.
pub fn report_error<W: Write>(out: &mut W, what: &str, err: &GenerationError) -> io::Result<()> {
    match err {
        GenerationError::Validation(msg) => {
            writeln!(out, "{} {}", "warning:".yellow().bold(), msg.yellow())
        }
        GenerationError::Transport(msg) => writeln!(
            out,
            "{} could not reach the generation service while generating {what}: {msg}",
            "error:".red().bold()
        ),
        GenerationError::SchemaMismatch(msg) => writeln!(
            out,
            "{} the response for {what} did not have the expected shape: {msg}",
            "error:".red().bold()
        ),
    }
}

pub fn success<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green().bold(), msg)
}

pub fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn choose_takes_default_on_blank_and_retries_invalid() {
        let mut p = prompter("\n9\nx\n2\n");
        assert_eq!(p.choose("pick", &["a", "b"], 0).unwrap(), 0);
        assert_eq!(p.choose("pick", &["a", "b"], 0).unwrap(), 1);
    }

    #[test]
    fn multiline_stops_at_blank_line() {
        let mut p = prompter("one\ntwo\n\nthree\n");
        assert_eq!(p.ask_multiline("features", "one per line").unwrap(), "one\ntwo");
        assert_eq!(p.ask("next", "").unwrap(), "three");
    }

    #[test]
    fn eof_reads_as_empty() {
        let mut p = prompter("");
        assert_eq!(p.ask("x", "").unwrap(), "");
        assert!(!p.confirm("sure?").unwrap());
        assert_eq!(p.choose("pick", &["a", "b"], 1).unwrap(), 1);
    }

    #[test]
    fn validation_errors_read_as_warnings() {
        let mut out = Vec::new();
        let err = GenerationError::Validation("Please fill in the app type field.".into());
        report_error(&mut out, "prompts", &err).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("warning:"));
        assert!(s.contains("Please fill in the app type field."));

        let mut out = Vec::new();
        report_error(&mut out, "ideas", &GenerationError::Transport("401".into())).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("generating ideas"));
    }
}
