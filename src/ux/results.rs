use colored::Colorize;
use std::io::{self, Write};

use super::indent;
use crate::export;
use crate::session::{LevelFilter, RecordLevel, SavedPromptDraft, SavedPromptRecord};
use crate::wire::{PromptLevel, PromptSuggestion, UIDesignIdea};

/// The last generation shown to the user, kept so section actions can refer
/// to it by number.
#[derive(Debug, Clone)]
pub enum ResultSet {
    Ideas(Vec<UIDesignIdea>),
    Prompts {
        suggestions: Vec<PromptSuggestion>,
        project_type: String,
        level: PromptLevel,
    },
    Refinement {
        text: String,
        title: String,
    },
}

impl ResultSet {
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Ideas(v) => v.len(),
            ResultSet::Prompts { suggestions, .. } => suggestions.len(),
            ResultSet::Refinement { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text a download of section `idx` writes.
    pub fn primary_text(&self, idx: usize) -> Option<String> {
        match self {
            ResultSet::Ideas(v) => v.get(idx).map(UIDesignIdea::to_text),
            ResultSet::Prompts { suggestions, .. } => suggestions.get(idx).map(|s| s.body.clone()),
            ResultSet::Refinement { text, .. } => (idx == 0).then(|| text.clone()),
        }
    }

    pub fn file_name(&self, idx: usize) -> String {
        match self {
            ResultSet::Ideas(_) => export::idea_file_name(idx),
            ResultSet::Prompts { .. } => export::suggestion_file_name(idx),
            ResultSet::Refinement { .. } => export::refinement_file_name(),
        }
    }

    /// Record to append on "save"; ideas are not saveable.
    pub fn save_draft(&self, idx: usize) -> Option<SavedPromptDraft> {
        match self {
            ResultSet::Ideas(_) => None,
            ResultSet::Prompts { suggestions, project_type, level } => {
                suggestions.get(idx).map(|s| SavedPromptDraft {
                    title: s.title.clone(),
                    prompt: s.body.clone(),
                    project_type: project_type.clone(),
                    level: RecordLevel::from(*level),
                })
            }
            ResultSet::Refinement { text, title } => (idx == 0).then(|| SavedPromptDraft {
                title: title.clone(),
                prompt: text.clone(),
                project_type: "Screen Refinement".into(),
                level: RecordLevel::Refinement,
            }),
        }
    }

    /// Text "use as base" copies into the session.
    pub fn base_text(&self, idx: usize) -> Option<String> {
        match self {
            ResultSet::Ideas(_) => None,
            _ => self.primary_text(idx),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expand {
    None,
    One(usize),
    All,
}

impl Expand {
    fn is_open(&self, idx: usize) -> bool {
        match self {
            Expand::None => false,
            Expand::One(i) => *i == idx,
            Expand::All => true,
        }
    }
}

/// Print every section; collapsed sections show only their header.
pub fn render_results<W: Write>(
    out: &mut W,
    results: &ResultSet,
    expanded: Expand,
) -> io::Result<()> {
    if results.is_empty() {
        writeln!(out, "{}", "(the model returned no results)".dimmed())?;
        return Ok(());
    }
    match results {
        ResultSet::Ideas(ideas) => {
            for (i, idea) in ideas.iter().enumerate() {
                let open = expanded.is_open(i);
                section_header(out, i, &idea.app_name, open)?;
                if open {
                    writeln!(out, "  {} {}", "Description:".bold(), idea.description)?;
                    writeln!(out, "  {} {}", "Target Audience:".bold(), idea.target_audience)?;
                    bullet_list(out, "Main Features:", &idea.main_features, "•")?;
                    bullet_list(out, "UI Components:", &idea.ui_components, "•")?;
                    writeln!(out, "  {}", format!("actions: download {}", i + 1).dimmed())?;
                }
            }
        }
        ResultSet::Prompts { suggestions, .. } => {
            for (i, s) in suggestions.iter().enumerate() {
                let open = expanded.is_open(i);
                let badge = s.kind.map(|k| format!(" [{k}]")).unwrap_or_default();
                let title = format!("Prompt Option {}: {}{badge}", i + 1, s.title);
                section_header(out, i, &title, open)?;
                if open {
                    writeln!(out, "  {}", "Generated Stitch Prompt:".bold())?;
                    writeln!(out, "{}", indent(&s.body, 4).cyan())?;
                    bullet_list(out, "Key Elements Covered:", &s.key_elements, "✓")?;
                    if let Some(example) = &s.example_output {
                        writeln!(out, "  {}", "Example output:".bold())?;
                        writeln!(out, "{}", indent(example, 4))?;
                    }
                    writeln!(
                        out,
                        "  {}",
                        format!("actions: download {n} | save {n} | base {n}", n = i + 1).dimmed()
                    )?;
                }
            }
        }
        ResultSet::Refinement { text, .. } => {
            section_header(out, 0, "Your Refinement Prompt", true)?;
            writeln!(out, "{}", indent(text, 4).cyan())?;
            writeln!(out, "  {}", "actions: download 1 | save 1 | base 1".dimmed())?;
        }
    }
    Ok(())
}

fn section_header<W: Write>(out: &mut W, idx: usize, title: &str, open: bool) -> io::Result<()> {
    let arrow = if open { "▾" } else { "▸" };
    writeln!(out, "{} {} {}", arrow, format!("[{}]", idx + 1).bold(), title.bold())
}

fn bullet_list<W: Write>(out: &mut W, label: &str, items: &[String], mark: &str) -> io::Result<()> {
    writeln!(out, "  {}", label.bold())?;
    for item in items {
        writeln!(out, "    {mark} {item}")?;
    }
    Ok(())
}

pub const EMPTY_SAVED: &str =
    "No saved prompts yet. Generate and save prompts with `generate` or `refine`.";

/// Print a filtered view of saved prompts; positions are 1-based.
pub fn render_saved<W: Write>(
    out: &mut W,
    view: &[&SavedPromptRecord],
    filter: LevelFilter,
    total: usize,
    expanded: Expand,
) -> io::Result<()> {
    if total == 0 {
        writeln!(out, "{}", EMPTY_SAVED.dimmed())?;
        return Ok(());
    }
    let label = match filter {
        LevelFilter::All => "all".to_string(),
        LevelFilter::Only(l) => l.as_str().to_string(),
    };
    writeln!(out, "{}", format!("Saved prompts ({label}): {} of {total}", view.len()).bold())?;
    if view.is_empty() {
        writeln!(out, "{}", "(nothing matches this filter)".dimmed())?;
        return Ok(());
    }
    for (i, r) in view.iter().enumerate() {
        let title = format!("{} - {} [{}]", r.title, r.project_type, r.level.as_str());
        let open = expanded.is_open(i);
        section_header(out, i, &title, open)?;
        if open {
            writeln!(out, "  Saved: {}", r.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
            writeln!(out, "{}", indent(&r.prompt, 4).cyan())?;
            let actions = format!(
                "actions: saved download {n} | saved base {n} | saved delete {n}",
                n = i + 1
            );
            writeln!(out, "  {}", actions.dimmed())?;
        }
    }
    Ok(())
}

pub fn render_session_flags<W: Write>(
    out: &mut W,
    level: PromptLevel,
    base: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "{} {}", "level:".bold(), level)?;
    match base {
        Some(b) => writeln!(out, "{} {}", "base prompt:".bold(), b),
        None => writeln!(out, "{} {}", "base prompt:".bold(), "(none)".dimmed()),
    }
}
