use colored::Colorize;
use std::io::{self, Write};

use crate::guide::{self, GUIDE, IDEA_TEMPLATES, REFINEMENT_TEMPLATES};

pub fn render_guide<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Stitch Prompt Guide".bold().underline())?;
    for section in GUIDE {
        writeln!(out, "\n{}", section.heading.bold())?;
        for topic in section.topics {
            writeln!(out, "  {}", topic.title.cyan().bold())?;
            for line in topic.lines {
                writeln!(out, "    {line}")?;
            }
        }
    }
    writeln!(out, "\n{}", "Quick refinement templates".bold())?;
    for t in REFINEMENT_TEMPLATES {
        writeln!(out, "  {:<16} {}", t.name, t.text.dimmed())?;
    }
    Ok(())
}

/// Without a name, list template names; with one, show its details.
pub fn render_templates<W: Write>(out: &mut W, name: Option<&str>) -> io::Result<()> {
    let Some(name) = name else {
        writeln!(out, "{}", "Pre-built templates:".bold())?;
        for t in IDEA_TEMPLATES {
            writeln!(out, "  {} - {}", t.name.bold(), t.description)?;
        }
        return Ok(());
    };
    match guide::find_idea_template(name) {
        Some(t) => {
            writeln!(out, "{}", t.name.bold())?;
            writeln!(out, "  Description: {}", t.description)?;
            writeln!(out, "  Key Features:")?;
            for f in t.features {
                writeln!(out, "    • {f}")?;
            }
            writeln!(out, "  UI Components:")?;
            for c in t.components {
                writeln!(out, "    • {c}")?;
            }
            Ok(())
        }
        None => writeln!(out, "{}", format!("no template named '{name}'").yellow()),
    }
}

pub fn render_getting_started<W: Write>(out: &mut W) -> io::Result<()> {
    let ask = "Please enter your Google Gemini API key to start using the AI features.";
    writeln!(out, "{}", ask.yellow())?;
    writeln!(out, "\n{}", guide::GETTING_STARTED)
}
