use std::io::{self, BufRead, Write};

use super::Prompter;
use crate::context::{
    ButtonStyle, ChangeType, ColorSpec, Field, FontStyle, ImageScope, ProjectForm, RefinementForm,
    StyleElement, VisualStyle, FIELD_TABLE,
};
use crate::guide::REFINEMENT_TEMPLATES;
use crate::wire::PromptLevel;

/// Ask for every field that applies to `level`, in table order.
pub fn collect_project_form<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    level: PromptLevel,
) -> io::Result<ProjectForm> {
    let mut form = ProjectForm { level, ..Default::default() };

    for row in FIELD_TABLE.iter().filter(|s| s.applies(level)) {
        match row.field {
            Field::ProjectType => {
                form.project_type = match level {
                    PromptLevel::HighLevel => p.ask(
                        "What type of app are you building?",
                        "e.g., An app for marathon runners",
                    )?,
                    PromptLevel::Detailed => p.ask(
                        "What type of UI are you building?",
                        "e.g., Dashboard, Mobile app, Landing page",
                    )?,
                };
            }
            Field::Description => {
                form.description = p.ask_multiline(
                    "Describe your project in detail",
                    "Include the purpose, target users, and key functionality",
                )?;
            }
            Field::Features => {
                form.features = p.ask_multiline("List key features", "one per line")?;
            }
            Field::Vibe => {
                let hint = match level {
                    PromptLevel::HighLevel => "e.g., vibrant, encouraging, minimalist, focused",
                    PromptLevel::Detailed => "e.g., vibrant, professional, minimal, playful",
                };
                form.vibe = p.ask("Describe the vibe with adjectives", hint)?;
            }
            Field::VisualStyle => form.visual_style = collect_visual_style(p)?,
            Field::Color => form.color = collect_color(p)?,
            Field::Font => form.font = collect_font(p)?,
            Field::Button => {
                let names: Vec<&str> = ButtonStyle::ALL.iter().map(|b| b.display()).collect();
                form.button = ButtonStyle::ALL[p.choose("Button style:", &names, 0)?];
            }
            Field::SpecificScreen => {
                form.specific_screen = p.ask(
                    "Focus on specific screen (optional)",
                    "e.g., Product detail page, Login screen",
                )?;
            }
        }
    }
    Ok(form)
}

fn collect_visual_style<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<VisualStyle> {
    let presets = VisualStyle::PRESETS;
    let mut names: Vec<&str> = presets.iter().map(|s| s.display()).collect();
    names.push("Custom");
    let pick = p.choose("Visual style reference:", &names, 0)?;
    Ok(match presets.get(pick) {
        Some(preset) => preset.clone(),
        None => VisualStyle::Custom(p.ask("Describe your custom style", "")?),
    })
}

fn collect_color<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<ColorSpec> {
    Ok(match p.choose("Color specification:", &["Mood-based", "Specific colors"], 0)? {
        0 => ColorSpec::Mood(p.ask("Color mood", "e.g., warm and inviting")?),
        _ => ColorSpec::Specific(p.ask("Primary color", "e.g., forest green, #2ECC71")?),
    })
}

fn collect_font<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<FontStyle> {
    let presets = FontStyle::PRESETS;
    let mut names: Vec<&str> = presets.iter().map(|f| f.display()).collect();
    names.push("Custom");
    let pick = p.choose("Font style:", &names, 0)?;
    Ok(match presets.get(pick) {
        Some(preset) => preset.clone(),
        None => FontStyle::Custom(p.ask("Describe font style", "")?),
    })
}

/// Collect a refinement request. A quick template, when picked, becomes the
/// default change detail.
pub fn collect_refinement_form<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    base: Option<&str>,
) -> io::Result<RefinementForm> {
    let mut form = RefinementForm::default();

    form.base_prompt = match base {
        Some(b) => {
            writeln!(p.out(), "Current base app description:\n  {b}")?;
            let typed = p.ask("Base app description", "enter to keep the current one")?;
            if typed.trim().is_empty() { b.to_string() } else { typed }
        }
        None => p.ask("Base app description", "paste your initial app prompt here")?,
    };

    form.screen = p.ask(
        "Which screen to modify?",
        "e.g., homepage, login screen, product detail page",
    )?;

    let names: Vec<&str> = ChangeType::ALL.iter().map(|c| c.display()).collect();
    form.change_type = ChangeType::ALL[p.choose("Type of change:", &names, 0)?];

    match form.change_type {
        ChangeType::ChangeStyling => {
            let names: Vec<&str> = StyleElement::ALL.iter().map(|s| s.display()).collect();
            form.style_element = Some(StyleElement::ALL[p.choose("Style element:", &names, 0)?]);
        }
        ChangeType::UpdateImages => {
            let names: Vec<&str> = ImageScope::ALL.iter().map(|s| s.display()).collect();
            form.image_scope = Some(ImageScope::ALL[p.choose("Image scope:", &names, 0)?]);
        }
        _ => {}
    }

    let mut templates: Vec<&str> = vec!["None"];
    templates.extend(REFINEMENT_TEMPLATES.iter().map(|t| t.name));
    let pick = p.choose("Use a quick template:", &templates, 0)?;
    let suggested = match pick.checked_sub(1).and_then(|i| REFINEMENT_TEMPLATES.get(i)) {
        Some(t) => {
            let mood = t.needs_mood().then(|| p.ask("Mood", "e.g., warm")).transpose()?;
            let style = t
                .needs_style()
                .then(|| p.ask("Font style", "e.g., playful sans-serif"))
                .transpose()?;
            Some(t.render(&form.screen, mood.as_deref(), style.as_deref()))
        }
        None => None,
    };

    let (label, hint) = form.change_type.detail_prompt();
    form.detail = match &suggested {
        Some(s) => {
            let typed = p.ask(label, &format!("enter to use: {s}"))?;
            if typed.trim().is_empty() { s.clone() } else { typed }
        }
        None => p.ask(label, hint)?,
    };
    Ok(form)
}
