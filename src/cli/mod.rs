use anyhow::bail;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::context::{
    ButtonStyle, ChangeType, ColorSpec, FontStyle, ImageScope, ProjectForm, RefinementForm,
    StyleElement, VisualStyle,
};
use crate::guide;
use crate::wire::PromptLevel;

#[derive(Parser, Debug)]
#[command(name = "stitch_promptgen", version, about = "Build Stitch UI prompts with Google Gemini")]
pub struct Args {
    /// TOML config file; flags override its values.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory downloads are written to.
    #[arg(long, global = true)]
    pub export_dir: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub save_exchanges: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session (the default).
    Shell,
    /// Print the Stitch prompt guide.
    Guide,
    /// List the idea templates, or show one.
    Templates { name: Option<String> },
    /// Generate three UI application ideas.
    Ideas(ExportArgs),
    /// Generate three Stitch prompts from a project description.
    Generate(GenerateArgs),
    /// Generate a refinement prompt for one screen.
    Refine(RefineArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct ExportArgs {
    /// Write every result section to the export directory.
    #[arg(long, default_value_t = false)]
    pub export: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelArg {
    #[value(alias = "high")]
    HighLevel,
    Detailed,
}

impl From<LevelArg> for PromptLevel {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::HighLevel => PromptLevel::HighLevel,
            LevelArg::Detailed => PromptLevel::Detailed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleArg {
    Japandi,
    Corporate,
    Vibrant,
    Dark,
    Custom,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontArg {
    Default,
    PlayfulSans,
    ProfessionalSerif,
    ModernSans,
    ElegantSerif,
    Custom,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonArg {
    Default,
    FullyRounded,
    Sharp,
    SlightlyRounded,
    Pill,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    #[arg(long, value_enum, default_value_t = LevelArg::HighLevel)]
    pub level: LevelArg,

    #[arg(long, default_value = "")]
    pub project_type: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Key feature; repeat for several.
    #[arg(long = "feature")]
    pub features: Vec<String>,

    #[arg(long, default_value = "")]
    pub vibe: String,

    #[arg(long, value_enum, default_value_t = StyleArg::Japandi)]
    pub style: StyleArg,

    #[arg(long, default_value = "")]
    pub custom_style: String,

    #[arg(long, conflicts_with = "color_mood")]
    pub color: Option<String>,

    #[arg(long)]
    pub color_mood: Option<String>,

    #[arg(long, value_enum, default_value_t = FontArg::Default)]
    pub font: FontArg,

    #[arg(long, default_value = "")]
    pub custom_font: String,

    #[arg(long, value_enum, default_value_t = ButtonArg::Default)]
    pub button: ButtonArg,

    #[arg(long, default_value = "")]
    pub screen: String,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl GenerateArgs {
    pub fn to_form(&self) -> ProjectForm {
        ProjectForm {
            level: self.level.into(),
            project_type: self.project_type.clone(),
            description: self.description.clone(),
            features: self.features.join("\n"),
            vibe: self.vibe.clone(),
            visual_style: match self.style {
                StyleArg::Japandi => VisualStyle::Japandi,
                StyleArg::Corporate => VisualStyle::Corporate,
                StyleArg::Vibrant => VisualStyle::VibrantPlayful,
                StyleArg::Dark => VisualStyle::DarkElegant,
                StyleArg::Custom => VisualStyle::Custom(self.custom_style.clone()),
            },
            color: match &self.color {
                Some(c) => ColorSpec::Specific(c.clone()),
                None => ColorSpec::Mood(self.color_mood.clone().unwrap_or_default()),
            },
            font: match self.font {
                FontArg::Default => FontStyle::Default,
                FontArg::PlayfulSans => FontStyle::PlayfulSans,
                FontArg::ProfessionalSerif => FontStyle::ProfessionalSerif,
                FontArg::ModernSans => FontStyle::ModernSans,
                FontArg::ElegantSerif => FontStyle::ElegantSerif,
                FontArg::Custom => FontStyle::Custom(self.custom_font.clone()),
            },
            button: match self.button {
                ButtonArg::Default => ButtonStyle::Default,
                ButtonArg::FullyRounded => ButtonStyle::FullyRounded,
                ButtonArg::Sharp => ButtonStyle::Sharp,
                ButtonArg::SlightlyRounded => ButtonStyle::SlightlyRounded,
                ButtonArg::Pill => ButtonStyle::Pill,
            },
            specific_screen: self.screen.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeArg {
    Add,
    Modify,
    Styling,
    Images,
    Layout,
    Text,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleElementArg {
    Colors,
    Fonts,
    Borders,
    Spacing,
    Theme,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageScopeArg {
    Specific,
    All,
    Background,
}

#[derive(ClapArgs, Debug)]
pub struct RefineArgs {
    /// Base app description the change applies to.
    #[arg(long, default_value = "")]
    pub base: String,

    #[arg(long, default_value = "")]
    pub screen: String,

    #[arg(long, value_enum, default_value_t = ChangeArg::Add)]
    pub change: ChangeArg,

    #[arg(long, default_value = "")]
    pub detail: String,

    #[arg(long, value_enum)]
    pub style_element: Option<StyleElementArg>,

    #[arg(long, value_enum)]
    pub image_scope: Option<ImageScopeArg>,

    /// Quick template used as the change detail when --detail is empty.
    #[arg(long)]
    pub template: Option<String>,

    #[arg(long)]
    pub mood: Option<String>,

    #[arg(long)]
    pub font_style: Option<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

fn given(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl RefineArgs {
    pub fn to_form(&self) -> anyhow::Result<RefinementForm> {
        let detail = match (&self.template, self.detail.trim().is_empty()) {
            (Some(name), true) => {
                let t = guide::find_refinement_template(name)
                    .ok_or_else(|| anyhow::anyhow!("unknown refinement template: {name}"))?;
                let mood = given(&self.mood);
                let style = given(&self.font_style);
                if t.needs_mood() && mood.is_none() {
                    bail!("template '{}' needs --mood", t.name);
                }
                if t.needs_style() && style.is_none() {
                    bail!("template '{}' needs --font-style", t.name);
                }
                t.render(&self.screen, mood, style)
            }
            _ => self.detail.clone(),
        };
        Ok(RefinementForm {
            base_prompt: self.base.clone(),
            screen: self.screen.clone(),
            change_type: match self.change {
                ChangeArg::Add => ChangeType::AddComponent,
                ChangeArg::Modify => ChangeType::ModifyComponent,
                ChangeArg::Styling => ChangeType::ChangeStyling,
                ChangeArg::Images => ChangeType::UpdateImages,
                ChangeArg::Layout => ChangeType::AdjustLayout,
                ChangeArg::Text => ChangeType::ChangeText,
            },
            detail,
            style_element: self.style_element.map(|s| match s {
                StyleElementArg::Colors => StyleElement::Colors,
                StyleElementArg::Fonts => StyleElement::Fonts,
                StyleElementArg::Borders => StyleElement::BordersCorners,
                StyleElementArg::Spacing => StyleElement::Spacing,
                StyleElementArg::Theme => StyleElement::OverallTheme,
            }),
            image_scope: self.image_scope.map(|s| match s {
                ImageScopeArg::Specific => ImageScope::Specific,
                ImageScopeArg::All => ImageScope::AllOnScreen,
                ImageScopeArg::Background => ImageScope::Background,
            }),
        })
    }
}

impl Args {
    /// Layer flags over a base config (defaults or a loaded file).
    pub fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(k) = &self.api_key {
            cfg.api_key = Some(k.clone());
        }
        if let Some(m) = &self.model {
            cfg.model = m.clone();
        }
        if let Some(b) = &self.api_base {
            cfg.api_base = b.clone();
        }
        if self.timeout_secs.is_some() {
            cfg.timeout_secs = self.timeout_secs;
        }
        if let Some(d) = &self.export_dir {
            cfg.export_dir = d.clone();
        }
        if self.save_exchanges {
            cfg.save_exchanges = true;
        }
        cfg
    }
}
