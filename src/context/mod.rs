use crate::errors::GenerationError;
use crate::wire::PromptLevel;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VisualStyle {
    #[default]
    Japandi,
    Corporate,
    VibrantPlayful,
    DarkElegant,
    Custom(String),
}

impl VisualStyle {
    pub const PRESETS: [VisualStyle; 4] = [
        VisualStyle::Japandi,
        VisualStyle::Corporate,
        VisualStyle::VibrantPlayful,
        VisualStyle::DarkElegant,
    ];

    pub fn display(&self) -> &str {
        match self {
            VisualStyle::Japandi => "Japandi (minimal, neutral)",
            VisualStyle::Corporate => "Corporate and Professional",
            VisualStyle::VibrantPlayful => "Vibrant and Playful",
            VisualStyle::DarkElegant => "Dark and Elegant",
            VisualStyle::Custom(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    Mood(String),
    Specific(String),
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Mood(String::new())
    }
}

impl ColorSpec {
    pub fn display(&self) -> &str {
        match self {
            ColorSpec::Mood(s) | ColorSpec::Specific(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Default,
    PlayfulSans,
    ProfessionalSerif,
    ModernSans,
    ElegantSerif,
    Custom(String),
}

impl FontStyle {
    pub const PRESETS: [FontStyle; 5] = [
        FontStyle::Default,
        FontStyle::PlayfulSans,
        FontStyle::ProfessionalSerif,
        FontStyle::ModernSans,
        FontStyle::ElegantSerif,
    ];

    pub fn display(&self) -> &str {
        match self {
            FontStyle::Default => "Default",
            FontStyle::PlayfulSans => "Playful sans-serif",
            FontStyle::ProfessionalSerif => "Professional serif",
            FontStyle::ModernSans => "Modern sans-serif",
            FontStyle::ElegantSerif => "Elegant serif",
            FontStyle::Custom(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Default,
    FullyRounded,
    Sharp,
    SlightlyRounded,
    Pill,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 5] = [
        ButtonStyle::Default,
        ButtonStyle::FullyRounded,
        ButtonStyle::Sharp,
        ButtonStyle::SlightlyRounded,
        ButtonStyle::Pill,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            ButtonStyle::Default => "Default",
            ButtonStyle::FullyRounded => "Fully rounded corners",
            ButtonStyle::Sharp => "Sharp corners",
            ButtonStyle::SlightlyRounded => "Slightly rounded",
            ButtonStyle::Pill => "Pill-shaped",
        }
    }
}

/// Inputs of the prompt-generation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub level: PromptLevel,
    pub project_type: String,
    pub description: String,
    pub features: String,
    pub vibe: String,
    pub visual_style: VisualStyle,
    pub color: ColorSpec,
    pub font: FontStyle,
    pub button: ButtonStyle,
    pub specific_screen: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectType,
    Description,
    Features,
    Vibe,
    VisualStyle,
    Color,
    Font,
    Button,
    SpecificScreen,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub high_level_label: Option<&'static str>,
    pub detailed_label: Option<&'static str>,
    pub required_high_level: bool,
    pub required_detailed: bool,
}

impl FieldSpec {
    pub fn label(&self, level: PromptLevel) -> Option<&'static str> {
        match level {
            PromptLevel::HighLevel => self.high_level_label,
            PromptLevel::Detailed => self.detailed_label,
        }
    }

    pub fn applies(&self, level: PromptLevel) -> bool {
        self.label(level).is_some()
    }

    pub fn required(&self, level: PromptLevel) -> bool {
        match level {
            PromptLevel::HighLevel => self.required_high_level,
            PromptLevel::Detailed => self.required_detailed,
        }
    }
}

const fn row(
    field: Field,
    high_level_label: Option<&'static str>,
    detailed_label: Option<&'static str>,
    required_high_level: bool,
    required_detailed: bool,
) -> FieldSpec {
    FieldSpec { field, high_level_label, detailed_label, required_high_level, required_detailed }
}

/// Every recognized form field, in output order.
pub const FIELD_TABLE: [FieldSpec; 9] = [
    row(Field::ProjectType, Some("App Type"), Some("Project Type"), true, true),
    row(Field::Description, None, Some("Description"), false, true),
    row(Field::Features, None, Some("Features"), false, false),
    row(Field::Vibe, Some("Vibe/Adjectives"), Some("Vibe/Adjectives"), false, false),
    row(Field::VisualStyle, Some("Visual Style"), Some("Visual Style"), false, false),
    row(Field::Color, None, Some("Color"), false, false),
    row(Field::Font, None, Some("Font Style"), false, false),
    row(Field::Button, None, Some("Button Style"), false, false),
    row(Field::SpecificScreen, None, Some("Specific Screen"), false, false),
];

impl ProjectForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::ProjectType => &self.project_type,
            Field::Description => &self.description,
            Field::Features => &self.features,
            Field::Vibe => &self.vibe,
            Field::VisualStyle => self.visual_style.display(),
            Field::Color => self.color.display(),
            Field::Font => self.font.display(),
            Field::Button => self.button.display(),
            Field::SpecificScreen => &self.specific_screen,
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        FIELD_TABLE
            .iter()
            .filter(|s| s.required(self.level) && self.value(s.field).trim().is_empty())
            .map(|s| s.field)
            .collect()
    }
}

/// Build the context block for the prompt-generation instruction.
/// Blank applicable fields are kept as `Label: `.
pub fn compose(form: &ProjectForm) -> String {
    let mut out = format!("Prompt Level: {}\n", form.level.describe());
    for s in FIELD_TABLE.iter() {
        if let Some(label) = s.label(form.level) {
            out.push_str(&format!("{}: {}\n", label, form.value(s.field)));
        }
    }
    out
}

pub fn validate(form: &ProjectForm) -> Result<(), GenerationError> {
    if form.missing_fields().is_empty() {
        return Ok(());
    }
    let msg = match form.level {
        PromptLevel::HighLevel => "Please fill in the app type field.",
        PromptLevel::Detailed => "Please fill in the project type and description fields.",
    };
    Err(GenerationError::Validation(msg.into()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeType {
    #[default]
    AddComponent,
    ModifyComponent,
    ChangeStyling,
    UpdateImages,
    AdjustLayout,
    ChangeText,
}

impl ChangeType {
    pub const ALL: [ChangeType; 6] = [
        ChangeType::AddComponent,
        ChangeType::ModifyComponent,
        ChangeType::ChangeStyling,
        ChangeType::UpdateImages,
        ChangeType::AdjustLayout,
        ChangeType::ChangeText,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            ChangeType::AddComponent => "Add component",
            ChangeType::ModifyComponent => "Modify component",
            ChangeType::ChangeStyling => "Change styling",
            ChangeType::UpdateImages => "Update images",
            ChangeType::AdjustLayout => "Adjust layout",
            ChangeType::ChangeText => "Change text/language",
        }
    }

    /// Label and hint shown when collecting the change detail.
    pub fn detail_prompt(&self) -> (&'static str, &'static str) {
        match self {
            ChangeType::AddComponent => ("What to add", "e.g., Add a search bar to the header"),
            ChangeType::ModifyComponent => {
                ("What to modify", "e.g., Make the primary CTA button larger and blue")
            }
            ChangeType::ChangeStyling => {
                ("Style change", "e.g., Change primary color to forest green")
            }
            ChangeType::UpdateImages => {
                ("Image change", "e.g., Change background of all product images to light taupe")
            }
            ChangeType::AdjustLayout => {
                ("Layout adjustment", "e.g., Switch to a 3-column grid for product cards")
            }
            ChangeType::ChangeText => {
                ("Text/language change", "e.g., Switch all button text to Spanish")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleElement {
    Colors,
    Fonts,
    BordersCorners,
    Spacing,
    OverallTheme,
}

impl StyleElement {
    pub const ALL: [StyleElement; 5] = [
        StyleElement::Colors,
        StyleElement::Fonts,
        StyleElement::BordersCorners,
        StyleElement::Spacing,
        StyleElement::OverallTheme,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            StyleElement::Colors => "Colors",
            StyleElement::Fonts => "Fonts",
            StyleElement::BordersCorners => "Borders/Corners",
            StyleElement::Spacing => "Spacing",
            StyleElement::OverallTheme => "Overall theme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageScope {
    Specific,
    AllOnScreen,
    Background,
}

impl ImageScope {
    pub const ALL: [ImageScope; 3] =
        [ImageScope::Specific, ImageScope::AllOnScreen, ImageScope::Background];

    pub fn display(&self) -> &'static str {
        match self {
            ImageScope::Specific => "Specific image",
            ImageScope::AllOnScreen => "All images on screen",
            ImageScope::Background => "Background images",
        }
    }
}

/// Inputs of the refinement form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefinementForm {
    pub base_prompt: String,
    pub screen: String,
    pub change_type: ChangeType,
    pub detail: String,
    pub style_element: Option<StyleElement>,
    pub image_scope: Option<ImageScope>,
}

impl RefinementForm {
    pub fn title(&self) -> String {
        format!("Refinement: {} on {}", self.change_type.display(), self.screen)
    }
}

pub fn compose_refinement(form: &RefinementForm) -> String {
    let mut out = format!(
        "Base App: {}\nScreen to Modify: {}\nChange Type: {}\n",
        form.base_prompt,
        form.screen,
        form.change_type.display()
    );
    match (form.change_type, form.style_element, form.image_scope) {
        (ChangeType::ChangeStyling, Some(el), _) => {
            out.push_str(&format!("Style Element: {}\n", el.display()))
        }
        (ChangeType::UpdateImages, _, Some(scope)) => {
            out.push_str(&format!("Image Scope: {}\n", scope.display()))
        }
        _ => {}
    }
    out.push_str(&format!("Specific Change: {}\n", form.detail));
    out
}

pub fn validate_refinement(form: &RefinementForm) -> Result<(), GenerationError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&form.base_prompt) || blank(&form.screen) || blank(&form.detail) {
        return Err(GenerationError::Validation(
            "Please fill in all required fields: base app description, screen name, \
             and change details."
                .into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(level: PromptLevel) -> ProjectForm {
        ProjectForm {
            level,
            project_type: "Dashboard".into(),
            description: "Sales analytics for small shops".into(),
            features: "Charts\nExports".into(),
            vibe: "professional, calm".into(),
            visual_style: VisualStyle::Corporate,
            color: ColorSpec::Specific("forest green".into()),
            font: FontStyle::ModernSans,
            button: ButtonStyle::Pill,
            specific_screen: "Login screen".into(),
        }
    }

    #[test]
    fn marathon_runner_high_level_context() {
        let form = ProjectForm {
            level: PromptLevel::HighLevel,
            project_type: "An app for marathon runners".into(),
            vibe: "vibrant, encouraging".into(),
            features: "Race finder".into(),
            specific_screen: "Home".into(),
            ..Default::default()
        };
        let ctx = compose(&form);
        assert!(ctx.contains("An app for marathon runners"));
        assert!(ctx.contains("vibrant, encouraging"));
        assert!(!ctx.contains("Features:"));
        assert!(!ctx.contains("Specific Screen:"));
        assert!(!ctx.contains("Race finder"));
        assert!(ctx.starts_with("Prompt Level: High-Level (for brainstorming)"));
    }

    #[test]
    fn compose_includes_exactly_applicable_fields() {
        for level in [PromptLevel::HighLevel, PromptLevel::Detailed] {
            let form = filled(level);
            let ctx = compose(&form);
            for s in FIELD_TABLE.iter() {
                let label = s.high_level_label.or(s.detailed_label).unwrap();
                let line_present = ctx.lines().any(|l| {
                    l.starts_with(&format!("{}:", s.label(level).unwrap_or(label)))
                });
                assert_eq!(line_present, s.applies(level), "{:?} at {:?}", s.field, level);
                if s.required(level) {
                    assert!(ctx.contains(form.value(s.field)));
                }
            }
        }
    }

    #[test]
    fn blank_optional_fields_render_empty() {
        let form = ProjectForm {
            level: PromptLevel::Detailed,
            project_type: "Landing page".into(),
            description: "For a bakery".into(),
            ..Default::default()
        };
        let ctx = compose(&form);
        assert!(ctx.lines().any(|l| l == "Specific Screen: "));
        assert!(ctx.lines().any(|l| l == "Button Style: Default"));
    }

    #[test]
    fn validation_reports_missing_required_input() {
        let mut form = ProjectForm::default();
        let err = validate(&form).unwrap_err();
        assert_eq!(err, GenerationError::Validation("Please fill in the app type field.".into()));

        form.level = PromptLevel::Detailed;
        form.project_type = "Mobile app".into();
        assert_eq!(form.missing_fields(), vec![Field::Description]);
        assert!(validate(&form).is_err());

        form.description = "Habit tracker".into();
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn whitespace_only_is_missing() {
        let form = ProjectForm { project_type: "   ".into(), ..Default::default() };
        assert_eq!(form.missing_fields(), vec![Field::ProjectType]);
    }

    #[test]
    fn refinement_context_and_title() {
        let form = RefinementForm {
            base_prompt: "A tea store".into(),
            screen: "homepage".into(),
            change_type: ChangeType::ChangeStyling,
            detail: "Change primary color to forest green".into(),
            style_element: Some(StyleElement::Colors),
            image_scope: Some(ImageScope::Background),
        };
        let ctx = compose_refinement(&form);
        assert!(ctx.contains("Base App: A tea store"));
        assert!(ctx.contains("Screen to Modify: homepage"));
        assert!(ctx.contains("Change Type: Change styling"));
        assert!(ctx.contains("Style Element: Colors"));
        assert!(!ctx.contains("Image Scope"));
        assert_eq!(form.title(), "Refinement: Change styling on homepage");
        assert!(validate_refinement(&form).is_ok());
    }

    #[test]
    fn refinement_requires_all_three_fields() {
        let form =
            RefinementForm { base_prompt: "x".into(), screen: "y".into(), ..Default::default() };
        assert!(matches!(validate_refinement(&form), Err(GenerationError::Validation(_))));
    }
}
