//! Static reference content: the prompt guide, idea templates, quick
//! refinement templates and the getting-started text.

pub struct GuideSection {
    pub heading: &'static str,
    pub topics: &'static [GuideTopic],
}

pub struct GuideTopic {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const GUIDE: &[GuideSection] = &[
    GuideSection {
        heading: "1. Starting Your Project",
        topics: &[
            GuideTopic {
                title: "High-Level vs. Detailed Prompts",
                lines: &[
                    "High-Level (for brainstorming):",
                    "  \"An app for marathon runners.\"",
                    "Detailed (for specific results):",
                    "  \"An app for marathon runners to engage with a community, find partners, get training advice, and find races near them.\"",
                ],
            },
            GuideTopic {
                title: "Set the Vibe with Adjectives",
                lines: &[
                    "Use adjectives to define the app's feel:",
                    "  \"A vibrant and encouraging fitness tracking app.\"",
                    "  \"A minimalist and focused app for meditation.\"",
                ],
            },
        ],
    },
    GuideSection {
        heading: "2. Refining Your App",
        topics: &[
            GuideTopic {
                title: "Be Specific with Changes",
                lines: &[
                    "Focus on one screen/component with clear instructions:",
                    "  \"On the homepage, add a search bar to the header.\"",
                    "  \"Change the primary call-to-action button on the login screen to be larger and use the brand's primary blue color.\"",
                ],
            },
            GuideTopic {
                title: "Focus on Specific Screens",
                lines: &[
                    "E-commerce Example:",
                    "  \"Product detail page for a Japandi-styled tea store. Sells herbal teas, ceramics. Neutral, minimal colors, black buttons. Soft, elegant font.\"",
                ],
            },
        ],
    },
    GuideSection {
        heading: "3. Controlling App Theme",
        topics: &[
            GuideTopic {
                title: "Colors",
                lines: &[
                    "Specific Color:",
                    "  \"Change primary color to forest green.\"",
                    "Mood-Based:",
                    "  \"Update theme to a warm, inviting color palette.\"",
                ],
            },
            GuideTopic {
                title: "Fonts & Borders",
                lines: &[
                    "Font Styles:",
                    "  \"Use a playful sans-serif font.\"",
                    "Button/Border Styles:",
                    "  \"Make all buttons have fully rounded corners.\"",
                ],
            },
        ],
    },
    GuideSection {
        heading: "4. Modifying Images",
        topics: &[GuideTopic {
            title: "Image Guidelines",
            lines: &[
                "General Images:",
                "  \"Change background of all product images on landing page to light taupe.\"",
                "Specific Image:",
                "  \"On 'Team' page, image of 'Dr. Carter': update her lab coat to black.\"",
            ],
        }],
    },
    GuideSection {
        heading: "Pro Tips",
        topics: &[GuideTopic {
            title: "Best Practices",
            lines: &[
                "Be Clear & Concise: Avoid ambiguity",
                "One Major Change at a Time: Easier to see impact",
                "Use UI/UX Keywords: navigation bar, CTA button, card layout",
                "Reference Elements Specifically: 'primary button on sign-up form'",
                "Iterate & Experiment: Refine with further prompts",
            ],
        }],
    },
];

pub struct IdeaTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub components: &'static [&'static str],
}

pub const IDEA_TEMPLATES: &[IdeaTemplate] = &[
    IdeaTemplate {
        name: "Dashboard App",
        description: "Analytics dashboard with charts and metrics",
        features: &["Real-time data visualization", "Customizable widgets", "Export functionality"],
        components: &["Charts", "Cards", "Tables", "Filters"],
    },
    IdeaTemplate {
        name: "E-commerce Platform",
        description: "Online shopping interface with product catalog",
        features: &["Product search", "Shopping cart", "User reviews", "Payment integration"],
        components: &["Product cards", "Search bar", "Cart drawer", "Checkout form"],
    },
    IdeaTemplate {
        name: "Social Media Feed",
        description: "Social platform with posts and interactions",
        features: &["Post creation", "Like/comment system", "User profiles", "Real-time updates"],
        components: &["Post cards", "Comment sections", "User avatars", "Navigation bar"],
    },
    IdeaTemplate {
        name: "Task Management",
        description: "Project and task tracking application",
        features: &["Task creation", "Kanban boards", "Due dates", "Team collaboration"],
        components: &["Task cards", "Drag-drop lists", "Calendar view", "Progress bars"],
    },
];

pub fn find_idea_template(name: &str) -> Option<&'static IdeaTemplate> {
    let name = name.trim();
    IDEA_TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

pub struct RefinementTemplate {
    pub name: &'static str,
    pub text: &'static str,
}

pub const REFINEMENT_TEMPLATES: &[RefinementTemplate] = &[
    RefinementTemplate {
        name: "Add search",
        text: "On the {screen}, add a search bar to the header.",
    },
    RefinementTemplate {
        name: "Enlarge CTA",
        text: "Change the primary call-to-action button on the {screen} to be larger and use the brand's primary color.",
    },
    RefinementTemplate {
        name: "Round buttons",
        text: "Make all buttons have fully rounded corners.",
    },
    RefinementTemplate { name: "Update theme", text: "Update theme to a {mood} color palette." },
    RefinementTemplate { name: "Change font", text: "Use a {style} font for all text." },
    RefinementTemplate {
        name: "Add spacing",
        text: "Increase spacing between all components for better readability.",
    },
    RefinementTemplate {
        name: "Mobile optimize",
        text: "Optimize the {screen} layout for mobile devices.",
    },
];

pub fn find_refinement_template(name: &str) -> Option<&'static RefinementTemplate> {
    let name = name.trim();
    REFINEMENT_TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

impl RefinementTemplate {
    pub fn needs_mood(&self) -> bool {
        self.text.contains("{mood}")
    }

    pub fn needs_style(&self) -> bool {
        self.text.contains("{style}")
    }

    /// Fill `{screen}`, `{mood}` and `{style}`; unset placeholders stay as-is.
    pub fn render(&self, screen: &str, mood: Option<&str>, style: Option<&str>) -> String {
        let mut out = self.text.replace("{screen}", screen);
        if let Some(m) = mood {
            out = out.replace("{mood}", m);
        }
        if let Some(s) = style {
            out = out.replace("{style}", s);
        }
        out
    }
}

pub const GETTING_STARTED: &str = "\
How to get started:

1. Get a Google Gemini API Key: visit https://makersuite.google.com/app/apikey to create your API key
2. Enter your API key with `key` (or pass --api-key / set api_key in the config file)
3. Learn Stitch best practices with `guide`
4. Generate optimized prompts following Stitch guidelines with `generate`
5. Refine screen by screen with `refine`

Stitch Best Practices:
- Be Clear & Concise
- One Major Change at a Time
- Use UI/UX Keywords
- Reference Elements Specifically
- Iterate & Experiment";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refinement_template_fills_placeholders() {
        let t = find_refinement_template("add search").unwrap();
        assert_eq!(
            t.render("homepage", None, None),
            "On the homepage, add a search bar to the header."
        );

        let theme = find_refinement_template("Update theme").unwrap();
        assert_eq!(theme.render("x", Some("warm"), None), "Update theme to a warm color palette.");
        assert_eq!(theme.render("x", None, None), "Update theme to a {mood} color palette.");
        assert!(theme.needs_mood() && !theme.needs_style());
        assert!(find_refinement_template("Change font").unwrap().needs_style());
    }

    #[test]
    fn idea_templates_lookup_ignores_case() {
        assert_eq!(find_idea_template("task management").unwrap().components.len(), 4);
        assert!(find_idea_template("Spaceship").is_none());
    }
}
