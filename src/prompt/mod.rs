use crate::wire::PromptLevel;

pub fn ideas_instruction() -> String {
    "Generate 3 creative and unique UI application ideas with descriptions, features, and required components. \
Focus on modern, user-friendly designs. Include adjectives that set the vibe for each app."
        .to_string()
}

pub fn prompts_instruction(level: PromptLevel, context: &str) -> String {
    format!(
r#"Create 3 different effective Stitch prompts following the official Stitch prompt guidelines.
Each prompt should follow Stitch best practices:
- Use clear, specific language
- Include adjectives to set the vibe
- Be concise but descriptive
- Follow the appropriate format for {level} prompts

Context:
{context}
For high-level prompts: Keep them short and conceptual with vibe-setting adjectives.
For detailed prompts: Include specific features, components, and styling details.

Each prompt should be ready to use directly in Stitch."#,
        level = level.as_str(),
        context = context,
    )
}

pub fn refinement_instruction(context: &str) -> String {
    format!(
r#"Create a specific, clear Stitch refinement prompt following best practices.
The prompt should:
- Be specific about what to change and how
- Reference the specific screen/component
- Use clear UI/UX terminology
- Be concise but complete
- Follow Stitch's guideline of one major change at a time

Context:
{context}
Generate just the refinement prompt text, nothing else."#
    )
}
