use crate::context::{self, ProjectForm, RefinementForm};
use crate::dispatch::Dispatcher;
use crate::errors::GenerationError;
use crate::prompt;
use crate::ux::results::ResultSet;
use crate::wire::{PromptSuggestion, UIDesignIdea};

pub async fn ideas(d: &Dispatcher<'_>) -> Result<ResultSet, GenerationError> {
    let ideas = d.structured::<UIDesignIdea>("ideas", prompt::ideas_instruction()).await?;
    Ok(ResultSet::Ideas(ideas))
}

/// Validate, compose and dispatch the prompt-generation form.
pub async fn prompts(d: &Dispatcher<'_>, form: &ProjectForm) -> Result<ResultSet, GenerationError> {
    context::validate(form)?;
    let ctx = context::compose(form);
    let mut suggestions = d
        .structured::<PromptSuggestion>("prompts", prompt::prompts_instruction(form.level, &ctx))
        .await?;
    for s in &mut suggestions {
        s.kind.get_or_insert(form.level);
    }
    Ok(ResultSet::Prompts {
        suggestions,
        project_type: form.project_type.clone(),
        level: form.level,
    })
}

pub async fn refinement(
    d: &Dispatcher<'_>,
    form: &RefinementForm,
) -> Result<ResultSet, GenerationError> {
    context::validate_refinement(form)?;
    let ctx = context::compose_refinement(form);
    let text = d.text("refine", prompt::refinement_instruction(&ctx)).await?;
    Ok(ResultSet::Refinement { text, title: form.title() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use crate::wire::{GenerationRequest, PromptLevel};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Echo {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Provider for Echo {
        async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(req.prompt.clone());
            Ok(self.reply.clone())
        }
    }

    fn echo(reply: &str) -> Echo {
        Echo { reply: reply.into(), prompts: Mutex::new(Vec::new()) }
    }

    #[tokio::test]
    async fn marathon_runner_prompt_reaches_the_provider() {
        let provider = echo(
            r#"[{"prompt_title":"Pace","suggested_prompt":"A vibrant app.","key_elements":[],"prompt_type":"high-level"}]"#,
        );
        let d = Dispatcher::new(&provider, "m");
        let form = ProjectForm {
            level: PromptLevel::HighLevel,
            project_type: "An app for marathon runners".into(),
            vibe: "vibrant, encouraging".into(),
            ..Default::default()
        };

        let out = prompts(&d, &form).await.unwrap();
        assert_eq!(out.len(), 1);
        let sent = provider.prompts.lock().unwrap()[0].clone();
        assert!(sent.contains("An app for marathon runners"));
        assert!(sent.contains("vibrant, encouraging"));
        assert!(!sent.contains("Features:"));
        assert!(!sent.contains("Specific Screen:"));
    }

    #[tokio::test]
    async fn unrecognized_prompt_type_takes_the_requested_level() {
        let provider = echo(
            r#"[{"prompt_title":"A","suggested_prompt":"a","key_elements":[],"prompt_type":"High-Level"},
                {"prompt_title":"B","suggested_prompt":"b","key_elements":[],"prompt_type":"sketch"}]"#,
        );
        let d = Dispatcher::new(&provider, "m");
        let form = ProjectForm {
            level: PromptLevel::Detailed,
            project_type: "Dashboard".into(),
            description: "Sales analytics".into(),
            ..Default::default()
        };

        let ResultSet::Prompts { suggestions, .. } = prompts(&d, &form).await.unwrap() else {
            panic!("expected prompts")
        };
        assert_eq!(suggestions[0].kind, Some(PromptLevel::HighLevel));
        assert_eq!(suggestions[1].kind, Some(PromptLevel::Detailed));
    }

    #[tokio::test]
    async fn missing_input_never_dispatches() {
        let provider = echo("[]");
        let d = Dispatcher::new(&provider, "m");

        let err = prompts(&d, &ProjectForm::default()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        let err = refinement(&d, &RefinementForm::default()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refinement_result_is_titled_from_form() {
        let provider = echo("  On the homepage, add a search bar to the header.\n");
        let d = Dispatcher::new(&provider, "m");
        let form = RefinementForm {
            base_prompt: "A tea store".into(),
            screen: "homepage".into(),
            detail: "Add a search bar".into(),
            ..Default::default()
        };

        match refinement(&d, &form).await.unwrap() {
            ResultSet::Refinement { text, title } => {
                assert_eq!(text, "On the homepage, add a search bar to the header.");
                assert_eq!(title, "Refinement: Add component on homepage");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
