use uuid::Uuid;

use crate::wire::PromptLevel;

pub mod registry;

pub use registry::{
    LevelFilter, RecordId, RecordLevel, SavedPromptDraft, SavedPromptRecord, SavedPrompts,
};

/// State of one interactive session. Lives as long as the shell and is
/// handed to every command by reference.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    saved_prompts: SavedPrompts,
    current_level: PromptLevel,
    base_prompt: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_prompts: SavedPrompts::new(),
            current_level: PromptLevel::HighLevel,
            base_prompt: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn saved_prompts(&self) -> &SavedPrompts {
        &self.saved_prompts
    }

    pub fn saved_prompts_mut(&mut self) -> &mut SavedPrompts {
        &mut self.saved_prompts
    }

    pub fn append_saved_prompt(&mut self, draft: SavedPromptDraft) -> RecordId {
        self.saved_prompts.append(draft)
    }

    pub fn base_prompt(&self) -> Option<&str> {
        self.base_prompt.as_deref()
    }

    pub fn set_base_prompt(&mut self, prompt: impl Into<String>) {
        self.base_prompt = Some(prompt.into());
    }

    pub fn current_level(&self) -> PromptLevel {
        self.current_level
    }

    pub fn set_current_level(&mut self, level: PromptLevel) {
        self.current_level = level;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
