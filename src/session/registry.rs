use chrono::{DateTime, Utc};
use std::fmt;

use crate::wire::PromptLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordLevel {
    HighLevel,
    Detailed,
    Refinement,
}

impl RecordLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordLevel::HighLevel => "high-level",
            RecordLevel::Detailed => "detailed",
            RecordLevel::Refinement => "refinement",
        }
    }
}

impl From<PromptLevel> for RecordLevel {
    fn from(l: PromptLevel) -> Self {
        match l {
            PromptLevel::HighLevel => RecordLevel::HighLevel,
            PromptLevel::Detailed => RecordLevel::Detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(RecordLevel),
}

impl LevelFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(LevelFilter::All),
            "high-level" | "high" => Some(LevelFilter::Only(RecordLevel::HighLevel)),
            "detailed" => Some(LevelFilter::Only(RecordLevel::Detailed)),
            "refinement" => Some(LevelFilter::Only(RecordLevel::Refinement)),
            _ => None,
        }
    }

    pub fn matches(&self, level: RecordLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(l) => *l == level,
        }
    }
}

/// What a caller supplies when saving; the registry adds id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPromptDraft {
    pub title: String,
    pub prompt: String,
    pub project_type: String,
    pub level: RecordLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPromptRecord {
    pub id: RecordId,
    pub title: String,
    pub prompt: String,
    pub project_type: String,
    pub level: RecordLevel,
    pub timestamp: DateTime<Utc>,
}

/// Insertion-ordered saved prompts keyed by a never-reused id.
#[derive(Debug, Default)]
pub struct SavedPrompts {
    records: Vec<SavedPromptRecord>,
    next_id: u64,
}

impl SavedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, draft: SavedPromptDraft) -> RecordId {
        self.next_id += 1;
        let id = RecordId(self.next_id);
        self.records.push(SavedPromptRecord {
            id,
            title: draft.title,
            prompt: draft.prompt,
            project_type: draft.project_type,
            level: draft.level,
            timestamp: Utc::now(),
        });
        id
    }

    pub fn filter(&self, filter: LevelFilter) -> Vec<&SavedPromptRecord> {
        self.records.iter().filter(|r| filter.matches(r.level)).collect()
    }

    pub fn get(&self, id: RecordId) -> Option<&SavedPromptRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn delete(&mut self, id: RecordId) -> Option<SavedPromptRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, level: RecordLevel) -> SavedPromptDraft {
        SavedPromptDraft {
            title: title.into(),
            prompt: format!("{title} prompt"),
            project_type: "App".into(),
            level,
        }
    }

    fn seeded() -> SavedPrompts {
        let mut reg = SavedPrompts::new();
        reg.append(draft("high", RecordLevel::HighLevel));
        reg.append(draft("detail", RecordLevel::Detailed));
        reg.append(draft("refine", RecordLevel::Refinement));
        reg
    }

    #[test]
    fn append_then_filter_all_keeps_insertion_order() {
        let mut reg = SavedPrompts::new();
        let titles = ["a", "b", "c", "d"];
        for (i, t) in titles.iter().enumerate() {
            let level = if i % 2 == 0 { RecordLevel::Detailed } else { RecordLevel::Refinement };
            reg.append(draft(t, level));
        }
        let all = reg.filter(LevelFilter::All);
        assert_eq!(all.len(), titles.len());
        let got: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(got, titles);
    }

    #[test]
    fn filter_returns_only_matching_level() {
        let reg = seeded();
        for level in [RecordLevel::HighLevel, RecordLevel::Detailed, RecordLevel::Refinement] {
            let view = reg.filter(LevelFilter::Only(level));
            assert_eq!(view.len(), 1);
            assert!(view.iter().all(|r| r.level == level));
        }
    }

    #[test]
    fn delete_in_filtered_view_removes_the_shown_record() {
        let mut reg = seeded();
        let view: Vec<RecordId> =
            reg.filter(LevelFilter::Only(RecordLevel::Detailed)).iter().map(|r| r.id).collect();
        assert_eq!(view.len(), 1);

        let removed = reg.delete(view[0]).unwrap();
        assert_eq!(removed.level, RecordLevel::Detailed);
        assert_eq!(removed.title, "detail");

        let left: Vec<RecordLevel> = reg.filter(LevelFilter::All).iter().map(|r| r.level).collect();
        assert_eq!(left, vec![RecordLevel::HighLevel, RecordLevel::Refinement]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut reg = seeded();
        let last = reg.filter(LevelFilter::All).last().unwrap().id;
        assert!(reg.delete(last).is_some());
        let fresh = reg.append(draft("new", RecordLevel::HighLevel));
        assert!(fresh > last);
        assert!(reg.delete(last).is_none());
        assert_eq!(reg.get(fresh).unwrap().title, "new");
    }

    #[test]
    fn unknown_id_deletes_nothing() {
        let mut reg = seeded();
        assert!(reg.delete(RecordId(99)).is_none());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn filter_parse() {
        assert_eq!(LevelFilter::parse("All"), Some(LevelFilter::All));
        assert_eq!(
            LevelFilter::parse("refinement"),
            Some(LevelFilter::Only(RecordLevel::Refinement))
        );
        assert_eq!(LevelFilter::parse("bogus"), None);
    }
}
