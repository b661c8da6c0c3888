use anyhow::{Context, Result};
use fs_err as fs;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::NamedTempFile;

pub fn suggestion_file_name(index: usize) -> String {
    format!("stitch_prompt_{}.txt", index + 1)
}

pub fn idea_file_name(index: usize) -> String {
    format!("stitch_idea_{}.txt", index + 1)
}

pub fn refinement_file_name() -> String {
    "stitch_refinement.txt".to_string()
}

/// `stitch_prompt_{title}.txt` with `:`, spaces and other path-unsafe
/// characters replaced by `_`.
pub fn saved_file_name(title: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r#"[:\s/\\<>"|?*\x00-\x1f]"#).expect("static regex"));
    format!("stitch_prompt_{}.txt", re.replace_all(title, "_"))
}

/// Write `text` byte-for-byte to `dir/file_name`, replacing any existing file.
pub fn export_text(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(file_name);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create temp file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(&target)
        .with_context(|| format!("cannot write {}", target.display()))?;
    tracing::debug!(path = %target.display(), bytes = text.len(), "exported text");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_text_reads_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let text = "Product detail page for a Japandi-styled tea store.\n  \
                    Neutral colors, \u{00e9}l\u{00e9}gant font.\n";
        let path = export_text(dir.path(), &suggestion_file_name(0), text).unwrap();
        assert!(path.ends_with("stitch_prompt_1.txt"));
        assert_eq!(fs::read(&path).unwrap(), text.as_bytes());
    }

    #[test]
    fn export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        export_text(dir.path(), "a.txt", "old contents that are longer").unwrap();
        let path = export_text(dir.path(), "a.txt", "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("prompts");
        let path = export_text(&nested, &refinement_file_name(), "").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"");
    }

    #[test]
    fn saved_names_are_deterministic_and_safe() {
        assert_eq!(
            saved_file_name("Refinement: Add component on homepage"),
            "stitch_prompt_Refinement__Add_component_on_homepage.txt"
        );
        assert_eq!(saved_file_name("a/b"), "stitch_prompt_a_b.txt");
        assert_eq!(idea_file_name(2), "stitch_idea_3.txt");
    }
}
