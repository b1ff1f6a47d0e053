use std::path::Path;

use anyhow::Context;
use scriptcraft_core::history::HistoryEntry;

use crate::atomic::write_file_atomic;

/// Writes one history entry as a plain-text document.
pub fn export_script(entry: &HistoryEntry, path: &Path) -> anyhow::Result<()> {
    write_file_atomic(path, entry.to_text_document().as_bytes())
        .with_context(|| format!("failed to save script: {}", path.display()))?;
    log::info!("saved script to {}", path.display());
    Ok(())
}

/// A filesystem-friendly default name, e.g. `morning-routine-social_short.txt`.
pub fn suggested_file_name(entry: &HistoryEntry) -> String {
    let mut slug = String::new();
    for c in entry.topic.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "script" } else { slug };
    format!("{slug}-{}.txt", entry.content_kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptcraft_core::generation::ScriptResult;
    use scriptcraft_core::types::ContentKind;
    use std::fs;

    fn entry(topic: &str) -> HistoryEntry {
        HistoryEntry::from_result(
            0,
            ContentKind::SocialShort,
            topic,
            &ScriptResult::success("Hook: rise and shine"),
        )
    }

    #[test]
    fn writes_document_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/script.txt");

        export_script(&entry("Morning Routine"), &path).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.starts_with("Morning Routine\n"));
        assert!(first.contains("Hook: rise and shine"));

        export_script(&entry("Evening Routine"), &path).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert!(second.starts_with("Evening Routine\n"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn overwrites_existing_tmp_named_file_and_keeps_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let draft = dir.path().join("draft.tmp");
        let backup = dir.path().join("draft.bak");
        fs::write(&draft, "old").unwrap();
        fs::write(&backup, "user backup").unwrap();

        export_script(&entry("Morning Routine"), &draft).unwrap();

        let saved = fs::read_to_string(&draft).unwrap();
        assert!(saved.contains("Hook: rise and shine"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "user backup");
    }

    #[test]
    fn suggests_slugged_names() {
        assert_eq!(
            suggested_file_name(&entry("Morning Routine: 5 Tips!")),
            "morning-routine-5-tips-social_short.txt"
        );
        assert_eq!(suggested_file_name(&entry("???")), "script-social_short.txt");
    }
}
