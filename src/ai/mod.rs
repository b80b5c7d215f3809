//! AI management suggestions: gather open work, ask a chat model, keep the answer.

mod client;
mod prompt;

pub use client::{AiClient, ClientError};
pub use prompt::{build_prompt, collect_active_work, ProjectWork};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

/// File name for suggestions produced at `now`: `yyyyMMddHHmmss_Sugerencias.md`.
pub fn suggestions_file_name(now: NaiveDateTime) -> String {
    format!("{}_Sugerencias.md", now.format("%Y%m%d%H%M%S"))
}

/// Write `text` into `dir`, creating it if needed. Returns the written path.
pub fn save_suggestions(dir: &Path, text: &str, now: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let path = dir.join(suggestions_file_name(now));
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Saved suggestions");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_file_name_is_zero_padded_timestamp() {
        assert_eq!(suggestions_file_name(at(9, 7, 3)), "20240305090703_Sugerencias.md");
    }

    #[test]
    fn test_save_creates_directory_and_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("out");

        let path = save_suggestions(&dir, "# Consejos\n", at(18, 30, 0)).unwrap();

        assert_eq!(path, dir.join("20240305183000_Sugerencias.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Consejos\n");
    }
}
