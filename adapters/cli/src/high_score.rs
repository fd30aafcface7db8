//! Loads and persists the best score across sessions.
//!
//! The score file holds a single decimal number. A missing or unreadable
//! file simply means no high score yet; writes replace the file atomically
//! enough for a single-process game.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use skyhop_core::Score;

/// Reads the persisted high score, treating any failure as "no record".
pub(crate) fn load(path: &Path) -> Score {
    match fs::read_to_string(path) {
        Ok(contents) => Score::new(contents.trim().parse::<u32>().unwrap_or(0)),
        Err(_) => Score::ZERO,
    }
}

/// Writes the high score as a decimal string.
pub(crate) fn save(path: &Path, score: Score) -> Result<()> {
    fs::write(path, score.get().to_string())
        .with_context(|| format!("failed to write high score to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static NEXT_FILE: AtomicU32 = AtomicU32::new(0);

    fn scratch_file() -> PathBuf {
        let unique = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "skyhop-high-score-{}-{unique}.txt",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_means_no_record() {
        let path = scratch_file();
        assert_eq!(load(&path), Score::ZERO);
    }

    #[test]
    fn corrupt_contents_mean_no_record() {
        let path = scratch_file();
        fs::write(&path, "not a number").expect("scratch file is writable");
        assert_eq!(load(&path), Score::ZERO);
        fs::remove_file(&path).expect("scratch file removal");
    }

    #[test]
    fn scores_round_trip_through_the_file() {
        let path = scratch_file();
        save(&path, Score::new(2_188)).expect("save succeeds");
        assert_eq!(load(&path), Score::new(2_188));

        // Overwrites replace the record wholesale.
        save(&path, Score::new(3_001)).expect("second save succeeds");
        assert_eq!(load(&path), Score::new(3_001));
        fs::remove_file(&path).expect("scratch file removal");
    }

    #[test]
    fn repeated_saves_of_the_same_score_are_idempotent() {
        let path = scratch_file();
        save(&path, Score::new(777)).expect("first save succeeds");
        let first = fs::read_to_string(&path).expect("file readable");
        save(&path, Score::new(777)).expect("second save succeeds");
        let second = fs::read_to_string(&path).expect("file readable");
        assert_eq!(first, second);
        assert_eq!(load(&path), Score::new(777));
        fs::remove_file(&path).expect("scratch file removal");
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let path = scratch_file();
        fs::write(&path, " 1512 \n").expect("scratch file is writable");
        assert_eq!(load(&path), Score::new(1_512));
        fs::remove_file(&path).expect("scratch file removal");
    }
}
