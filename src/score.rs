use std::fs;
use std::path::PathBuf;

/// Best-effort persistence for the high score: one decimal number in a text
/// file. Anything that goes wrong reading resolves to 0, and write failures
/// are swallowed so gameplay never stalls on disk trouble.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub const DEFAULT_FILE: &'static str = "highscore.dat";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) {
        let _ = fs::write(&self.path, score.to_string());
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        HighScoreStore::new(Self::DEFAULT_FILE)
    }
}
