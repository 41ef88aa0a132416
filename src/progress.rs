//! Level completion progress
//!
//! Persisted to LocalStorage as a JSON array of booleans indexed by level - 1.
//! The simulation only ever writes completions; it never reads progress to
//! gate which levels can be played.

use serde::{Deserialize, Serialize};

/// Sink for level completions
pub trait ProgressStore {
    /// Record that `level` (1-based) has been completed
    fn mark_completed(&mut self, level: u32);
}

/// Completion flags for every level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    completed: Vec<bool>,
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "trapline_progress";

    /// Nothing completed yet
    pub fn new(levels: u32) -> Self {
        Self {
            completed: vec![false; levels as usize],
        }
    }

    pub fn is_completed(&self, level: u32) -> bool {
        level
            .checked_sub(1)
            .and_then(|i| self.completed.get(i as usize))
            .copied()
            .unwrap_or(false)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|&&c| c).count()
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parse stored flags, resized to `levels` entries
    pub fn from_json(json: &str, levels: u32) -> Result<Self, serde_json::Error> {
        let mut progress: Progress = serde_json::from_str(json)?;
        progress.completed.resize(levels as usize, false);
        Ok(progress)
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(levels: u32) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = Self::from_json(&json, levels) {
                    log::info!("Loaded progress ({} levels completed)", progress.completed_count());
                    return progress;
                }
            }
        }

        log::info!("No progress found, starting fresh");
        Self::new(levels)
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Progress saved ({} levels completed)", self.completed_count());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(levels: u32) -> Self {
        Self::new(levels)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl ProgressStore for Progress {
    fn mark_completed(&mut self, level: u32) {
        let Some(index) = level.checked_sub(1).map(|i| i as usize) else {
            return;
        };
        if index >= self.completed.len() {
            self.completed.resize(index + 1, false);
        }
        self.completed[index] = true;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_completed() {
        let mut progress = Progress::new(10);
        assert!(!progress.is_completed(3));
        progress.mark_completed(3);
        assert!(progress.is_completed(3));
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut progress = Progress::new(2);
        assert!(!progress.is_completed(0));
        assert!(!progress.is_completed(99));
        progress.mark_completed(0);
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_json_array_of_bools() {
        let mut progress = Progress::new(3);
        progress.mark_completed(2);
        assert_eq!(progress.to_json(), "[false,true,false]");

        let restored = Progress::from_json("[true,false]", 4).unwrap();
        assert_eq!(restored.len(), 4);
        assert!(restored.is_completed(1));
        assert!(!restored.is_completed(4));
    }
}
