use std::collections::{HashMap, HashSet};

use crate::models::application::Application;

/// Career id -> "already applied". Always derived from scratch; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationLookup {
    applied: HashMap<i64, bool>,
}

impl ApplicationLookup {
    /// Union of the user's history and any ids the server or a successful
    /// submission has confirmed since.
    pub fn derive(history: &[Application], confirmed: &HashSet<i64>) -> Self {
        let applied = history
            .iter()
            .map(|app| app.career_id)
            .chain(confirmed.iter().copied())
            .map(|id| (id, true))
            .collect();
        Self { applied }
    }

    pub fn is_applied(&self, career_id: i64) -> bool {
        self.applied.get(&career_id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn career_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.applied.keys().copied()
    }
}
