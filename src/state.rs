//! Sort state for the process list.

use crate::collector::ProcessRecord;

/// Process list sort key.
///
/// Memory sorts descending by design: the dominant use case is finding the
/// biggest consumer. The other keys sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Pid,
    Mem,
    Name,
}

impl SortKey {
    /// Get the column label for this key
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pid => "PID",
            Self::Mem => "RSS(KiB)",
            Self::Name => "NAME",
        }
    }

    /// Cycle to the next key
    pub fn next(&self) -> Self {
        match self {
            Self::Pid => Self::Mem,
            Self::Mem => Self::Name,
            Self::Name => Self::Pid,
        }
    }
}

/// Orders a snapshot in place by the given key.
///
/// The sort is stable, so ties keep their relative order across frames and
/// the list does not jitter while equal-keyed processes coexist.
pub fn sort_snapshot(snapshot: &mut [ProcessRecord], key: SortKey) {
    match key {
        SortKey::Pid => snapshot.sort_by(|a, b| a.pid.cmp(&b.pid)),
        SortKey::Mem => snapshot.sort_by(|a, b| b.rss_kib.cmp(&a.rss_kib)),
        SortKey::Name => snapshot.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}
