//! Application state and key dispatch.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::collector::ProcessRecord;
use crate::state::{sort_snapshot, SortKey};

/// Navigation and view state. The only state that survives across frames;
/// the snapshot inside it is replaced wholesale on every refresh.
pub struct App {
    /// Current sorted snapshot.
    pub snapshot: Vec<ProcessRecord>,
    /// Active sort key.
    pub sort_key: SortKey,
    /// Selected row index into the current sorted snapshot.
    pub selected: usize,
    /// First visible row index.
    pub scroll: usize,
    /// Data rows the current frame geometry can display; cached each frame
    /// so paging and reconciliation are testable without a terminal.
    pub visible_rows: usize,
    /// Detail popup mode: the point-in-time copy being shown, if any.
    pub detail: Option<ProcessRecord>,
}

impl App {
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            sort_key: SortKey::default(),
            selected: 0,
            scroll: 0,
            visible_rows: 1,
            detail: None,
        }
    }

    /// Installs a freshly captured snapshot: sorts it by the active key and
    /// re-establishes the selection/scroll invariants against its size.
    pub fn apply_snapshot(&mut self, mut snapshot: Vec<ProcessRecord>) {
        sort_snapshot(&mut snapshot, self.sort_key);
        self.snapshot = snapshot;
        self.reconcile();
    }

    /// Clamps the selection into the snapshot, then moves the scroll window
    /// so the selected row stays visible. Runs after every snapshot refresh
    /// (the process set may have shrunk) and after every navigation event.
    pub fn reconcile(&mut self) {
        if self.snapshot.is_empty() {
            self.selected = 0;
            self.scroll = 0;
            return;
        }
        if self.selected >= self.snapshot.len() {
            self.selected = self.snapshot.len() - 1;
        }
        let visible = self.visible_rows.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }

    /// The record under the cursor, if the snapshot is non-empty.
    pub fn selected_record(&self) -> Option<&ProcessRecord> {
        self.snapshot.get(self.selected)
    }

    fn navigate(&mut self, delta: isize) {
        let count = self.snapshot.len();
        if count == 0 {
            return;
        }
        self.selected = if delta > 0 {
            (self.selected + delta as usize).min(count - 1)
        } else {
            self.selected.saturating_sub(delta.unsigned_abs())
        };
        self.reconcile();
    }

    /// Dispatches one key event. Returns true when the application should
    /// quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Detail popup mode: only the close keys are recognized; closing
        // changes no other view state.
        if self.detail.is_some() {
            if matches!(
                code,
                KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')
            ) {
                self.detail = None;
            }
            return false;
        }

        // Ctrl+C always quits
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,

            KeyCode::Up => self.navigate(-1),
            KeyCode::Down => self.navigate(1),
            KeyCode::PageUp => self.navigate(-(self.visible_rows.max(1) as isize)),
            KeyCode::PageDown => self.navigate(self.visible_rows.max(1) as isize),

            // Cycling the sort keeps the selected row *position*; the next
            // refresh re-sorts, so the same slot may hold another process.
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.sort_key = self.sort_key.next();
            }

            KeyCode::Enter => self.detail = self.selected_record().cloned(),

            _ => {}
        }

        false
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
