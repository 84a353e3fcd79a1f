use std::time::SystemTime;

use ratatui::widgets::TableState;

use super::interval::PollInterval;
use crate::data::{Process, ProcessRow};

/// Last-known process list plus everything the table view needs to draw it.
pub struct ProcessTable {
    rows: Vec<ProcessRow>,
    visible: Vec<usize>,
    pub table_state: TableState,
    selected_id: Option<String>,
    pub scroll: usize,
    filter: String,
    filter_active: bool,
    loaded: bool,
    interval: PollInterval,
}

impl ProcessTable {
    pub fn new(interval: PollInterval) -> Self {
        Self {
            rows: Vec::new(),
            visible: Vec::new(),
            table_state: TableState::default(),
            selected_id: None,
            scroll: 0,
            filter: String::new(),
            filter_active: false,
            loaded: false,
            interval,
        }
    }

    /// Replace the list wholesale and rederive rows, keeping the cursor on
    /// the same process id when it survived the refresh.
    pub fn apply_fetch_result(&mut self, processes: Vec<Process>, now: SystemTime) {
        self.rows = processes
            .iter()
            .map(|process| ProcessRow::from_process(process, now))
            .collect();
        self.loaded = true;
        self.refilter();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ProcessRow> {
        self.visible.iter().filter_map(|&idx| self.rows.get(idx))
    }

    pub fn highlighted(&self) -> Option<&ProcessRow> {
        self.table_state
            .selected()
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&idx| self.rows.get(idx))
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn interval(&self) -> PollInterval {
        self.interval
    }

    pub fn increment_interval(&mut self) {
        self.interval.increment();
    }

    pub fn decrement_interval(&mut self) {
        self.interval.decrement();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_filter_focused(&self) -> bool {
        self.filter_active
    }

    pub fn focus_filter(&mut self) {
        self.filter_active = true;
    }

    /// Leave the input but keep what was typed.
    pub fn blur_filter(&mut self) {
        self.filter_active = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_active = false;
        if !self.filter.is_empty() {
            self.filter.clear();
            self.refilter();
        }
    }

    pub fn push_filter_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.refilter();
    }

    pub fn pop_filter_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            self.selected_id = None;
            return;
        }

        let current = self.table_state.selected().unwrap_or(0);
        let len = self.visible.len();
        let new_index = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len.saturating_sub(1))
        };
        self.select_position(new_index);
    }

    pub fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.select_position(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.select_position(self.visible.len() - 1);
        }
    }

    pub fn ensure_visible(&mut self, max_rows: usize) {
        if max_rows == 0 {
            return;
        }
        if let Some(selected) = self.table_state.selected() {
            if selected < self.scroll {
                self.scroll = selected;
            } else if selected >= self.scroll + max_rows {
                self.scroll = selected + 1 - max_rows;
            }
        }
        let max_scroll = self.visible.len().saturating_sub(max_rows);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }

    fn refilter(&mut self) {
        let filter = self.filter.as_str();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.matches(filter))
            .map(|(idx, _)| idx)
            .collect();
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            self.selected_id = None;
            self.scroll = 0;
            return;
        }

        let position = self
            .selected_id
            .as_deref()
            .and_then(|id| {
                self.visible
                    .iter()
                    .position(|&idx| self.rows[idx].id == id)
            })
            .unwrap_or(0);
        self.select_position(position);
    }

    fn select_position(&mut self, position: usize) {
        self.table_state.select(Some(position));
        self.selected_id = self
            .visible
            .get(position)
            .map(|&idx| self.rows[idx].id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProcessStatus, Progress};
    use std::time::UNIX_EPOCH;

    fn process(id: &str, db: &str) -> Process {
        Process {
            id: id.to_string(),
            kind: "Query".to_string(),
            database: db.to_string(),
            user: "admin".to_string(),
            start_time: 0,
            status: ProcessStatus::Running,
            progress: Progress::default(),
        }
    }

    fn table_with(ids: &[&str]) -> ProcessTable {
        let mut table = ProcessTable::new(PollInterval::default());
        table.apply_fetch_result(ids.iter().map(|id| process(id, "db")).collect(), UNIX_EPOCH);
        table
    }

    #[test]
    fn starts_unloaded_and_empty() {
        let table = ProcessTable::new(PollInterval::default());
        assert!(!table.is_loaded());
        assert_eq!(table.highlighted_id(), None);
    }

    #[test]
    fn first_fetch_selects_first_row() {
        let table = table_with(&["a", "b", "c"]);
        assert_eq!(table.highlighted_id(), Some("a"));
        assert_eq!(table.highlighted().map(|row| row.id.as_str()), Some("a"));
    }

    #[test]
    fn selection_survives_reorder() {
        let mut table = table_with(&["a", "b", "c"]);
        table.move_selection(2);
        assert_eq!(table.highlighted_id(), Some("c"));

        table.apply_fetch_result(
            vec![process("c", "db"), process("a", "db"), process("d", "db")],
            UNIX_EPOCH,
        );
        assert_eq!(table.highlighted_id(), Some("c"));
        assert_eq!(table.table_state.selected(), Some(0));
    }

    #[test]
    fn selection_resets_when_id_disappears() {
        let mut table = table_with(&["a", "b", "c"]);
        table.move_selection(1);
        table.apply_fetch_result(vec![process("x", "db"), process("y", "db")], UNIX_EPOCH);
        assert_eq!(table.highlighted_id(), Some("x"));
    }

    #[test]
    fn empty_fetch_clears_selection() {
        let mut table = table_with(&["a"]);
        table.apply_fetch_result(Vec::new(), UNIX_EPOCH);
        assert!(table.is_loaded());
        assert_eq!(table.visible_len(), 0);
        assert_eq!(table.highlighted_id(), None);
        assert_eq!(table.table_state.selected(), None);
    }

    #[test]
    fn move_selection_clamps_to_bounds() {
        let mut table = table_with(&["a", "b"]);
        table.move_selection(-5);
        assert_eq!(table.highlighted_id(), Some("a"));
        table.move_selection(10);
        assert_eq!(table.highlighted_id(), Some("b"));
        table.select_first();
        assert_eq!(table.highlighted_id(), Some("a"));
        table.select_last();
        assert_eq!(table.highlighted_id(), Some("b"));
    }

    #[test]
    fn filter_narrows_rows_and_moves_selection() {
        let mut table = ProcessTable::new(PollInterval::default());
        table.apply_fetch_result(
            vec![process("a", "movies"), process("b", "music"), process("c", "movies")],
            UNIX_EPOCH,
        );
        table.move_selection(1);
        assert_eq!(table.highlighted_id(), Some("b"));

        table.focus_filter();
        for ch in "mov".chars() {
            table.push_filter_char(ch);
        }
        assert_eq!(table.visible_len(), 2);
        assert_eq!(table.highlighted_id(), Some("a"));

        table.pop_filter_char();
        table.pop_filter_char();
        assert_eq!(table.filter(), "m");
        assert_eq!(table.visible_len(), 3);

        table.clear_filter();
        assert!(!table.is_filter_focused());
        assert_eq!(table.filter(), "");
    }

    #[test]
    fn filter_with_no_matches_leaves_nothing_selected() {
        let mut table = table_with(&["a", "b"]);
        table.push_filter_char('z');
        assert_eq!(table.visible_len(), 0);
        assert_eq!(table.highlighted(), None);
        assert_eq!(table.highlighted_id(), None);
    }

    #[test]
    fn ensure_visible_follows_selection() {
        let mut table = table_with(&["a", "b", "c", "d", "e"]);
        table.select_last();
        table.ensure_visible(2);
        assert_eq!(table.scroll, 3);
        table.select_first();
        table.ensure_visible(2);
        assert_eq!(table.scroll, 0);
    }

    #[test]
    fn interval_adjustments_respect_floor() {
        let mut table = ProcessTable::new(PollInterval::default());
        for _ in 0..10 {
            table.decrement_interval();
        }
        assert_eq!(table.interval().secs(), 2);
        table.increment_interval();
        assert_eq!(table.interval().secs(), 3);
    }
}
