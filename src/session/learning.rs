/// Cursor over the active category while the learning overlay is open.
///
/// The card list itself stays in the library; callers pass its current length
/// so deletes made elsewhere are always seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearningState {
    open: bool,
    index: usize,
    show_term: bool,
}

impl LearningState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn show_term(&self) -> bool {
        self.show_term
    }

    /// Open at `start`, clamped into the list. The term always starts hidden.
    pub fn open(&mut self, start: usize, len: usize) {
        self.index = if len == 0 { 0 } else { start.min(len - 1) };
        self.show_term = false;
        self.open = true;
    }

    /// Returns whether the overlay was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Advance one card. No-op on the last card.
    pub fn next(&mut self, len: usize) -> bool {
        if self.index + 1 >= len {
            return false;
        }
        self.index += 1;
        self.show_term = false;
        true
    }

    /// Go back one card. No-op on the first card.
    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.show_term = false;
        true
    }

    pub fn toggle_term(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.show_term = !self.show_term;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_clamps_start_index() {
        let mut state = LearningState::default();
        state.open(10, 3);
        assert!(state.is_open());
        assert_eq!(state.index(), 2);
        assert!(!state.show_term());

        state.open(1, 3);
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn open_on_empty_list_resets() {
        let mut state = LearningState::default();
        state.open(2, 3);
        state.toggle_term(3);
        state.open(5, 0);
        assert_eq!(state.index(), 0);
        assert!(!state.show_term());
    }

    #[test]
    fn next_and_prev_stop_at_boundaries() {
        let mut state = LearningState::default();
        state.open(0, 3);
        assert!(!state.prev());
        assert_eq!(state.index(), 0);

        assert!(state.next(3));
        assert!(state.next(3));
        assert_eq!(state.index(), 2);
        assert!(!state.next(3));
        assert_eq!(state.index(), 2);

        assert!(state.prev());
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn next_on_empty_list_is_noop() {
        let mut state = LearningState::default();
        state.open(0, 0);
        assert!(!state.next(0));
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn moving_hides_the_term() {
        let mut state = LearningState::default();
        state.open(0, 2);
        state.toggle_term(2);
        assert!(state.show_term());
        state.next(2);
        assert!(!state.show_term());

        state.toggle_term(2);
        state.prev();
        assert!(!state.show_term());
    }

    #[test]
    fn blocked_move_keeps_revealed_term() {
        let mut state = LearningState::default();
        state.open(0, 1);
        state.toggle_term(1);
        state.next(1);
        assert!(state.show_term());
    }

    #[test]
    fn toggle_flips_only_visibility() {
        let mut state = LearningState::default();
        state.open(1, 3);
        assert!(state.toggle_term(3));
        assert!(state.show_term());
        assert_eq!(state.index(), 1);
        assert!(state.toggle_term(3));
        assert!(!state.show_term());

        let mut empty = LearningState::default();
        empty.open(0, 0);
        assert!(!empty.toggle_term(0));
        assert!(!empty.show_term());
    }

    #[test]
    fn close_reports_previous_state() {
        let mut state = LearningState::default();
        assert!(!state.close());
        state.open(0, 1);
        assert!(state.close());
        assert!(!state.is_open());
    }
}
