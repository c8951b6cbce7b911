use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line text field used by the add-card form.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let split = self.char_to_byte(self.cursor);
        let (before, rest) = self.text.split_at(split);
        let mut chars = rest.chars();
        match chars.next() {
            Some(ch) => (before, Some(ch), chars.as_str()),
            None => (before, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.len() => self.remove_at(self.cursor),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                let at = self.char_to_byte(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn remove_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Delete the word before the cursor: trailing whitespace, then the word.
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start = self.char_to_byte(pos);
        let end = self.char_to_byte(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_hangul_tracks_chars_not_bytes() {
        let mut input = LineInput::default();
        type_str(&mut input, "지게차");
        assert_eq!(input.value(), "지게차");
        assert_eq!(input.cursor, 3);

        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "지차");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = LineInput::new("ac");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "ab");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ab");

        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor, 0);

        let mut empty = LineInput::default();
        empty.handle(key(KeyCode::Backspace));
        empty.handle(key(KeyCode::Delete));
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::new("a");
        input.handle(key(KeyCode::Right));
        assert_eq!(input.cursor, 1);
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.cursor, 0);
        input.handle(key(KeyCode::End));
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn ctrl_shortcuts() {
        let mut input = LineInput::new("~/images/forklift  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "~/images/forklift");

        input.handle(ctrl('a'));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, input.value().chars().count());

        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert!(input.is_blank());
    }

    #[test]
    fn render_parts_split_on_cursor() {
        let mut input = LineInput::new("안전모");
        assert_eq!(input.render_parts(), ("안전모", None, ""));
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.render_parts(), ("안", Some('전'), "모"));
        input.handle(key(KeyCode::Home));
        assert_eq!(input.render_parts(), ("", Some('안'), "전모"));
    }

    #[test]
    fn submit_and_cancel() {
        let mut input = LineInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Char('y'))), InputResult::Continue);
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(LineInput::new("   ").is_blank());
        assert!(!LineInput::new(" a ").is_blank());
    }
}
