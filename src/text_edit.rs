//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::InputTextFlags;

/// Capacity of the shared scratch edit buffer, in characters. Only one text
/// field edits at a time, so one buffer serves every `input_text` widget.
pub const TEXT_EDIT_CAPACITY: usize = 1024;

#[derive(Default)]
/// Scratch state for the text field currently being edited. Holds the live
/// text and the caret position as a character index; abandoning an edit is
/// free because the scratch is reseeded on the next activation.
pub struct TextEditState {
    text: String,
    max_length: usize,
    cursor: usize,
}

impl TextEditState {
    /// Starts an edit session seeded from the external value. `max_length`
    /// caps the character count and must not exceed the scratch capacity.
    pub fn begin(&mut self, value: &str, max_length: usize) {
        assert!(max_length <= TEXT_EDIT_CAPACITY);
        self.text.clear();
        self.text.extend(value.chars().take(max_length));
        self.max_length = max_length;
        self.cursor = 0;
    }

    /// Live text being edited.
    pub fn text(&self) -> &str { &self.text }

    /// Caret position as a character index into [`TextEditState::text`].
    pub fn cursor(&self) -> usize { self.cursor }

    /// Text left of the caret, used to place the caret quad.
    pub fn text_before_cursor(&self) -> &str { &self.text[..self.byte_cursor()] }

    /// Moves the caret to the start of the text.
    pub fn move_home(&mut self) { self.cursor = 0 }

    /// Moves the caret past the last character.
    pub fn move_end(&mut self) { self.cursor = self.char_len() }

    /// Moves the caret one character left, saturating at the start.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the caret one character right, saturating at the end.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Removes the character left of the caret, if any.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.text.remove(at);
        }
    }

    /// Removes the character under the caret, if any.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_cursor();
            self.text.remove(at);
        }
    }

    /// Inserts `c` at the caret and advances it. Rejected silently when the
    /// buffer is full or `flags` filters the character out.
    pub fn insert(&mut self, c: char, flags: InputTextFlags) {
        if flags.is_decimal() && !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+') {
            return;
        }
        if self.char_len() >= self.max_length {
            return;
        }
        let at = self.byte_cursor();
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn char_len(&self) -> usize { self.text.chars().count() }

    fn byte_cursor(&self) -> usize {
        self.text.char_indices().nth(self.cursor).map(|(i, _)| i).unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(value: &str) -> TextEditState {
        let mut state = TextEditState::default();
        state.begin(value, 64);
        state
    }

    #[test]
    fn begin_reseeds_discarding_prior_edits() {
        let mut state = edit("3.140");
        assert_eq!(state.text(), "3.140");
        assert_eq!(state.cursor(), 0);
        state.move_end();
        state.insert('1', InputTextFlags::empty());
        assert_eq!(state.text(), "3.1401");
        state.begin("3.140", 64);
        assert_eq!(state.text(), "3.140");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn insert_at_cursor() {
        let mut state = edit("ac");
        state.move_right();
        state.insert('b', InputTextFlags::empty());
        assert_eq!(state.text(), "abc");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut state = edit("abc");
        state.backspace();
        assert_eq!(state.text(), "abc");
        state.move_end();
        state.backspace();
        assert_eq!(state.text(), "ab");
        state.move_home();
        state.delete();
        assert_eq!(state.text(), "b");
        state.delete();
        assert_eq!(state.text(), "");
        state.delete();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn cursor_movement_saturates() {
        let mut state = edit("xy");
        state.move_left();
        assert_eq!(state.cursor(), 0);
        state.move_end();
        state.move_right();
        assert_eq!(state.cursor(), 2);
        state.move_left();
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.text_before_cursor(), "x");
    }

    #[test]
    fn decimal_flag_filters_characters() {
        let mut state = edit("");
        for c in "a1.z-+e2".chars() {
            state.insert(c, InputTextFlags::DECIMAL);
        }
        assert_eq!(state.text(), "1.-+2");
    }

    #[test]
    fn insert_stops_at_max_length() {
        let mut state = TextEditState::default();
        state.begin("", 3);
        for c in "abcd".chars() {
            state.insert(c, InputTextFlags::empty());
        }
        assert_eq!(state.text(), "abc");
    }
}
