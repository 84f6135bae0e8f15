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
use crate::{Dimensioni, Vec2i};

#[derive(Debug, Default, Clone, Copy)]
/// Write cursor for one window. Elements are placed at the cursor and then
/// advance it one row down via [`Layout::element_size`]; an optional
/// [`Layout::same_line`] immediately after rewinds to the end of the row just
/// emitted, so composite widgets can place several rectangles on one visual
/// row.
pub struct Layout {
    cursor: Vec2i,
    row_start_x: i32,
    line_height: i32,
    last_line_cursor: Vec2i,
    last_line_height: i32,
}

impl Layout {
    /// Restarts layout at `origin`, the top-left of the window's content
    /// area. Called once per frame when the window begins.
    pub fn reset(&mut self, origin: Vec2i) {
        self.cursor = origin;
        self.row_start_x = origin.x;
        self.line_height = 0;
        self.last_line_cursor = origin;
        self.last_line_height = 0;
    }

    /// Position where the next element is placed.
    pub fn cursor(&self) -> Vec2i { self.cursor }

    /// Accounts for an element of `size` at the cursor and wraps to the next
    /// row. The row height is the maximum of the element heights emitted on
    /// it. Returns the vertical offset that centers this element within the
    /// row.
    pub fn element_size(&mut self, size: Dimensioni, item_spacing_y: i32) -> i32 {
        let line_height = size.height.max(self.line_height);
        let center_offset = (line_height - size.height) / 2;
        self.last_line_cursor = Vec2i::new(self.cursor.x + size.width, self.cursor.y);
        self.cursor = Vec2i::new(self.row_start_x, self.cursor.y + line_height + item_spacing_y);
        self.last_line_height = line_height;
        self.line_height = 0;
        center_offset
    }

    /// Undoes the wrap of the last [`Layout::element_size`] call and places
    /// the cursor `spacing` pixels to the right of the last element, so the
    /// next element continues the same row.
    pub fn same_line(&mut self, spacing: i32) {
        self.cursor = Vec2i::new(self.last_line_cursor.x + spacing, self.last_line_cursor.y);
        self.line_height = self.last_line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(w: i32, h: i32) -> Dimensioni { Dimensioni::new(w, h) }

    #[test]
    fn elements_stack_vertically() {
        let mut layout = Layout::default();
        layout.reset(Vec2i::new(8, 28));
        assert_eq!((layout.cursor().x, layout.cursor().y), (8, 28));
        layout.element_size(dim(100, 20), 5);
        assert_eq!((layout.cursor().x, layout.cursor().y), (8, 53));
        layout.element_size(dim(40, 16), 5);
        assert_eq!((layout.cursor().x, layout.cursor().y), (8, 74));
    }

    #[test]
    fn same_line_continues_the_row() {
        let mut layout = Layout::default();
        layout.reset(Vec2i::new(0, 0));
        layout.element_size(dim(30, 20), 5);
        layout.same_line(10);
        assert_eq!((layout.cursor().x, layout.cursor().y), (40, 0));
        // The row height carries over, so a shorter element on the same row
        // still wraps past the tallest one.
        layout.element_size(dim(30, 8), 5);
        assert_eq!(layout.cursor().y, 25);
    }

    #[test]
    fn taller_second_element_grows_the_row() {
        let mut layout = Layout::default();
        layout.reset(Vec2i::new(0, 0));
        layout.element_size(dim(30, 10), 5);
        layout.same_line(0);
        layout.element_size(dim(30, 24), 5);
        assert_eq!(layout.cursor().y, 29);
    }

    #[test]
    fn shorter_element_centers_in_row() {
        let mut layout = Layout::default();
        layout.reset(Vec2i::new(0, 0));
        layout.element_size(dim(30, 20), 5);
        layout.same_line(0);
        let offset = layout.element_size(dim(30, 10), 5);
        assert_eq!(offset, 5);
    }

    #[test]
    fn layout_is_deterministic() {
        let run = || {
            let mut layout = Layout::default();
            layout.reset(Vec2i::new(8, 28));
            let mut positions = Vec::new();
            for i in 0..4 {
                positions.push((layout.cursor().x, layout.cursor().y));
                layout.element_size(dim(80, 16 + i), 5);
                if i == 1 {
                    layout.same_line(10);
                }
            }
            positions
        };
        assert_eq!(run(), run());
    }
}
