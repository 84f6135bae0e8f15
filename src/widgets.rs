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
use crate::{
    text_edit::TEXT_EDIT_CAPACITY,
    ui::{color_from_state, DevUi},
    vec2, Dimensioni, InputTextFlags, Key, Recti, UiId, Vec2f, Vec3f,
};

#[derive(Debug, Clone, Copy)]
/// Tagged payload for the [`DevUi::value`] read-only display widget.
pub enum DebugValue {
    /// A scalar.
    Float(f32),
    /// A 2-component vector.
    Vec2(Vec2f),
    /// A 3-component vector.
    Vec3(Vec3f),
}

impl DevUi {
    /// The widget preamble shared by every widget: no-op while disabled or
    /// while the current window is collapsed. Panics when called outside a
    /// window, which is a programming error in the caller.
    fn widget_ready(&self) -> Option<usize> {
        if !self.is_enabled {
            return None;
        }
        let idx = self.expect_window();
        if self.windows[idx].is_collapsed {
            None
        } else {
            Some(idx)
        }
    }

    /// Draws a line of text at the cursor.
    pub fn text(&mut self, text: &str) {
        if self.widget_ready().is_none() {
            return;
        }
        let text_size = self.get_text_size(text);
        let mut pos = self.cursor();
        pos.y += self.element_size(text_size);
        self.push_text(pos, text, self.style.text_color);
    }

    /// Formatted variant of [`DevUi::text`], for use with `format_args!`.
    pub fn textf(&mut self, args: std::fmt::Arguments) {
        if self.widget_ready().is_none() {
            return;
        }
        self.text(&args.to_string());
    }

    /// Draws `label` to the right of the widget emitted just before it.
    /// Internal `$`-prefixed labels draw nothing.
    pub fn label(&mut self, label: &str) {
        if label.starts_with('$') {
            return;
        }
        if self.widget_ready().is_none() {
            return;
        }
        self.same_line();
        self.text(label);
    }

    /// Read-only `name: value` display line.
    pub fn value(&mut self, label: &str, value: DebugValue) {
        if self.widget_ready().is_none() {
            return;
        }
        let text = match value {
            DebugValue::Float(v) => format!("{}: {:.2}", label, v),
            DebugValue::Vec2(v) => format!("{}: {:.2}, {:.2}", label, v.x, v.y),
            DebugValue::Vec3(v) => format!("{}: {:.2}, {:.2}, {:.2}", label, v.x, v.y, v.z),
        };
        self.text(&text);
    }

    /// Push button. Returns `true` on the one-shot press transition, or every
    /// held frame when `repeat_when_held` is set.
    pub fn button(&mut self, label: &str, repeat_when_held: bool) -> bool {
        if self.widget_ready().is_none() {
            return false;
        }
        let text_size = self.get_text_size(label);
        let id = self.make_id(label);
        let cursor = self.cursor();
        let pad = self.style.frame_padding;
        let button_rect = Recti::new(cursor.x, cursor.y, text_size.width + pad.x * 2, text_size.height + pad.y * 2);
        self.element_size(Dimensioni::new(button_rect.width, button_rect.height));
        let state = self.update_button(button_rect, id, repeat_when_held);
        let color = color_from_state(&state, self.style.button_active, self.style.button_hot, self.style.button);
        self.push_rect(button_rect, color);
        self.push_text(vec2(button_rect.x + pad.x, button_rect.y), label, self.style.text_color);
        state.is_pressed
    }

    /// Checkbox with a label to its right. Toggles `value` in place on press
    /// and returns whether it changed this frame.
    pub fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        if self.widget_ready().is_none() {
            return false;
        }
        let id = self.make_id(label);
        let cursor = self.cursor();
        let side = self.text_height() + self.style.frame_padding.y * 2;
        let checkbox_rect = Recti::new(cursor.x, cursor.y, side, side);
        self.element_size(Dimensioni::new(side, side));

        self.push_rect(checkbox_rect, self.style.button);
        let state = self.update_button(checkbox_rect, id, false);
        let mut changed = false;
        if state.is_pressed {
            *value = !*value;
            changed = true;
        }
        if *value || state.is_hot {
            let mark_color = if *value { self.style.button_active } else { self.style.button_hot };
            let off = self.style.checkmark_offset;
            let mark_rect = Recti::new(
                checkbox_rect.x + off.x,
                checkbox_rect.y + off.y,
                checkbox_rect.width - off.x * 2,
                checkbox_rect.height - off.y * 2,
            );
            self.push_rect(mark_rect, mark_color);
        }
        self.label(label);
        changed
    }

    /// Single-line text field. A click focuses it, cloning `buffer` into the
    /// shared scratch buffer; Enter copies the scratch back into `buffer` and
    /// returns `true`, Escape or clicking elsewhere abandons the edit.
    /// `max_length` caps the edited character count.
    pub fn input_text(&mut self, label: &str, buffer: &mut String, max_length: usize, flags: InputTextFlags) -> bool {
        assert!(max_length > 0 && max_length <= TEXT_EDIT_CAPACITY);
        let Some(idx) = self.widget_ready() else {
            return false;
        };
        let id = self.make_id(label);
        let cursor = self.cursor();
        let pad = self.style.frame_padding;
        let item_width = self.windows[idx].item_width;
        let frame_rect = Recti::new(cursor.x, cursor.y, item_width + pad.x * 2, self.text_height() + pad.y * 2);
        self.element_size(Dimensioni::new(frame_rect.width, frame_rect.height));

        let is_hot = self.has_input()
            && self.hot_win == Some(idx)
            && self.hot_id.is_empty()
            && frame_rect.contains(&self.mouse_pos());
        if is_hot {
            self.hot_id = id;
        }

        if self.is_mouse_pressed() {
            if is_hot {
                if self.active_id != id {
                    self.text_edit.begin(buffer, max_length);
                }
                self.active_id = id;
            } else if self.active_id == id {
                self.active_id = UiId::EMPTY;
            }
        }

        let mut changed = false;
        if self.active_id == id {
            if self.is_edit_key_pressed(Key::Enter) {
                buffer.clear();
                buffer.push_str(self.text_edit.text());
                changed = true;
                self.active_id = UiId::EMPTY;
            } else if self.is_edit_key_pressed(Key::Escape) {
                // The scratch is reseeded on the next activation, so
                // abandoning it is the whole cancel.
                self.active_id = UiId::EMPTY;
            } else if self.is_edit_key_pressed(Key::Backspace) {
                self.text_edit.backspace();
            } else if self.is_edit_key_pressed(Key::Delete) {
                self.text_edit.delete();
            } else if self.is_edit_key_pressed(Key::Home) {
                self.text_edit.move_home();
            } else if self.is_edit_key_pressed(Key::End) {
                self.text_edit.move_end();
            } else if self.is_edit_key_pressed(Key::Left) {
                self.text_edit.move_left();
            } else if self.is_edit_key_pressed(Key::Right) {
                self.text_edit.move_right();
            } else if let Some(c) = self.char_input() {
                self.text_edit.insert(c, flags);
            }
        }

        self.push_rect(frame_rect, self.style.widget_background);
        if self.active_id == id {
            let pre_width = if self.text_edit.cursor() == 0 {
                0
            } else {
                self.font.text_size(self.text_edit.text_before_cursor()).width
            };
            let caret_rect = Recti::new(
                frame_rect.x + pad.x + pre_width,
                frame_rect.y + pad.y,
                self.style.text_cursor_width,
                self.text_height(),
            );
            self.push_rect(caret_rect, self.style.text_cursor);
        }
        self.push_clip_rect(frame_rect);
        let text_pos = vec2(frame_rect.x + pad.x, frame_rect.y);
        if self.active_id == id {
            let shown = self.text_edit.text().to_string();
            self.push_text(text_pos, &shown, self.style.text_color);
        } else {
            self.push_text(text_pos, buffer, self.style.text_color);
        }
        self.pop_clip_rect();
        self.label(label);
        changed
    }

    /// Decimal-formatted wrapper over [`DevUi::input_text`]. The committed
    /// text must parse as a float, otherwise the edit is discarded.
    pub fn input_float(&mut self, label: &str, value: &mut f32) -> bool {
        if self.widget_ready().is_none() {
            return false;
        }
        let mut buffer = format!("{:.3}", *value);
        if self.input_text(label, &mut buffer, 64, InputTextFlags::DECIMAL) {
            if let Ok(parsed) = buffer.trim().parse::<f32>() {
                *value = parsed;
                return true;
            }
        }
        false
    }

    /// Horizontal slider mapping the pointer position linearly onto
    /// `[minv, maxv]` while the grab is held.
    pub fn slider_float(&mut self, label: &str, value: &mut f32, minv: f32, maxv: f32) -> bool {
        assert!(maxv > minv);
        let Some(idx) = self.widget_ready() else {
            return false;
        };
        let id = self.make_id(label);
        let cursor = self.cursor();
        let pad = self.style.frame_padding;
        let item_width = self.windows[idx].item_width;
        let frame_rect = Recti::new(cursor.x, cursor.y, item_width + pad.x * 2, self.text_height() + pad.y * 2);
        let zone = Recti::new(frame_rect.x + pad.x, frame_rect.y + pad.y, frame_rect.width - pad.x * 2, frame_rect.height - pad.y * 2);

        let grab_w = self.style.slider_grab_width;
        let work_width = (zone.width - grab_w) as f32;
        let work_min_x = zone.x as f32 + grab_w as f32 * 0.5;
        let state = self.update_button(zone, id, true);
        self.element_size(Dimensioni::new(frame_rect.width, frame_rect.height));

        let mut changed = false;
        if state.is_held {
            let t = ((self.mouse_pos().x as f32 - work_min_x) / work_width).clamp(0.0, 1.0);
            let new_value = minv + (maxv - minv) * t;
            if *value != new_value {
                *value = new_value;
                changed = true;
            }
        }

        let grab_t = (*value - minv) / (maxv - minv);
        let grab_x = work_min_x + work_width * grab_t;
        let grab_rect = Recti::new((grab_x - grab_w as f32 * 0.5) as i32, zone.y, grab_w, zone.height);
        let grab_color = color_from_state(&state, self.style.button_active, self.style.button_hot, self.style.button);
        self.push_rect(frame_rect, self.style.widget_background);
        self.push_rect(grab_rect, grab_color);

        let text = format!("{:.3}", *value);
        let text_w = self.get_text_size(&text).width;
        self.push_text(vec2(zone.x + zone.width / 2 - text_w / 2, frame_rect.y), &text, self.style.text_color);
        self.label(label);
        changed
    }

    /// Drag-to-edit scalar: each pixel of horizontal pointer motion while
    /// held changes `value` by `speed`.
    pub fn drag_float(&mut self, label: &str, value: &mut f32, speed: f32) -> bool {
        let Some(idx) = self.widget_ready() else {
            return false;
        };
        let id = self.make_id(label);
        let cursor = self.cursor();
        let pad = self.style.frame_padding;
        let item_width = self.windows[idx].item_width;
        let frame_rect = Recti::new(cursor.x, cursor.y, item_width + pad.x * 2, self.text_height() + pad.y * 2);
        let zone = Recti::new(frame_rect.x + pad.x, frame_rect.y + pad.y, frame_rect.width - pad.x * 2, frame_rect.height - pad.y * 2);
        self.element_size(Dimensioni::new(frame_rect.width, frame_rect.height));

        let state = self.update_button(zone, id, true);
        let mut changed = false;
        if state.is_held {
            let new_value = *value + self.mouse_delta().x as f32 * speed;
            if *value != new_value {
                *value = new_value;
                changed = true;
            }
        }

        self.push_rect(frame_rect, self.style.widget_background);
        self.push_clip_rect(frame_rect);
        let text = format!("{:.3}", *value);
        let text_w = self.get_text_size(&text).width;
        self.push_text(vec2(zone.x + zone.width / 2 - text_w / 2, frame_rect.y), &text, self.style.text_color);
        self.pop_clip_rect();
        self.label(label);
        changed
    }

    /// Three [`DevUi::drag_float`] widgets on one row editing a 3-component
    /// value, nested under one id scope so the component labels never collide
    /// across widgets.
    pub fn drag_float3(&mut self, label: &str, value: &mut [f32; 3], speed: f32) -> bool {
        let Some(idx) = self.widget_ready() else {
            return false;
        };
        let id = self.make_id(label);
        self.push_id(id);
        let pad_x = self.style.frame_padding.x;
        let spacing_x = self.style.item_spacing.x;
        let full_width = self.windows[idx].item_width;
        self.windows[idx].item_width = (full_width - (pad_x * 2 + spacing_x) * 2) / 3;
        let x_changed = self.drag_float("$X", &mut value[0], speed);
        self.same_line();
        let y_changed = self.drag_float("$Y", &mut value[1], speed);
        self.same_line();
        let z_changed = self.drag_float("$Z", &mut value[2], speed);
        self.windows[idx].item_width = self.windows[idx].default_item_width;
        self.label(label);
        self.pop_id();
        x_changed || y_changed || z_changed
    }
}
