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
#![deny(missing_docs)]
//! `devui` is an immediate-mode developer UI: movable, resizable, collapsible
//! overlay windows with buttons, checkboxes, sliders and text fields, built
//! without retained widget objects. Widget identity is recomputed from the
//! label text every frame, hit testing is arbitrated through a single
//! hot/active id pair with window z-order priority, and all drawing is
//! recorded as clipped textured quads that are flushed to a [`Renderer`]
//! backend once per frame.
//!
//! The platform layer, asset loader and renderer are external collaborators:
//! the crate consumes a per-frame [`Input`] snapshot and a [`FontAtlas`]
//! glyph-metrics table, and produces quad draw calls.

use std::{cell::RefCell, rc::Rc};

mod draw;
mod font;
mod id;
mod input;
mod layout;
mod text_edit;
mod ui;
mod widgets;
mod window;

pub use draw::*;
pub use font::*;
pub use id::UiId;
pub use input::*;
pub use rs_math3d::*;
pub use text_edit::TEXT_EDIT_CAPACITY;
pub use ui::{ButtonState, DevUi};
pub use widgets::DebugValue;
pub use window::UiWindow;

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Options restricting which characters a text field accepts.
    pub struct InputTextFlags : u32 {
        /// Only characters that can appear in a decimal number
        /// (digits, `.`, `-`, `+`).
        const DECIMAL = 1;
        /// No restriction.
        const NONE = 0;
    }
}

impl InputTextFlags {
    /// Returns `true` if the decimal filter is requested.
    pub fn is_decimal(&self) -> bool { self.intersects(Self::DECIMAL) }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

#[derive(Copy, Clone)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Height of window title bars.
    pub title_bar_height: i32,
    /// Width of the caret drawn inside an active text field.
    pub text_cursor_width: i32,
    /// Width of the slider grab handle.
    pub slider_grab_width: i32,
    /// Inset of the checkmark inside a checkbox square.
    pub checkmark_offset: Vec2i,
    /// Side lengths of the collapse toggle in the title bar.
    pub collapse_size: Vec2i,
    /// Smallest size a window can be resized to.
    pub min_window_size: Vec2i,
    /// Spacing between consecutive widgets.
    pub item_spacing: Vec2i,
    /// Inner padding applied around widget content.
    pub frame_padding: Vec2i,
    /// Padding between the window border and its content zone.
    pub window_padding: Vec2i,
    /// Side lengths of the resize handle in the bottom-right corner.
    pub resize_size: Vec2i,
    /// Seconds a key must be held before it starts repeating.
    pub key_repeat_delay: f32,
    /// Seconds between repeats once a key repeats.
    pub key_repeat_rate: f32,
    /// Default text color.
    pub text_color: Color,
    /// Window content background.
    pub window_background: Color,
    /// Window title bar background.
    pub title_bar_background: Color,
    /// Background of value-editing widgets (text fields, sliders).
    pub widget_background: Color,
    /// Idle button color.
    pub button: Color,
    /// Button color while the pointer hovers it.
    pub button_hot: Color,
    /// Button color while it is held.
    pub button_active: Color,
    /// Caret color inside an active text field.
    pub text_cursor: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            title_bar_height: 20,
            text_cursor_width: 2,
            slider_grab_width: 10,
            checkmark_offset: Vec2i { x: 4, y: 4 },
            collapse_size: Vec2i { x: 10, y: 10 },
            min_window_size: Vec2i { x: 100, y: 40 },
            item_spacing: Vec2i { x: 10, y: 5 },
            frame_padding: Vec2i { x: 5, y: 4 },
            window_padding: Vec2i { x: 8, y: 8 },
            resize_size: Vec2i { x: 8, y: 8 },
            key_repeat_delay: 0.25,
            key_repeat_rate: 0.20,
            text_color: color(219, 237, 227, 199),
            window_background: color(33, 36, 43, 204),
            title_bar_background: color(59, 51, 69, 255),
            widget_background: color(51, 56, 69, 255),
            button: color(120, 196, 212, 36),
            button_hot: color(117, 51, 76, 168),
            button_active: color(117, 51, 76, 255),
            text_cursor: color(255, 255, 255, 255),
        }
    }
}

/// Shared handle to the input arbitration layer, cloned into the UI context.
pub type InputHandle = Rc<RefCell<InputManager>>;
