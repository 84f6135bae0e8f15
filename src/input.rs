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
use crate::{vec2, Vec2i};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(usize)]
/// Logical keys the UI reacts to. Mouse buttons are keys as well so the
/// press/hold/release bookkeeping is shared.
#[allow(missing_docs)]
pub enum Key {
    Shift,
    Ctrl,
    Enter,
    Escape,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    MouseLeft,
    MouseRight,
}

/// Number of entries in [`Key`].
pub const KEY_COUNT: usize = Key::MouseRight as usize + 1;

#[derive(Copy, Clone, Default)]
struct KeyState {
    is_down: bool,
    // Down/up edges seen since the last end_frame; nonzero means the key
    // changed state this frame.
    transition_count: u8,
    // Seconds the key has been held, 0.0 on the press frame.
    down_time: f32,
}

#[derive(Clone)]
/// Read-only snapshot of platform input for one frame.
///
/// The platform layer feeds events in with the `mousemove`/`update_key`/
/// `set_char_input` methods, calls [`Input::begin_frame`] once all events for
/// the frame are applied, and [`Input::end_frame`] after the game and UI have
/// run.
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    window_size: Vec2i,
    keys: [KeyState; KEY_COUNT],
    utf32: Option<char>,
    dt: f32,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            window_size: Vec2i::default(),
            keys: [KeyState::default(); KEY_COUNT],
            utf32: None,
            dt: 0.0,
        }
    }
}

impl Input {
    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records a key (or mouse button) state change.
    pub fn update_key(&mut self, key: Key, is_down: bool) {
        let state = &mut self.keys[key as usize];
        if state.is_down != is_down {
            state.transition_count = state.transition_count.saturating_add(1);
        }
        state.is_down = is_down;
        if is_down && state.transition_count > 0 {
            state.down_time = 0.0;
        }
    }

    /// Records the single UTF-32 character entered this frame (ASCII range).
    pub fn set_char_input(&mut self, c: char) { self.utf32 = Some(c); }

    /// Updates the size of the OS window in pixels.
    pub fn set_window_size(&mut self, size: Vec2i) { self.window_size = size; }

    /// Starts a frame: computes the pointer delta and advances held timers.
    pub fn begin_frame(&mut self, dt: f32) {
        self.dt = dt;
        self.mouse_delta = vec2(self.mouse_pos.x - self.last_mouse_pos.x, self.mouse_pos.y - self.last_mouse_pos.y);
        for state in self.keys.iter_mut() {
            if state.is_down && state.transition_count == 0 {
                state.down_time += dt;
            }
        }
    }

    /// Ends a frame: clears per-frame edges and the character event.
    pub fn end_frame(&mut self) {
        self.last_mouse_pos = self.mouse_pos;
        for state in self.keys.iter_mut() {
            state.transition_count = 0;
        }
        self.utf32 = None;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        let state = &self.keys[key as usize];
        state.is_down && state.transition_count > 0
    }

    fn is_key_released(&self, key: Key) -> bool {
        let state = &self.keys[key as usize];
        !state.is_down && state.transition_count > 0
    }

    fn is_key_held(&self, key: Key) -> bool { self.keys[key as usize].is_down }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// Priority level used to arbitrate one physical input stream across UI
/// layers that are not nested in a single tree (game HUD, dev overlay,
/// future menus).
pub enum AccessToken {
    /// Nothing holds the input.
    NoLock,
    /// In-game interface (HUD).
    GameInterface,
    /// Pause/system menus.
    GameMenu,
    /// The developer overlay.
    DevUi,
    /// Bypasses any lock; for the platform layer itself.
    All,
}

/// Cooperative input lock shared by every input-consuming subsystem.
///
/// A layer that wants the input locks it with its token; queries only succeed
/// when the requesting token is at or above the granted level. The lock is
/// advisory: a layer may still act on input this frame before a
/// higher-priority layer runs and locks it, because lock state is only
/// updated after layers run. That one-frame delay is an accepted tradeoff of
/// the immediate-mode structure; with at most two live layers it does not
/// come up in practice, and callers that care can lock at the top of the
/// frame instead.
pub struct InputManager {
    input: Input,
    access_token: AccessToken,
}

impl InputManager {
    /// Wraps a platform input snapshot with an unlocked token.
    pub fn new(input: Input) -> Self {
        Self { input, access_token: AccessToken::NoLock }
    }

    /// Grants the input to the holder of `token`. Locking over an existing
    /// lock is a programmer error.
    pub fn lock(&mut self, token: AccessToken) {
        assert_eq!(self.access_token, AccessToken::NoLock, "input is already locked");
        self.access_token = token;
    }

    /// Releases the current lock.
    pub fn unlock(&mut self) {
        assert_ne!(self.access_token, AccessToken::NoLock, "input is not locked");
        self.access_token = AccessToken::NoLock;
    }

    /// Returns the currently granted token.
    pub fn locked_token(&self) -> AccessToken { self.access_token }

    fn grants(&self, token: AccessToken) -> bool { token >= self.access_token }

    /// Returns `true` if `key` went down this frame and `token` is at or
    /// above the granted level.
    pub fn is_key_pressed(&self, key: Key, token: AccessToken) -> bool {
        self.grants(token) && self.input.is_key_pressed(key)
    }

    /// Returns `true` if `key` went up this frame and `token` is at or above
    /// the granted level.
    pub fn is_key_released(&self, key: Key, token: AccessToken) -> bool {
        self.grants(token) && self.input.is_key_released(key)
    }

    /// Returns `true` if `key` is down and `token` is at or above the
    /// granted level.
    pub fn is_key_held(&self, key: Key, token: AccessToken) -> bool {
        self.grants(token) && self.input.is_key_held(key)
    }

    /// Seconds `key` has been held; 0.0 on its press frame.
    pub fn key_down_time(&self, key: Key) -> f32 { self.input.keys[key as usize].down_time }

    /// Current pointer position in screen pixels.
    pub fn mouse_pos(&self) -> Vec2i { self.input.mouse_pos }

    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.input.mouse_delta }

    /// Size of the OS window in pixels.
    pub fn window_size(&self) -> Vec2i { self.input.window_size }

    /// The character entered this frame, if any.
    pub fn char_input(&self) -> Option<char> { self.input.utf32 }

    /// Frame delta time in seconds.
    pub fn dt(&self) -> f32 { self.input.dt }

    /// Mutable access for the platform layer to feed events.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Key-repeat query for text editing: fires on the press frame, then
    /// after `delay` seconds held, then every `rate` seconds. Implemented by
    /// comparing `floor((t - delay) / rate)` between this frame's and the
    /// previous frame's held duration, so irregular frame times neither drop
    /// nor double repeats.
    pub fn is_key_repeat_fired(&self, key: Key, token: AccessToken, delay: f32, rate: f32) -> bool {
        if !self.is_key_held(key, token) {
            return false;
        }
        let t = self.key_down_time(key);
        if t == 0.0 {
            return true;
        }
        if t <= delay {
            return false;
        }
        let this_frame = ((t - delay) / rate).floor();
        let last_frame = ((t - self.input.dt - delay) / rate).floor();
        this_frame != last_frame
    }
}
