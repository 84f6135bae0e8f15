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
use crate::{layout::Layout, DrawQueue, Recti, UiId};

/// Persistent per-window record. Windows are created the first time an
/// unseen title is declared and live for the rest of the session; their
/// rectangles are mutated by the move and resize interactions, while the
/// layout cursor and draw queue are rebuilt every frame.
pub struct UiWindow {
    pub(crate) id: UiId,
    pub(crate) title: String,
    pub(crate) is_collapsed: bool,
    pub(crate) whole_rect: Recti,
    pub(crate) rect: Recti,
    pub(crate) title_bar_rect: Recti,
    pub(crate) layout: Layout,
    pub(crate) draw_queue: DrawQueue,
    pub(crate) item_width: i32,
    pub(crate) default_item_width: i32,
}

impl UiWindow {
    pub(crate) fn new(id: UiId, title: &str, whole_rect: Recti) -> Self {
        Self {
            id,
            title: String::from(title),
            is_collapsed: false,
            whole_rect,
            rect: whole_rect,
            title_bar_rect: whole_rect,
            layout: Layout::default(),
            draw_queue: DrawQueue::default(),
            item_width: 0,
            default_item_width: 0,
        }
    }

    /// Identifier derived from the window title.
    pub fn id(&self) -> UiId { self.id }

    /// Title the window was declared with.
    pub fn title(&self) -> &str { &self.title }

    /// Outer rectangle, including the title bar.
    pub fn whole_rect(&self) -> Recti { self.whole_rect }

    /// Content rectangle below the title bar.
    pub fn content_rect(&self) -> Recti { self.rect }

    /// True while the window shows only its title bar.
    pub fn is_collapsed(&self) -> bool { self.is_collapsed }

    /// Quads queued for this window so far this frame.
    pub fn draw_queue(&self) -> &DrawQueue { &self.draw_queue }
}
