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

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Structural widget identity: a `(parent, scoped)` hash pair.
///
/// `p` identifies the owning scope (the window, or a composite widget group);
/// `s` is the hash of the widget's own label within that scope. Windows
/// themselves use `(hash(title), 0)`. Two calls with the same scope and the
/// same label always produce the same id, which is what lets widgets exist
/// without retained objects.
pub struct UiId {
    pub(crate) p: u32,
    pub(crate) s: u32,
}

impl UiId {
    /// The sentinel "no widget" id.
    pub const EMPTY: UiId = UiId { p: 0, s: 0 };

    /// Returns `true` if this is the sentinel empty id.
    pub fn is_empty(&self) -> bool { self.p == 0 && self.s == 0 }
}

/// 32-bit FNV-1a over the label bytes (offset basis 2166136261, prime
/// 16777619). Distinct labels in one window must map to distinct hashes with
/// overwhelming probability; collisions are a latent bug, caught for the
/// labels we actually use by the corpus test below.
pub(crate) fn fnv1a(text: &str) -> u32 {
    let mut hash: u32 = 2166136261;
    for b in text.as_bytes() {
        hash = (hash ^ *b as u32).wrapping_mul(16777619);
    }
    hash
}

const ID_STACK_DEPTH: usize = 5;

/// Bounded LIFO of scope ids. The top entry seeds the parent half of every id
/// minted while it is pushed; depth 5 is plenty for a window plus nested
/// composite widgets.
pub(crate) struct IdStack {
    stack: [UiId; ID_STACK_DEPTH],
    index: usize,
}

impl IdStack {
    pub(crate) fn new() -> Self {
        Self { stack: [UiId::EMPTY; ID_STACK_DEPTH], index: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool { self.index == 0 }

    pub(crate) fn push(&mut self, id: UiId) {
        if self.index + 1 >= ID_STACK_DEPTH {
            log::error!("id stack overflow (depth {})", ID_STACK_DEPTH);
            panic!("DevUi: id stack overflow");
        }
        self.stack[self.index] = id;
        self.index += 1;
    }

    pub(crate) fn pop(&mut self) {
        if self.index == 0 {
            log::error!("id stack underflow");
            panic!("DevUi: pop_id without a matching push_id");
        }
        self.index -= 1;
    }

    /// Mints the id for `text` in the current scope: a global `(hash, 0)` id
    /// when no scope is pushed, otherwise `(top.p ^ top.s, hash)` so nested
    /// scopes keep children with identical labels apart.
    pub(crate) fn make_id(&self, text: &str) -> UiId {
        let s = fnv1a(text);
        if self.index == 0 {
            UiId { p: s, s: 0 }
        } else {
            let top = self.stack[self.index - 1];
            UiId { p: top.p ^ top.s, s }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // Labels the overlay windows actually render, plus the synthetic chrome
    // ids, to catch hash collisions in practice rather than in theory.
    const LABEL_CORPUS: &[&str] = &[
        "Debug", "World", "Renderer", "Profiler", "$MOVE", "$RESIZE", "$COLLAPSE", "$X", "$Y", "$Z", "Wireframe",
        "Fullscreen", "VSync", "Draw world", "Draw particles", "Draw collision", "Camera x", "Camera y", "Camera z",
        "Entity count", "Draw calls", "Frame time", "FPS", "Spawn", "Despawn", "Reset camera", "Pause", "Step",
        "Gravity", "Wind", "Time scale", "Sun angle", "Fog density", "Volume", "Mouse sensitivity", "Position",
        "Velocity", "Health", "Seed", "Chunk radius", "LOD bias", "Shadow distance", "Exposure", "Gamma",
    ];

    #[test]
    fn corpus_labels_do_not_collide_within_one_window() {
        let mut stack = IdStack::new();
        stack.push(stack.make_id("Debug"));

        let mut seen = HashSet::new();
        for label in LABEL_CORPUS {
            let id = stack.make_id(label);
            assert!(!id.is_empty());
            assert!(seen.insert(id), "id collision on label {:?}", label);
        }
    }

    #[test]
    fn same_label_same_scope_is_deterministic() {
        let mut stack = IdStack::new();
        stack.push(stack.make_id("Debug"));
        assert_eq!(stack.make_id("Spawn"), stack.make_id("Spawn"));
    }

    #[test]
    fn same_label_in_different_windows_differs() {
        let mut a = IdStack::new();
        a.push(a.make_id("Debug"));
        let mut b = IdStack::new();
        b.push(b.make_id("World"));
        assert_ne!(a.make_id("Spawn"), b.make_id("Spawn"));
    }

    #[test]
    fn nested_scope_separates_identical_children() {
        let mut stack = IdStack::new();
        stack.push(stack.make_id("Debug"));
        let group_a = stack.make_id("Position");
        let group_b = stack.make_id("Velocity");

        stack.push(group_a);
        let xa = stack.make_id("$X");
        stack.pop();
        stack.push(group_b);
        let xb = stack.make_id("$X");
        stack.pop();

        assert_ne!(xa, xb);
    }

    #[test]
    fn window_ids_are_global() {
        let stack = IdStack::new();
        let id = stack.make_id("Debug");
        assert_eq!(id.s, 0);
        assert_ne!(id.p, 0);
    }

    #[test]
    #[should_panic]
    fn stack_overflow_fails_fast() {
        let mut stack = IdStack::new();
        for i in 0..ID_STACK_DEPTH {
            stack.push(stack.make_id(&format!("scope {}", i)));
        }
    }
}
