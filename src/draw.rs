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
use crate::{color4b, Color, Color4b, Dimensioni, Recti, Vec2f};

/// Maximum clip-rect nesting depth per window.
pub const MAX_CLIP_STACK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle to a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a raw renderer texture id.
    pub fn new(id: u32) -> Self { Self(id) }

    /// Raw id for the renderer backend.
    pub fn raw(&self) -> u32 { self.0 }
}

#[derive(Debug, Clone, Copy)]
/// A texture id together with its dimensions, needed to normalize texel
/// rectangles into UV space.
pub struct TextureHandle {
    /// Renderer texture id.
    pub id: TextureId,
    /// Texture dimensions in texels.
    pub size: Dimensioni,
}

impl TextureHandle {
    /// Pairs a texture id with its dimensions.
    pub fn new(id: TextureId, size: Dimensioni) -> Self { Self { id, size } }
}

#[derive(Default, Copy, Clone)]
#[repr(C)]
/// Vertex submitted by the UI.
pub struct Vertex {
    pos: Vec2f,
    tex: Vec2f,
    color: Color4b,
}

impl Vertex {
    /// Creates a vertex with the provided position, texture coordinate, and color.
    pub fn new(pos: Vec2f, tex: Vec2f, color: Color4b) -> Self { Self { pos, tex, color } }

    /// Returns the position of the vertex in screen space.
    pub fn position(&self) -> Vec2f { self.pos }

    /// Returns the texture coordinates associated with the vertex.
    pub fn tex_coord(&self) -> Vec2f { self.tex }

    /// Returns the vertex color.
    pub fn color(&self) -> Color4b { self.color }
}

#[derive(Clone, Copy)]
/// One queued quad. Vertices are ordered top-left, top-right, bottom-left,
/// bottom-right; [`DrawQueue::flush`] expands them into two triangles.
pub struct DrawQueueEntry {
    /// Quad corners in the fixed TL, TR, BL, BR order.
    pub vertices: [Vertex; 4],
    /// Texture to sample, or `None` for solid-color quads.
    pub texture: Option<TextureId>,
}

/// Renderer backend interface. The UI owns no GPU state; it hands finished
/// vertices to an implementation of this trait once per frame.
pub trait Renderer {
    /// Sets up an orthographic 2D pass covering `dim`.
    fn begin_2d(&mut self, dim: Dimensioni);
    /// Binds `texture`, or the solid-color pipeline when `None`.
    fn set_texture(&mut self, texture: Option<TextureId>);
    /// Starts an immediate-mode triangle batch.
    fn imm_begin(&mut self);
    /// Appends one vertex to the current batch.
    fn imm_vertex(&mut self, v: &Vertex);
    /// Submits the current batch.
    fn imm_flush(&mut self);
    /// Ends the 2D pass.
    fn end_2d(&mut self);
}

/// Computes the clipped destination/source rectangles for rendering. The
/// source rectangle is remapped in proportion to how much of the destination
/// survives on each axis, so partially clipped glyphs sample partial glyph
/// texels instead of squashing the full image.
pub fn clip_quad(dst_r: Recti, src_r: Recti, clip_r: Recti) -> Option<(Recti, Recti)> {
    match dst_r.intersect(&clip_r) {
        Some(rect) if rect.width == dst_r.width && rect.height == dst_r.height => Some((dst_r, src_r)),
        Some(rect) if rect.width != 0 && rect.height != 0 => {
            let dx = dst_r.x as f32;
            let dy = dst_r.y as f32;
            let dw = dst_r.width as f32;
            let dh = dst_r.height as f32;

            let rx = rect.x as f32;
            let ry = rect.y as f32;
            let rw = rect.width as f32;
            let rh = rect.height as f32;

            let tx = (rx - dx) / dw;
            let ty = (ry - dy) / dh;
            let tw = (rx + rw - dx) / dw;
            let th = (ry + rh - dy) / dh;

            let sx = src_r.x as f32;
            let sy = src_r.y as f32;
            let sw = src_r.width as f32;
            let sh = src_r.height as f32;

            let st_x = sx + tx * sw;
            let st_y = sy + ty * sh;
            let st_w = sx + tw * sw - st_x;
            let st_h = sy + th * sh - st_y;

            Some((rect, Recti::new(st_x as _, st_y as _, st_w as _, st_h as _)))
        }
        _ => None,
    }
}

/// Stack of pre-intersected clip rectangles. Pushing intersects the incoming
/// rectangle with the current top, so the top is always the effective clip.
pub struct ClipStack {
    rects: [Recti; MAX_CLIP_STACK],
    count: usize,
}

impl ClipStack {
    /// Creates a stack whose base rectangle covers `screen`.
    pub fn new(screen: Recti) -> Self {
        let mut rects = [Recti::new(0, 0, 0, 0); MAX_CLIP_STACK];
        rects[0] = screen;
        Self { rects, count: 1 }
    }

    /// Resets the stack to a single base rectangle.
    pub fn reset(&mut self, screen: Recti) {
        self.rects[0] = screen;
        self.count = 1;
    }

    /// Pushes `rect` intersected with the current top. A disjoint rectangle
    /// pushes an empty clip, which culls everything drawn under it.
    pub fn push(&mut self, rect: Recti) {
        if self.count >= MAX_CLIP_STACK {
            log::error!("clip stack overflow (depth {})", MAX_CLIP_STACK);
            panic!("clip stack overflow");
        }
        let top = self.rects[self.count - 1];
        self.rects[self.count] = rect.intersect(&top).unwrap_or(Recti::new(0, 0, 0, 0));
        self.count += 1;
    }

    /// Pops the top rectangle. The base rectangle cannot be popped.
    pub fn pop(&mut self) {
        if self.count <= 1 {
            log::error!("clip stack underflow");
            panic!("clip stack underflow");
        }
        self.count -= 1;
    }

    /// The effective clip rectangle.
    pub fn current(&self) -> Recti { self.rects[self.count - 1] }

    /// True when only the base rectangle remains.
    pub fn is_balanced(&self) -> bool { self.count == 1 }
}

#[derive(Default)]
/// Per-window list of quads, filled front to back during declaration and
/// flushed once the frame's z-order is known.
pub struct DrawQueue {
    entries: Vec<DrawQueueEntry>,
}

impl DrawQueue {
    /// Discards all queued quads.
    pub fn clear(&mut self) { self.entries.clear() }

    /// Number of queued quads.
    pub fn len(&self) -> usize { self.entries.len() }

    /// True when nothing has been queued this frame.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Queued quads, front to back.
    pub fn entries(&self) -> &[DrawQueueEntry] { &self.entries }

    /// Queues a solid rectangle clipped against `clip`.
    pub fn push_rect(&mut self, dst: Recti, color: Color, clip: Recti) {
        if let Some((dst, _)) = clip_quad(dst, Recti::new(0, 0, 1, 1), clip) {
            self.entries.push(DrawQueueEntry {
                vertices: quad_vertices(dst, Vec2f::new(0.0, 0.0), Vec2f::new(0.0, 0.0), color),
                texture: None,
            });
        }
    }

    /// Queues a textured quad. `src` is in texels of `texture`; both
    /// rectangles are clipped against `clip` with proportional UV remapping
    /// before normalization.
    pub fn push_textured_rect(&mut self, dst: Recti, src: Recti, texture: TextureHandle, color: Color, clip: Recti) {
        if let Some((dst, src)) = clip_quad(dst, src, clip) {
            let tw = texture.size.width as f32;
            let th = texture.size.height as f32;
            let uv_min = Vec2f::new(src.x as f32 / tw, src.y as f32 / th);
            let uv_max = Vec2f::new((src.x + src.width) as f32 / tw, (src.y + src.height) as f32 / th);
            self.entries.push(DrawQueueEntry {
                vertices: quad_vertices(dst, uv_min, uv_max, color),
                texture: Some(texture.id),
            });
        }
    }

    /// Emits every queued quad through `renderer` as indexed triangle pairs,
    /// batching consecutive quads that share a texture binding.
    pub fn flush(&self, renderer: &mut dyn Renderer) {
        let mut bound: Option<Option<TextureId>> = None;
        for entry in &self.entries {
            if bound != Some(entry.texture) {
                if bound.is_some() {
                    renderer.imm_flush();
                }
                renderer.set_texture(entry.texture);
                renderer.imm_begin();
                bound = Some(entry.texture);
            }
            let [v0, v1, v2, v3] = &entry.vertices;
            renderer.imm_vertex(v3);
            renderer.imm_vertex(v1);
            renderer.imm_vertex(v0);
            renderer.imm_vertex(v0);
            renderer.imm_vertex(v2);
            renderer.imm_vertex(v3);
        }
        if bound.is_some() {
            renderer.imm_flush();
        }
    }
}

fn quad_vertices(dst: Recti, uv_min: Vec2f, uv_max: Vec2f, color: Color) -> [Vertex; 4] {
    let color = color4b(color.r, color.g, color.b, color.a);
    let x0 = dst.x as f32;
    let y0 = dst.y as f32;
    let x1 = (dst.x + dst.width) as f32;
    let y1 = (dst.y + dst.height) as f32;
    [
        Vertex::new(Vec2f::new(x0, y0), uv_min, color),
        Vertex::new(Vec2f::new(x1, y0), Vec2f::new(uv_max.x, uv_min.y), color),
        Vertex::new(Vec2f::new(x0, y1), Vec2f::new(uv_min.x, uv_max.y), color),
        Vertex::new(Vec2f::new(x1, y1), uv_max, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn assert_rect_eq(actual: Recti, expected: Recti) {
        assert_eq!(
            (actual.x, actual.y, actual.width, actual.height),
            (expected.x, expected.y, expected.width, expected.height)
        );
    }

    #[test]
    fn clip_passthrough_when_contained() {
        let dst = Recti::new(10, 10, 20, 20);
        let src = Recti::new(0, 0, 8, 8);
        let clip = Recti::new(0, 0, 100, 100);
        let res = clip_quad(dst, src, clip).unwrap();
        assert_rect_eq(res.0, dst);
        assert_rect_eq(res.1, src);
    }

    #[test]
    fn clip_remaps_source_proportionally() {
        // Clipping away the left half of the destination must drop the left
        // half of the source while the right source edge stays fixed.
        let dst = Recti::new(0, 0, 20, 10);
        let src = Recti::new(4, 0, 8, 8);
        let clip = Recti::new(10, 0, 100, 100);
        let (d, s) = clip_quad(dst, src, clip).unwrap();
        assert_rect_eq(d, Recti::new(10, 0, 10, 10));
        assert_rect_eq(s, Recti::new(8, 0, 4, 8));
    }

    #[test]
    fn clip_disjoint_culls() {
        let dst = Recti::new(0, 0, 10, 10);
        let src = Recti::new(0, 0, 8, 8);
        assert!(clip_quad(dst, src, Recti::new(50, 50, 10, 10)).is_none());
    }

    #[test]
    fn clip_stack_intersects_on_push() {
        let mut stack = ClipStack::new(Recti::new(0, 0, 100, 100));
        stack.push(Recti::new(10, 10, 200, 200));
        assert_rect_eq(stack.current(), Recti::new(10, 10, 90, 90));
        stack.push(Recti::new(0, 0, 50, 50));
        assert_rect_eq(stack.current(), Recti::new(10, 10, 40, 40));
        stack.pop();
        stack.pop();
        assert!(stack.is_balanced());
        assert_rect_eq(stack.current(), Recti::new(0, 0, 100, 100));
    }

    #[test]
    #[should_panic(expected = "clip stack underflow")]
    fn clip_stack_base_cannot_pop() {
        let mut stack = ClipStack::new(Recti::new(0, 0, 100, 100));
        stack.pop();
    }

    #[test]
    fn queue_culls_fully_clipped_quads() {
        let mut queue = DrawQueue::default();
        queue.push_rect(Recti::new(200, 200, 10, 10), color(255, 255, 255, 255), Recti::new(0, 0, 100, 100));
        assert!(queue.is_empty());
        queue.push_rect(Recti::new(10, 10, 10, 10), color(255, 255, 255, 255), Recti::new(0, 0, 100, 100));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn textured_quad_uvs_halve_with_right_half_clip() {
        let mut queue = DrawQueue::default();
        let texture = TextureHandle::new(TextureId::new(7), Dimensioni::new(64, 64));
        let dst = Recti::new(0, 0, 16, 16);
        let src = Recti::new(0, 0, 32, 32);
        queue.push_textured_rect(dst, src, texture, color(255, 255, 255, 255), Recti::new(0, 0, 8, 16));
        let entry = &queue.entries()[0];
        let v0 = entry.vertices[0];
        let v1 = entry.vertices[1];
        // Left UV edge untouched, width halved.
        assert_eq!(v0.tex_coord().x, 0.0);
        assert_eq!(v1.tex_coord().x, 0.25);
        assert_eq!(v1.position().x, 8.0);
    }

    struct CountingRenderer {
        vertices: usize,
        batches: usize,
        binds: Vec<Option<TextureId>>,
    }

    impl Renderer for CountingRenderer {
        fn begin_2d(&mut self, _dim: Dimensioni) {}
        fn set_texture(&mut self, texture: Option<TextureId>) { self.binds.push(texture) }
        fn imm_begin(&mut self) { self.batches += 1 }
        fn imm_vertex(&mut self, _v: &Vertex) { self.vertices += 1 }
        fn imm_flush(&mut self) {}
        fn end_2d(&mut self) {}
    }

    #[test]
    fn flush_batches_by_texture() {
        let mut queue = DrawQueue::default();
        let clip = Recti::new(0, 0, 100, 100);
        let texture = TextureHandle::new(TextureId::new(3), Dimensioni::new(64, 64));
        queue.push_rect(Recti::new(0, 0, 10, 10), color(255, 0, 0, 255), clip);
        queue.push_rect(Recti::new(10, 0, 10, 10), color(0, 255, 0, 255), clip);
        queue.push_textured_rect(Recti::new(20, 0, 10, 10), Recti::new(0, 0, 8, 8), texture, color(255, 255, 255, 255), clip);

        let mut renderer = CountingRenderer { vertices: 0, batches: 0, binds: Vec::new() };
        queue.flush(&mut renderer);
        assert_eq!(renderer.vertices, 18);
        assert_eq!(renderer.batches, 2);
        assert_eq!(renderer.binds, vec![None, Some(TextureId::new(3))]);
    }
}
