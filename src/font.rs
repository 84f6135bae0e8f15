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
use crate::{Dimensioni, Recti, TextureHandle, Vec2i};

/// First codepoint stored in a [`FontAtlas`]; the table covers the printable
/// ASCII range 32..=126.
pub const FONT_FIRST_CODEPOINT: u32 = 32;
/// Last codepoint stored in a [`FontAtlas`].
pub const FONT_LAST_CODEPOINT: u32 = 126;

#[derive(Debug, Clone, Copy)]
/// Metrics and atlas coordinates for one glyph.
pub struct Glyph {
    /// Pixel offset from the pen position; `y` is measured down from the
    /// baseline to the glyph top (negative above the baseline).
    pub offset: Vec2i,
    /// Horizontal advance after drawing this glyph.
    pub advance: i32,
    /// Rectangle inside the atlas texture, in texels.
    pub rect: Recti,
}

#[derive(Clone)]
/// Glyph-metrics table for one baked font, produced by the asset loader (or
/// the optional [`build_font_atlas`] helper) and consumed read-only by the
/// UI. Glyphs are indexed by `codepoint - FONT_FIRST_CODEPOINT` over a
/// contiguous ASCII range.
pub struct FontAtlas {
    texture: TextureHandle,
    line_height: i32,
    baseline: i32,
    glyphs: Vec<Glyph>,
}

impl FontAtlas {
    /// Wraps an externally produced glyph table. The table must hold exactly
    /// one entry per codepoint in 32..=126.
    pub fn new(texture: TextureHandle, line_height: i32, baseline: i32, glyphs: Vec<Glyph>) -> Self {
        assert_eq!(glyphs.len(), (FONT_LAST_CODEPOINT - FONT_FIRST_CODEPOINT + 1) as usize);
        Self { texture, line_height, baseline, glyphs }
    }

    /// Handle of the texture the glyph rectangles index into.
    pub fn texture(&self) -> TextureHandle { self.texture }

    /// Height of one text line in pixels.
    pub fn line_height(&self) -> i32 { self.line_height }

    /// Distance from the line top to the baseline in pixels.
    pub fn baseline(&self) -> i32 { self.baseline }

    /// Looks up the glyph for `c`, or `None` outside the stored range.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let cp = c as u32;
        if (FONT_FIRST_CODEPOINT..=FONT_LAST_CODEPOINT).contains(&cp) {
            self.glyphs.get((cp - FONT_FIRST_CODEPOINT) as usize)
        } else {
            None
        }
    }

    /// Measures a single line of text: summed advances by the line height.
    /// Characters outside the stored range contribute nothing.
    pub fn text_size(&self, text: &str) -> Dimensioni {
        let mut width = 0;
        for c in text.chars() {
            if let Some(glyph) = self.glyph(c) {
                width += glyph.advance;
            }
        }
        Dimensioni::new(width, self.line_height)
    }
}

#[cfg(feature = "builder")]
pub use builder::build_font_atlas;

#[cfg(feature = "builder")]
mod builder {
    use super::*;
    use crate::{color4b, Color4b, TextureId};

    /// Rasterizes the printable ASCII range of a TTF/OTF at `px` pixels into
    /// a glyph table plus an RGBA texture the caller uploads under
    /// `texture_id`. Glyph bitmaps are shelf-packed left to right with a one
    /// texel gutter.
    pub fn build_font_atlas(ttf_bytes: &[u8], px: f32, texture_id: TextureId) -> Result<(FontAtlas, Vec<Color4b>, Dimensioni), String> {
        let font = fontdue::Font::from_bytes(ttf_bytes, fontdue::FontSettings::default()).map_err(|e| e.to_string())?;
        let line_metrics = font
            .horizontal_line_metrics(px)
            .ok_or_else(|| String::from("font has no horizontal line metrics"))?;
        let line_height = line_metrics.new_line_size.round() as i32;
        let baseline = line_metrics.ascent.round() as i32;

        let width = 512usize;
        let mut pixels = vec![Color4b::default(); width];
        let mut glyphs = Vec::with_capacity((FONT_LAST_CODEPOINT - FONT_FIRST_CODEPOINT + 1) as usize);

        // The first texel stays opaque white so solid quads can share the
        // font texture.
        pixels[0] = color4b(0xFF, 0xFF, 0xFF, 0xFF);
        let mut pen_x = 2usize;
        let mut pen_y = 0usize;
        let mut shelf_height = 2usize;

        let mut rows: Vec<(usize, usize, fontdue::Metrics, Vec<u8>)> = Vec::new();
        for cp in FONT_FIRST_CODEPOINT..=FONT_LAST_CODEPOINT {
            let c = char::from_u32(cp).ok_or_else(|| String::from("invalid codepoint"))?;
            let (metrics, bitmap) = font.rasterize(c, px);
            if pen_x + metrics.width + 1 > width {
                pen_x = 0;
                pen_y += shelf_height;
                shelf_height = 0;
            }
            rows.push((pen_x, pen_y, metrics, bitmap));
            pen_x += metrics.width + 1;
            shelf_height = shelf_height.max(metrics.height + 1);
        }
        let height = pen_y + shelf_height;
        pixels.resize(width * height, Color4b::default());
        pixels[0] = color4b(0xFF, 0xFF, 0xFF, 0xFF);

        for (x, y, metrics, bitmap) in rows {
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    pixels[(y + row) * width + (x + col)] = color4b(0xFF, 0xFF, 0xFF, coverage);
                }
            }
            glyphs.push(Glyph {
                offset: Vec2i::new(metrics.xmin, -(metrics.ymin + metrics.height as i32)),
                advance: metrics.advance_width.round() as i32,
                rect: Recti::new(x as i32, y as i32, metrics.width as i32, metrics.height as i32),
            });
        }

        let dim = Dimensioni::new(width as i32, height as i32);
        let atlas = FontAtlas::new(TextureHandle::new(texture_id, dim), line_height, baseline, glyphs);
        Ok((atlas, pixels, dim))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::TextureId;

    /// Fixed-metrics font: every glyph is an 8x16 box advancing 8 px inside a
    /// 128x128 texture, so text geometry in tests is trivially predictable.
    pub(crate) fn make_test_font() -> FontAtlas {
        let glyphs = (FONT_FIRST_CODEPOINT..=FONT_LAST_CODEPOINT)
            .map(|cp| {
                let i = (cp - FONT_FIRST_CODEPOINT) as i32;
                Glyph {
                    offset: Vec2i::new(0, -16),
                    advance: 8,
                    rect: Recti::new((i % 16) * 8, (i / 16) * 16, 8, 16),
                }
            })
            .collect();
        FontAtlas::new(TextureHandle::new(TextureId::new(1), Dimensioni::new(128, 128)), 16, 13, glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::make_test_font;

    #[test]
    fn text_size_sums_advances() {
        let font = make_test_font();
        let size = font.text_size("abc");
        assert_eq!(size.width, 24);
        assert_eq!(size.height, 16);
    }

    #[test]
    fn out_of_range_chars_measure_zero() {
        let font = make_test_font();
        assert_eq!(font.text_size("\u{44D}\u{44E}").width, 0);
        assert!(font.glyph('\n').is_none());
    }
}
