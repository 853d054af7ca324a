use crate::assets::CaptionFont;
use crate::foundation::error::{MemeError, MemeResult};
use crate::layout::LineEdge;
use crate::render::backend::{LineDraw, Typesetter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CaptionBrush;

/// Typesetter that shapes captions with Parley and rasterizes glyph outlines with `vello_cpu`.
pub struct ParleyTypesetter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<CaptionBrush>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl ParleyTypesetter {
    /// Register `font` and prepare shaping contexts.
    pub fn new(font: &CaptionFont) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);

        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            if let Some(name) = font_ctx.collection.family_name(*id) {
                names.push(name.to_string());
            }
        }
        let family = names
            .iter()
            .find(|n| **n == font.family)
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| {
                MemeError::surface_unavailable("no font families registered from caption font")
            })?;

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: data,
        })
    }

    /// Family name captions are shaped with.
    pub fn family(&self) -> &str {
        &self.family
    }

    fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<CaptionBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(CaptionBrush));

        let mut layout: parley::Layout<CaptionBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl Typesetter for ParleyTypesetter {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        // Trailing whitespace counts, so a separator appended by the wrapper is measured.
        self.layout(text, font_size).full_width()
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LineDraw<'_>,
    ) -> MemeResult<()> {
        let layout = self.layout(line.text, line.font_size);
        let top = match line.edge {
            LineEdge::Top => line.y,
            LineEdge::Bottom => line.y - layout.height(),
        };

        let mut runs: Vec<(f32, Vec<(u32, f32, f32)>)> = Vec::new();
        for l in layout.lines() {
            for item in l.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Positioned glyphs carry the run offset and the line baseline, relative to the
                // top of the layout.
                let glyphs = run.positioned_glyphs().map(|g| (g.id, g.x, g.y)).collect();
                runs.push((run.run().font_size(), glyphs));
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            line.x as f64,
            top as f64,
        )));

        let [r, g, b, a] = line.stroke_rgba;
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line.stroke_width as f64));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for (size, glyphs) in &runs {
            ctx.glyph_run(&self.font)
                .font_size(*size)
                .stroke_glyphs(glyphs.iter().map(|&(id, x, y)| vello_cpu::Glyph { id, x, y }));
        }

        let [r, g, b, a] = line.fill_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for (size, glyphs) in &runs {
            ctx.glyph_run(&self.font)
                .font_size(*size)
                .fill_glyphs(glyphs.iter().map(|&(id, x, y)| vello_cpu::Glyph { id, x, y }));
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

/// Fontless typesetter drawing each character as an outlined block.
///
/// Every character advances `0.6 * font_size` and the line box is `font_size` tall, so
/// measurements are exact and reproducible on any machine. Useful for layout previews and for
/// exercising the compositor without system fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockTypesetter;

impl BlockTypesetter {
    /// Horizontal advance per character, as a fraction of the font size.
    pub const ADVANCE: f32 = 0.6;
}

impl Typesetter for BlockTypesetter {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * Self::ADVANCE
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LineDraw<'_>,
    ) -> MemeResult<()> {
        let size = line.font_size as f64;
        let top = match line.edge {
            LineEdge::Top => line.y as f64,
            LineEdge::Bottom => line.y as f64 - size,
        };
        let advance = size * Self::ADVANCE as f64;

        let blocks: Vec<vello_cpu::kurbo::Rect> = line
            .text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| {
                let x = line.x as f64 + i as f64 * advance;
                vello_cpu::kurbo::Rect::new(
                    x + 0.1 * size,
                    top + 0.1 * size,
                    x + 0.5 * size,
                    top + 0.9 * size,
                )
            })
            .collect();

        let [r, g, b, a] = line.stroke_rgba;
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line.stroke_width as f64));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for rect in &blocks {
            ctx.stroke_rect(rect);
        }

        let [r, g, b, a] = line.fill_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for rect in &blocks {
            ctx.fill_rect(rect);
        }
        Ok(())
    }
}
