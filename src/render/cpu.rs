use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::config::CaptionStyle;
use crate::foundation::error::{MemeError, MemeResult};
use crate::layout::{CaptionBlock, layout_caption};
use crate::render::backend::{FrameRGBA, LineDraw, Typesetter};
use crate::render::encode::RenderedImage;

/// Output of a single compositing pass.
#[derive(Clone, Debug)]
pub struct Composite {
    /// Final pixels, template resolution.
    pub frame: FrameRGBA,
    /// Top caption as laid out.
    pub top: CaptionBlock,
    /// Bottom caption as laid out.
    pub bottom: CaptionBlock,
}

/// CPU meme compositor: draws the template at natural size, then both captions on top.
pub struct Compositor {
    style: CaptionStyle,
    typesetter: Box<dyn Typesetter>,
}

impl Compositor {
    /// Build a compositor around a typesetter.
    pub fn new(style: CaptionStyle, typesetter: Box<dyn Typesetter>) -> Self {
        Self { style, typesetter }
    }

    /// Styling constants in use.
    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    /// Decode template bytes, composite both captions, and PNG encode the result.
    #[tracing::instrument(skip_all, fields(bytes = template_bytes.len()))]
    pub fn render_png(
        &mut self,
        template_bytes: &[u8],
        top_text: &str,
        bottom_text: &str,
    ) -> MemeResult<RenderedImage> {
        let template = decode_image(template_bytes)?;
        let composite = self.compose(&template, top_text, bottom_text)?;
        RenderedImage::from_frame(&composite.frame)
    }

    /// Composite captions over an already decoded template.
    pub fn compose(
        &mut self,
        template: &PreparedImage,
        top_text: &str,
        bottom_text: &str,
    ) -> MemeResult<Composite> {
        let (w, h) = surface_size(template.width, template.height)?;
        let metrics = self.style.metrics_for(template.width, template.height);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let base = image_paint(template, w, h)?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(base);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w as f64, h as f64));

        let typesetter = &mut self.typesetter;
        let top = layout_caption(
            top_text,
            metrics.max_width,
            metrics.line_height,
            metrics.top,
            |s| typesetter.measure(s, metrics.font_size),
        );
        let bottom = layout_caption(
            bottom_text,
            metrics.max_width,
            metrics.line_height,
            metrics.bottom,
            |s| typesetter.measure(s, metrics.font_size),
        );

        for block in [&top, &bottom] {
            for line in &block.lines {
                let width = self.typesetter.measure(&line.text, metrics.font_size);
                let draw = LineDraw {
                    text: &line.text,
                    x: metrics.center_x - width / 2.0,
                    y: line.y,
                    edge: line.edge,
                    font_size: metrics.font_size,
                    stroke_width: metrics.stroke_width,
                    fill_rgba: self.style.fill_rgba,
                    stroke_rgba: self.style.stroke_rgba,
                };
                self.typesetter.draw_line(&mut ctx, &draw)?;
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        tracing::debug!(
            width = template.width,
            height = template.height,
            top_lines = top.lines.len(),
            bottom_lines = bottom.lines.len(),
            "composited meme"
        );

        Ok(Composite {
            frame: FrameRGBA {
                width: template.width,
                height: template.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            },
            top,
            bottom,
        })
    }
}

fn surface_size(width: u32, height: u32) -> MemeResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(MemeError::surface_unavailable(format!(
            "cannot allocate a {width}x{height} surface"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| MemeError::surface_unavailable("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MemeError::surface_unavailable("surface height exceeds u16"))?;
    Ok((w, h))
}

fn image_paint(img: &PreparedImage, w: u16, h: u16) -> MemeResult<vello_cpu::Image> {
    if img.rgba8_premul.len() != w as usize * h as usize * 4 {
        return Err(MemeError::asset_load("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(w as usize * h as usize);
    for px in img.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
