use crate::foundation::error::MemeResult;
use crate::layout::LineEdge;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        Some(if self.premultiplied {
            unpremul_px(px)
        } else {
            px
        })
    }
}

pub(crate) fn unpremul_px([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a16 = a as u16;
    let un = |c: u8| -> u8 { ((c as u16 * 255 + a16 / 2) / a16).min(255) as u8 };
    [un(r), un(g), un(b), a]
}

/// One caption line ready to be drawn, already centered horizontally.
#[derive(Clone, Copy, Debug)]
pub struct LineDraw<'a> {
    /// Line text.
    pub text: &'a str,
    /// Left edge of the line in pixels.
    pub x: f32,
    /// Vertical position, interpreted through `edge`.
    pub y: f32,
    /// Whether `y` is the top or bottom of the line box.
    pub edge: LineEdge,
    /// Font size in pixels.
    pub font_size: f32,
    /// Outline width in pixels.
    pub stroke_width: f32,
    /// Straight RGBA8 fill color.
    pub fill_rgba: [u8; 4],
    /// Straight RGBA8 outline color.
    pub stroke_rgba: [u8; 4],
}

/// Font-dependent half of the compositor: text measurement and glyph drawing.
///
/// Measurement and drawing must agree, otherwise wrapped lines overflow the wrap width.
pub trait Typesetter: Send {
    /// Advance width of `text` at `font_size`, in pixels.
    fn measure(&mut self, text: &str, font_size: f32) -> f32;

    /// Draw one line outline-first, then fill, so the fill sits inside the outline.
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LineDraw<'_>,
    ) -> MemeResult<()>;
}
