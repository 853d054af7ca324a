/// Fixed reference line a caption block is stacked from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptionAnchor {
    /// Block grows downward; the first line's top edge sits at `y`.
    Top {
        /// Top offset in pixels.
        y: f32,
    },
    /// Block grows upward; the last line's bottom edge sits at `y`.
    Bottom {
        /// Bottom offset in pixels.
        y: f32,
    },
}

impl CaptionAnchor {
    /// Anchor offset in pixels.
    pub fn y(self) -> f32 {
        match self {
            CaptionAnchor::Top { y } | CaptionAnchor::Bottom { y } => y,
        }
    }

    /// Which edge of each line box the placed `y` refers to.
    pub fn edge(self) -> LineEdge {
        match self {
            CaptionAnchor::Top { .. } => LineEdge::Top,
            CaptionAnchor::Bottom { .. } => LineEdge::Bottom,
        }
    }
}

/// Vertical edge of a line box that a [`PlacedLine::y`] coordinate refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEdge {
    /// `y` is the top of the line box.
    Top,
    /// `y` is the bottom of the line box.
    Bottom,
}

/// One wrapped caption line with its vertical position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Uppercased line text, no leading or trailing whitespace.
    pub text: String,
    /// Vertical position in pixels, interpreted through `edge`.
    pub y: f32,
    /// Edge of the line box `y` refers to.
    pub edge: LineEdge,
}

/// A laid out caption: ordered lines, top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionBlock {
    /// Anchor the block was stacked from.
    pub anchor: CaptionAnchor,
    /// Lines in reading order.
    pub lines: Vec<PlacedLine>,
}

impl CaptionBlock {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Greedy word wrap of `caption` into lines no wider than `max_width`.
///
/// The caption is uppercased and split on whitespace. Words are appended to the current line
/// until the next one, followed by a separator, would overflow; a line that already holds a word is then committed and the
/// word starts a fresh line. Words are never split, so a single word wider than `max_width` ends
/// up alone on its own (overflowing) line. The last line is always committed, which means blank
/// input yields one empty line.
pub fn wrap_caption<M>(caption: &str, max_width: f32, mut measure: M) -> Vec<String>
where
    M: FnMut(&str) -> f32,
{
    let upper = caption.to_uppercase();
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in upper.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        // Measured with its trailing separator; the stored line never carries it.
        let candidate = format!("{line} {word}");
        if measure(&format!("{candidate} ")) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Assign vertical positions to already wrapped lines.
///
/// Top anchored blocks place line `i` at `y + i * line_height`. Bottom anchored blocks place line
/// `i` of `n` at `y - (n - 1 - i) * line_height`, so the last line always lands on the anchor.
pub fn place_lines(lines: Vec<String>, anchor: CaptionAnchor, line_height: f32) -> CaptionBlock {
    let n = lines.len();
    let edge = anchor.edge();
    let placed = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let y = match anchor {
                CaptionAnchor::Top { y } => y + i as f32 * line_height,
                CaptionAnchor::Bottom { y } => y - (n - 1 - i) as f32 * line_height,
            };
            PlacedLine { text, y, edge }
        })
        .collect();

    CaptionBlock {
        anchor,
        lines: placed,
    }
}

/// Wrap and place one caption. Blank captions produce an empty block.
pub fn layout_caption<M>(
    caption: &str,
    max_width: f32,
    line_height: f32,
    anchor: CaptionAnchor,
    measure: M,
) -> CaptionBlock
where
    M: FnMut(&str) -> f32,
{
    if caption.trim().is_empty() {
        return CaptionBlock {
            anchor,
            lines: Vec::new(),
        };
    }
    place_lines(wrap_caption(caption, max_width, measure), anchor, line_height)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
