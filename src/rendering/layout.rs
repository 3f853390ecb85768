/// Text layout: character-width wrapping, one-line shortening, and stacked
/// multi-line placement with alignment and an optional height budget.

use crate::rendering::font::Font;

/// Marker drawn in place of the last visible line when a block is cut short.
pub const ELLIPSIS: &str = "...";

/// Horizontal alignment of a line inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Parameters shared by every line of a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Extra vertical space between consecutive lines
    pub line_spacing: f32,
    pub align: Align,
    /// Width used for centering and right alignment; without it every line
    /// starts at the block origin
    pub container_width: Option<f32>,
    /// Gap kept between right-aligned lines and the container edge
    pub right_inset: f32,
    /// Vertical budget; the block is cut with [`ELLIPSIS`] once exceeded
    pub max_height: Option<f32>,
}

impl TextStyle {
    pub fn new(line_spacing: f32, align: Align) -> Self {
        Self {
            line_spacing,
            align,
            container_width: None,
            right_inset: 0.0,
            max_height: None,
        }
    }

    pub fn container(mut self, width: f32) -> Self {
        self.container_width = Some(width);
        self
    }

    pub fn right_inset(mut self, inset: f32) -> Self {
        self.right_inset = inset;
        self
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Left edge of a line of width `w` whose block starts at `origin_x`.
    pub fn line_x(&self, origin_x: f32, w: u32) -> f32 {
        match (self.align, self.container_width) {
            (Align::Center, Some(cw)) => (cw - w as f32) / 2.0,
            (Align::Right, Some(cw)) => cw - self.right_inset - w as f32,
            _ => origin_x,
        }
    }
}

/// One positioned line, origin at its top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
}

/// Result of laying out a block of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<Placement>,
    /// Vertical cursor after the last placed line, ready for what follows
    pub end_y: f32,
    /// Whether the block was cut and ends with [`ELLIPSIS`]
    pub truncated: bool,
}

/// Place `lines` top-down starting at (`origin_x`, `origin_y`).
///
/// Blank lines are dropped. Each line advances the cursor by its measured
/// height plus `line_spacing`. When a positive `max_height` is set and the
/// next line would push the drawn height past it, the previous line is not
/// drawn at all: an ellipsis takes its place at the same position and layout
/// stops. The first line is always placed. A budget of zero or less means no
/// budget.
pub fn layout_lines<S: AsRef<str>>(
    lines: &[S],
    origin_x: f32,
    origin_y: f32,
    font: &Font,
    style: &TextStyle,
) -> TextLayout {
    let mut placed: Vec<Placement> = Vec::new();
    let mut cursor = origin_y;
    let mut drawn_height = 0.0f32;
    let mut truncated = false;

    let visible: Vec<&str> = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| !l.trim().is_empty())
        .collect();

    for (i, line) in visible.iter().enumerate() {
        let (w, h) = font.measure(line);

        if let Some(max) = style.max_height.filter(|m| *m > 0.0) {
            if drawn_height + h as f32 > max {
                if let Some(prev) = placed.pop() {
                    cursor = prev.y;
                    let (ew, eh) = font.measure(ELLIPSIS);
                    placed.push(Placement {
                        text: ELLIPSIS.to_string(),
                        x: style.line_x(origin_x, ew),
                        y: cursor,
                        width: ew,
                        height: eh,
                    });
                    cursor += eh as f32;
                    truncated = true;
                    break;
                }
            }
        }

        placed.push(Placement {
            text: (*line).to_string(),
            x: style.line_x(origin_x, w),
            y: cursor,
            width: w,
            height: h,
        });
        cursor += h as f32 + style.line_spacing;

        drawn_height += h as f32;
        if i + 1 < visible.len() {
            drawn_height += style.line_spacing;
        }
    }

    TextLayout { lines: placed, end_y: cursor, truncated }
}

/// Total stacked height and widest line of `lines`, spacing included
/// between lines only.
pub fn block_extent<S: AsRef<str>>(lines: &[S], font: &Font, line_spacing: f32) -> (f32, u32) {
    let mut height = 0.0f32;
    let mut widest = 0u32;
    for line in lines {
        let (w, h) = font.measure(line.as_ref());
        height += h as f32 + line_spacing;
        widest = widest.max(w);
    }
    if !lines.is_empty() {
        height -= line_spacing;
    }
    (height, widest)
}

/// Split a whitespace-free word after each hyphen that joins two runs of
/// letters, keeping the hyphen on the left piece: `Saint-Germain` becomes
/// `Saint-` and `Germain`. Single-letter prefixes such as `e-mail` stay whole.
fn hyphen_pieces(word: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = word.chars().collect();
    let mut pieces = Vec::new();
    let mut piece: Vec<char> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        let breakable = c == '-'
            && piece.len() >= 2
            && piece.last().is_some_and(|p| p.is_alphabetic())
            && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
        piece.push(c);
        if breakable {
            pieces.push(std::mem::take(&mut piece));
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Whitespace runs collapse to single spaces. Lines break between words or
/// after a hyphen inside a compound word. A piece still longer than `width`
/// is split, filling the remainder of the current line first.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    // (starts a new word, characters)
    let mut chunks: Vec<(bool, Vec<char>)> = text
        .split_whitespace()
        .flat_map(|w| {
            hyphen_pieces(w)
                .into_iter()
                .enumerate()
                .map(|(i, piece)| (i == 0, piece))
        })
        .collect();
    chunks.reverse();

    while let Some((word_start, chunk)) = chunks.pop() {
        let sep = usize::from(word_start && current_len > 0);
        if current_len + sep + chunk.len() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.extend(chunk.iter());
            current_len += sep + chunk.len();
            continue;
        }

        if chunk.len() > width {
            let room = width.saturating_sub(current_len + sep);
            if room == 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                chunks.push((word_start, chunk));
                continue;
            }
            if sep == 1 {
                current.push(' ');
            }
            current.extend(chunk[..room].iter());
            lines.push(std::mem::take(&mut current));
            current_len = 0;
            chunks.push((false, chunk[room..].to_vec()));
            continue;
        }

        lines.push(std::mem::take(&mut current));
        current_len = 0;
        chunks.push((word_start, chunk));
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Collapse whitespace and cut `text` at a word boundary so that it fits in
/// `width` characters including the trailing `placeholder`.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut kept = String::new();
    for word in words {
        let extra = if kept.is_empty() { 0 } else { 1 } + word.chars().count();
        if kept.chars().count() + extra > budget {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
    }
    kept.push_str(placeholder);
    kept
}
