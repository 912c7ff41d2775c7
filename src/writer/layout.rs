//! Paragraph flow and pagination.
//!
//! Paragraphs are broken into lines greedily and stacked down a single
//! frame per page. Each word is a sequence of styled pieces; words on a
//! line are separated by exactly one regular-weight space, so runs of
//! whitespace in the source never widen a line.
//!
//! Vertical metrics follow the usual paragraph model: a line occupies
//! `leading` points, the first baseline sits `font_size` below the top of
//! the line box, and paragraphs are separated by `space_before` (dropped at
//! the top of a page) and `space_after`.

const EPSILON: f32 = 1e-3;

/// Font weight of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Regular weight
    Regular,
    /// Bold weight
    Bold,
}

/// Supplies glyph advances for layout.
pub trait TextMeasure {
    /// Advance width of `ch` in 1/1000 em for the given style.
    fn char_width(&self, ch: char, style: Style) -> f32;
}

/// A word as laid out: one or more styled pieces drawn without gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Word<'a> {
    /// Styled pieces in drawing order
    pub pieces: Vec<(Style, &'a str)>,
}

impl<'a> Word<'a> {
    /// A word made of a bold prefix and a regular suffix; empty parts are omitted.
    pub fn bionic(bold: &'a str, normal: &'a str) -> Self {
        let pieces = [(Style::Bold, bold), (Style::Regular, normal)]
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .collect();
        Self { pieces }
    }
}

/// Page size, margins and frame padding in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin on every side
    pub margin: f32,
    /// Padding inside the margin frame
    pub padding: f32,
}

impl PageGeometry {
    /// US Letter with one-inch margins and 6 pt frame padding.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin: 72.0,
        padding: 6.0,
    };

    /// Left edge of the text area.
    pub fn content_left(&self) -> f32 {
        self.margin + self.padding
    }

    /// Top edge of the text area.
    pub fn content_top(&self) -> f32 {
        self.height - self.margin - self.padding
    }

    /// Bottom edge of the text area.
    pub fn content_bottom(&self) -> f32 {
        self.margin + self.padding
    }

    /// Width available to a line.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * (self.margin + self.padding)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Typographic parameters for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Font size in points
    pub font_size: f32,
    /// Distance between baselines
    pub leading: f32,
    /// Extra space after every glyph (Tc)
    pub char_spacing: f32,
    /// Space above each paragraph, except at the top of a page
    pub space_before: f32,
    /// Space below each paragraph
    pub space_after: f32,
}

/// A run of same-styled text on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Weight of the run
    pub style: Style,
    /// Text to draw
    pub text: String,
}

/// A line placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Left edge of the first glyph
    pub x: f32,
    /// Baseline position
    pub baseline: f32,
    /// Runs in drawing order
    pub runs: Vec<Run>,
}

/// Lines placed on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Lines in drawing order
    pub lines: Vec<PlacedLine>,
}

/// Flows paragraphs of words onto pages.
pub struct LayoutEngine<'m, M: TextMeasure> {
    measure: &'m M,
    geometry: PageGeometry,
    params: LayoutParams,
}

impl<'m, M: TextMeasure> LayoutEngine<'m, M> {
    /// Create a layout engine.
    pub fn new(measure: &'m M, geometry: PageGeometry, params: LayoutParams) -> Self {
        Self {
            measure,
            geometry,
            params,
        }
    }

    /// Width of a single character in points, including character spacing.
    fn advance(&self, ch: char, style: Style) -> f32 {
        self.measure.char_width(ch, style) * self.params.font_size / 1000.0
            + self.params.char_spacing
    }

    /// Width of a word in points.
    pub fn word_width(&self, word: &Word<'_>) -> f32 {
        word.pieces
            .iter()
            .flat_map(|(style, text)| text.chars().map(move |ch| (ch, *style)))
            .map(|(ch, style)| self.advance(ch, style))
            .sum()
    }

    /// Width of the inter-word space in points.
    pub fn space_width(&self) -> f32 {
        self.advance(' ', Style::Regular)
    }

    /// Break a paragraph into lines that fit the frame width.
    ///
    /// A word wider than the frame is never split; it gets a line of its own
    /// and overflows the right edge.
    pub fn break_lines<'w, 'a>(&self, words: &'w [Word<'a>]) -> Vec<Vec<&'w Word<'a>>> {
        let max_width = self.geometry.content_width();
        let space = self.space_width();

        let mut lines = Vec::new();
        let mut current: Vec<&Word> = Vec::new();
        let mut current_width = 0.0;

        for word in words {
            let width = self.word_width(word);
            if current.is_empty() {
                current_width = width;
                current.push(word);
            } else if current_width + space + width <= max_width + EPSILON {
                current_width += space + width;
                current.push(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current_width = width;
                current.push(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Lay out all paragraphs. Always yields at least one page.
    pub fn layout(&self, paragraphs: &[Vec<Word<'_>>]) -> Vec<PageLayout> {
        let top = self.geometry.content_top();
        let bottom = self.geometry.content_bottom();
        let LayoutParams {
            font_size,
            leading,
            space_before,
            space_after,
            ..
        } = self.params;

        let mut pages = vec![PageLayout::default()];
        let mut cursor = top;
        let mut at_top = true;

        for words in paragraphs {
            let mut lines = self.break_lines(words);
            if lines.is_empty() {
                // Empty paragraph: one blank line box keeps the gap visible.
                lines.push(Vec::new());
            }

            if !at_top {
                cursor -= space_before;
            }

            for line in lines {
                if !at_top && cursor - leading < bottom - EPSILON {
                    pages.push(PageLayout::default());
                    cursor = top;
                }

                if !line.is_empty() {
                    let placed = PlacedLine {
                        x: self.geometry.content_left(),
                        baseline: cursor - font_size,
                        runs: line_runs(&line),
                    };
                    if let Some(page) = pages.last_mut() {
                        page.lines.push(placed);
                    }
                }
                cursor -= leading;
                at_top = false;
            }

            cursor -= space_after;
        }

        log::debug!(
            "Laid out {} paragraphs on {} pages",
            paragraphs.len(),
            pages.len()
        );
        pages
    }
}

/// Merge a line's words into same-style runs joined by single spaces.
fn line_runs(words: &[&Word<'_>]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut push = |style: Style, text: &str| match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(Run {
            style,
            text: text.to_string(),
        }),
    };

    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            push(Style::Regular, " ");
        }
        for (style, text) in &word.pieces {
            push(*style, text);
        }
    }
    runs
}
