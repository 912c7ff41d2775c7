//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to ISO 32000-1:2008 Section 8-9.

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj) - single-byte encoded literal string
    ShowText(Vec<u8>),
    /// Show hex-encoded glyph IDs (Tj) - for CIDFonts
    ShowHexText(Vec<u16>),
    /// Set character spacing (Tc)
    SetCharacterSpacing(f32),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Fill (f)
    Fill,
}

/// Builder for a single page's content stream.
///
/// Redundant state changes (same font, same spacing, same color inside
/// one text object) are dropped as they are added.
#[derive(Debug, Clone, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    current_font: Option<(String, f32)>,
    current_char_spacing: Option<f32>,
    current_fill: Option<(f32, f32, f32)>,
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// The operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, resource: &str, size: f32) -> &mut Self {
        let unchanged = self
            .current_font
            .as_ref()
            .is_some_and(|(name, current)| name == resource && *current == size);
        if !unchanged {
            self.op(ContentStreamOp::SetFont(resource.to_string(), size));
            self.current_font = Some((resource.to_string(), size));
        }
        self
    }

    /// Set character spacing (Tc), applied after every glyph.
    pub fn set_char_spacing(&mut self, spacing: f32) -> &mut Self {
        if self.current_char_spacing != Some(spacing) {
            self.op(ContentStreamOp::SetCharacterSpacing(spacing));
            self.current_char_spacing = Some(spacing);
        }
        self
    }

    /// Set the non-stroking color.
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        if self.current_fill != Some((r, g, b)) {
            self.op(ContentStreamOp::SetFillColorRGB(r, g, b));
            self.current_fill = Some((r, g, b));
        }
        self
    }

    /// Position the next glyph at `(x, y)`.
    pub fn text_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y))
    }

    /// Show single-byte encoded text at the current position.
    pub fn show_bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.op(ContentStreamOp::ShowText(bytes))
    }

    /// Show a run of glyph IDs at the current position.
    pub fn show_glyphs(&mut self, glyphs: Vec<u16>) -> &mut Self {
        self.op(ContentStreamOp::ShowHexText(glyphs))
    }

    /// Paint a filled rectangle in its own graphics state.
    ///
    /// The fill color does not leak into later operations.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: (f32, f32, f32)) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::SetFillColorRGB(color.0, color.1, color.2));
        self.op(ContentStreamOp::Rectangle(x, y, width, height));
        self.op(ContentStreamOp::Fill);
        self.op(ContentStreamOp::RestoreState);
        self.current_fill = None;
        self
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op);
            buf.push(b'\n');
        }
        buf
    }
}

/// Operands carry at most three decimals; integral values print bare.
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write a single operation to the buffer.
fn write_op(buf: &mut Vec<u8>, op: &ContentStreamOp) {
    let text = match op {
        ContentStreamOp::SaveState => "q".to_string(),
        ContentStreamOp::RestoreState => "Q".to_string(),
        ContentStreamOp::BeginText => "BT".to_string(),
        ContentStreamOp::EndText => "ET".to_string(),
        ContentStreamOp::SetFont(name, size) => format!("/{} {} Tf", name, num(*size)),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => format!(
            "{} {} {} {} {} {} Tm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::ShowText(bytes) => {
            buf.push(b'(');
            write_escaped_bytes(buf, bytes);
            buf.extend_from_slice(b") Tj");
            return;
        },
        ContentStreamOp::ShowHexText(glyphs) => {
            let hex: String = glyphs.iter().map(|g| format!("{:04X}", g)).collect();
            format!("<{}> Tj", hex)
        },
        ContentStreamOp::SetCharacterSpacing(spacing) => format!("{} Tc", num(*spacing)),
        ContentStreamOp::SetFillColorRGB(r, g, b) => {
            format!("{} {} {} rg", num(*r), num(*g), num(*b))
        },
        ContentStreamOp::Rectangle(x, y, w, h) => {
            format!("{} {} {} {} re", num(*x), num(*y), num(*w), num(*h))
        },
        ContentStreamOp::Fill => "f".to_string(),
    };
    buf.extend_from_slice(text.as_bytes());
}

/// Escape a byte string for a literal `( )` operand.
///
/// Bytes outside printable ASCII are written as octal escapes so the
/// stream stays 7-bit clean.
fn write_escaped_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        match byte {
            b'(' => buf.extend_from_slice(b"\\("),
            b')' => buf.extend_from_slice(b"\\)"),
            b'\\' => buf.extend_from_slice(b"\\\\"),
            0x20..=0x7E => buf.push(byte),
            _ => buf.extend_from_slice(format!("\\{:03o}", byte).as_bytes()),
        }
    }
}
