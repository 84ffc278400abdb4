//! Cursor-driven page layout
//!
//! `LayoutContext` owns the writing cursor for one render call: the lines
//! of the page being filled, the stack of completed pages, and the pending
//! half of the two-column key/value buffer. Every operation advances the
//! cursor; an operation that would pass the printable area breaks to a new
//! page and continues there. Content is never truncated.
//!
//! The context is created per render and threaded by mutable reference
//! through the document builders; there is no shared state between
//! renders, so identical operation sequences produce identical bytes.

use std::mem;

use crate::error::RenderError;
use crate::page::{PageSpec, RenderedDocument};

/// Layout state for one render call
#[derive(Debug)]
pub struct LayoutContext {
    spec: PageSpec,
    pages: Vec<Vec<String>>,
    current: Vec<String>,
    pending_pair: Option<(String, String)>,
}

/// Label column width for single-column key/value rows
const KEY_COLUMN: usize = 26;

/// Width in character cells, not bytes; labels may contain non-ASCII
/// glyphs such as the multiplication sign in rate templates
fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Pads `s` with trailing spaces to `width` cells
fn pad_to(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    for _ in width_of(s)..width {
        out.push(' ');
    }
    out
}

impl LayoutContext {
    /// Creates a context with validated geometry
    pub fn new(spec: PageSpec) -> Result<Self, RenderError> {
        spec.validate()?;
        Ok(Self {
            spec,
            pages: Vec::new(),
            current: Vec::new(),
            pending_pair: None,
        })
    }

    /// The page spec in effect
    pub fn spec(&self) -> PageSpec {
        self.spec
    }

    /// Current cursor position: completed pages and line within the page
    pub fn cursor(&self) -> (usize, usize) {
        (self.pages.len(), self.current.len())
    }

    fn content_width(&self) -> usize {
        self.spec.content_width()
    }

    fn capacity(&self) -> usize {
        self.spec.body_capacity()
    }

    fn break_page(&mut self) {
        self.pages.push(mem::take(&mut self.current));
    }

    /// Breaks early so the next `lines` land on one page together
    fn ensure_room(&mut self, lines: usize) {
        if !self.current.is_empty()
            && lines <= self.capacity()
            && self.current.len() + lines > self.capacity()
        {
            self.break_page();
        }
    }

    fn push_line(&mut self, line: String) {
        if self.current.len() >= self.capacity() {
            self.break_page();
        }
        self.current.push(line);
    }

    fn push_blank(&mut self) {
        // A blank line at the top of a fresh page carries no information.
        if !self.current.is_empty() {
            self.push_line(String::new());
        }
    }

    fn rule_line(&self, fill: char) -> String {
        fill.to_string().repeat(self.content_width())
    }

    /// Flushes a lone leftover key/value pair as a one-column row
    fn flush_pending_pair(&mut self) {
        if let Some((label, value)) = self.pending_pair.take() {
            self.single_key_value(&label, &value);
        }
    }

    fn single_key_value(&mut self, label: &str, value: &str) {
        let key = format!("{}:", label);
        let line = if width_of(&key) >= KEY_COLUMN {
            format!("{} {}", key, value)
        } else {
            format!("{}{}", pad_to(&key, KEY_COLUMN), value)
        };
        self.push_line(line);
    }

    // === Operations ===

    /// Draws a section label over a rule and advances the cursor
    pub fn section_heading(&mut self, title: &str) {
        self.flush_pending_pair();
        self.ensure_room(3);
        self.push_blank();
        self.push_line(title.to_uppercase());
        self.push_line(self.rule_line('-'));
    }

    /// A single-column label/value row
    pub fn key_value_row(&mut self, label: &str, value: &str) {
        self.flush_pending_pair();
        self.single_key_value(label, value);
    }

    /// Buffers a label/value pair for two-column rendering
    ///
    /// Two buffered pairs render as one row; a leftover single pair is
    /// flushed as a one-column row by the next non-pair operation or by
    /// `finish`.
    pub fn key_value_pair(&mut self, label: &str, value: &str) {
        match self.pending_pair.take() {
            None => self.pending_pair = Some((label.to_string(), value.to_string())),
            Some((left_label, left_value)) => {
                let col = self.content_width() / 2;
                let left = format!("{}: {}", left_label, left_value);
                let right = format!("{}: {}", label, value);
                if width_of(&left) >= col || width_of(&right) > self.content_width() - col {
                    // Cells that cannot share a row each get their own.
                    self.single_key_value(&left_label, &left_value);
                    self.single_key_value(label, value);
                } else {
                    self.push_line(format!("{}{}", pad_to(&left, col), right));
                }
            }
        }
    }

    /// A charge or totals row with the amount right-aligned
    ///
    /// Emphasis rows are banded between heavy rules with the label
    /// uppercased, used for subtotal and grand-total lines.
    pub fn table_row(&mut self, label: &str, amount: &str, emphasis: bool) {
        self.flush_pending_pair();
        let width = self.content_width();
        let text = if emphasis { label.to_uppercase() } else { label.to_string() };

        let row = if width_of(&text) + width_of(amount) + 2 > width {
            // Overlong label: keep everything, amount on its own line.
            None
        } else {
            Some(format!(
                "{}{}{}",
                text,
                " ".repeat(width - width_of(&text) - width_of(amount)),
                amount
            ))
        };

        if emphasis {
            self.ensure_room(3 + usize::from(row.is_none()));
            self.push_line(self.rule_line('='));
        }
        match row {
            Some(row) => self.push_line(row),
            None => {
                self.push_line(text);
                self.push_line(format!("{:>width$}", amount, width = width));
            }
        }
        if emphasis {
            self.push_line(self.rule_line('='));
        }
    }

    /// Word-wrapped free text followed by a blank line
    pub fn paragraph(&mut self, text: &str) {
        self.flush_pending_pair();
        for line in wrap(text, self.content_width()) {
            self.push_line(line);
        }
        self.push_blank();
    }

    /// A bulleted list, each item word-wrapped with hanging indent
    pub fn bullet_list(&mut self, items: &[String]) {
        self.flush_pending_pair();
        let width = self.content_width().saturating_sub(4);
        for item in items {
            for (i, line) in wrap(item, width).into_iter().enumerate() {
                let prefix = if i == 0 { "  - " } else { "    " };
                self.push_line(format!("{}{}", prefix, line));
            }
        }
    }

    /// A numbered list, each item word-wrapped with hanging indent
    pub fn numbered_list(&mut self, items: &[String]) {
        self.flush_pending_pair();
        let width = self.content_width().saturating_sub(5);
        for (n, item) in items.iter().enumerate() {
            for (i, line) in wrap(item, width).into_iter().enumerate() {
                if i == 0 {
                    self.push_line(format!("{:>3}. {}", n + 1, line));
                } else {
                    self.push_line(format!("     {}", line));
                }
            }
        }
    }

    /// Renders a captured signature or blank signature lines
    ///
    /// The signature image arrives pre-fetched as bytes; only a marker is
    /// laid out, keeping layout synchronous and deterministic.
    pub fn signature_block(
        &mut self,
        signer_name: Option<&str>,
        signed_at: Option<&str>,
        image: Option<&[u8]>,
    ) {
        self.flush_pending_pair();
        self.ensure_room(5);
        self.push_blank();
        match signer_name {
            Some(name) => {
                self.push_line(format!("Signed by: {}", name));
                if let Some(at) = signed_at {
                    self.push_line(format!("Signed at: {}", at));
                }
                if let Some(bytes) = image {
                    self.push_line(format!("[signature image on file, {} bytes]", bytes.len()));
                }
            }
            None => {
                self.push_line(format!("X{}", "_".repeat(40)));
                self.push_line("Renter Signature".to_string());
                self.push_blank();
                self.push_line(format!("Date{}", "_".repeat(24)));
            }
        }
    }

    /// A horizontal rule
    pub fn rule(&mut self) {
        self.flush_pending_pair();
        self.push_line(self.rule_line('-'));
    }

    /// A blank spacer line
    pub fn spacer(&mut self) {
        self.flush_pending_pair();
        self.push_blank();
    }

    /// Assembles the pages with margins and numbered footers
    pub fn finish(mut self) -> RenderedDocument {
        self.flush_pending_pair();
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }

        let total = self.pages.len();
        let spec = self.spec;
        let pages = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, body)| assemble_page(&spec, body, i + 1, total))
            .collect();
        RenderedDocument::new(pages)
    }
}

fn assemble_page(spec: &PageSpec, body: &[String], number: usize, total: usize) -> String {
    let mut out = String::new();
    for _ in 0..spec.margin_y {
        out.push('\n');
    }
    let pad = " ".repeat(spec.margin_x);
    for i in 0..spec.body_capacity() {
        match body.get(i) {
            Some(line) if !line.is_empty() => {
                out.push_str(&pad);
                out.push_str(line);
            }
            _ => {}
        }
        out.push('\n');
    }
    for _ in 0..spec.margin_y.saturating_sub(1) {
        out.push('\n');
    }
    let footer = format!("Page {} of {}", number, total);
    let indent = spec.width.saturating_sub(footer.len()) / 2;
    out.push_str(&" ".repeat(indent));
    out.push_str(&footer);
    out.push('\n');
    out
}

/// Greedy word wrap counting character cells; words longer than `width`
/// are hard-split so nothing is ever dropped
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        while width_of(word) > width {
            if !line.is_empty() {
                lines.push(mem::take(&mut line));
                line_width = 0;
            }
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (head, tail) = word.split_at(split_at);
            lines.push(head.to_string());
            word = tail;
        }
        let w = width_of(word);
        if line.is_empty() {
            line.push_str(word);
            line_width = w;
        } else if line_width + 1 + w <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + w;
        } else {
            lines.push(mem::take(&mut line));
            line.push_str(word);
            line_width = w;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
