//! Legacy freeform-content fallback
//!
//! Documents persisted before the structured schema hold one formatted
//! text blob instead of line items. This module classifies each line of
//! that blob against the section-delimiter markers the old formatter used
//! and replays recognized patterns through the same layout operations a
//! structured render uses. Unrecognized lines render as plain paragraph
//! text; a malformed line is skipped, never aborting the render.

use tracing::debug;

use crate::layout::LayoutContext;

/// A classified line of legacy content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyLine<'a> {
    /// Separator run (`====` / `----`)
    Rule,
    /// `=== Title ===` or `## Title`
    Heading(&'a str),
    /// `Label: value` with a short label
    KeyValue(&'a str, &'a str),
    /// `[ ]` / `[x]` checkbox marker
    Checkbox { checked: bool, text: &'a str },
    /// `1.` / `1)` numbered entry
    Numbered(&'a str),
    /// `-` / `*` / `•` bulleted entry
    Bulleted(&'a str),
    /// Empty line
    Blank,
    /// Anything else renders as plain text
    Text(&'a str),
    /// Malformed content, dropped
    Skip,
}

/// Longest label still treated as a key/value row rather than prose
const MAX_KEY_LEN: usize = 32;

/// Classifies one line of legacy content
pub fn classify(line: &str) -> LegacyLine<'_> {
    if line.chars().any(|c| c.is_control() && c != '\t') {
        return LegacyLine::Skip;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LegacyLine::Blank;
    }

    if trimmed.len() >= 4
        && (trimmed.chars().all(|c| c == '=') || trimmed.chars().all(|c| c == '-'))
    {
        return LegacyLine::Rule;
    }

    if let Some(rest) = trimmed.strip_prefix("=== ") {
        if let Some(title) = rest.strip_suffix(" ===") {
            return LegacyLine::Heading(title.trim());
        }
    }
    if let Some(title) = trimmed.strip_prefix("## ") {
        return LegacyLine::Heading(title.trim());
    }

    for (marker, checked) in [("[ ] ", false), ("[x] ", true), ("[X] ", true)] {
        if let Some(text) = trimmed.strip_prefix(marker) {
            return LegacyLine::Checkbox { checked, text: text.trim() };
        }
    }

    if let Some(text) = numbered_text(trimmed) {
        return LegacyLine::Numbered(text);
    }

    for marker in ["- ", "* ", "• "] {
        if let Some(text) = trimmed.strip_prefix(marker) {
            return LegacyLine::Bulleted(text.trim());
        }
    }

    if let Some((key, value)) = trimmed.split_once(": ") {
        let key = key.trim();
        if !key.is_empty() && key.len() <= MAX_KEY_LEN && !key.contains(':') {
            return LegacyLine::KeyValue(key, value.trim());
        }
    }

    LegacyLine::Text(trimmed)
}

/// Splits a `1.` / `12)` prefix off a numbered entry
fn numbered_text(trimmed: &str) -> Option<&str> {
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let rest = &trimmed[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}

/// Replays legacy content through the layout operations
///
/// Consecutive bulleted or numbered entries group into one list call so
/// they wrap with consistent indentation.
pub fn render_legacy(ctx: &mut LayoutContext, content: &str) {
    let mut bullets: Vec<String> = Vec::new();
    let mut numbered: Vec<String> = Vec::new();

    for raw in content.lines() {
        let line = classify(raw);

        if !matches!(line, LegacyLine::Bulleted(_) | LegacyLine::Checkbox { .. })
            && !bullets.is_empty()
        {
            ctx.bullet_list(&bullets);
            bullets.clear();
        }
        if !matches!(line, LegacyLine::Numbered(_)) && !numbered.is_empty() {
            ctx.numbered_list(&numbered);
            numbered.clear();
        }

        match line {
            LegacyLine::Rule => ctx.rule(),
            LegacyLine::Heading(title) => ctx.section_heading(title),
            LegacyLine::KeyValue(key, value) => ctx.key_value_row(key, value),
            LegacyLine::Checkbox { checked, text } => {
                let marker = if checked { "[x]" } else { "[ ]" };
                bullets.push(format!("{} {}", marker, text));
            }
            LegacyLine::Bulleted(text) => bullets.push(text.to_string()),
            LegacyLine::Numbered(text) => numbered.push(text.to_string()),
            LegacyLine::Blank => ctx.spacer(),
            LegacyLine::Text(text) => ctx.paragraph(text),
            LegacyLine::Skip => {
                debug!(line = raw, "skipping malformed legacy line");
            }
        }
    }

    if !bullets.is_empty() {
        ctx.bullet_list(&bullets);
    }
    if !numbered.is_empty() {
        ctx.numbered_list(&numbered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;

    #[test]
    fn test_classify_rules_and_headings() {
        assert_eq!(classify("===="), LegacyLine::Rule);
        assert_eq!(classify("--------"), LegacyLine::Rule);
        assert_eq!(classify("=== Rental Terms ==="), LegacyLine::Heading("Rental Terms"));
        assert_eq!(classify("## Charges"), LegacyLine::Heading("Charges"));
    }

    #[test]
    fn test_classify_labeled_line() {
        assert_eq!(
            classify("Pickup Location: Downtown Branch"),
            LegacyLine::KeyValue("Pickup Location", "Downtown Branch")
        );
        // Overlong labels are prose, not keys.
        let long = "This sentence happens to contain a colon somewhere much too far in: yes";
        assert!(matches!(classify(long), LegacyLine::Text(_)));
    }

    #[test]
    fn test_classify_list_markers() {
        assert_eq!(classify("1. First"), LegacyLine::Numbered("First"));
        assert_eq!(classify("12) Twelfth"), LegacyLine::Numbered("Twelfth"));
        assert_eq!(classify("- GPS Unit"), LegacyLine::Bulleted("GPS Unit"));
        assert_eq!(
            classify("[x] Fuel policy accepted"),
            LegacyLine::Checkbox { checked: true, text: "Fuel policy accepted" }
        );
    }

    #[test]
    fn test_classify_skips_control_bytes() {
        assert_eq!(classify("bad\u{1b}[1mline"), LegacyLine::Skip);
        assert_eq!(classify("tabs\tare fine"), LegacyLine::Text("tabs\tare fine"));
    }

    #[test]
    fn test_render_survives_malformed_lines() {
        let content = "=== Summary ===\nVehicle: Sedan\nbad\u{0}line\nAll other text.";
        let mut ctx = LayoutContext::new(PageSpec::default()).unwrap();
        render_legacy(&mut ctx, content);
        let text = ctx.finish().text();

        assert!(text.contains("SUMMARY"));
        assert!(text.contains("Vehicle:"));
        assert!(text.contains("All other text."));
        assert!(!text.contains("bad"));
    }

    #[test]
    fn test_consecutive_bullets_group() {
        let content = "- one\n- two\n- three\nafter";
        let mut ctx = LayoutContext::new(PageSpec::default()).unwrap();
        render_legacy(&mut ctx, content);
        let text = ctx.finish().text();
        assert!(text.contains("- one"));
        assert!(text.contains("- three"));
        assert!(text.contains("after"));
    }
}
