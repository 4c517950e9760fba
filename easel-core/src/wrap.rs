//! Greedy word wrapping against measured text widths.

use crate::metrics::FontMetrics;

/// Wrap `text` into lines no wider than `max_width`, measuring with the
/// given font metrics at `font_size`.
///
/// Words accumulate onto the current line while the measured candidate
/// still fits. A single word wider than `max_width` is emitted unsplit on
/// its own line; callers accept that one documented overflow case rather
/// than breaking inside a word.
#[must_use]
pub fn wrap_text(text: &str, metrics: &FontMetrics, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if metrics.text_width(&candidate, font_size) <= max_width {
            current = candidate;
        } else if current.is_empty() {
            // Over-wide single word: its own line, unsplit.
            lines.push(word.to_string());
        } else {
            lines.push(std::mem::take(&mut current));
            if metrics.text_width(word, font_size) <= max_width {
                current = word.to_string();
            } else {
                lines.push(word.to_string());
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FontVariant;

    fn helvetica() -> FontMetrics {
        FontMetrics::new(FontVariant::Helvetica)
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("hello world", &helvetica(), 12.0, 500.0);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_empty_text_yields_no_lines() {
        assert!(wrap_text("", &helvetica(), 12.0, 200.0).is_empty());
        assert!(wrap_text("   ", &helvetica(), 12.0, 200.0).is_empty());
    }

    #[test]
    fn test_no_line_exceeds_max_width() {
        let metrics = helvetica();
        let text = "The quarterly revenue figures exceeded every projection the \
                    planning committee had circulated in January";
        let max_width = 150.0;
        let lines = wrap_text(text, &metrics, 12.0, max_width);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                metrics.text_width(line, 12.0) <= max_width,
                "line {line:?} exceeds {max_width}"
            );
        }
    }

    #[test]
    fn test_over_wide_word_is_its_own_line() {
        let metrics = helvetica();
        let text = "see antidisestablishmentarianism now";
        let lines = wrap_text(text, &metrics, 16.0, 80.0);
        assert!(lines.contains(&"antidisestablishmentarianism".to_string()));
        // The over-wide word must not be merged with its neighbors.
        for line in &lines {
            if line.contains("antidisestablishmentarianism") {
                assert_eq!(line, "antidisestablishmentarianism");
            }
        }
    }

    #[test]
    fn test_wrapping_is_deterministic() {
        let metrics = helvetica();
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let first = wrap_text(text, &metrics, 12.0, 100.0);
        let second = wrap_text(text, &metrics, 12.0, 100.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_words_preserved_in_order() {
        let metrics = helvetica();
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, &metrics, 12.0, 90.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }
}
