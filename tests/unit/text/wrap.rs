use super::*;
use crate::text::metrics::CellMetrics;

fn style(size: f32) -> WrapStyle {
    WrapStyle {
        family: FontFamily::Sans,
        size,
        base_weight: FontWeight::MEDIUM,
    }
}

fn texts(lines: &[Line]) -> Vec<String> {
    lines.iter().map(Line::text).collect()
}

#[test]
fn wraps_by_character() {
    // Latin graphemes are 5px at size 10.
    let lines = wrap_text(&mut CellMetrics, "abcdefg", 15.0, &style(10.0));
    assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
    assert_eq!(lines[0].width(), 15.0);
    assert_eq!(lines[2].width(), 5.0);
}

#[test]
fn blank_paragraph_becomes_blank_line() {
    let lines = wrap_text(&mut CellMetrics, "a\n\nb", 100.0, &style(10.0));
    assert_eq!(lines.len(), 3);
    assert!(!lines[0].is_empty());
    assert!(lines[1].is_empty());
    assert!(lines[1].tokens().is_empty());
    assert!(!lines[2].is_empty());
}

#[test]
fn whitespace_only_paragraph_is_blank() {
    let lines = wrap_text(&mut CellMetrics, "   \r", 100.0, &style(10.0));
    assert_eq!(lines, vec![Line::blank()]);
}

#[test]
fn empty_highlight_paragraph_is_blank() {
    let lines = wrap_text(&mut CellMetrics, "[]", 100.0, &style(10.0));
    assert_eq!(lines, vec![Line::blank()]);
}

#[test]
fn oversized_grapheme_gets_its_own_line() {
    // "中" is 10px wide, the limit 7px.
    let lines = wrap_text(&mut CellMetrics, "a中b", 7.0, &style(10.0));
    assert_eq!(texts(&lines), vec!["a", "中", "b"]);
    assert!(lines.iter().all(|l| !l.tokens().is_empty()));
}

#[test]
fn highlight_flags_survive_wrapping() {
    let lines = wrap_text(&mut CellMetrics, "ab[cd]e", 10.0, &style(10.0));
    assert_eq!(texts(&lines), vec!["ab", "cd", "e"]);
    assert!(lines[1].tokens().iter().all(|t| t.highlight));
    assert!(lines[0].tokens().iter().all(|t| !t.highlight));
}

#[test]
fn combining_sequences_are_not_split() {
    let lines = wrap_text(&mut CellMetrics, "e\u{301}e\u{301}", 5.0, &style(10.0));
    assert_eq!(texts(&lines), vec!["e\u{301}", "e\u{301}"]);
}

#[test]
fn line_width_is_token_sum() {
    let lines = wrap_text(&mut CellMetrics, "中文abc", 1000.0, &style(10.0));
    let line = &lines[0];
    let sum: f32 = line.tokens().iter().map(|t| t.width).sum();
    assert_eq!(line.width(), sum);
    assert_eq!(line.width(), 35.0);
}

#[test]
fn highlighted_runs_use_black_weight() {
    let s = style(10.0);
    assert_eq!(s.font_for(true).weight, FontWeight::BLACK);
    assert_eq!(s.font_for(false).weight, FontWeight::MEDIUM);
}

#[test]
fn from_tokens_without_tokens_is_blank() {
    assert!(Line::from_tokens(Vec::new()).is_empty());
}

#[test]
fn plain_wrap_keeps_brackets_and_blank_paragraphs() {
    let font = FontSpec::new(FontFamily::Serif, FontWeight::BOLD, 10.0);
    let lines = wrap_plain(&mut CellMetrics, "[ab]\n\ncdef", 20.0, &font);
    assert_eq!(lines, vec!["[ab]", "", "cdef"]);
    let lines = wrap_plain(&mut CellMetrics, "中中中", 15.0, &font);
    assert_eq!(lines, vec!["中", "中", "中"]);
}
