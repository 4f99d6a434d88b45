use super::*;

// =============================================================
// format_message rule chain
// =============================================================

#[test]
fn bold_and_italic_pass_through() {
    let out = format_message("**bold** and *italic*");
    assert_eq!(out, "<strong>bold</strong> and <em>italic</em>");
}

#[test]
fn surrounding_plain_text_is_untouched() {
    let out = format_message("before **b** after");
    assert_eq!(out, "before <strong>b</strong> after");
}

#[test]
fn newlines_become_breaks() {
    assert_eq!(format_message("first\nsecond"), "first<br/>second");
}

#[test]
fn inline_code_spans() {
    assert_eq!(
        format_message("use `let` bindings"),
        "use <code>let</code> bindings"
    );
}

#[test]
fn single_bullet_becomes_a_list() {
    assert_eq!(format_message("* item"), "<ul><li>item</li></ul>");
}

#[test]
fn bullet_after_text_keeps_the_prefix() {
    assert_eq!(
        format_message("Try:\n* one"),
        "Try:<br/><ul><li>one</li></ul>"
    );
}

#[test]
fn code_rule_consumes_fences_first() {
    // The inline-code pass runs before the fence pass, so a fenced block is
    // split into code spans. Order-dependence is part of the contract.
    assert_eq!(
        format_message("```code```"),
        "<code></code><code>code</code><code></code>"
    );
}

#[test]
fn plain_text_is_identity() {
    assert_eq!(format_message("hello there"), "hello there");
}

// =============================================================
// markup_to_lines display pass
// =============================================================

fn line_text(line: &ratatui::text::Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn breaks_split_lines() {
    let lines = markup_to_lines("a<br/>b");
    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(&lines[0]), "a");
    assert_eq!(line_text(&lines[1]), "b");
}

#[test]
fn strong_renders_bold() {
    let lines = markup_to_lines("<strong>hi</strong>");
    assert_eq!(lines.len(), 1);
    let span = &lines[0].spans[0];
    assert_eq!(span.content.as_ref(), "hi");
    assert!(span.style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn list_items_get_bullets() {
    let lines = markup_to_lines("<ul><li>x</li></ul>");
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), "• x");
}

#[test]
fn stray_angle_brackets_stay_literal() {
    let lines = markup_to_lines("a < b");
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), "a < b");
}
