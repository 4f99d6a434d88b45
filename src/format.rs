use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;

static RULES: OnceLock<FormatRules> = OnceLock::new();

/// The ordered rule chain applied to generated messages. Each rule is one
/// sequential pass over the whole string; order matters and later rules see
/// the output of earlier ones. This is intentionally not a markdown parser,
/// so nested emphasis and mixed lists come out however the chain leaves them.
struct FormatRules {
    bold: Regex,
    italic: Regex,
    code: Regex,
    fence: Regex,
    bullet: Regex,
    list: Regex,
}

impl FormatRules {
    fn global() -> &'static FormatRules {
        RULES.get_or_init(|| FormatRules {
            bold: Regex::new(r"\*\*(.*?)\*\*").unwrap(),
            italic: Regex::new(r"\*(.*?)\*").unwrap(),
            code: Regex::new(r"`(.*?)`").unwrap(),
            fence: Regex::new(r"(?s)```(.*?)```").unwrap(),
            bullet: Regex::new(r"\* ([^\n]*)").unwrap(),
            list: Regex::new(r"(?s)(<li>.*</li>)").unwrap(),
        })
    }
}

/// Turn a generated message into light HTML-ish markup.
///
/// Applied only to AI messages; user text is rendered literally and never
/// passes through here.
pub fn format_message(text: &str) -> String {
    let rules = FormatRules::global();

    let text = text.replace('\n', "<br/>");
    let text = rules.bold.replace_all(&text, "<strong>$1</strong>");
    let text = rules.italic.replace_all(&text, "<em>$1</em>");
    let text = rules.code.replace_all(&text, "<code>$1</code>");
    let text = rules.fence.replace_all(&text, "<pre><code>$1</code></pre>");
    let text = rules.bullet.replace_all(&text, "<li>$1</li>");
    // Only the first li..li span gets wrapped, like the source transform.
    rules.list.replace(&text, "<ul>$1</ul>").into_owned()
}

/// Render `format_message` output as styled terminal lines.
///
/// Tolerant of whatever tag soup the rule chain produces: unknown or
/// unbalanced tags degrade to literal text or early resets, never a panic.
pub fn markup_to_lines(markup: &str) -> Vec<Line<'static>> {
    let mut renderer = MarkupRenderer::default();
    let mut rest = markup;

    while let Some(pos) = rest.find('<') {
        renderer.push_text(&rest[..pos]);
        rest = &rest[pos..];
        match renderer.consume_tag(rest) {
            Some(len) => rest = &rest[len..],
            None => {
                // Not a tag we produce; keep the '<' literally.
                renderer.push_text("<");
                rest = &rest[1..];
            }
        }
    }
    renderer.push_text(rest);
    renderer.finish()
}

#[derive(Default)]
struct MarkupRenderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    text: String,
    bold: usize,
    italic: usize,
    code: usize,
}

impl MarkupRenderer {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.code > 0 {
            style = style.fg(Color::Green);
        }
        style
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn flush_span(&mut self) {
        if !self.text.is_empty() {
            let style = self.style();
            self.spans.push(Span::styled(std::mem::take(&mut self.text), style));
        }
    }

    /// End the current line unconditionally (a `<br/>` may produce an empty
    /// line on purpose).
    fn break_line(&mut self) {
        self.flush_span();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    /// End the current line only if it holds anything, for block boundaries.
    fn break_block(&mut self) {
        self.flush_span();
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Try to consume one known tag at the start of `rest`; returns its byte
    /// length, or None when `rest` does not start with a tag we emit.
    fn consume_tag(&mut self, rest: &str) -> Option<usize> {
        const TAGS: &[&str] = &[
            "<br/>", "<strong>", "</strong>", "<em>", "</em>", "<code>",
            "</code>", "<pre>", "</pre>", "<ul>", "</ul>", "<li>", "</li>",
        ];
        let tag = TAGS.iter().find(|t| rest.starts_with(**t))?;
        match *tag {
            "<br/>" => self.break_line(),
            "<strong>" => {
                self.flush_span();
                self.bold += 1;
            }
            "</strong>" => {
                self.flush_span();
                self.bold = self.bold.saturating_sub(1);
            }
            "<em>" => {
                self.flush_span();
                self.italic += 1;
            }
            "</em>" => {
                self.flush_span();
                self.italic = self.italic.saturating_sub(1);
            }
            "<code>" => {
                self.flush_span();
                self.code += 1;
            }
            "</code>" => {
                self.flush_span();
                self.code = self.code.saturating_sub(1);
            }
            "<pre>" | "</pre>" | "<ul>" | "</ul>" => self.break_block(),
            "<li>" => {
                self.break_block();
                self.spans.push(Span::raw("• "));
            }
            "</li>" => self.break_block(),
            _ => unreachable!(),
        }
        Some(tag.len())
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_block();
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
