use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Sender, AVAILABLE_MODELS, EXAMPLE_PROMPTS};
use crate::format;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let input_width = area.width.saturating_sub(2) as usize;
    let input_rows = app.input_height(input_width);

    // Main layout: header, chat, growing input box, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(input_rows + 2),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);

    if app.show_model_picker {
        render_model_picker(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " ChatAI ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("chat with Gemini ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("· {} ", app.model),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Gemini: {} ", app.model));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    app.chat_height = inner_height;

    let lines = if app.messages.is_empty() && !app.loading {
        welcome_lines()
    } else {
        transcript_lines(app)
    };

    // Wrapped-height estimate for sticky-bottom scrolling.
    let wrap_width = inner_width.max(1) as usize;
    let total: u16 = lines
        .iter()
        .map(|line| (line.width() / wrap_width) as u16 + 1)
        .sum();

    let max_scroll = total.saturating_sub(inner_height);
    if app.stick_to_bottom {
        app.chat_scroll = max_scroll;
    } else {
        app.chat_scroll = app.chat_scroll.min(max_scroll);
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn transcript_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    for (index, message) in app.messages.iter().enumerate() {
        let selected = app.selected_message == Some(index);
        let (label, label_color) = match message.sender {
            Sender::User => ("You:", Color::Cyan),
            Sender::Ai => ("Gemini:", Color::Yellow),
        };

        let mut label_style = Style::default()
            .fg(label_color)
            .add_modifier(Modifier::BOLD);
        if selected {
            label_style = label_style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(label, label_style)));

        match message.sender {
            // User text is literal; only generated text goes through the
            // formatter.
            Sender::User => {
                for raw in message.text.lines() {
                    lines.push(Line::from(raw.to_string()));
                }
            }
            Sender::Ai => {
                lines.extend(format::markup_to_lines(&format::format_message(
                    &message.text,
                )));
            }
        }

        let mut footer = vec![Span::styled(
            message.timestamp.clone(),
            Style::default().fg(Color::DarkGray),
        )];
        if app.copied_index() == Some(index) {
            footer.push(Span::raw("  "));
            footer.push(Span::styled(
                "Copied!",
                Style::default().fg(Color::Green),
            ));
        } else if selected {
            footer.push(Span::raw("  "));
            footer.push(Span::styled(
                "Ctrl+Y to copy",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(footer));
        lines.push(Line::default());
    }

    if app.loading {
        lines.push(Line::from(Span::styled(
            "Gemini:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn welcome_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome to ChatAI!",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Start a conversation with Gemini. Ask questions, get help"),
        Line::from("with coding, or just chat."),
        Line::default(),
        Line::from(Span::styled(
            "Try asking:",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  Alt+{} ", i + 1),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("\"{prompt}\""),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let (border_color, title) = if app.loading {
        (Color::DarkGray, " Sending… ")
    } else {
        (Color::Yellow, " Message (Enter to send, Shift+Enter for new line) ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let width = area.width.saturating_sub(2) as usize;
    let height = area.height.saturating_sub(2);
    let rows = app.input_display_lines(width);
    let (cursor_row, cursor_col) = app.input_cursor_position(width);

    // Keep the cursor row visible once the box hits its height cap.
    let first_row = (cursor_row + 1).saturating_sub(height) as usize;
    let visible: Vec<Line> = rows
        .into_iter()
        .skip(first_row)
        .take(height as usize)
        .map(Line::from)
        .collect();

    frame.render_widget(Paragraph::new(Text::from(visible)).block(block), area);

    if !app.show_model_picker {
        frame.set_cursor_position((
            area.x + 1 + cursor_col,
            area.y + 1 + cursor_row.saturating_sub(first_row as u16),
        ));
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().fg(Color::DarkGray);

    let hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" Ctrl+P ", key_style),
        Span::styled(" model ", label_style),
        Span::styled(" Ctrl+N ", key_style),
        Span::styled(" clear ", label_style),
        Span::styled(" Alt+↑/↓ ", key_style),
        Span::styled(" select ", label_style),
        Span::styled(" Ctrl+Y ", key_style),
        Span::styled(" copy ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Ctrl+C ", key_style),
        Span::styled(" quit ", label_style),
    ];

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_model_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    // Centered popup over the chat.
    let popup_width = 44.min(area.width.saturating_sub(4));
    let popup_height = (AVAILABLE_MODELS.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Model (Enter to select, Esc to cancel) ");

    let items: Vec<ListItem> = AVAILABLE_MODELS
        .iter()
        .map(|model| {
            let style = if *model == app.model {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {model} ")).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.model_picker_state);
}
