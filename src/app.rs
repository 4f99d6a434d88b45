use std::time::{Duration, Instant};

use chrono::Local;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::relay::{ClientError, RelayClient};

/// Models offered by the picker.
pub const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-pro",
];

/// Prompts offered on the empty-transcript welcome screen (Alt+1..3).
pub const EXAMPLE_PROMPTS: &[&str] = &[
    "Explain quantum computing in simple terms",
    "Help me write a Python function",
    "What's the weather like today?",
];

/// How long the "Copied!" marker stays up.
const COPIED_RESET: Duration = Duration::from_secs(2);

/// Hard cap on how tall the input box may grow.
pub const INPUT_MAX_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl ChatMessage {
    fn now(text: String, sender: Sender) -> Self {
        Self {
            text,
            sender,
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}

pub struct App {
    pub should_quit: bool,

    // Transcript state
    pub messages: Vec<ChatMessage>,
    pub loading: bool,
    pub send_task: Option<JoinHandle<Result<String, ClientError>>>,

    // Input state
    pub input: String,
    pub input_cursor: usize, // char index into input

    // Model selection
    pub model: String,
    pub show_model_picker: bool,
    pub model_picker_state: ListState,

    // Copy state
    pub selected_message: Option<usize>,
    copied: Option<(usize, Instant)>,

    // Chat viewport (height refreshed during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub stick_to_bottom: bool,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub relay: RelayClient,
}

impl App {
    pub fn new(relay: RelayClient, model: String) -> Self {
        Self {
            should_quit: false,

            messages: Vec::new(),
            loading: false,
            send_task: None,

            input: String::new(),
            input_cursor: 0,

            model,
            show_model_picker: false,
            model_picker_state: ListState::default(),

            selected_message: None,
            copied: None,

            chat_scroll: 0,
            chat_height: 0,
            stick_to_bottom: true,

            animation_frame: 0,

            relay,
        }
    }

    // Send flow ---------------------------------------------------------

    /// Start a send: append the user message optimistically, clear the input
    /// and raise the loading flag. Returns the text to relay, or None when
    /// the input is blank or a send is already in flight.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.input.trim().is_empty() || self.loading {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        self.messages.push(ChatMessage::now(text.clone(), Sender::User));
        self.loading = true;
        self.stick_to_bottom = true;
        Some(text)
    }

    /// Finish a send: append the reply, or the failure as an ordinary
    /// transcript entry. Appends into whatever transcript exists now, even
    /// one cleared while the call was in flight.
    pub fn finish_send(&mut self, result: Result<String, ClientError>) {
        let text = match result {
            Ok(response) => response,
            Err(ClientError::Api(error)) => format!("Error: {error}"),
            Err(ClientError::Http(error)) => format!("Server error: {error}"),
        };
        self.messages.push(ChatMessage::now(text, Sender::Ai));
        self.loading = false;
        self.stick_to_bottom = true;
    }

    /// Reap the in-flight relay task once it has resolved.
    pub async fn poll_send(&mut self) {
        if self.send_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.send_task.take() {
                let result = task
                    .await
                    .unwrap_or_else(|e| Err(ClientError::Http(e.to_string())));
                self.finish_send(result);
            }
        }
    }

    /// Empty the transcript. Irreversible; an in-flight send is left running
    /// and will append into the cleared transcript when it resolves.
    pub fn clear_chat(&mut self) {
        self.messages.clear();
        self.selected_message = None;
        self.copied = None;
        self.chat_scroll = 0;
        self.stick_to_bottom = true;
    }

    // Copy state --------------------------------------------------------

    pub fn mark_copied(&mut self, index: usize) {
        self.copied = Some((index, Instant::now()));
    }

    pub fn copied_index(&self) -> Option<usize> {
        self.copied.map(|(index, _)| index)
    }

    /// Advance the thinking animation and expire a stale copy marker.
    pub fn tick(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if let Some((_, at)) = self.copied {
            if at.elapsed() >= COPIED_RESET {
                self.copied = None;
            }
        }
    }

    // Message selection -------------------------------------------------

    pub fn select_prev_message(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        self.selected_message = Some(match self.selected_message {
            Some(index) => index.saturating_sub(1),
            None => self.messages.len() - 1,
        });
    }

    pub fn select_next_message(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let last = self.messages.len() - 1;
        self.selected_message = Some(match self.selected_message {
            Some(index) => (index + 1).min(last),
            None => last,
        });
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected_message
            .and_then(|index| self.messages.get(index))
            .map(|message| message.text.as_str())
    }

    // Scrolling ---------------------------------------------------------

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.stick_to_bottom = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        // Clamped against the rendered height on the next draw.
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    // Model picker ------------------------------------------------------

    pub fn open_model_picker(&mut self) {
        let current = AVAILABLE_MODELS
            .iter()
            .position(|candidate| *candidate == self.model)
            .unwrap_or(0);
        self.model_picker_state.select(Some(current));
        self.show_model_picker = true;
    }

    pub fn model_picker_nav_down(&mut self) {
        let len = AVAILABLE_MODELS.len();
        let index = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state.select(Some((index + 1).min(len - 1)));
    }

    pub fn model_picker_nav_up(&mut self) {
        let index = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state.select(Some(index.saturating_sub(1)));
    }

    /// Apply the highlighted model and close the picker. Returns the chosen
    /// model so the caller can persist it.
    pub fn select_model(&mut self) -> Option<String> {
        let model = self
            .model_picker_state
            .selected()
            .and_then(|index| AVAILABLE_MODELS.get(index))?;
        self.model = model.to_string();
        self.show_model_picker = false;
        Some(self.model.clone())
    }

    // Input box ---------------------------------------------------------

    /// Pre-fill the input from the welcome screen (only while it shows).
    pub fn insert_example_prompt(&mut self, index: usize) {
        if !self.messages.is_empty() {
            return;
        }
        if let Some(prompt) = EXAMPLE_PROMPTS.get(index) {
            self.input = prompt.to_string();
            self.input_cursor = self.input.chars().count();
        }
    }

    /// The input split into display rows: explicit newlines plus hard
    /// character wrapping at `width`.
    pub fn input_display_lines(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut lines = Vec::new();

        for logical in self.input.split('\n') {
            let chars: Vec<char> = logical.chars().collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for chunk in chars.chunks(width) {
                lines.push(chunk.iter().collect());
            }
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// Cursor position as (row, col) within the display rows.
    pub fn input_cursor_position(&self, width: usize) -> (u16, u16) {
        let width = width.max(1);
        let (mut row, mut col) = (0usize, 0usize);

        for (i, c) in self.input.chars().enumerate() {
            if i == self.input_cursor {
                break;
            }
            if c == '\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
                if col == width {
                    row += 1;
                    col = 0;
                }
            }
        }

        (row as u16, col as u16)
    }

    /// How many rows the input box content wants, grown to fit and clamped.
    pub fn input_height(&self, width: usize) -> u16 {
        let rows = self.input_display_lines(width).len() as u16;
        let (cursor_row, _) = self.input_cursor_position(width);
        rows.max(cursor_row + 1).min(INPUT_MAX_ROWS)
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
