use super::*;
use crate::relay::RelayClient;

fn make_app() -> App {
    App::new(
        RelayClient::new("http://localhost:3600"),
        "gemini-2.5-flash".to_string(),
    )
}

// =============================================================
// Send flow
// =============================================================

#[test]
fn blank_input_never_sends() {
    let mut app = make_app();
    assert!(app.begin_send().is_none());

    app.input = "   \n  ".to_string();
    assert!(app.begin_send().is_none());

    assert!(app.messages.is_empty());
    assert!(!app.loading);
}

#[test]
fn send_is_refused_while_one_is_in_flight() {
    let mut app = make_app();
    app.input = "first".to_string();
    assert!(app.begin_send().is_some());

    app.input = "second".to_string();
    assert!(app.begin_send().is_none());
    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.input, "second");
}

#[test]
fn begin_send_appends_user_message_and_clears_input() {
    let mut app = make_app();
    app.input = "Hello".to_string();
    app.input_cursor = 5;

    assert_eq!(app.begin_send().as_deref(), Some("Hello"));
    assert!(app.loading);
    assert!(app.input.is_empty());
    assert_eq!(app.input_cursor, 0);
    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.messages[0].text, "Hello");
    assert_eq!(app.messages[0].sender, Sender::User);
}

#[test]
fn successful_send_appends_exactly_two_messages_in_order() {
    let mut app = make_app();
    app.input = "Hello".to_string();
    app.begin_send();
    app.finish_send(Ok("Hi! How can I help?".to_string()));

    assert!(!app.loading);
    assert_eq!(app.messages.len(), 2);
    assert_eq!(app.messages[0].sender, Sender::User);
    assert_eq!(app.messages[0].text, "Hello");
    assert_eq!(app.messages[1].sender, Sender::Ai);
    assert_eq!(app.messages[1].text, "Hi! How can I help?");
}

#[test]
fn api_failure_becomes_an_error_entry() {
    let mut app = make_app();
    app.input = "Hello".to_string();
    app.begin_send();
    app.finish_send(Err(ClientError::Api("upstream exploded".to_string())));

    assert!(!app.loading);
    assert_eq!(app.messages[1].sender, Sender::Ai);
    assert_eq!(app.messages[1].text, "Error: upstream exploded");
}

#[test]
fn transport_failure_becomes_a_server_error_entry() {
    let mut app = make_app();
    app.input = "Hello".to_string();
    app.begin_send();
    app.finish_send(Err(ClientError::Http("connection refused".to_string())));

    assert_eq!(app.messages[1].text, "Server error: connection refused");
}

#[test]
fn clear_chat_always_empties_the_transcript() {
    let mut app = make_app();
    for text in ["a", "b", "c"] {
        app.input = text.to_string();
        app.begin_send();
        app.finish_send(Ok("ok".to_string()));
    }
    app.selected_message = Some(2);
    app.mark_copied(2);

    app.clear_chat();
    assert!(app.messages.is_empty());
    assert!(app.selected_message.is_none());
    assert!(app.copied_index().is_none());
}

#[test]
fn clearing_mid_flight_orphans_the_reply() {
    // The original never guarded this race; the late reply lands in the
    // cleared transcript.
    let mut app = make_app();
    app.input = "Hello".to_string();
    app.begin_send();
    app.clear_chat();
    app.finish_send(Ok("late reply".to_string()));

    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.messages[0].sender, Sender::Ai);
    assert_eq!(app.messages[0].text, "late reply");
}

// =============================================================
// Copy marker
// =============================================================

#[test]
fn copy_marker_tracks_one_index() {
    let mut app = make_app();
    app.mark_copied(1);
    assert_eq!(app.copied_index(), Some(1));

    app.mark_copied(3);
    assert_eq!(app.copied_index(), Some(3));
}

#[test]
fn fresh_copy_marker_survives_a_tick() {
    let mut app = make_app();
    app.mark_copied(0);
    app.tick();
    assert_eq!(app.copied_index(), Some(0));
}

#[test]
fn stale_copy_marker_expires_on_tick() {
    let mut app = make_app();
    app.copied = Some((0, Instant::now() - COPIED_RESET));
    app.tick();
    assert!(app.copied_index().is_none());
}

// =============================================================
// Model picker
// =============================================================

#[test]
fn picker_opens_on_the_current_model() {
    let mut app = make_app();
    app.model = "gemini-2.5-pro".to_string();
    app.open_model_picker();
    assert!(app.show_model_picker);
    assert_eq!(app.model_picker_state.selected(), Some(2));
}

#[test]
fn selecting_a_model_applies_and_closes() {
    let mut app = make_app();
    app.open_model_picker();
    app.model_picker_nav_down();

    let chosen = app.select_model();
    assert_eq!(chosen.as_deref(), Some("gemini-2.5-flash-lite"));
    assert_eq!(app.model, "gemini-2.5-flash-lite");
    assert!(!app.show_model_picker);
}

// =============================================================
// Message selection
// =============================================================

#[test]
fn selection_starts_at_the_latest_message() {
    let mut app = make_app();
    app.input = "one".to_string();
    app.begin_send();
    app.finish_send(Ok("two".to_string()));

    app.select_prev_message();
    assert_eq!(app.selected_message, Some(1));
    app.select_prev_message();
    assert_eq!(app.selected_message, Some(0));
    app.select_prev_message();
    assert_eq!(app.selected_message, Some(0));
    app.select_next_message();
    assert_eq!(app.selected_message, Some(1));
}

// =============================================================
// Input box
// =============================================================

#[test]
fn example_prompt_fills_only_an_empty_transcript() {
    let mut app = make_app();
    app.insert_example_prompt(0);
    assert_eq!(app.input, EXAMPLE_PROMPTS[0]);
    assert_eq!(app.input_cursor, EXAMPLE_PROMPTS[0].chars().count());

    // No-op once the conversation has started.
    app.input = "typed".to_string();
    app.messages.push(ChatMessage {
        text: "hi".to_string(),
        sender: Sender::User,
        timestamp: String::new(),
    });
    app.insert_example_prompt(1);
    assert_eq!(app.input, "typed");
}

#[test]
fn display_lines_wrap_and_honor_newlines() {
    let mut app = make_app();
    app.input = "abcde".to_string();
    assert_eq!(app.input_display_lines(3), vec!["abc", "de"]);

    app.input = "ab\ncd".to_string();
    assert_eq!(app.input_display_lines(80), vec!["ab", "cd"]);

    app.input.clear();
    assert_eq!(app.input_display_lines(80), vec![""]);
}

#[test]
fn cursor_position_follows_wrapping() {
    let mut app = make_app();
    app.input = "abcd".to_string();
    app.input_cursor = 4;
    assert_eq!(app.input_cursor_position(3), (1, 1));

    app.input = "ab\ncd".to_string();
    app.input_cursor = 3; // just after the newline
    assert_eq!(app.input_cursor_position(80), (1, 0));
}

#[test]
fn input_height_grows_with_content_and_clamps() {
    let mut app = make_app();
    assert_eq!(app.input_height(80), 1);

    app.input = "a\nb\nc".to_string();
    assert_eq!(app.input_height(80), 3);

    app.input = vec!["x"; 20].join("\n");
    assert_eq!(app.input_height(80), INPUT_MAX_ROWS);
}
