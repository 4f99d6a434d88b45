use anyhow::Result;

use chatai::app::App;
use chatai::config::Config;
use chatai::relay::RelayClient;
use chatai::{handler, tui, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let relay = RelayClient::new(config.server_url());
    let mut app = App::new(relay, config.model().to_string());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        app.poll_send().await;
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event),
            None => break,
        }
    }

    tui::restore()?;
    Ok(())
}
