//! Interactive terminal front-end
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use tokio::runtime::Handle;

use crate::client::SearchClient;
use crate::config::Settings;
use crate::controller::SearchController;
use crate::session::SearchSession;
use terminal::TerminalManager;

/// Run the interactive TUI until the user quits.
///
/// `runtime` executes the service requests; the event loop itself stays on
/// the calling thread.
pub fn run_interactive(settings: &Settings, runtime: Handle) -> Result<()> {
    let client = SearchClient::new(&settings.host, settings.timeout())?;
    let session = SearchSession::new(client.host(), settings.page_size());
    let controller = SearchController::new(session, settings.indices.clone());
    let mut app = App::new(controller, client, runtime);

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
