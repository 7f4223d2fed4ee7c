use crate::backend::WallBackend;
use crate::draft::StagedPhoto;
use crate::feed::FeedView;
use crate::ui;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use wall_db::listener::ChangeFeed;

pub type Result<T, E = TuiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, whichever way the event loop exits.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Runs the view until the user quits. The change feed lives exactly as long
/// as the view: dropping it on return tears the listener connection down.
pub async fn run(
    mut view: FeedView,
    backend: Arc<dyn WallBackend>,
    mut changes: ChangeFeed,
) -> Result<()> {
    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut events = EventStream::new();
    let mut prompt: Option<String> = None;

    view.load(backend.as_ref()).await;

    loop {
        terminal.draw(|frame| ui::draw(frame, &view, prompt.as_deref()))?;

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else { break };
                if let Event::Key(key) = event? {
                    if matches!(
                        handle_key(&mut view, &mut prompt, backend.as_ref(), key).await,
                        Flow::Quit
                    ) {
                        break;
                    }
                }
            }
            change = changes.next() => {
                match change {
                    Ok(change) => debug!(?change, "Wall changed, re-fetching"),
                    // The listener reconnects on the next recv; re-fetch so
                    // anything missed while disconnected still shows up.
                    Err(error) => warn!(%error, "Change feed error"),
                }
                view.refresh(backend.as_ref()).await;
            }
        }
    }

    Ok(())
}

async fn handle_key(
    view: &mut FeedView,
    prompt: &mut Option<String>,
    backend: &dyn WallBackend,
    key: KeyEvent,
) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    // The alert blocks everything else until dismissed.
    if view.alert().is_some() {
        view.dismiss_alert();
        return Flow::Continue;
    }

    if prompt.is_some() {
        handle_prompt_key(view, prompt, key).await;
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Enter => view.share(backend).await,
        KeyCode::Backspace => view.pop_char(),
        KeyCode::Up => view.scroll_up(),
        KeyCode::Down => view.scroll_down(),
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            *prompt = Some(String::new());
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view.push_char(c);
        }
        _ => {}
    }

    Flow::Continue
}

async fn handle_prompt_key(view: &mut FeedView, prompt: &mut Option<String>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => *prompt = None,
        KeyCode::Backspace => {
            if let Some(path) = prompt.as_mut() {
                path.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(path) = prompt.as_mut() {
                path.push(c);
            }
        }
        KeyCode::Enter => {
            let Some(entered) = prompt.take() else { return };
            match StagedPhoto::read_from(Path::new(&entered)).await {
                Ok(photo) => view.stage_photo(photo),
                Err(error) => view.raise_alert(format!("Error reading photo {entered}: {error}")),
            }
        }
        _ => {}
    }
}
