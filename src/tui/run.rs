//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! The loop is single-threaded. It polls crossterm with a timeout equal to
//! the time left on the live status message, so nothing else reads stdin
//! while `ssh` owns the terminal. A connection runs in three phases:
//! leave raw mode and the alternate screen, run the launcher to
//! completion, then re-enter and repaint.

use std::io;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::{Error, Result};
use crate::launcher::ProcessLauncher;
use crate::store::ConfigStore;
use crate::types::TargetRecord;

use super::form::TextEdit;
use super::state::{Action, App, AppEvent, Effect, Transition, ViewState};
use super::status::{STATUS_TTL, StatusChannel};
use super::theme::Theme;
use super::update::{handle_background_event, update};
use super::view::render;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action for the given view.
///
/// The same key means different things per view: `q` quits the list but
/// is a character in the form. Returns None for keys with no meaning.
pub fn map_key(key: KeyEvent, view: ViewState) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::ForceQuit);
    }

    match view {
        ViewState::ListTargets => map_list_key(key),
        ViewState::CreateTarget | ViewState::EditTarget => map_form_key(key),
        ViewState::ConfirmDelete => map_confirm_key(key),
    }
}

fn map_list_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Char('c') => Some(Action::Create),
        KeyCode::Char('e') => Some(Action::Edit),
        KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn map_form_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let edit = match key.code {
        KeyCode::Esc => return Some(Action::Back),
        KeyCode::Tab | KeyCode::Down => return Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => return Some(Action::PrevField),
        KeyCode::Enter => return Some(Action::Enter),

        KeyCode::Backspace if ctrl || alt => TextEdit::DeleteWord,
        KeyCode::Backspace => TextEdit::Backspace,
        KeyCode::Delete => TextEdit::Delete,
        KeyCode::Left => TextEdit::Left,
        KeyCode::Right => TextEdit::Right,
        KeyCode::Home => TextEdit::Home,
        KeyCode::End => TextEdit::End,

        // Readline-style shortcuts
        KeyCode::Char('w') if ctrl => TextEdit::DeleteWord,
        KeyCode::Char('u') if ctrl => TextEdit::Clear,
        KeyCode::Char('a') if ctrl => TextEdit::Home,
        KeyCode::Char('e') if ctrl => TextEdit::End,

        KeyCode::Char(c) if !ctrl && !alt => TextEdit::Insert(c),
        _ => return None,
    };
    Some(Action::Text(edit))
}

fn map_confirm_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Deny),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Re-enter TUI mode after a suspension and force a full repaint.
fn resume_terminal(terminal: &mut Tui) -> io::Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    terminal.clear()
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// STATUS TIMER
// ============================================================================

/// Tracks the deadline of the live status message.
///
/// The loop calls `observe` before waiting; a new generation restarts the
/// clock. When the deadline passes, `take_due` yields the generation to
/// expire exactly once.
#[derive(Debug, Default)]
struct StatusTimer {
    seen: u64,
    deadline: Option<(u64, Instant)>,
}

impl StatusTimer {
    fn observe(&mut self, status: &StatusChannel, now: Instant) {
        let current = status.generation();
        if current == self.seen {
            return;
        }
        self.seen = current;
        self.deadline = status.current().map(|_| (current, now + STATUS_TTL));
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|(_, at)| at.saturating_duration_since(now))
    }

    fn take_due(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some((stamp, at)) if now >= at => {
                self.deadline = None;
                Some(stamp)
            }
            _ => None,
        }
    }
}

/// Wait for the next event, or for the status deadline.
///
/// Returns None for terminal events we do not care about.
fn next_event(timer: &mut StatusTimer) -> io::Result<Option<AppEvent>> {
    let now = Instant::now();
    if let Some(stamp) = timer.take_due(now) {
        return Ok(Some(AppEvent::StatusTimeout(stamp)));
    }

    if let Some(wait) = timer.remaining(now) {
        if !event::poll(wait)? {
            return Ok(None);
        }
    }

    let event = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    };
    Ok(event)
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// Loads the target list from `store`, takes over the terminal, and
/// returns it in its original state. A load failure is shown on screen
/// and then returned as `Error::Load` once the user quits.
pub fn run<S: ConfigStore, L: ProcessLauncher>(mut store: S, mut launcher: L) -> Result<()> {
    let mut app = App::load(&store);
    let theme = Theme::from_config(&app.theme);
    log::info!("targets loaded from {}", app.location);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &theme, &mut store, &mut launcher);
    restore_terminal()?;
    outcome?;

    match app.load_error.take() {
        Some(e) => Err(Error::Load(e)),
        None => Ok(()),
    }
}

fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    theme: &Theme,
    store: &mut dyn ConfigStore,
    launcher: &mut dyn ProcessLauncher,
) -> io::Result<()> {
    let mut timer = StatusTimer::default();

    loop {
        terminal.draw(|frame| render(app, theme, frame))?;

        if app.should_quit {
            break;
        }

        timer.observe(&app.status, Instant::now());
        let Some(event) = next_event(&mut timer)? else {
            continue;
        };

        match event {
            AppEvent::Key(key) => {
                let Some(action) = map_key(key, app.view) else {
                    continue;
                };
                match update(app, &action, store) {
                    Transition::Stay => {}
                    Transition::Quit => app.should_quit = true,
                    Transition::Effect(effect) => {
                        handle_effect(effect, app, theme, terminal, launcher)?;
                    }
                }
            }
            background_event => handle_background_event(app, background_event),
        }
    }

    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a transition.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    theme: &Theme,
    terminal: &mut Tui,
    launcher: &mut dyn ProcessLauncher,
) -> io::Result<()> {
    match effect {
        Effect::Connect(target) => {
            // Show "Connecting to ..." before handing the terminal over
            terminal.draw(|frame| render(app, theme, frame))?;

            restore_terminal()?;
            let closed = connect(launcher, &target);
            resume_terminal(terminal)?;

            handle_background_event(app, closed);
        }
    }
    Ok(())
}

/// Run one connection to completion and report how it ended.
fn connect(launcher: &mut dyn ProcessLauncher, target: &TargetRecord) -> AppEvent {
    log::info!("connecting to {}", target);
    AppEvent::ConnectionClosed(launcher.connect(target))
}

// ============================================================================
// TESTS
// ============================================================================
