//! State transitions: (App, Action) → Transition.
//!
//! This is the core logic of the TUI. Each view defines which actions it
//! accepts; anything else is a no-op. Persistence happens here, through
//! the injected store, and is best-effort: a failed save is reported on
//! the status line but the in-memory change is kept, so the next
//! successful save writes whatever the list holds at that point.

use crate::store::ConfigStore;

use super::state::{Action, App, AppEvent, Effect, Transition, ViewState};
use super::targets::Direction;

/// Apply one action to the app.
pub fn update(app: &mut App, action: &Action, store: &mut dyn ConfigStore) -> Transition {
    if *action == Action::ForceQuit {
        return Transition::Quit;
    }

    // A failed load leaves nothing to act on
    if app.load_error.is_some() {
        return match action {
            Action::Quit => Transition::Quit,
            _ => Transition::Stay,
        };
    }

    match app.view {
        ViewState::ListTargets => update_list(app, action),
        ViewState::CreateTarget | ViewState::EditTarget => update_form(app, action, store),
        ViewState::ConfirmDelete => update_confirm_delete(app, action, store),
    }
}

/// Apply an event that did not come from a key press.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::StatusTimeout(generation) => app.status.expire(generation),
        AppEvent::ConnectionClosed(Ok(())) => {
            log::info!("ssh session ended");
            app.status.info("SSH connection closed");
        }
        AppEvent::ConnectionClosed(Err(e)) => {
            log::warn!("ssh session failed: {}", e);
            app.status.error(format!("SSH connection failed: {}", e));
        }
        AppEvent::Key(_) | AppEvent::Resize => {}
    }
}

// ============================================================================
// PER-VIEW HANDLERS
// ============================================================================

/// List: navigation, connect, and entry into the other views.
fn update_list(app: &mut App, action: &Action) -> Transition {
    match action {
        Action::Quit => return Transition::Quit,
        Action::MoveUp => app.targets.move_cursor(Direction::Backward),
        Action::MoveDown => app.targets.move_cursor(Direction::Forward),
        Action::Enter => {
            if let Some(target) = app.targets.selected().cloned() {
                app.status.info(format!("Connecting to {}...", target));
                return Transition::Effect(Effect::Connect(target));
            }
        }
        Action::Create => {
            app.form.reset();
            app.view = ViewState::CreateTarget;
        }
        Action::Edit => {
            if let Some(target) = app.targets.selected().cloned() {
                app.form.reset();
                app.form.set_from_record(&target);
                app.form.bind_edit_index(app.targets.cursor());
                app.view = ViewState::EditTarget;
            }
        }
        Action::Delete => {
            if !app.targets.is_empty() {
                app.view = ViewState::ConfirmDelete;
            }
        }
        _ => {}
    }
    Transition::Stay
}

/// Create/Edit: field focus, text entry, finalize on the last field.
fn update_form(app: &mut App, action: &Action, store: &mut dyn ConfigStore) -> Transition {
    match action {
        Action::Back => close_form(app),
        Action::NextField => app.form.advance(Direction::Forward),
        Action::PrevField => app.form.advance(Direction::Backward),
        Action::Enter => {
            if app.form.is_last_field_focused() {
                finalize_form(app, store);
            } else {
                app.form.advance(Direction::Forward);
            }
        }
        Action::Text(edit) => {
            app.form.handle_edit(*edit);
        }
        _ => {}
    }
    Transition::Stay
}

/// ConfirmDelete: yes removes the selected target, no goes back.
fn update_confirm_delete(
    app: &mut App,
    action: &Action,
    store: &mut dyn ConfigStore,
) -> Transition {
    match action {
        Action::Confirm => {
            let index = app.targets.cursor();
            match app.targets.remove_at(index) {
                Ok(removed) => {
                    log::info!("deleted target {}", removed);
                    if persist(app, store) {
                        app.status.success("Connection deleted successfully");
                    } else {
                        app.status.error("Error deleting connection");
                    }
                }
                Err(e) => log::warn!("delete ignored: {}", e),
            }
            app.view = ViewState::ListTargets;
        }
        Action::Deny | Action::Back => app.view = ViewState::ListTargets,
        _ => {}
    }
    Transition::Stay
}

// ============================================================================
// FINALIZE
// ============================================================================

/// Validate the form and commit it into the list, then persist.
///
/// Validation failures keep the user in the form. Once the list has been
/// changed the view always returns to the list, whatever the save does.
fn finalize_form(app: &mut App, store: &mut dyn ConfigStore) {
    let target = match app.form.parse() {
        Ok(target) => target,
        Err(e) => {
            log::debug!("form rejected: {}", e);
            app.status.error(e.to_string());
            return;
        }
    };

    let (cursor, message) = match app.view {
        ViewState::EditTarget => {
            let index = app.form.edit_index().unwrap_or(app.targets.len());
            if let Err(e) = app.targets.replace_at(index, target) {
                log::error!("edit finalize failed: {}", e);
                close_form(app);
                app.status.error("Edit operation failed: target not found");
                return;
            }
            (index, "Connection updated successfully")
        }
        _ => {
            app.targets.append(target);
            (app.targets.len() - 1, "New connection created successfully")
        }
    };

    app.targets.set_cursor(cursor);
    close_form(app);

    if persist(app, store) {
        app.status.success(message);
    } else {
        app.status.error("Error saving configuration");
    }
}

fn close_form(app: &mut App) {
    app.form.reset();
    app.view = ViewState::ListTargets;
}

/// One save attempt. Returns false on failure; nothing is rolled back.
fn persist(app: &App, store: &mut dyn ConfigStore) -> bool {
    match store.save(&app.snapshot()) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{}", e);
            false
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
