//! Pure rendering: map App state to ratatui widget trees.
//!
//! `render()` draws the shared frame (title, content, status, help) and
//! dispatches the content area on the current view. Widget-building
//! functions are pure (state in, widgets out); the only effects are
//! `Frame::render_widget()` and the terminal cursor placed in the focused
//! form field.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::types::TargetRecord;

use super::form::{Field, TextField};
use super::state::{App, ViewState};
use super::status::Severity;
use super::theme::{self, Theme};

/// Width of the label column in the form, colon included.
const LABEL_WIDTH: usize = 12;

/// Columns before a field's value starts: indent, label, gap.
const VALUE_OFFSET: u16 = 2 + LABEL_WIDTH as u16 + 1;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole UI for the current state.
pub fn render(app: &App, theme: &Theme, frame: &mut Frame) {
    let area = frame.area();

    if let Some(error) = &app.load_error {
        render_load_error(&error.to_string(), theme, frame, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(2), // title + gap
        Constraint::Min(0),    // content
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app.view, theme), chunks[0]);

    let content = chunks[1];
    match app.view {
        ViewState::ListTargets => render_list(app, theme, frame, content),
        ViewState::CreateTarget | ViewState::EditTarget => render_form(app, theme, frame, content),
        ViewState::ConfirmDelete => {
            render_list(app, theme, frame, content);
            render_confirm_delete(app.targets.selected(), theme, frame, content);
        }
    }

    if let Some(message) = app.status.current() {
        let status = Paragraph::new(Span::styled(
            message.text.as_str(),
            theme.status(message.severity),
        ));
        frame.render_widget(status, chunks[2]);
    }

    frame.render_widget(render_help(help_entries(app.view), theme), chunks[3]);
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(view: ViewState, theme: &Theme) -> Paragraph<'static> {
    let title = match view {
        ViewState::ListTargets => "SSH Connection Manager",
        ViewState::CreateTarget => "Add SSH Connection",
        ViewState::EditTarget => "Edit SSH Connection",
        ViewState::ConfirmDelete => "Delete SSH Connection",
    };
    Paragraph::new(Span::styled(title, theme.title()))
}

/// Key bindings shown in the help line, derived from the view alone.
pub fn help_entries(view: ViewState) -> &'static [(&'static str, &'static str)] {
    match view {
        ViewState::ListTargets => &[
            ("↑/k", "up"),
            ("↓/j", "down"),
            ("enter", "connect"),
            ("c", "create"),
            ("e", "edit"),
            ("d", "delete"),
            ("q", "quit"),
        ],
        ViewState::CreateTarget | ViewState::EditTarget => &[
            ("tab", "next field"),
            ("shift+tab", "previous field"),
            ("enter", "next field / save"),
            ("esc", "back"),
        ],
        ViewState::ConfirmDelete => &[("y", "confirm"), ("n/esc", "cancel")],
    }
}

fn render_help(entries: &[(&'static str, &'static str)], theme: &Theme) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 3);
    for (i, (key, description)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.help()));
        }
        spans.push(Span::styled(*key, theme.key_hint()));
        spans.push(Span::styled(format!(" {}", description), theme.help()));
    }
    Paragraph::new(Line::from(spans))
}

// ============================================================================
// VIEW: LOAD ERROR
// ============================================================================

fn render_load_error(message: &str, theme: &Theme, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Error: Failed to load configuration - {}", message),
            theme.error_text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("q", theme::STYLE_IMPORTANT),
            Span::raw(" or "),
            Span::styled("Ctrl+C", theme::STYLE_IMPORTANT),
            Span::raw(" to exit."),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// VIEW: TARGET LIST
// ============================================================================

fn render_list(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    if app.targets.is_empty() {
        let mut lines = vec![
            Line::from(Span::styled("No SSH connections configured yet.", theme.text())),
            Line::from(Span::styled(
                format!("Config file location: {}", app.location),
                theme.text(),
            )),
        ];
        if let Some(legacy) = &app.legacy_location {
            lines.push(Line::from(Span::styled(
                format!("Found {} from an earlier version; it is not read.", legacy),
                theme.status(Severity::Warning),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press 'c' to create a new connection, or 'q' / Ctrl+C to quit.",
            theme.help(),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        return;
    }

    let cursor = app.targets.cursor();
    let lines: Vec<Line> = app
        .targets
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, target)| {
            if i == cursor {
                Line::from(vec![
                    Span::styled("→ ", theme.cursor()),
                    Span::styled(target.to_string(), theme.cursor()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(target.to_string(), theme.text()),
                ])
            }
        })
        .collect();

    // Keep the cursor row inside the visible area
    let visible_height = area.height as usize;
    let scroll_offset = if visible_height > 0 && cursor >= visible_height {
        cursor - visible_height + 1
    } else {
        0
    };

    let list = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(list, area);
}

// ============================================================================
// VIEW: CREATE / EDIT FORM
// ============================================================================

fn render_form(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    if app.view == ViewState::EditTarget {
        let subtitle = app.editing().map(TargetRecord::to_string).unwrap_or_default();
        lines.push(Line::from(Span::styled(subtitle, theme.subtitle())));
        lines.push(Line::from(""));
    }
    let first_field_row = lines.len() as u16;

    let form = &app.form;
    for field in Field::ALL {
        let input = form.field(field);
        let focused = input.is_focused();
        let label = format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH);

        let label_style = if focused {
            theme.active_field()
        } else {
            theme.label()
        };
        let value = if input.value().is_empty() {
            Span::styled(input.placeholder().to_string(), theme::STYLE_DIM)
        } else if focused {
            Span::styled(input.value().to_string(), theme.active_field())
        } else {
            Span::styled(input.value().to_string(), theme.text())
        };

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(label, label_style),
            Span::raw(" "),
            value,
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);

    let focused = form.field(form.focused());
    let x = area.x + VALUE_OFFSET + focused.cursor() as u16;
    let y = area.y + first_field_row + form.focus_index() as u16;
    if x < area.right() && y < area.bottom() {
        frame.set_cursor_position((x, y));
    }
}

// ============================================================================
// VIEW: CONFIRM DELETE
// ============================================================================

fn render_confirm_delete(target: Option<&TargetRecord>, theme: &Theme, frame: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(56, 7, area);

    let description = target.map(TargetRecord::to_string).unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this connection?",
            theme.text(),
        )),
        Line::from(""),
        Line::from(Span::styled(description, theme.subtitle())),
    ];

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.dialog_border())
        .padding(Padding::new(1, 1, 1, 0));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        dialog_area,
    );
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::tui::form::TextEdit;
    use crate::types::Config;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(60, 20)).unwrap()
    }

    fn draw(app: &App) -> (Terminal<TestBackend>, String) {
        let mut terminal = make_terminal();
        let theme = Theme::default();
        terminal.draw(|frame| render(app, &theme, frame)).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .clone()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect();
        (terminal, content)
    }

    fn sample_app() -> App {
        App::new(
            Config::with_targets(vec![
                TargetRecord::new("alice", "example.com", 22).with_nickname("web"),
                TargetRecord::new("bob", "db.internal", 2222),
            ]),
            "/home/u/.config/akumi/config.toml",
        )
    }

    #[test]
    fn empty_list_shows_hint_and_location() {
        let app = App::new(Config::default(), "/cfg/akumi.toml");
        let (_, content) = draw(&app);
        assert!(content.contains("SSH Connection Manager"));
        assert!(content.contains("No SSH connections configured yet."));
        assert!(content.contains("/cfg/akumi.toml"));
    }

    #[test]
    fn empty_list_warns_about_legacy_config() {
        let mut app = App::new(Config::default(), "/cfg/c.toml");
        let (_, content) = draw(&app);
        assert!(!content.contains("earlier version"));

        app.legacy_location = Some("/cfg/c.yaml".to_string());
        let (_, content) = draw(&app);
        assert!(content.contains("/cfg/c.yaml"));
        assert!(content.contains("earlier version"));
    }

    #[test]
    fn list_marks_cursor_row() {
        let mut app = sample_app();
        app.targets.set_cursor(1);
        let (_, content) = draw(&app);
        assert!(content.contains("[web] alice@example.com"));
        assert!(content.contains("→ bob@db.internal:2222"));
    }

    #[test]
    fn list_scrolls_to_keep_cursor_visible() {
        let targets = (0..40)
            .map(|i| TargetRecord::new("u", format!("host{:02}", i), 22))
            .collect();
        let mut app = App::new(Config::with_targets(targets), "x");
        app.targets.set_cursor(39);
        let (_, content) = draw(&app);
        assert!(content.contains("host39"));
        assert!(!content.contains("host00"));
    }

    #[test]
    fn create_form_shows_labels_and_placeholders() {
        let mut app = sample_app();
        app.view = ViewState::CreateTarget;
        let (_, content) = draw(&app);
        assert!(content.contains("Add SSH Connection"));
        assert!(content.contains("Username:"));
        assert!(content.contains("Nickname:"));
        assert!(content.contains("Port (default 22)"));
    }

    #[test]
    fn form_cursor_follows_focused_field() {
        let mut app = sample_app();
        app.view = ViewState::CreateTarget;
        app.form.focus(1);
        for c in "abc".chars() {
            app.form.handle_edit(TextEdit::Insert(c));
        }
        let (mut terminal, content) = draw(&app);
        assert!(content.contains("abc"));

        // title(2) + no subtitle, second field row
        let position = terminal.get_cursor_position().unwrap();
        assert_eq!(position.x, VALUE_OFFSET + 3);
        assert_eq!(position.y, 2 + 1);
    }

    #[test]
    fn edit_form_shows_target_being_edited() {
        let mut app = sample_app();
        app.form.set_from_record(&TargetRecord::new("bob", "db.internal", 2222));
        app.form.bind_edit_index(1);
        app.view = ViewState::EditTarget;
        let (_, content) = draw(&app);
        assert!(content.contains("Edit SSH Connection"));
        assert!(content.contains("bob@db.internal:2222"));
        assert!(content.contains("2222"));
    }

    #[test]
    fn confirm_dialog_names_selected_target() {
        let mut app = sample_app();
        app.view = ViewState::ConfirmDelete;
        let (_, content) = draw(&app);
        assert!(content.contains("Are you sure you want to delete this connection?"));
        assert!(content.contains("[web] alice@example.com"));
        assert!(!content.contains("alice@example.com:22"));
    }

    #[test]
    fn status_message_is_rendered() {
        let mut app = sample_app();
        app.status.success("Connection updated successfully");
        let (_, content) = draw(&app);
        assert!(content.contains("Connection updated successfully"));
    }

    #[test]
    fn load_error_screen_replaces_ui() {
        let app = App::failed(StoreError::NoConfigDir, "nowhere");
        let (_, content) = draw(&app);
        assert!(content.contains("Failed to load configuration"));
        assert!(content.contains("to exit."));
        assert!(!content.contains("SSH Connection Manager"));
    }

    #[test]
    fn help_entries_depend_on_view() {
        let list: Vec<&str> = help_entries(ViewState::ListTargets).iter().map(|(k, _)| *k).collect();
        assert!(list.contains(&"c"));
        assert!(list.contains(&"q"));

        assert_eq!(
            help_entries(ViewState::CreateTarget),
            help_entries(ViewState::EditTarget)
        );
        assert!(help_entries(ViewState::CreateTarget).iter().any(|(k, _)| *k == "esc"));
        assert_eq!(help_entries(ViewState::ConfirmDelete).len(), 2);
    }

    #[test]
    fn centered_rect_fits_inside_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(56, 7, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 4));

        let rect = centered_rect(10, 2, Rect::new(0, 0, 20, 10));
        assert_eq!(rect, Rect::new(5, 4, 10, 2));
    }
}
