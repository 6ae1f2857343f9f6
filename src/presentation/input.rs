use crate::application::{App, AppMode, Field};
use crate::infrastructure::{FileRepository, copy_to_clipboard};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            Self::handle_control_key(app, key);
            return;
        }

        match app.mode {
            AppMode::Setup => Self::handle_setup_mode(app, key),
            AppMode::Form => Self::handle_form_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Export | AppMode::Import => Self::handle_filename_input_mode(app, key),
        }
    }

    /// Form-wide shortcuts. They are ignored while a prompt or the help
    /// popup is open.
    fn handle_control_key(app: &mut App, key: KeyCode) {
        if matches!(app.mode, AppMode::Export | AppMode::Import | AppMode::Help) {
            return;
        }
        match key {
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('e') => app.start_export(),
            KeyCode::Char('l') => app.start_import(),
            KeyCode::Char('y') => match app.clipboard_summary() {
                Ok(summary) => app.set_copy_result(copy_to_clipboard(&summary)),
                Err(err) => app.status_message = Some(err.to_string()),
            },
            _ => {}
        }
    }

    fn handle_setup_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;
        match key {
            KeyCode::Enter => app.set_subjects(),
            KeyCode::Tab | KeyCode::Down => app.enter_form(),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Char(c) if c.is_ascii_digit() => app.insert_char(c),
            KeyCode::F(1) => app.open_help(),
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;
        match key {
            KeyCode::Enter => app.calculate(),
            KeyCode::Tab => app.focus_next(),
            KeyCode::BackTab => app.focus_previous(),
            KeyCode::Up => app.focus_up(),
            KeyCode::Down => app.focus_down(),
            KeyCode::Left => app.focus_field(Field::Name),
            KeyCode::Right => app.focus_field(Field::Mark),
            KeyCode::Esc => app.leave_form(),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Char(c) => app.insert_char(c),
            KeyCode::F(1) => app.open_help(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.prompt_filename();
                let mode = app.mode;
                match mode {
                    AppMode::Export => {
                        let result = match app.evaluation() {
                            Some(evaluation) => FileRepository::export_evaluation(evaluation, &filename)
                                .map_err(|e| e.to_string()),
                            None => Err("no result to export".to_string()),
                        };
                        app.set_export_result(result);
                    }
                    AppMode::Import => {
                        let result = FileRepository::import_entries(&filename);
                        app.set_import_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }
}
