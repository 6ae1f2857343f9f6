use crate::application::{App, AppMode, Field, ResultPanel};
use crate::domain::Evaluation;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_subject_count(f, app, chunks[1]);
    render_body(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "marksheet - Marks Calculator | Subjects: {} | Max per subject: {}",
        app.rows.len(),
        app.evaluator.per_subject_max()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_subject_count(f: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.mode, AppMode::Setup);
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };

    let field = Paragraph::new(format!("{}{}", app.subject_count_input, cursor))
        .block(Block::default().borders(Borders::ALL).title("Number of subjects"))
        .style(style);
    f.render_widget(field, area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    if !app.form_visible {
        let hint = Paragraph::new("Enter the number of subjects and press Enter to create the form.")
            .block(Block::default().borders(Borders::ALL).title("Marks"))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, area);
        return;
    }

    match &app.result {
        Some(panel) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            render_form(f, app, columns[0]);
            render_result(f, panel, columns[1]);
        }
        None => render_form(f, app, area),
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    // Two border lines and the header row.
    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let first_row = (app.focused_row + 1).saturating_sub(visible_rows);
    let editing = matches!(app.mode, AppMode::Form);
    let mark_hint = format!("Marks (0-{})", app.evaluator.per_subject_max());

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Subject"),
        Cell::from(mark_hint.clone()),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows = app
        .rows
        .iter()
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .map(|(index, row)| {
            let focus = |field: Field| editing && index == app.focused_row && app.focused_field == field;
            let cell = |value: &str, field: Field| {
                if focus(field) {
                    Cell::from(format!("{}_", value))
                        .style(Style::default().bg(Color::Blue).fg(Color::White))
                } else if value.is_empty() && field == Field::Mark {
                    Cell::from(mark_hint.clone()).style(Style::default().fg(Color::DarkGray))
                } else {
                    Cell::from(value.to_string())
                }
            };

            Row::new(vec![
                Cell::from(format!("{}", index + 1)).style(Style::default().fg(Color::Yellow)),
                cell(&row.name, Field::Name),
                cell(&row.mark, Field::Mark),
            ])
            .height(1)
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Marks"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn result_lines(evaluation: &Evaluation) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total: ", bold),
            Span::raw(format!("{} / {}", evaluation.total(), evaluation.max_total())),
        ]),
        Line::from(vec![
            Span::styled("Percentage: ", bold),
            Span::raw(format!("{}%", evaluation.percentage_display())),
        ]),
        Line::from(vec![
            Span::styled("Grade: ", bold),
            Span::styled(
                evaluation.grade().to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Breakdown:", bold)),
    ];
    lines.extend(
        evaluation
            .breakdown()
            .iter()
            .map(|entry| Line::from(format!("  {}: {}", entry.name(), entry.mark()))),
    );
    lines
}

fn render_result(f: &mut Frame, panel: &ResultPanel, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    let widget = match panel {
        ResultPanel::Evaluated(evaluation) => Paragraph::new(result_lines(evaluation)),
        ResultPanel::Error(message) => {
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red))
        }
    };
    f.render_widget(widget.block(block).wrap(Wrap { trim: false }), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Setup | AppMode::Form if app.status_message.is_some() => {
            app.status_message.clone().unwrap_or_default()
        }
        AppMode::Setup => {
            "Enter: create form | Tab: go to marks | Ctrl+L: import CSV | Ctrl+R: reset | F1: help | Ctrl+Q: quit".to_string()
        }
        AppMode::Form => {
            "Enter: calculate | Tab/arrows: move | Esc: subject count | Ctrl+E: export | Ctrl+Y: copy | Ctrl+R: reset | F1: help".to_string()
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/F1: close help".to_string(),
        AppMode::Export => format!("Export result as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::Import => format!("Import marks from: {} (Enter to import, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Setup | AppMode::Form => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Export => Style::default().fg(Color::Magenta),
            AppMode::Import => Style::default().fg(Color::Green),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("marksheet Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"MARKSHEET - MARKS CALCULATOR

=== FILLING IN THE FORM ===
1. Type the number of subjects and press Enter
2. Each subject gets a row named "Subject 1", "Subject 2", ...
3. Type a mark between 0 and the maximum for every subject
4. Press Enter to calculate

=== VALIDATION ===
Every mark must be a number from 0 to the maximum (100 by default).
If any mark is empty, not a number, negative or too high, no total is
computed and a single error message is shown.
A blank subject name is shown as its position, e.g. "Subject 2".

=== GRADES ===
90% and above   A+
80% and above   A
70% and above   B
60% and above   C
50% and above   D
below 50%       F

=== KEYS: NUMBER OF SUBJECTS ===
0-9 / Backspace Edit the count
Enter           Create the subject rows
Tab / Down      Move into the marks

=== KEYS: MARKS ===
Tab / Shift+Tab Next / previous field
Up / Down       Previous / next subject
Left / Right    Subject name / mark field
Enter           Calculate total, percentage and grade
Esc             Back to the number of subjects

=== EVERYWHERE ===
Ctrl+R          Reset the form
Ctrl+E          Export the result (.json for JSON, otherwise CSV)
Ctrl+L          Import marks from a CSV with a subject,mark header
Ctrl+Y          Copy the result summary to the clipboard
F1              Show this help (scroll with ↑↓, PgUp/PgDn, Home)
Ctrl+Q / Ctrl+C Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window"#;
