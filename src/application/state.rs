//! Form state for the marks calculator.
//!
//! [`App`] is the single owner of everything the terminal form shows: the
//! subject-count field, the subject rows, which field has focus, whether the
//! form and result panels are visible, and the transient status line.

use std::fmt;

use tracing::{info, warn};

use super::errors::FormError;
use crate::domain::{Evaluation, GradeEvaluator, SubjectEntry, placeholder_name};

/// Largest number of subject rows the form will create.
pub const MAX_SUBJECTS: usize = 100;

/// Subject count the form starts with and returns to on reset.
pub const DEFAULT_SUBJECT_COUNT: usize = 3;

const DEFAULT_EXPORT_FILENAME: &str = "marks.csv";
const DEFAULT_IMPORT_FILENAME: &str = "marks.csv";

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the number-of-subjects field
    Setup,
    /// Moving between and typing into subject rows
    Form,
    /// Help screen is displayed
    Help,
    /// Prompting for a report filename
    Export,
    /// Prompting for a marks CSV to load into the form
    Import,
}

/// The two inputs of a subject row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Mark,
}

/// One editable row of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    pub name: String,
    pub mark: String,
}

impl SubjectRow {
    /// A fresh row for position `index`, named `Subject {index + 1}`.
    pub fn new(index: usize) -> Self {
        Self {
            name: placeholder_name(index),
            mark: String::new(),
        }
    }

    pub fn to_entry(&self) -> SubjectEntry {
        SubjectEntry::new(self.name.clone(), self.mark.clone())
    }
}

/// What the result area currently shows. No panel means the area is hidden.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Evaluated(Evaluation),
    Error(String),
}

/// Parses the number-of-subjects field.
///
/// # Examples
///
/// ```
/// use marksheet::application::{parse_subject_count, FormError};
///
/// assert_eq!(parse_subject_count(" 4 "), Ok(4));
/// assert_eq!(parse_subject_count("0"), Err(FormError::InvalidSubjectCount));
/// ```
pub fn parse_subject_count(input: &str) -> Result<usize, FormError> {
    let count = input
        .trim()
        .parse::<usize>()
        .map_err(|_| FormError::InvalidSubjectCount)?;
    match count {
        0 => Err(FormError::InvalidSubjectCount),
        n if n > MAX_SUBJECTS => Err(FormError::TooManySubjects),
        n => Ok(n),
    }
}

/// Main application state: the form, its visibility flags and UI state.
///
/// # Examples
///
/// ```
/// use marksheet::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Setup);
/// assert_eq!(app.subject_count_input, "3");
/// assert!(!app.form_visible);
/// ```
#[derive(Debug)]
pub struct App {
    /// Current application mode
    pub mode: AppMode,
    /// Text of the number-of-subjects field
    pub subject_count_input: String,
    /// Subject rows, in display order
    pub rows: Vec<SubjectRow>,
    /// Whether the subject rows are shown
    pub form_visible: bool,
    /// Row holding focus while in form mode
    pub focused_row: usize,
    /// Field holding focus within the focused row
    pub focused_field: Field,
    /// Result area contents, `None` while hidden
    pub result: Option<ResultPanel>,
    /// Evaluator used by `calculate`
    pub evaluator: GradeEvaluator,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Mode to return to when a popup or prompt closes
    previous_mode: AppMode,
}

impl Default for App {
    fn default() -> Self {
        Self::with_evaluator(GradeEvaluator::default())
    }
}

impl App {
    pub fn with_evaluator(evaluator: GradeEvaluator) -> Self {
        Self {
            mode: AppMode::Setup,
            subject_count_input: DEFAULT_SUBJECT_COUNT.to_string(),
            rows: Vec::new(),
            form_visible: false,
            focused_row: 0,
            focused_field: Field::Mark,
            result: None,
            evaluator,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            previous_mode: AppMode::Setup,
        }
    }

    /// Replaces the rows with `Subject 1..N` for the count in the
    /// number-of-subjects field, shows the form and focuses the first mark.
    ///
    /// An invalid count leaves the form untouched and sets a status message.
    pub fn set_subjects(&mut self) {
        let count = match parse_subject_count(&self.subject_count_input) {
            Ok(count) => count,
            Err(err) => {
                warn!(input = %self.subject_count_input, "rejected subject count");
                self.status_message = Some(err.to_string());
                return;
            }
        };

        self.clear_subjects();
        self.rows = (0..count).map(SubjectRow::new).collect();
        self.form_visible = true;
        self.focused_row = 0;
        self.focused_field = Field::Mark;
        self.mode = AppMode::Form;
        self.status_message = None;
        info!(subjects = count, "created subject rows");
    }

    /// Evaluates the form and shows the outcome in the result area.
    pub fn calculate(&mut self) {
        if self.rows.is_empty() {
            self.status_message = Some(FormError::NoSubjects.to_string());
            return;
        }

        let entries = self.entries();
        let panel = match self.evaluator.evaluate(&entries) {
            Ok(evaluation) => {
                info!(
                    total = evaluation.total(),
                    max_total = evaluation.max_total(),
                    percentage = evaluation.percentage(),
                    grade = %evaluation.grade(),
                    "evaluated marks"
                );
                ResultPanel::Evaluated(evaluation)
            }
            Err(err) => {
                warn!(subjects = entries.len(), "marks failed validation");
                ResultPanel::Error(err.to_string())
            }
        };
        self.result = Some(panel);
        self.status_message = None;
    }

    /// Restores the initial form: default count, no rows, nothing shown.
    pub fn reset(&mut self) {
        self.subject_count_input = DEFAULT_SUBJECT_COUNT.to_string();
        self.form_visible = false;
        self.clear_subjects();
        self.mode = AppMode::Setup;
        self.status_message = None;
        info!("form reset");
    }

    fn clear_subjects(&mut self) {
        self.rows.clear();
        self.result = None;
        self.focused_row = 0;
        self.focused_field = Field::Mark;
    }

    /// Current rows as evaluator input.
    pub fn entries(&self) -> Vec<SubjectEntry> {
        self.rows.iter().map(SubjectRow::to_entry).collect()
    }

    /// The successful evaluation currently on screen, if any.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.result {
            Some(ResultPanel::Evaluated(evaluation)) => Some(evaluation),
            _ => None,
        }
    }

    /// Moves focus into the subject rows, if they are shown.
    pub fn enter_form(&mut self) {
        if self.form_visible && !self.rows.is_empty() {
            self.mode = AppMode::Form;
        }
    }

    /// Moves focus back to the number-of-subjects field.
    pub fn leave_form(&mut self) {
        self.mode = AppMode::Setup;
    }

    /// Advances focus name -> mark -> next row's name, wrapping at the end.
    pub fn focus_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        match self.focused_field {
            Field::Name => self.focused_field = Field::Mark,
            Field::Mark => {
                self.focused_field = Field::Name;
                self.focused_row = (self.focused_row + 1) % self.rows.len();
            }
        }
    }

    pub fn focus_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        match self.focused_field {
            Field::Mark => self.focused_field = Field::Name,
            Field::Name => {
                self.focused_field = Field::Mark;
                self.focused_row = self
                    .focused_row
                    .checked_sub(1)
                    .unwrap_or(self.rows.len() - 1);
            }
        }
    }

    pub fn focus_up(&mut self) {
        if self.focused_row > 0 {
            self.focused_row -= 1;
        }
    }

    pub fn focus_down(&mut self) {
        if self.focused_row + 1 < self.rows.len() {
            self.focused_row += 1;
        }
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focused_field = field;
    }

    fn active_input(&mut self) -> Option<&mut String> {
        match self.mode {
            AppMode::Setup => Some(&mut self.subject_count_input),
            AppMode::Form => {
                let row = self.rows.get_mut(self.focused_row)?;
                Some(match self.focused_field {
                    Field::Name => &mut row.name,
                    Field::Mark => &mut row.mark,
                })
            }
            AppMode::Export | AppMode::Import => Some(&mut self.filename_input),
            AppMode::Help => None,
        }
    }

    /// Appends a character to whichever field has focus.
    pub fn insert_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.push(c);
        }
    }

    /// Removes the last character of whichever field has focus.
    pub fn delete_char(&mut self) {
        if let Some(input) = self.active_input() {
            input.pop();
        }
    }

    pub fn open_help(&mut self) {
        if self.mode != AppMode::Help {
            self.previous_mode = self.mode;
        }
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = self.previous_mode;
    }

    /// Switches to export mode to prompt for a filename.
    ///
    /// Only a successful evaluation can be exported.
    pub fn start_export(&mut self) {
        if self.evaluation().is_none() {
            self.status_message = Some(FormError::NoResult("export").to_string());
            return;
        }
        self.start_filename_prompt(AppMode::Export, DEFAULT_EXPORT_FILENAME);
    }

    /// Switches to import mode to prompt for a marks CSV.
    pub fn start_import(&mut self) {
        self.start_filename_prompt(AppMode::Import, DEFAULT_IMPORT_FILENAME);
    }

    fn start_filename_prompt(&mut self, mode: AppMode, default: &str) {
        if !matches!(self.mode, AppMode::Export | AppMode::Import | AppMode::Help) {
            self.previous_mode = self.mode;
        }
        self.mode = mode;
        self.filename_input = default.to_string();
        self.status_message = None;
    }

    /// Cancels filename input and returns to the previous mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = self.previous_mode;
        self.filename_input.clear();
    }

    /// The filename typed at the prompt, falling back to the default.
    pub fn prompt_filename(&self) -> String {
        if self.filename_input.trim().is_empty() {
            match self.mode {
                AppMode::Import => DEFAULT_IMPORT_FILENAME.to_string(),
                _ => DEFAULT_EXPORT_FILENAME.to_string(),
            }
        } else {
            self.filename_input.trim().to_string()
        }
    }

    /// Processes the result of an export operation.
    ///
    /// # Arguments
    ///
    /// * `result` - Written filename, or the error that stopped the export
    pub fn set_export_result<E: fmt::Display>(&mut self, result: Result<String, E>) {
        match result {
            Ok(filename) => {
                info!(file = %filename, "exported result");
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                warn!(%error, "export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.cancel_filename_input();
    }

    /// Processes the result of a marks import.
    ///
    /// On success the imported entries replace the rows, the form is shown
    /// and any previous result is hidden.
    pub fn set_import_result<E: fmt::Display>(&mut self, result: Result<Vec<SubjectEntry>, E>) {
        self.cancel_filename_input();

        let entries = match result {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "import failed");
                self.status_message = Some(format!("Import failed: {}", error));
                return;
            }
        };

        if entries.is_empty() {
            self.status_message = Some(format!("Import failed: {}", FormError::NoSubjects));
            return;
        }
        if entries.len() > MAX_SUBJECTS {
            self.status_message = Some(format!("Import failed: {}", FormError::TooManySubjects));
            return;
        }

        self.clear_subjects();
        self.rows = entries
            .into_iter()
            .map(|entry| SubjectRow {
                name: entry.name,
                mark: entry.raw_mark,
            })
            .collect();
        self.subject_count_input = self.rows.len().to_string();
        self.form_visible = true;
        self.mode = AppMode::Form;
        self.status_message = Some(format!("Imported {} subjects", self.rows.len()));
        info!(subjects = self.rows.len(), "imported marks");
    }

    /// Text to put on the clipboard: the summary of the current result.
    pub fn clipboard_summary(&self) -> Result<String, FormError> {
        self.evaluation()
            .map(ToString::to_string)
            .ok_or(FormError::NoResult("copy"))
    }

    pub fn set_copy_result<E: fmt::Display>(&mut self, result: Result<(), E>) {
        self.status_message = Some(match result {
            Ok(()) => "Result copied to clipboard".to_string(),
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                format!("Copy failed: {}", error)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grade;

    fn app_with_marks(marks: &[&str]) -> App {
        let mut app = App::default();
        app.subject_count_input = marks.len().to_string();
        app.set_subjects();
        for (row, mark) in app.rows.iter_mut().zip(marks) {
            row.mark = mark.to_string();
        }
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Setup);
        assert_eq!(app.subject_count_input, "3");
        assert!(app.rows.is_empty());
        assert!(!app.form_visible);
        assert!(app.result.is_none());
        assert!(app.status_message.is_none());
        assert!(app.filename_input.is_empty());
        assert_eq!(app.evaluator.per_subject_max(), 100.0);
    }

    #[test]
    fn test_parse_subject_count() {
        assert_eq!(parse_subject_count("1"), Ok(1));
        assert_eq!(parse_subject_count(" 12 "), Ok(12));
        assert_eq!(parse_subject_count("100"), Ok(100));
        assert_eq!(parse_subject_count(""), Err(FormError::InvalidSubjectCount));
        assert_eq!(parse_subject_count("-2"), Err(FormError::InvalidSubjectCount));
        assert_eq!(parse_subject_count("two"), Err(FormError::InvalidSubjectCount));
        assert_eq!(parse_subject_count("101"), Err(FormError::TooManySubjects));
    }

    #[test]
    fn test_set_subjects_creates_named_rows() {
        let mut app = App::default();
        app.subject_count_input = "4".to_string();
        app.set_subjects();

        assert_eq!(app.mode, AppMode::Form);
        assert!(app.form_visible);
        assert_eq!(app.rows.len(), 4);
        assert_eq!(app.rows[0].name, "Subject 1");
        assert_eq!(app.rows[3].name, "Subject 4");
        assert!(app.rows.iter().all(|row| row.mark.is_empty()));
        assert_eq!(app.focused_row, 0);
        assert_eq!(app.focused_field, Field::Mark);
    }

    #[test]
    fn test_set_subjects_rejects_invalid_count() {
        let mut app = App::default();
        app.subject_count_input = "0".to_string();
        app.set_subjects();

        assert_eq!(app.mode, AppMode::Setup);
        assert!(!app.form_visible);
        assert!(app.rows.is_empty());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Enter a valid number of subjects (>=1)")
        );
    }

    #[test]
    fn test_set_subjects_replaces_rows_and_hides_result() {
        let mut app = app_with_marks(&["80", "90"]);
        app.calculate();
        assert!(app.result.is_some());

        app.subject_count_input = "1".to_string();
        app.set_subjects();

        assert_eq!(app.rows.len(), 1);
        assert!(app.rows[0].mark.is_empty());
        assert!(app.result.is_none());
    }

    #[test]
    fn test_calculate_without_rows() {
        let mut app = App::default();
        app.calculate();

        assert!(app.result.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Please set number of subjects first.")
        );
    }

    #[test]
    fn test_calculate_success() {
        let mut app = app_with_marks(&["90", "80", "70"]);
        app.calculate();

        let evaluation = app.evaluation().expect("evaluation shown");
        assert_eq!(evaluation.total(), 240.0);
        assert_eq!(evaluation.percentage_display(), "80.00");
        assert_eq!(evaluation.grade(), Grade::A);
    }

    #[test]
    fn test_calculate_invalid_marks_shows_single_error() {
        let mut app = app_with_marks(&["50", "abc"]);
        app.calculate();

        assert!(app.evaluation().is_none());
        assert_eq!(
            app.result,
            Some(ResultPanel::Error(
                "Please enter valid marks (0 to 100) for every subject.".to_string()
            ))
        );
    }

    #[test]
    fn test_calculate_uses_placeholder_for_cleared_name() {
        let mut app = app_with_marks(&["60", "70"]);
        app.rows[1].name.clear();
        app.calculate();

        let names: Vec<&str> = app
            .evaluation()
            .unwrap()
            .breakdown()
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["Subject 1", "Subject 2"]);
    }

    #[test]
    fn test_reset() {
        let mut app = app_with_marks(&["10", "20", "30", "40", "50"]);
        app.calculate();
        app.reset();

        assert_eq!(app.mode, AppMode::Setup);
        assert_eq!(app.subject_count_input, "3");
        assert!(!app.form_visible);
        assert!(app.rows.is_empty());
        assert!(app.result.is_none());
    }

    #[test]
    fn test_focus_navigation_wraps() {
        let mut app = app_with_marks(&["", ""]);
        assert_eq!((app.focused_row, app.focused_field), (0, Field::Mark));

        app.focus_next();
        assert_eq!((app.focused_row, app.focused_field), (1, Field::Name));
        app.focus_next();
        assert_eq!((app.focused_row, app.focused_field), (1, Field::Mark));
        app.focus_next();
        assert_eq!((app.focused_row, app.focused_field), (0, Field::Name));

        app.focus_previous();
        assert_eq!((app.focused_row, app.focused_field), (1, Field::Mark));

        app.focus_down();
        assert_eq!(app.focused_row, 1);
        app.focus_up();
        app.focus_up();
        assert_eq!(app.focused_row, 0);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = app_with_marks(&["", ""]);
        app.insert_char('7');
        app.insert_char('5');
        assert_eq!(app.rows[0].mark, "75");

        app.delete_char();
        assert_eq!(app.rows[0].mark, "7");

        app.focus_field(Field::Name);
        app.delete_char();
        app.insert_char('X');
        assert_eq!(app.rows[0].name, "Subject X");

        app.leave_form();
        app.delete_char();
        app.insert_char('5');
        assert_eq!(app.subject_count_input, "5");
    }

    #[test]
    fn test_help_returns_to_previous_mode() {
        let mut app = app_with_marks(&["1"]);
        app.open_help();
        assert_eq!(app.mode, AppMode::Help);
        app.insert_char('x');
        assert_eq!(app.rows[0].mark, "1");

        app.close_help();
        assert_eq!(app.mode, AppMode::Form);
    }

    #[test]
    fn test_export_requires_result() {
        let mut app = app_with_marks(&["1"]);
        app.start_export();

        assert_eq!(app.mode, AppMode::Form);
        assert!(app.status_message.unwrap().contains("Nothing to export"));
    }

    #[test]
    fn test_export_prompt_and_result() {
        let mut app = app_with_marks(&["88"]);
        app.calculate();
        app.start_export();

        assert_eq!(app.mode, AppMode::Export);
        assert_eq!(app.filename_input, "marks.csv");

        app.filename_input.clear();
        assert_eq!(app.prompt_filename(), "marks.csv");

        app.set_export_result::<String>(Ok("report.json".to_string()));
        assert_eq!(app.mode, AppMode::Form);
        assert!(app.filename_input.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Exported to report.json"));
    }

    #[test]
    fn test_export_failure_message() {
        let mut app = app_with_marks(&["88"]);
        app.calculate();
        app.start_export();
        app.set_export_result::<&str>(Err("Permission denied"));

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Export failed: Permission denied")
        );
    }

    #[test]
    fn test_import_replaces_rows() {
        let mut app = App::default();
        app.start_import();
        assert_eq!(app.mode, AppMode::Import);

        app.set_import_result::<String>(Ok(vec![
            SubjectEntry::new("Maths", "95"),
            SubjectEntry::new("", "85"),
        ]));

        assert_eq!(app.mode, AppMode::Form);
        assert!(app.form_visible);
        assert_eq!(app.subject_count_input, "2");
        assert_eq!(app.rows[0], SubjectRow { name: "Maths".into(), mark: "95".into() });
        assert_eq!(app.status_message.as_deref(), Some("Imported 2 subjects"));

        app.calculate();
        let evaluation = app.evaluation().unwrap();
        assert_eq!(evaluation.breakdown()[1].name(), "Subject 2");
        assert_eq!(evaluation.grade(), Grade::APlus);
    }

    #[test]
    fn test_import_failure_keeps_form() {
        let mut app = app_with_marks(&["40", "41"]);
        app.start_import();
        app.set_import_result::<&str>(Err("No such file"));

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.status_message.as_deref(), Some("Import failed: No such file"));

        app.start_import();
        app.set_import_result::<&str>(Ok(Vec::new()));
        assert_eq!(app.rows.len(), 2);
        assert!(app.status_message.unwrap().contains("set number of subjects"));
    }

    #[test]
    fn test_clipboard_summary() {
        let mut app = app_with_marks(&["100", "100"]);
        assert_eq!(app.clipboard_summary(), Err(FormError::NoResult("copy")));

        app.calculate();
        let summary = app.clipboard_summary().unwrap();
        assert!(summary.contains("Total: 200 / 200"));
        assert!(summary.contains("Grade: A+"));

        app.set_copy_result::<&str>(Ok(()));
        assert_eq!(app.status_message.as_deref(), Some("Result copied to clipboard"));
    }
}
