//! Customer data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    Contract, CustomerRecord, Gender, InternetAddon, InternetService, MultipleLines,
    PaymentMethod, YesNo,
};
use crate::tui::styles::ChurnTheme;

// Option labels, in the same order as each enum's ALL table.
const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];
const MULTIPLE_LINES_OPTIONS: &[&str] = &["Yes", "No", "No phone service"];
const INTERNET_OPTIONS: &[&str] = &["DSL", "Fiber optic", "No"];
const ADDON_OPTIONS: &[&str] = &["Yes", "No", "No internet service"];
const CONTRACT_OPTIONS: &[&str] = &["Month-to-month", "One year", "Two year"];
const PAYMENT_OPTIONS: &[&str] = &[
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

// Positions of the two free-text numeric fields.
const IDX_TENURE: usize = 4;
const IDX_MONTHLY: usize = 17;

/// Form field input variant.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Free-text numeric entry
    Text(String),
    /// Selection from a closed option set
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn text(label: &'static str, hint: &'static str, value: &str) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Text(value.to_string()),
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str], selected: usize) -> Self {
        Self {
            label,
            hint: "",
            input: FieldInput::Choice { options, selected },
        }
    }
}

/// Customer form state
pub struct CustomerFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for CustomerFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::choice("Gender", GENDER_OPTIONS, 0),
                FormField::choice("Senior Citizen", YES_NO_OPTIONS, 1),
                FormField::choice("Has Partner", YES_NO_OPTIONS, 0),
                FormField::choice("Has Dependents", YES_NO_OPTIONS, 0),
                FormField::text("Tenure", "months (0-100)", "12"),
                FormField::choice("Phone Service", YES_NO_OPTIONS, 0),
                FormField::choice("Multiple Lines", MULTIPLE_LINES_OPTIONS, 1),
                FormField::choice("Internet Service", INTERNET_OPTIONS, 0),
                FormField::choice("Online Security", ADDON_OPTIONS, 0),
                FormField::choice("Online Backup", ADDON_OPTIONS, 0),
                FormField::choice("Device Protection", ADDON_OPTIONS, 1),
                FormField::choice("Tech Support", ADDON_OPTIONS, 1),
                FormField::choice("Streaming TV", ADDON_OPTIONS, 1),
                FormField::choice("Streaming Movies", ADDON_OPTIONS, 1),
                FormField::choice("Contract", CONTRACT_OPTIONS, 0),
                FormField::choice("Paperless Billing", YES_NO_OPTIONS, 0),
                FormField::choice("Payment Method", PAYMENT_OPTIONS, 0),
                FormField::text("Monthly Charges", "$ (0-1000)", "50.0"),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl CustomerFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (text fields only)
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Text(value) = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character (text fields only)
    pub fn delete_char(&mut self) {
        if let FieldInput::Text(value) = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current text field
    pub fn clear_field(&mut self) {
        if let FieldInput::Text(value) = &mut self.fields[self.selected_field].input {
            value.clear();
        }
    }

    /// Cycle the current choice field forward
    pub fn cycle_next(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Cycle the current choice field backward
    pub fn cycle_prev(&mut self) {
        if let FieldInput::Choice { options, selected } = &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + options.len() - 1) % options.len();
            self.error_message = None;
        }
    }

    fn choice_index(&self, idx: usize) -> usize {
        match &self.fields[idx].input {
            FieldInput::Choice { selected, .. } => *selected,
            FieldInput::Text(_) => 0,
        }
    }

    fn parse_number(&self, idx: usize) -> Result<f64, String> {
        match &self.fields[idx].input {
            FieldInput::Text(value) => value
                .parse()
                .map_err(|_| format!("{}: Invalid number", self.fields[idx].label)),
            FieldInput::Choice { .. } => Err(format!("{}: Not a number", self.fields[idx].label)),
        }
    }

    /// Current derived total charges, if both numeric fields parse.
    #[must_use]
    pub fn derived_total_preview(&self) -> Option<(u32, f64, f64)> {
        let tenure = self.parse_number(IDX_TENURE).ok()?;
        let monthly = self.parse_number(IDX_MONTHLY).ok()?;
        if tenure < 0.0 || tenure.fract() != 0.0 {
            return None;
        }
        let tenure = tenure as u32;
        Some((tenure, monthly, monthly * f64::from(tenure)))
    }

    /// Convert the form contents to a CustomerRecord.
    ///
    /// Total charges is derived here from monthly charges and tenure; the
    /// record carries no independently-entered total.
    pub fn to_customer_record(&self) -> Result<CustomerRecord, String> {
        let tenure = self.parse_number(IDX_TENURE)?;
        if tenure < 0.0 || tenure.fract() != 0.0 {
            return Err("Tenure: Must be a whole number of months".to_string());
        }
        let monthly_charges = self.parse_number(IDX_MONTHLY)?;

        let mut record = CustomerRecord {
            gender: Gender::ALL[self.choice_index(0)],
            senior_citizen: YesNo::ALL[self.choice_index(1)],
            partner: YesNo::ALL[self.choice_index(2)],
            dependents: YesNo::ALL[self.choice_index(3)],
            tenure: tenure as u32,
            phone_service: YesNo::ALL[self.choice_index(5)],
            multiple_lines: MultipleLines::ALL[self.choice_index(6)],
            internet_service: InternetService::ALL[self.choice_index(7)],
            online_security: InternetAddon::ALL[self.choice_index(8)],
            online_backup: InternetAddon::ALL[self.choice_index(9)],
            device_protection: InternetAddon::ALL[self.choice_index(10)],
            tech_support: InternetAddon::ALL[self.choice_index(11)],
            streaming_tv: InternetAddon::ALL[self.choice_index(12)],
            streaming_movies: InternetAddon::ALL[self.choice_index(13)],
            contract: Contract::ALL[self.choice_index(14)],
            paperless_billing: YesNo::ALL[self.choice_index(15)],
            payment_method: PaymentMethod::ALL[self.choice_index(16)],
            monthly_charges,
            total_charges: 0.0,
        };
        record.recompute_total();

        Ok(record)
    }

    /// Load sample data (the service's reference customer).
    pub fn load_sample_data(&mut self) {
        let sample: &[(usize, &str)] = &[
            (0, "Male"),
            (1, "No"),   // senior citizen
            (2, "Yes"),  // partner
            (3, "No"),   // dependents
            (5, "Yes"),  // phone service
            (6, "No"),   // multiple lines
            (7, "DSL"),
            (8, "Yes"),  // online security
            (9, "Yes"),  // online backup
            (10, "No"),  // device protection
            (11, "No"),  // tech support
            (12, "No"),  // streaming tv
            (13, "No"),  // streaming movies
            (14, "One year"),
            (15, "No"),  // paperless billing
            (16, "Credit card (automatic)"),
        ];

        for &(idx, label) in sample {
            if let FieldInput::Choice { options, selected } = &mut self.fields[idx].input {
                if let Some(pos) = options.iter().position(|&o| o == label) {
                    *selected = pos;
                }
            }
        }
        self.fields[IDX_TENURE].input = FieldInput::Text("12".to_string());
        self.fields[IDX_MONTHLY].input = FieldInput::Text("45.0".to_string());
        self.error_message = None;
    }
}

/// Render the customer data input form
pub fn render_form(f: &mut Frame, area: Rect, state: &CustomerFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Derived total + footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ChurnTheme::text()),
        Span::styled("Customer Data Entry", ChurnTheme::title()),
        Span::styled(" │ Demographics, Services, Billing", ChurnTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &CustomerFormState) {
    // Create a two-column layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ChurnTheme::border_focused()
        } else {
            ChurnTheme::border()
        };

        let title_style = if is_selected {
            ChurnTheme::focused()
        } else {
            ChurnTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match &field.input {
            FieldInput::Text(value) => {
                let value_display = if value.is_empty() {
                    Span::styled(field.hint, ChurnTheme::text_muted())
                } else {
                    Span::styled(value.as_str(), ChurnTheme::text())
                };
                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", ChurnTheme::focused())
                    } else {
                        Span::raw("")
                    },
                ])
            }
            FieldInput::Choice { options, selected } => Line::from(vec![
                Span::raw(" "),
                if is_selected {
                    Span::styled("◂ ", ChurnTheme::key_hint())
                } else {
                    Span::raw("  ")
                },
                Span::styled(options[*selected], ChurnTheme::text()),
                if is_selected {
                    Span::styled(" ▸", ChurnTheme::key_hint())
                } else {
                    Span::raw("")
                },
            ]),
        };

        f.render_widget(Paragraph::new(content).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &CustomerFormState) {
    let derived = match state.derived_total_preview() {
        Some((tenure, monthly, total)) => Line::from(vec![
            Span::styled("Total charges (auto): ", ChurnTheme::text_secondary()),
            Span::styled(format!("${total:.2}"), ChurnTheme::text()),
            Span::styled(
                format!("  = ${monthly:.2} × {tenure} months"),
                ChurnTheme::text_muted(),
            ),
        ]),
        None => Line::from(Span::styled(
            "Total charges (auto): enter tenure and monthly charges",
            ChurnTheme::text_muted(),
        )),
    };

    let hints = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ChurnTheme::danger()),
            Span::styled(err.clone(), ChurnTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ChurnTheme::key_hint()),
            Span::styled("Navigate ", ChurnTheme::key_desc()),
            Span::styled("[◂▸] ", ChurnTheme::key_hint()),
            Span::styled("Change ", ChurnTheme::key_desc()),
            Span::styled("[Enter] ", ChurnTheme::key_hint()),
            Span::styled("Predict ", ChurnTheme::key_desc()),
            Span::styled("[S] ", ChurnTheme::key_hint()),
            Span::styled("Sample ", ChurnTheme::key_desc()),
            Span::styled("[Esc] ", ChurnTheme::key_hint()),
            Span::styled("Cancel", ChurnTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(vec![derived, hints]).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_tables_match_enum_order() {
        assert_eq!(Gender::ALL.map(|v| v.as_str()).as_slice(), GENDER_OPTIONS);
        assert_eq!(YesNo::ALL.map(|v| v.as_str()).as_slice(), YES_NO_OPTIONS);
        assert_eq!(
            MultipleLines::ALL.map(|v| v.as_str()).as_slice(),
            MULTIPLE_LINES_OPTIONS
        );
        assert_eq!(
            InternetService::ALL.map(|v| v.as_str()).as_slice(),
            INTERNET_OPTIONS
        );
        assert_eq!(InternetAddon::ALL.map(|v| v.as_str()).as_slice(), ADDON_OPTIONS);
        assert_eq!(Contract::ALL.map(|v| v.as_str()).as_slice(), CONTRACT_OPTIONS);
        assert_eq!(PaymentMethod::ALL.map(|v| v.as_str()).as_slice(), PAYMENT_OPTIONS);
    }

    #[test]
    fn test_sample_data_produces_reference_customer() {
        let mut form = CustomerFormState::default();
        form.load_sample_data();

        let record = form.to_customer_record().expect("Should convert");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.senior_citizen, YesNo::No);
        assert_eq!(record.partner, YesNo::Yes);
        assert_eq!(record.dependents, YesNo::No);
        assert_eq!(record.tenure, 12);
        assert_eq!(record.internet_service, InternetService::Dsl);
        assert_eq!(record.contract, Contract::OneYear);
        assert_eq!(record.payment_method, PaymentMethod::CreditCard);
        assert!((record.monthly_charges - 45.0).abs() < f64::EPSILON);
        assert!((record.total_charges - 540.0).abs() < f64::EPSILON);
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_total_is_recomputed_from_inputs() {
        let mut form = CustomerFormState::default();
        form.load_sample_data();
        form.fields[IDX_TENURE].input = FieldInput::Text("7".to_string());
        form.fields[IDX_MONTHLY].input = FieldInput::Text("19.99".to_string());

        let record = form.to_customer_record().expect("Should convert");
        assert!((record.total_charges - 19.99 * 7.0).abs() < f64::EPSILON);

        let (tenure, monthly, total) = form.derived_total_preview().expect("Should preview");
        assert_eq!(tenure, 7);
        assert!((monthly - 19.99).abs() < f64::EPSILON);
        assert!((total - record.total_charges).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let mut form = CustomerFormState::default();
        form.fields[IDX_TENURE].input = FieldInput::Text("12.5".to_string());
        assert!(form.to_customer_record().is_err());

        form.fields[IDX_TENURE].input = FieldInput::Text("abc".to_string());
        let err = form.to_customer_record().unwrap_err();
        assert!(err.contains("Invalid number"));
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut form = CustomerFormState::default();
        form.selected_field = 0; // gender, 2 options
        assert_eq!(form.choice_index(0), 0);
        form.cycle_next();
        assert_eq!(form.choice_index(0), 1);
        form.cycle_next();
        assert_eq!(form.choice_index(0), 0);
        form.cycle_prev();
        assert_eq!(form.choice_index(0), 1);
    }
}
