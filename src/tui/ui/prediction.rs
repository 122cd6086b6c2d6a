//! Prediction view: in-flight progress and the final result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{Assessment, RiskTier};
use crate::tui::styles::ChurnTheme;

/// Prediction state
#[derive(Debug, Clone, Default)]
pub enum PredictionState {
    /// Not started
    #[default]
    Idle,
    /// Request in flight
    Waiting { progress: f64 },
    /// Completed with result
    Complete { assessment: Box<Assessment> },
    /// Error occurred
    Error { message: String },
}

/// Render the prediction view
pub fn render_prediction(f: &mut Frame, area: Rect, state: &PredictionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_content(f, chunks[1], state);
    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ChurnTheme::text()),
        Span::styled("Churn Prediction", ChurnTheme::title()),
        Span::styled(" │ Remote Inference", ChurnTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_content(f: &mut Frame, area: Rect, state: &PredictionState) {
    match state {
        PredictionState::Idle => render_idle(f, area),
        PredictionState::Waiting { progress } => render_progress(f, area, *progress),
        PredictionState::Complete { assessment } => render_result(f, area, assessment),
        PredictionState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ready to predict churn risk",
            ChurnTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter customer data to begin",
            ChurnTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage_text = Paragraph::new(Line::from(vec![
        Span::styled("Stage: ", ChurnTheme::text_secondary()),
        Span::styled("Contacting service", ChurnTheme::focused()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ChurnTheme::border()),
        )
        .gauge_style(ChurnTheme::info())
        .percent((progress * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        "Analyzing customer data...",
        ChurnTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk tier
            Constraint::Length(4), // Probability gauge
            Constraint::Length(2), // Prediction label
            Constraint::Min(0),    // Risk factors
        ])
        .margin(1)
        .split(inner);

    // Risk tier (big display)
    let tier = assessment.risk_tier;
    let tier_style = ChurnTheme::risk_tier(tier);
    let tier_icon = match tier {
        RiskTier::Low => "OK",
        RiskTier::Medium | RiskTier::High => "!",
    };

    let tier_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{tier_icon} {tier} RISK"),
            tier_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tier.description(),
            ChurnTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(tier_display, chunks[0]);

    // Probability bar
    let probability = assessment.result.probability.clamp(0.0, 1.0);
    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Churn Probability ", ChurnTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(ChurnTheme::border()),
        )
        .gauge_style(tier_style)
        .percent((probability * 100.0) as u16)
        .label(format!("{:.1}%", probability * 100.0));
    f.render_widget(prob_gauge, chunks[1]);

    // Model label
    let label = Paragraph::new(Line::from(vec![
        Span::styled("Model prediction: ", ChurnTheme::text_secondary()),
        Span::styled(assessment.result.prediction.clone(), ChurnTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[2]);

    render_risk_factors(f, chunks[3], assessment);
}

fn render_risk_factors(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Key Risk Indicators ", ChurnTheme::text_secondary()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border());

    let factors = assessment.customer.risk_factors();
    let lines: Vec<Line> = if factors.is_empty() {
        vec![Line::from(Span::styled(
            " No major risk factors identified",
            ChurnTheme::success(),
        ))]
    } else {
        factors
            .iter()
            .map(|factor| {
                Line::from(vec![
                    Span::styled(" • ", ChurnTheme::warning()),
                    Span::styled(*factor, ChurnTheme::text()),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Prediction Failed", ChurnTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ChurnTheme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "Session state is unchanged; you can retry.",
            ChurnTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ChurnTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &PredictionState) {
    let content = match state {
        PredictionState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", ChurnTheme::key_hint()),
            Span::styled("Back to Dashboard ", ChurnTheme::key_desc()),
            Span::styled("[N] ", ChurnTheme::key_hint()),
            Span::styled("New Prediction ", ChurnTheme::key_desc()),
            Span::styled("[E] ", ChurnTheme::key_hint()),
            Span::styled("Export CSV", ChurnTheme::key_desc()),
        ]),
        PredictionState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", ChurnTheme::key_hint()),
            Span::styled("Retry ", ChurnTheme::key_desc()),
            Span::styled("[Esc] ", ChurnTheme::key_hint()),
            Span::styled("Cancel", ChurnTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Waiting for the prediction service...",
            ChurnTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(footer, area);
}
