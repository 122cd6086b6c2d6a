//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::RiskTier;
use crate::tui::styles::ChurnTheme;

/// Outcome of the most recent readiness probe.
#[derive(Debug, Clone)]
pub enum ServiceStatus {
    /// No probe run yet this session
    Unknown,
    Healthy,
    Unhealthy(String),
}

/// Dashboard state for rendering.
pub struct DashboardState {
    pub service_url: String,
    pub service_status: ServiceStatus,
    pub predictions_count: u64,
    pub last_probability: Option<f64>,
    pub last_tier: Option<RiskTier>,
    /// One-line feedback from the last dashboard action (export, probe).
    pub notice: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            service_status: ServiceStatus::Unknown,
            predictions_count: 0,
            last_probability: None,
            last_tier: None,
            notice: None,
        }
    }
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ChurnTheme::text()),
        Span::styled("Churnscope", ChurnTheme::title()),
        Span::styled(" │ ", ChurnTheme::text_muted()),
        Span::styled("Customer Churn Prediction", ChurnTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Status panels
            Constraint::Percentage(60), // Session stats
        ])
        .split(area);

    render_status_panels(f, chunks[0], state);
    render_session_stats(f, chunks[1], state);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Service status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let (status_icon, status_text, status_style) = match &state.service_status {
        ServiceStatus::Unknown => ("?", "not checked".to_string(), ChurnTheme::text_muted()),
        ServiceStatus::Healthy => ("OK", "reachable".to_string(), ChurnTheme::success()),
        ServiceStatus::Unhealthy(reason) => ("FAIL", reason.clone(), ChurnTheme::danger()),
    };

    let status_items = vec![
        Line::from(vec![
            Span::styled(format!("  {status_icon} "), status_style),
            Span::styled("Prediction Service: ", ChurnTheme::text()),
            Span::styled(status_text, ChurnTheme::text_secondary()),
        ]),
        Line::from(vec![
            Span::styled("  Endpoint: ", ChurnTheme::text_secondary()),
            Span::styled(state.service_url.clone(), ChurnTheme::text_muted()),
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" Service Status ", ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border());

    f.render_widget(Paragraph::new(status_items).block(status_block), chunks[0]);

    // Quick Actions
    let mut actions = vec![
        Line::from(vec![
            Span::styled("[N] ", ChurnTheme::key_hint()),
            Span::styled("New Prediction", ChurnTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[H] ", ChurnTheme::key_hint()),
            Span::styled("Health Check", ChurnTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[E] ", ChurnTheme::key_hint()),
            Span::styled("Export Last Result", ChurnTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", ChurnTheme::key_hint()),
            Span::styled("Quit", ChurnTheme::key_desc()),
        ]),
    ];

    if let Some(notice) = &state.notice {
        actions.push(Line::from(""));
        actions.push(Line::from(Span::styled(
            notice.clone(),
            ChurnTheme::info(),
        )));
    }

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border());

    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[1]);
}

fn render_session_stats(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(" Session Stats ", ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border());

    if state.predictions_count == 0 {
        let empty_msg = Paragraph::new(Line::from(Span::styled(
            "No predictions yet. Press [N] to start.",
            ChurnTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    let mut lines = vec![Line::from(vec![
        Span::styled("Predictions made: ", ChurnTheme::text_secondary()),
        Span::styled(state.predictions_count.to_string(), ChurnTheme::text()),
    ])];

    if let Some(tier) = state.last_tier {
        lines.push(Line::from(vec![
            Span::styled("Last risk tier: ", ChurnTheme::text_secondary()),
            Span::styled(tier.to_string(), ChurnTheme::risk_tier(tier)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(probability) = state.last_probability {
        let probability = probability.clamp(0.0, 1.0);
        let gauge_style = match state.last_tier {
            Some(tier) => ChurnTheme::risk_tier(tier),
            None => ChurnTheme::info(),
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(" Last Probability ", ChurnTheme::text_secondary()))
                    .borders(Borders::ALL)
                    .border_style(ChurnTheme::border()),
            )
            .gauge_style(gauge_style)
            .percent((probability * 100.0) as u16)
            .label(format!("{:.1}%", probability * 100.0));
        f.render_widget(gauge, chunks[1]);
    }
}
