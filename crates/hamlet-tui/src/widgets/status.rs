//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::Theme;

/// What the status line reports about the current view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub seed: u64,
    /// Failed attempts since the viewer started
    pub failures: u32,
    pub streets: usize,
    pub standing: usize,
    pub placed: usize,
    /// Set when the last generation gave up
    pub error: Option<String>,
}

/// Widget for rendering the two status lines
pub struct StatusWidget<'a> {
    info: &'a StatusInfo,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(info: &'a StatusInfo, theme: &'a Theme) -> Self {
        Self { info, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let info = self.info;
        let accent = Style::default().fg(self.theme.accent);

        let mut first = vec![
            Span::raw("Seed: "),
            Span::styled(info.seed.to_string(), accent),
            Span::raw("  Streets: "),
            Span::styled(info.streets.to_string(), accent),
            Span::raw("  Buildings: "),
            Span::styled(format!("{}/{}", info.standing, info.placed), accent),
            Span::raw("  Failures: "),
            Span::styled(info.failures.to_string(), accent),
        ];
        if let Some(err) = &info.error {
            first.push(Span::raw("  "));
            first.push(Span::styled(err.clone(), Style::default().fg(self.theme.bad)));
        }

        let help = Line::styled(
            "n/space next  p prev  r regenerate  s sketch  c palette  q quit",
            Style::default().fg(self.theme.text_dim),
        );

        Paragraph::new(vec![Line::from(first), help])
            .style(Style::default().fg(self.theme.text))
            .render(area, buf);
    }
}
