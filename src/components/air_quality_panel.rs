use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::{Component, Palette};
use crate::action::Action;
use crate::format::format_reading;
use crate::model::CurrentAirQuality;

pub struct AirQualityPanel;

pub struct AirQualityPanelProps<'a> {
    pub air_quality: Option<&'a CurrentAirQuality>,
    pub palette: Palette,
}

impl Component<Action> for AirQualityPanel {
    type Props<'a> = AirQualityPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" Air quality ")
            .border_style(Style::default().fg(palette.muted));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(aq) = props.air_quality else {
            let waiting = Line::from(Span::styled(
                " Waiting for air quality...",
                Style::default().fg(palette.muted),
            ));
            frame.render_widget(Paragraph::new(waiting), inner);
            return;
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Index + status
            Constraint::Length(1), // Gauge
            Constraint::Min(1),    // Pollutants
        ])
        .split(inner);

        let level = aq.level();
        let header = Line::from(vec![
            Span::styled(" AQI ", Style::default().fg(palette.muted)),
            Span::styled(
                aq.us_aqi.to_string(),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                level.label(),
                Style::default()
                    .fg(level.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(level.color()).bg(palette.panel))
            .ratio(aq.gauge_ratio())
            .label("");
        frame.render_widget(gauge, chunks[1]);

        let reading = |label: &'static str, value: f64| {
            vec![
                Span::styled(format!(" {label:<6}"), Style::default().fg(palette.muted)),
                Span::styled(
                    format!("{:>7}", format_reading(value)),
                    Style::default().fg(palette.fg),
                ),
            ]
        };
        let pair = |left: (&'static str, f64), right: (&'static str, f64)| {
            let mut spans = reading(left.0, left.1);
            spans.push(Span::raw("   "));
            spans.extend(reading(right.0, right.1));
            Line::from(spans)
        };
        let lines = vec![
            pair(("PM2.5", aq.pm2_5), ("PM10", aq.pm10)),
            pair(("SO₂", aq.so2), ("NO₂", aq.no2)),
            pair(("O₃", aq.o3), ("CO", aq.co)),
        ];
        frame.render_widget(Paragraph::new(lines), chunks[2]);
    }
}
