use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, Palette};
use crate::action::Action;
use crate::format::{format_temp, weather_description, weather_icon};
use crate::model::WeatherResponse;

/// Rows needed by the full layout; the temperature figure shrinks first.
pub const CURRENT_CONDITIONS_HEIGHT: u16 = 10;

pub struct CurrentConditions;

pub struct CurrentConditionsProps<'a> {
    pub location_name: &'a str,
    pub weather: &'a WeatherResponse,
    pub palette: Palette,
}

impl Component<Action> for CurrentConditions {
    type Props<'a> = CurrentConditionsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let CurrentConditionsProps {
            location_name,
            weather,
            palette,
        } = props;
        let current = &weather.current;

        let chunks = Layout::vertical([
            Constraint::Length(1), // Location
            Constraint::Max(6),    // Temperature figure
            Constraint::Length(1), // Icon + description
            Constraint::Length(1), // High / low
            Constraint::Length(1), // Details
        ])
        .flex(Flex::Center)
        .split(area);

        let title = Line::from(Span::styled(
            location_name.to_string(),
            Style::default()
                .fg(palette.fg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let temp_text = format_temp(current.temperature);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(current.temperature));
        frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[1]);

        let icon = weather_icon(current.weather_code, current.is_daytime());
        let desc = Line::from(vec![
            Span::raw(icon.glyph()),
            Span::raw("  "),
            Span::styled(
                weather_description(current.weather_code),
                Style::default().fg(palette.fg),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(desc), chunks[2]);

        if let Some((max, min)) = weather.today_high_low() {
            let high_low = Line::from(Span::styled(
                format!("H:{} L:{}", format_temp(max), format_temp(min)),
                Style::default().fg(palette.fg),
            ))
            .centered();
            frame.render_widget(Paragraph::new(high_low), chunks[3]);
        }

        let details = Line::from(Span::styled(
            format!(
                "Feels like {} · Humidity {}% · Wind {:.0} km/h",
                format_temp(current.feels_like),
                current.humidity,
                current.wind_speed
            ),
            Style::default().fg(palette.muted),
        ))
        .centered();
        frame.render_widget(Paragraph::new(details), chunks[4]);
    }
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
