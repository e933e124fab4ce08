use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::current_conditions::CURRENT_CONDITIONS_HEIGHT;
use super::hourly_strip::HOURLY_STRIP_HEIGHT;
use super::{
    AirQualityPanel, AirQualityPanelProps, Component, CurrentConditions, CurrentConditionsProps,
    DailyList, DailyListProps, HourlyStrip, HourlyStripProps, Palette,
};
use crate::action::Action;
use crate::model::WeatherResponse;
use crate::state::{AppState, CURRENT_LOCATION};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main weather screen
#[derive(Default)]
pub struct WeatherDisplay;

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherFetch),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('l') => Some(Action::LocationFetch),
                KeyCode::Char('t') => Some(Action::UiToggleTheme),
                KeyCode::Char('c') => Some(Action::UiClearError),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let palette = Palette::for_theme(state.theme);
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        match &state.weather {
            DataResource::Failed(error) => render_error(frame, chunks[0], error, palette),
            DataResource::Loaded(weather) => render_ready(frame, chunks[0], state, weather, palette),
            DataResource::Loading => render_loading(frame, chunks[0], state, palette),
            DataResource::Empty => render_empty(frame, chunks[0], palette),
        }

        render_notice(frame, chunks[1], state, palette);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("l", "location"),
                    StatusBarHint::new("t", "theme"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    weather: &WeatherResponse,
    palette: Palette,
) {
    let chunks = Layout::vertical([
        Constraint::Max(CURRENT_CONDITIONS_HEIGHT),
        Constraint::Length(HOURLY_STRIP_HEIGHT),
        Constraint::Min(4),
    ])
    .split(area);

    CurrentConditions.render(
        frame,
        chunks[0],
        CurrentConditionsProps {
            location_name: state.location_name().unwrap_or(CURRENT_LOCATION),
            weather,
            palette,
        },
    );

    let hourly = weather.hourly_rows();
    HourlyStrip.render(
        frame,
        chunks[1],
        HourlyStripProps {
            rows: &hourly,
            palette,
        },
    );

    let bottom = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let days = weather.upcoming_days();
    DailyList.render(
        frame,
        bottom[0],
        DailyListProps {
            rows: &days,
            palette,
        },
    );

    AirQualityPanel.render(
        frame,
        bottom[1],
        AirQualityPanelProps {
            air_quality: state.air_quality.as_ref(),
            palette,
        },
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    if let Some(name) = state.location_name() {
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    name.to_string(),
                    Style::default().fg(palette.fg).bold(),
                ))
                .centered(),
            ),
            chunks[0],
        );
    }

    let msg = Line::from(vec![
        Span::styled(state.spinner_frame(), Style::default().fg(palette.accent)),
        Span::styled(" Loading...", Style::default().fg(palette.muted)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(msg), chunks[1]);
}

fn render_empty(frame: &mut Frame, area: Rect, palette: Palette) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(palette.muted)),
        Span::styled("/", Style::default().fg(palette.accent).bold()),
        Span::styled(" to search for a city or ", Style::default().fg(palette.muted)),
        Span::styled("l", Style::default().fg(palette.accent).bold()),
        Span::styled(" to use your location", Style::default().fg(palette.muted)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str, palette: Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled("Error", Style::default().fg(palette.error).bold())])
                .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(palette.error),
            )])
            .centered(),
        ),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.muted)),
                Span::styled("/", Style::default().fg(palette.accent).bold()),
                Span::styled(" to search or ", Style::default().fg(palette.muted)),
                Span::styled("c", Style::default().fg(palette.accent).bold()),
                Span::styled(" to dismiss", Style::default().fg(palette.muted)),
            ])
            .centered(),
        ),
        chunks[5],
    );
}

fn render_notice(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let line = match (&state.notice, state.is_refreshing) {
        (Some(notice), _) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(palette.accent),
        )),
        (None, true) => Line::from(vec![
            Span::styled(state.spinner_frame(), Style::default().fg(palette.accent)),
            Span::styled(" Refreshing...", Style::default().fg(palette.muted)),
        ]),
        (None, false) => return,
    };
    frame.render_widget(Paragraph::new(line.centered()), area);
}
