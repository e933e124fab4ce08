use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, Palette};
use crate::action::Action;
use crate::format::{format_iso_to_hour, format_temp, weather_icon};
use crate::model::HourlyRow;

/// Width of one hour cell, including spacing.
const CELL_WIDTH: u16 = 7;

/// Border + hour + icon + temperature.
pub const HOURLY_STRIP_HEIGHT: u16 = 5;

/// Horizontal strip of hourly cells; shows as many as fit.
pub struct HourlyStrip;

pub struct HourlyStripProps<'a> {
    pub rows: &'a [HourlyRow],
    pub palette: Palette,
}

impl Component<Action> for HourlyStrip {
    type Props<'a> = HourlyStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" Hourly ")
            .border_style(Style::default().fg(props.palette.muted));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = usize::from(inner.width / CELL_WIDTH).min(props.rows.len());
        if visible == 0 {
            return;
        }

        let columns = Layout::horizontal(vec![Constraint::Length(CELL_WIDTH); visible]).split(inner);
        for (row, column) in props.rows.iter().zip(columns.iter()) {
            let lines = vec![
                Line::from(Span::styled(
                    format_iso_to_hour(&row.time),
                    Style::default().fg(props.palette.muted),
                ))
                .centered(),
                Line::from(weather_icon(row.weather_code, row.is_day).glyph()).centered(),
                Line::from(Span::styled(
                    format_temp(row.temperature),
                    Style::default().fg(props.palette.fg),
                ))
                .centered(),
            ];
            frame.render_widget(Paragraph::new(lines), *column);
        }
    }
}
