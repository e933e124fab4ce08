use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, Palette};
use crate::action::Action;
use crate::format::{format_iso_to_day, format_temp, weather_icon};
use crate::model::DailyRow;

/// Upcoming days, one per line: weekday, icon, high / low.
pub struct DailyList;

pub struct DailyListProps<'a> {
    pub rows: &'a [DailyRow],
    pub palette: Palette,
}

impl Component<Action> for DailyList {
    type Props<'a> = DailyListProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" Next days ")
            .border_style(Style::default().fg(palette.muted));

        let lines: Vec<Line> = props
            .rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<10}", format_iso_to_day(&row.date)),
                        Style::default().fg(palette.fg),
                    ),
                    // Daily rows carry no day/night flag
                    Span::raw(weather_icon(row.weather_code, true).glyph()),
                    Span::styled(
                        format!(
                            "  {:>4} / {}",
                            format_temp(row.max_temp),
                            format_temp(row.min_temp)
                        ),
                        Style::default().fg(palette.fg),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
