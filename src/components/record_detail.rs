use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{format_name, Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::PokemonRecord;

pub struct RecordDetailProps<'a> {
    pub record: Option<&'a PokemonRecord>,
}

/// Read-only card for the selected record
#[derive(Default)]
pub struct RecordDetail;

impl Component<Action> for RecordDetail {
    type Props<'a> = RecordDetailProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let paragraph = Paragraph::new(detail_text(props.record))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn detail_text(record: Option<&PokemonRecord>) -> Text<'static> {
    let Some(record) = record else {
        return Text::from(Line::styled(
            "Nothing selected",
            Style::default().fg(TEXT_DIM),
        ));
    };

    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(ACCENT_TEAL);
    let types = record.types();
    let types = if types.is_empty() {
        "-".to_string()
    } else {
        types.join(" / ")
    };

    Text::from(vec![
        Line::from(vec![
            Span::styled(
                format_name(&record.name),
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{:03}", record.id), label),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Types   ", label),
            Span::styled(types, value),
        ]),
        Line::from(vec![
            Span::styled("Height  ", label),
            Span::styled(decimetres(record.height()), value),
        ]),
        Line::from(vec![
            Span::styled("Weight  ", label),
            Span::styled(hectograms(record.weight()), value),
        ]),
        Line::from(vec![
            Span::styled("Base XP ", label),
            Span::styled(optional(record.base_experience()), value),
        ]),
        Line::default(),
        Line::styled(
            format!("{} more fields from the API", record.extra.len()),
            label,
        ),
    ])
}

fn decimetres(value: Option<u64>) -> String {
    value
        .map(|dm| format!("{:.1} m", dm as f64 / 10.0))
        .unwrap_or_else(|| "-".to_string())
}

fn hectograms(value: Option<u64>) -> String {
    value
        .map(|hg| format!("{:.1} kg", hg as f64 / 10.0))
        .unwrap_or_else(|| "-".to_string())
}

fn optional(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
