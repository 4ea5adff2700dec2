use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    highlight_substring, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::{format_name, Component, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::PokemonRecord;

pub struct RecordListProps<'a> {
    pub records: &'a [&'a PokemonRecord],
    pub selected: usize,
    /// Applied query, highlighted in names
    pub highlight: &'a str,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct RecordList {
    list: SelectList,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(props: &RecordListProps<'_>) -> Vec<Line<'static>> {
        let base = Style::default().fg(TEXT_MAIN);
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        props
            .records
            .iter()
            .map(|record| {
                let name = format_name(&record.name);
                let mut spans = vec![Span::styled(
                    format!("#{:03} ", record.id),
                    Style::default().fg(TEXT_DIM),
                )];
                spans.extend(highlight_substring(&name, props.highlight, base, highlight).spans);
                Line::from(spans)
            })
            .collect()
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

impl Component<Action> for RecordList {
    type Props<'a> = RecordListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Scroll { delta, .. } = event {
            return vec![Action::SelectionMove((*delta * 3) as i16)];
        }
        let items = Self::items(&props);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RecordSelect,
            render_item: &|item| item.clone(),
        };
        self.list
            .handle_event(event, list_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.records.is_empty() {
            let empty = Paragraph::new("No matches on this page")
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(empty, area);
            return;
        }

        let items = Self::items(&props);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RecordSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, list_props);
    }
}
