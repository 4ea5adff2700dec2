use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{spinner, Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM};
use crate::action::Action;
use crate::state::{NavDirection, PageCursor};

pub struct PagerProps<'a> {
    pub cursor: &'a PageCursor,
    pub active: Option<NavDirection>,
    pub tick: u64,
    pub is_focused: bool,
}

impl PagerProps<'_> {
    /// Shown when the API returned a cursor for that direction
    pub fn shows(&self, direction: NavDirection) -> bool {
        self.cursor.url(direction).is_some()
    }

    /// Shown and not already busy
    pub fn enabled(&self, direction: NavDirection) -> bool {
        self.shows(direction) && self.active != Some(direction)
    }
}

/// Previous / Next Page buttons
#[derive(Default)]
pub struct Pager;

impl Component<Action> for Pager {
    type Props<'a> = PagerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let direction = match key.code {
            KeyCode::Char('n') | KeyCode::Right => NavDirection::Next,
            KeyCode::Char('p') | KeyCode::Left => NavDirection::Previous,
            _ => return None,
        };
        if !props.enabled(direction) {
            return None;
        }
        Some(match direction {
            NavDirection::Next => Action::PageNext,
            NavDirection::Previous => Action::PagePrev,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        for direction in [NavDirection::Previous, NavDirection::Next] {
            if !props.shows(direction) {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::raw("   "));
            }
            spans.push(button(direction, &props));
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(TEXT_DIM))
            .style(Style::default().bg(BG_PANEL));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

fn button(direction: NavDirection, props: &PagerProps<'_>) -> Span<'static> {
    let (key, label) = match direction {
        NavDirection::Previous => ("p", "Previous"),
        NavDirection::Next => ("n", "Next Page"),
    };
    if props.active == Some(direction) {
        Span::styled(
            format!("[ {} {label} ]", spinner(props.tick)),
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM),
        )
    } else {
        let color = match direction {
            NavDirection::Previous => ACCENT_TEAL,
            NavDirection::Next => ACCENT_GOLD,
        };
        Span::styled(
            format!("[ {key}: {label} ]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    }
}
