use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// Input line has focus
    pub active: bool,
    /// Typed text not yet applied to the list
    pub pending: bool,
    pub shown: usize,
    pub page_len: usize,
    pub total: Option<u32>,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.active {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input = if props.active {
            format!("/{}_", props.query)
        } else if props.query.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", props.query)
        };

        let mut spans = vec![
            Span::raw("Search: "),
            Span::styled(input, Style::default().fg(ACCENT_TEAL)),
        ];
        if props.pending && !props.query.is_empty() {
            spans.push(Span::styled(
                "  (filtering...)",
                Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
            ));
        }
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("{}/{} shown", props.shown, props.page_len),
            Style::default().fg(ACCENT_GOLD),
        ));
        if let Some(total) = props.total {
            spans.push(Span::styled(
                format!("  {total} in dex"),
                Style::default().fg(TEXT_DIM),
            ));
        }

        let border = if props.active { ACCENT_TEAL } else { TEXT_DIM };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEDEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(border));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(active: bool) -> SearchBarProps<'static> {
        SearchBarProps {
            query: "pi",
            active,
            pending: true,
            shown: 2,
            page_len: 20,
            total: Some(1302),
            is_focused: true,
        }
    }

    #[test]
    fn test_typing_emits_input_actions() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("k")), props(true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput('k'));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(esc), props(true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchCancel);
    }

    #[test]
    fn test_inactive_bar_ignores_keys() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("k")), props(false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_pending_query() {
        let mut render = RenderHarness::new(80, 3);
        let mut bar = SearchBar;

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props(true));
        });

        assert!(output.contains("/pi_"));
        assert!(output.contains("filtering"));
        assert!(output.contains("2/20 shown"));
    }
}
