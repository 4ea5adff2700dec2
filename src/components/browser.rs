use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    spinner, Component, Pager, PagerProps, RecordDetail, RecordDetailProps, RecordList,
    RecordListProps, SearchBar, SearchBarProps, ACCENT_GOLD, ACCENT_TEAL, BG_BASE, BG_ERROR,
    BG_PANEL, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, ViewPhase};

/// Screen regions for the ready view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserLayout {
    pub search: Rect,
    pub banner: Option<Rect>,
    pub list: Rect,
    pub detail: Rect,
    pub pager: Rect,
    pub status: Rect,
}

pub fn browser_layout(area: Rect, state: &AppState) -> BrowserLayout {
    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[2]);

    BrowserLayout {
        search: rows[0],
        banner: (banner_height > 0).then_some(rows[1]),
        list: body[0],
        detail: body[1],
        pager: rows[3],
        status: rows[4],
    }
}

pub struct BrowserViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: spinner on first load, list and pager afterwards
pub struct BrowserView {
    records: RecordList,
    search: SearchBar,
    pager: Pager,
    detail: RecordDetail,
    status_bar: StatusBar,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self {
            records: RecordList::new(),
            search: SearchBar,
            pager: Pager,
            detail: RecordDetail,
            status_bar: StatusBar::new(),
        }
    }
}

impl BrowserView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys while the search line has focus
    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        self.search
            .handle_event(event, search_props(state, true))
            .into_iter()
            .collect()
    }
}

impl Component<Action> for BrowserView {
    type Props<'a> = BrowserViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if !props.is_focused || state.search.active {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('/') => return vec![Action::SearchStart],
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::PageReload],
                KeyCode::Esc if !state.search.query.is_empty() => {
                    return vec![Action::SearchCancel]
                }
                _ => {}
            }
        }

        let pager_actions: Vec<_> = self
            .pager
            .handle_event(event, pager_props(state))
            .into_iter()
            .collect();
        if !pager_actions.is_empty() {
            return pager_actions;
        }

        let visible = state.visible_records();
        self.records
            .handle_event(
                event,
                RecordListProps {
                    records: &visible,
                    selected: state.selected_index,
                    highlight: &state.search.applied,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        if state.phase() == ViewPhase::InitialLoading {
            render_initial_loading(frame, area, state.tick);
            return;
        }

        let layout = browser_layout(area, state);
        self.search.render(frame, layout.search, search_props(state, props.is_focused));

        if let (Some(banner), Some(error)) = (layout.banner, state.error.as_deref()) {
            render_error_banner(frame, banner, error);
        }

        let list_block = Block::default()
            .borders(Borders::ALL)
            .title("DEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let list_inner = list_block.inner(layout.list);
        frame.render_widget(list_block, layout.list);
        let visible = state.visible_records();
        self.records.render(
            frame,
            list_inner,
            RecordListProps {
                records: &visible,
                selected: state.selected_index,
                highlight: &state.search.applied,
                is_focused: props.is_focused && !state.search.active,
            },
        );

        self.detail.render(
            frame,
            layout.detail,
            RecordDetailProps {
                record: state.selected_record(),
            },
        );

        self.pager.render(frame, layout.pager, pager_props(state));
        render_status(&mut self.status_bar, frame, layout.status, state);
    }
}

fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
    SearchBarProps {
        query: &state.search.query,
        active: state.search.active,
        pending: state.search.is_pending(),
        shown: state.visible_indices().len(),
        page_len: state.page.records.len(),
        total: state.page.total,
        is_focused,
    }
}

fn pager_props(state: &AppState) -> PagerProps<'_> {
    PagerProps {
        cursor: &state.page.cursor,
        active: state.active_direction,
        tick: state.tick,
        is_focused: true,
    }
}

fn render_initial_loading(frame: &mut Frame, area: Rect, tick: u64) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(ACCENT_TEAL)),
        Span::styled(
            " Loading Pokémon...",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rows[1]);
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_ERROR).fg(TEXT_MAIN));
    let text = Text::from(Line::from(vec![
        Span::styled(error.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  (r to retry)"),
    ]));
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_status(status_bar: &mut StatusBar, frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.search.active {
        vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ]
    } else {
        vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("n/p", "Page"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("r", "Reload"),
            StatusBarHint::new("q", "Quit"),
        ]
    };
    let status = if state.is_loading() {
        format!("{} Loading...", spinner(state.tick))
    } else {
        String::new()
    };
    let status_span = Span::styled(status, Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items),
        style: StatusBarStyle::default(),
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}
