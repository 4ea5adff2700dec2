//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, NavDirection, PendingFetch, FETCH_ERROR_MESSAGE};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let url = state.config.start_url();
            DispatchResult::changed_with(begin_fetch(state, url, None))
        }

        Action::PageNext => navigate(state, NavDirection::Next),
        Action::PagePrev => navigate(state, NavDirection::Previous),

        Action::PageReload => {
            if state.is_loading() {
                return DispatchResult::unchanged();
            }
            let url = state
                .current_url
                .clone()
                .unwrap_or_else(|| state.config.start_url());
            DispatchResult::changed_with(begin_fetch(state, url, None))
        }

        Action::PageDidLoad { request, page } => {
            if !state.is_awaiting(request) {
                return DispatchResult::unchanged();
            }
            state.current_url = state.pending.take().map(|pending| pending.url);
            state.active_direction = None;
            state.error = None;
            state.page = page;
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::PageDidError { request, .. } => {
            if !state.is_awaiting(request) {
                return DispatchResult::unchanged();
            }
            state.pending = None;
            state.active_direction = None;
            state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.search.revision += 1;
            apply_filter(state);
            DispatchResult::changed_with(Effect::CancelFilter)
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.search.revision += 1;
            apply_filter(state);
            DispatchResult::changed_with(Effect::CancelFilter)
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            schedule_filter(state)
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            schedule_filter(state)
        }

        Action::FilterDidFire(revision) => {
            if revision != state.search.revision {
                return DispatchResult::unchanged();
            }
            apply_filter(state);
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let len = state.visible_indices().len();
            let next = clamp_index(state.selected_index, len, delta);
            if state.set_selected_index(next) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RecordSelect(index) => {
            if state.set_selected_index(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if !state.is_loading() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn navigate(state: &mut AppState, direction: NavDirection) -> DispatchResult<Effect> {
    let Some(url) = state.page.cursor.url(direction).map(str::to_string) else {
        return DispatchResult::unchanged();
    };
    // the busy button is disabled; the other one replaces the pending fetch
    if state.active_direction == Some(direction) {
        return DispatchResult::unchanged();
    }
    DispatchResult::changed_with(begin_fetch(state, url, Some(direction)))
}

fn begin_fetch(state: &mut AppState, url: String, direction: Option<NavDirection>) -> Effect {
    state.request_seq += 1;
    let request = state.request_seq;
    state.pending = Some(PendingFetch {
        request,
        url: url.clone(),
    });
    state.active_direction = direction;
    state.error = None;
    state.tick = 0;
    Effect::FetchPage { request, url }
}

fn schedule_filter(state: &mut AppState) -> DispatchResult<Effect> {
    state.search.revision += 1;
    state.clamp_selection();
    DispatchResult::changed_with(Effect::DebounceFilter {
        revision: state.search.revision,
        delay_ms: state.config.debounce_ms,
    })
}

fn apply_filter(state: &mut AppState) {
    state.search.applied = state.search.query.clone();
    state.rebuild_filtered();
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + delta as i64;
    next.clamp(0, len as i64 - 1) as usize
}
