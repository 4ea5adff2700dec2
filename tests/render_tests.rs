//! Whole-screen render checks using RenderHarness

use pokebrowse::{
    components::{BrowserView, BrowserViewProps, Component},
    state::{
        AppState, LoadedPage, NavDirection, PageCursor, PendingFetch, PokemonRecord,
        FETCH_ERROR_MESSAGE,
    },
};
use serde_json::json;
use tui_dispatch::testing::*;

fn pikachu() -> PokemonRecord {
    serde_json::from_value(json!({
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "types": [{ "slot": 1, "type": { "name": "electric" } }]
    }))
    .unwrap()
}

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    state.page = LoadedPage {
        records: vec![pikachu(), PokemonRecord::new(26, "raichu")],
        cursor: PageCursor {
            next: Some("next".into()),
            previous: Some("prev".into()),
        },
        total: Some(1302),
    };
    state.current_url = Some("current".into());
    state.rebuild_filtered();
    state
}

fn render(state: &AppState) -> String {
    let mut render = RenderHarness::new(80, 24);
    let mut view = BrowserView::new();
    render.render_to_string_plain(|frame| {
        let props = BrowserViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_initial_loading() {
    let mut state = AppState::default();
    state.pending = Some(PendingFetch {
        request: 1,
        url: "start".into(),
    });

    let output = render(&state);

    assert!(output.contains("Loading Pokémon..."), "output was:\n{output}");
    assert!(!output.contains("Next Page"));
}

#[test]
fn test_render_loaded_page() {
    let output = render(&loaded_state());

    assert!(output.contains("#025 Pikachu"), "output was:\n{output}");
    assert!(output.contains("#026 Raichu"));
    assert!(output.contains("Pikachu  #025"));
    assert!(output.contains("p: Previous"));
    assert!(output.contains("n: Next Page"));
    assert!(output.contains("2/2 shown"));
    assert!(!output.contains(FETCH_ERROR_MESSAGE));
}

#[test]
fn test_render_error_banner_over_page() {
    let mut state = loaded_state();
    state.error = Some(FETCH_ERROR_MESSAGE.to_string());

    let output = render(&state);

    assert!(output.contains(FETCH_ERROR_MESSAGE), "output was:\n{output}");
    assert!(output.contains("#025 Pikachu"));
}

#[test]
fn test_render_busy_next_button() {
    let mut state = loaded_state();
    state.pending = Some(PendingFetch {
        request: 2,
        url: "next".into(),
    });
    state.active_direction = Some(NavDirection::Next);

    let output = render(&state);

    assert!(output.contains("◐ Next Page"), "output was:\n{output}");
    assert!(output.contains("p: Previous"));
    // page stays visible while the next one loads
    assert!(output.contains("#025 Pikachu"));
}

#[test]
fn test_render_empty_filter_result() {
    let mut state = loaded_state();
    state.search.query = "zzz".into();
    state.search.applied = "zzz".into();
    state.rebuild_filtered();

    let output = render(&state);

    assert!(
        output.contains("No matches on this page"),
        "output was:\n{output}"
    );
    assert!(output.contains("0/2 shown"));
}
