use serde::{Deserialize, Serialize};

use crate::state::LoadedPage;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    /// Load the first page
    Init,

    PageNext,
    PagePrev,
    /// Fetch the current page again
    PageReload,
    PageDidLoad { request: u64, page: LoadedPage },
    PageDidError { request: u64, error: String },

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    /// Debounce window for the given search revision elapsed
    FilterDidFire(u64),

    SelectionMove(i16),
    RecordSelect(usize),

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
