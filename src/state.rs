//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::BrowserConfig;

/// Banner text for any failed page fetch
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch Pokémon data. Please try again.";

/// Cursor URLs returned by the list endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageCursor {
    pub fn url(&self, direction: NavDirection) -> Option<&str> {
        match direction {
            NavDirection::Next => self.next.as_deref(),
            NavDirection::Previous => self.previous.as_deref(),
        }
    }
}

/// Detail record as served by the API. Fields other than `id` and `name`
/// are kept verbatim in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PokemonRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Case-insensitive substring on name, or exact match on the id text.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.id.to_string() == query
    }

    pub fn types(&self) -> Vec<String> {
        self.extra
            .get("types")
            .and_then(Value::as_array)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|slot| slot.pointer("/type/name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn height(&self) -> Option<u64> {
        self.number("height")
    }

    pub fn weight(&self) -> Option<u64> {
        self.number("weight")
    }

    pub fn base_experience(&self) -> Option<u64> {
        self.number("base_experience")
    }

    fn number(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(Value::as_u64)
    }
}

/// One page of records plus the cursors to its neighbours
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedPage {
    pub records: Vec<PokemonRecord>,
    pub cursor: PageCursor,
    /// Total record count reported by the list endpoint
    pub total: Option<u32>,
}

impl LoadedPage {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavDirection {
    Next,
    Previous,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Input line has focus
    pub active: bool,
    /// Raw text as typed
    pub query: String,
    /// Query the filtered view was last computed with
    pub applied: String,
    /// Bumped on every edit; a debounce firing for an older revision is stale
    pub revision: u64,
}

impl SearchState {
    pub fn is_pending(&self) -> bool {
        self.query != self.applied
    }
}

/// The fetch the store is waiting on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFetch {
    pub request: u64,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    /// Nothing loaded yet and a fetch is running
    InitialLoading,
    Ready,
    /// Last fetch failed; whatever page was loaded stays visible
    ReadyWithError,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub config: BrowserConfig,
    pub page: LoadedPage,
    /// URL the current page was loaded from
    pub current_url: Option<String>,
    pub pending: Option<PendingFetch>,
    pub request_seq: u64,
    /// Direction whose button is busy
    pub active_direction: Option<NavDirection>,
    pub error: Option<String>,

    pub search: SearchState,
    /// Indices into `page.records` matching `search.applied`
    pub filtered_indices: Vec<usize>,
    /// Position within the visible list
    pub selected_index: usize,

    pub terminal_size: (u16, u16),
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

impl AppState {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            page: LoadedPage::default(),
            current_url: None,
            pending: None,
            request_seq: 0,
            active_direction: None,
            error: None,
            search: SearchState::default(),
            filtered_indices: Vec::new(),
            selected_index: 0,
            terminal_size: (80, 24),
            tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_awaiting(&self, request: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.request == request)
    }

    pub fn phase(&self) -> ViewPhase {
        if self.is_loading() && self.page.is_empty() {
            ViewPhase::InitialLoading
        } else if self.error.is_some() {
            ViewPhase::ReadyWithError
        } else {
            ViewPhase::Ready
        }
    }

    /// Recompute the filtered view from the current page and applied query.
    pub fn rebuild_filtered(&mut self) {
        let query = self.search.applied.as_str();
        self.filtered_indices = self
            .page
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches(query))
            .map(|(idx, _)| idx)
            .collect();
        self.clamp_selection();
    }

    /// Record indices shown in the list. An empty query shows the whole page.
    pub fn visible_indices(&self) -> Vec<usize> {
        if self.search.query.is_empty() {
            (0..self.page.records.len()).collect()
        } else {
            self.filtered_indices.clone()
        }
    }

    pub fn visible_records(&self) -> Vec<&PokemonRecord> {
        self.visible_indices()
            .into_iter()
            .filter_map(|idx| self.page.records.get(idx))
            .collect()
    }

    pub fn selected_record(&self) -> Option<&PokemonRecord> {
        self.visible_indices()
            .get(self.selected_index)
            .and_then(|idx| self.page.records.get(*idx))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        let len = self.visible_indices().len();
        if len == 0 {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(len - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_indices().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Page")
                .entry("records", ron_string(&self.page.records.len()))
                .entry("total", ron_string(&self.page.total))
                .entry("current_url", ron_string(&self.current_url))
                .entry("next", ron_string(&self.page.cursor.next))
                .entry("previous", ron_string(&self.page.cursor.previous))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Search")
                .entry("query", ron_string(&self.search.query))
                .entry("applied", ron_string(&self.search.applied))
                .entry("revision", ron_string(&self.search.revision))
                .entry("active", ron_string(&self.search.active))
                .entry("filtered", ron_string(&self.filtered_indices.len())),
            DebugSection::new("Status")
                .entry("pending", ron_string(&self.pending))
                .entry("active_direction", ron_string(&self.active_direction))
                .entry("error", ron_string(&self.error)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_of(records: &[(u32, &str)]) -> LoadedPage {
        LoadedPage {
            records: records
                .iter()
                .map(|(id, name)| PokemonRecord::new(*id, *name))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_match_ignores_case() {
        let record = PokemonRecord::new(25, "pikachu");
        assert!(record.matches("PIKA"));
        assert!(record.matches("chu"));
        assert!(!record.matches("raichu"));
    }

    #[test]
    fn test_id_match_is_exact() {
        assert!(PokemonRecord::new(25, "pikachu").matches("25"));
        assert!(!PokemonRecord::new(125, "electabuzz").matches("25"));
        assert!(!PokemonRecord::new(25, "pikachu").matches("2"));
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let value = json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "types": [
                { "slot": 1, "type": { "name": "grass", "url": "" } },
                { "slot": 2, "type": { "name": "poison", "url": "" } }
            ],
            "is_default": true
        });
        let record: PokemonRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(record.types(), vec!["grass", "poison"]);
        assert_eq!(record.height(), Some(7));
        assert_eq!(record.weight(), Some(69));
        assert_eq!(record.base_experience(), Some(64));
        assert_eq!(record.extra.get("is_default"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_empty_query_shows_whole_page() {
        let mut state = AppState {
            page: page_of(&[(1, "bulbasaur"), (4, "charmander")]),
            ..Default::default()
        };
        state.rebuild_filtered();
        assert_eq!(state.visible_indices(), vec![0, 1]);
    }

    #[test]
    fn test_visible_uses_applied_filter_once_query_set() {
        let mut state = AppState {
            page: page_of(&[(1, "bulbasaur"), (4, "charmander"), (7, "squirtle")]),
            ..Default::default()
        };
        state.search.query = "char".into();
        state.search.applied = "char".into();
        state.rebuild_filtered();
        assert_eq!(state.visible_indices(), vec![1]);
        assert_eq!(state.selected_record().map(|r| r.id), Some(4));
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = AppState::default();
        assert_eq!(state.phase(), ViewPhase::Ready);

        state.pending = Some(PendingFetch {
            request: 1,
            url: "u".into(),
        });
        assert_eq!(state.phase(), ViewPhase::InitialLoading);

        state.page = page_of(&[(1, "bulbasaur")]);
        assert_eq!(state.phase(), ViewPhase::Ready);

        state.pending = None;
        state.error = Some(FETCH_ERROR_MESSAGE.into());
        assert_eq!(state.phase(), ViewPhase::ReadyWithError);
    }

    #[test]
    fn test_cursor_direction_lookup() {
        let cursor = PageCursor {
            next: Some("n".into()),
            previous: None,
        };
        assert_eq!(cursor.url(NavDirection::Next), Some("n"));
        assert_eq!(cursor.url(NavDirection::Previous), None);
    }
}
