pub mod browser;
pub mod pager;
pub mod record_detail;
pub mod record_list;
pub mod search_bar;

pub use tui_dispatch::Component;

pub use browser::{browser_layout, BrowserLayout, BrowserView, BrowserViewProps};
pub use pager::{Pager, PagerProps};
pub use record_detail::{RecordDetail, RecordDetailProps};
pub use record_list::{RecordList, RecordListProps};
pub use search_bar::{SearchBar, SearchBarProps};

use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const BG_ERROR: Color = Color::Rgb(92, 24, 30);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// "mr-mime" -> "Mr Mime"
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
