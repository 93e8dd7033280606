use crate::date::DayKey;
use crate::entry::EntryStore;
use crate::storage::Storage;

pub const HISTORY_DAYS: usize = 7;
pub const PREVIEW_WORDS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub day: DayKey,
    pub label: String,
    pub is_today: bool,
    pub has_entry: bool,
    pub preview: String,
    pub locked: bool,
}

/// The trailing week, today first.
pub fn project<S: Storage>(store: &EntryStore<S>, today: DayKey) -> Vec<HistoryEntry> {
    let mut entries = Vec::with_capacity(HISTORY_DAYS);
    let mut day = Some(today);

    for i in 0..HISTORY_DAYS {
        let Some(current) = day else {
            break;
        };
        let entry = store.get(current);
        entries.push(HistoryEntry {
            day: current,
            label: current.label(),
            is_today: i == 0,
            has_entry: entry.is_some(),
            preview: entry.as_ref().map(|e| preview(&e.text)).unwrap_or_default(),
            locked: store.is_locked(current),
        });
        day = current.pred();
    }

    entries
}

/// First [`PREVIEW_WORDS`] words joined by single spaces, with ` …` when cut.
pub fn preview(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut preview = words
        .iter()
        .take(PREVIEW_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > PREVIEW_WORDS {
        preview.push_str(" …");
    }
    preview
}
