use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::calendar::{self, CalendarDay};
use crate::date::{DayKey, DayRelation, Month};
use crate::entry::{EntryStore, WriteOutcome};
use crate::error::Result;
use crate::history::{self, HistoryEntry};
use crate::storage::Storage;
use crate::streak;
use crate::timer::Deadline;

pub const MAX_WORDS: usize = 240;

pub const TODAY_PLACEHOLDER: &str = "Schreib deinen heutigen Eintrag...";
pub const FUTURE_PLACEHOLDER: &str =
    "Dieser Tag liegt in der Zukunft. Du kannst hier noch nichts schreiben.";
pub const NO_ENTRY_PLACEHOLDER: &str = "Für diesen Tag gibt es keinen Eintrag.";
pub const FUTURE_NOTICE: &str = "Zukünftiger Tag – du kannst hier noch nichts schreiben.";
pub const PAST_ENTRY_NOTICE: &str =
    "Vergangener Eintrag – dieser Tag kann nicht mehr bearbeitet werden.";
pub const NO_ENTRY_NOTICE: &str = "An diesem Tag wurde kein Eintrag geschrieben.";
pub const LIMIT_NOTICE: &str = "Wortlimit erreicht. Mehr geht heute nicht.";

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordLimit {
    /// No words left; the draft becomes empty.
    Cleared,
    /// Over the ceiling; the first [`MAX_WORDS`] words joined by single spaces.
    Clamped(String),
    /// Within the ceiling; the input is kept verbatim.
    Accepted,
}

/// Typed and pasted text both pass through here.
pub fn apply_word_limit(input: &str) -> WordLimit {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        WordLimit::Cleared
    } else if words.len() > MAX_WORDS {
        WordLimit::Clamped(words[..MAX_WORDS].join(" "))
    } else {
        WordLimit::Accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    EditingToday,
    LockedToday,
    ViewingOther,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not editable right now; nothing changed.
    Ignored,
    Accepted,
    Clamped,
    Cleared,
}

/// A day picked from the calendar or history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub day: DayKey,
    pub label: String,
    pub content: String,
    pub locked: bool,
}

/// Application state for one session: the day being shown, the draft and
/// today's lock. Only today's draft is ever written back to the store.
pub struct EditorController<S> {
    store: EntryStore<S>,
    today: DayKey,
    active_day: DayKey,
    draft: String,
    today_locked: bool,
    selected: Option<SelectedEntry>,
    show_counter: bool,
    hide_counter: Deadline,
    counter_delay: Duration,
}

impl<S: Storage> EditorController<S> {
    /// Resolves today once and loads its entry and lock flag.
    pub fn hydrate(store: EntryStore<S>, counter_delay: Duration) -> Self {
        let today = store.today();
        let draft = store.get(today).map(|entry| entry.text).unwrap_or_default();
        let today_locked = store.is_locked(today);
        info!(%today, words = count_words(&draft), locked = today_locked, "hydrated editor");

        EditorController {
            store,
            today,
            active_day: today,
            draft,
            today_locked,
            selected: None,
            show_counter: false,
            hide_counter: Deadline::new(),
            counter_delay,
        }
    }

    pub fn mode(&self) -> ViewMode {
        if self.active_day != self.today {
            ViewMode::ViewingOther
        } else if self.today_locked {
            ViewMode::LockedToday
        } else {
            ViewMode::EditingToday
        }
    }

    /// Applies the word limit to `input` and writes the result through to the
    /// store. The draft only changes when the write went through.
    pub fn on_input(&mut self, input: &str, now: Instant) -> Result<InputOutcome> {
        // Input was built from the previous day's draft; drop it.
        if self.roll_over() {
            return Ok(InputOutcome::Ignored);
        }
        if self.mode() != ViewMode::EditingToday {
            return Ok(InputOutcome::Ignored);
        }

        let (draft, outcome) = match apply_word_limit(input) {
            WordLimit::Cleared => (String::new(), InputOutcome::Cleared),
            WordLimit::Clamped(limited) => (limited, InputOutcome::Clamped),
            WordLimit::Accepted => (input.to_string(), InputOutcome::Accepted),
        };

        if self.store.set(self.today, &draft)? == WriteOutcome::Rejected {
            warn!(today = %self.today, "draft was not persisted");
            return Ok(InputOutcome::Ignored);
        }
        self.draft = draft;

        match outcome {
            InputOutcome::Cleared => {
                self.show_counter = false;
                self.hide_counter.cancel();
            }
            InputOutcome::Accepted => {
                // Every accepted keystroke restarts the pause before hiding.
                self.show_counter = true;
                self.hide_counter.schedule(now, self.counter_delay);
            }
            // A clamp leaves the counter as it was.
            InputOutcome::Clamped | InputOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Moves the session onto the clock's current day once midnight has
    /// passed. Returns true when the day changed.
    fn roll_over(&mut self) -> bool {
        let today = self.store.today();
        if today == self.today {
            return false;
        }

        info!(from = %self.today, to = %today, "day changed, rolling session over");
        let was_on_today = self.active_day == self.today;
        self.today = today;
        self.today_locked = self.store.is_locked(today);
        if was_on_today || self.active_day == today {
            self.active_day = today;
            self.draft = self.store.get(today).map(|entry| entry.text).unwrap_or_default();
            self.selected = None;
        }
        self.show_counter = false;
        self.hide_counter.cancel();
        true
    }

    /// Shows `day` read-only, or returns to today's editor when `day` is today.
    /// Never writes to the store.
    pub fn select_day(&mut self, day: DayKey) {
        let content = self.store.get(day).map(|entry| entry.text).unwrap_or_default();
        let locked = self.store.is_locked(day);

        self.active_day = day;
        self.draft = content.clone();
        self.selected = Some(SelectedEntry {
            day,
            label: day.label(),
            content,
            locked,
        });
        self.show_counter = false;
        self.hide_counter.cancel();
    }

    pub fn select_today(&mut self) {
        self.select_day(self.today);
        self.selected = None;
    }

    /// Locks today's entry. Returns false when there is nothing to lock or
    /// today is not being edited.
    pub fn lock_in(&mut self) -> Result<bool> {
        if self.roll_over() {
            return Ok(false);
        }
        if self.mode() != ViewMode::EditingToday || self.draft.trim().is_empty() {
            return Ok(false);
        }

        if self.store.lock(self.today)? == WriteOutcome::Rejected {
            return Ok(false);
        }

        self.today_locked = true;
        self.show_counter = false;
        self.hide_counter.cancel();
        Ok(true)
    }

    /// Hides the word counter once the typing pause has elapsed and follows
    /// the clock past midnight. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.roll_over() {
            return true;
        }
        if self.hide_counter.fire(now) {
            self.show_counter = false;
            return true;
        }
        false
    }

    pub fn today(&self) -> DayKey {
        self.today
    }

    pub fn active_day(&self) -> DayKey {
        self.active_day
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn selected(&self) -> Option<&SelectedEntry> {
        self.selected.as_ref()
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn relation(&self) -> DayRelation {
        self.active_day.relation_to(self.today)
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.draft)
    }

    /// Percentage of the word ceiling used, capped at 100.
    pub fn progress(&self) -> usize {
        (self.word_count() * 100 / MAX_WORDS).min(100)
    }

    pub fn limit_reached(&self) -> bool {
        self.word_count() >= MAX_WORDS
    }

    /// True while the word counter is waiting to be hidden.
    pub fn counter_pending(&self) -> bool {
        self.hide_counter.is_pending()
    }

    pub fn counter_visible(&self) -> bool {
        self.show_counter && self.word_count() > 0 && !self.today_locked
    }

    pub fn can_lock(&self) -> bool {
        self.mode() == ViewMode::EditingToday && !self.draft.trim().is_empty()
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.relation() {
            DayRelation::Today => None,
            DayRelation::Future => Some(FUTURE_NOTICE),
            DayRelation::Past if self.draft.trim().is_empty() => Some(NO_ENTRY_NOTICE),
            DayRelation::Past => Some(PAST_ENTRY_NOTICE),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self.relation() {
            DayRelation::Today => TODAY_PLACEHOLDER,
            DayRelation::Future => FUTURE_PLACEHOLDER,
            DayRelation::Past if self.draft.trim().is_empty() => NO_ENTRY_PLACEHOLDER,
            DayRelation::Past => "",
        }
    }

    pub fn status_line(&self) -> String {
        match self.mode() {
            ViewMode::LockedToday => "entry locked for today".to_string(),
            ViewMode::EditingToday => "[ctrl+l] lock in today".to_string(),
            ViewMode::ViewingOther => {
                let mut line = match &self.selected {
                    Some(selected) => format!("viewing {}", selected.label),
                    None => format!("viewing {}", self.active_day),
                };
                if let Some(selected) = &self.selected {
                    if selected.locked {
                        line.push_str(" · locked");
                    } else if selected.content.trim().is_empty() {
                        line.push_str(" · no entry");
                    }
                }
                line
            }
        }
    }

    pub fn streak(&self) -> u32 {
        streak::compute(&self.store, self.today)
    }

    pub fn calendar(&self, month: Month) -> Vec<CalendarDay> {
        calendar::project(month, &self.store, self.today)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        history::project(&self.store, self.today)
    }
}
