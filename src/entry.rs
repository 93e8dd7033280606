use tracing::{debug, info, warn};

use crate::date::{Clock, DayKey};
use crate::error::Result;
use crate::storage::Storage;

pub const ENTRY_KEY_PREFIX: &str = "twofourty-entry-";
pub const LEGACY_KEY_PREFIX: &str = "serene-entry-";
const LOCK_SUFFIX: &str = "-locked";
const LOCKED_VALUE: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub day: DayKey,
    pub text: String,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved,
    Cleared,
    /// The day is not today, is locked, or has nothing to lock. Nothing was written.
    Rejected,
}

fn entry_key(day: DayKey) -> String {
    format!("{}{}", ENTRY_KEY_PREFIX, day)
}

fn lock_key(day: DayKey) -> String {
    format!("{}{}{}", ENTRY_KEY_PREFIX, day, LOCK_SUFFIX)
}

/// Per-day entry text and lock flags on top of a [`Storage`] medium.
///
/// Only today's entry can be written, and a lock is never lifted once set.
pub struct EntryStore<S> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: Storage> EntryStore<S> {
    pub fn new(storage: S, clock: impl Clock + 'static) -> Self {
        EntryStore {
            storage,
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> DayKey {
        self.clock.today()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, day: DayKey) -> Option<Entry> {
        let text = self.storage.get(&entry_key(day))?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Entry {
            day,
            text,
            locked: self.is_locked(day),
        })
    }

    pub fn is_locked(&self, day: DayKey) -> bool {
        self.storage.get(&lock_key(day)).as_deref() == Some(LOCKED_VALUE)
    }

    pub fn set(&mut self, day: DayKey, text: &str) -> Result<WriteOutcome> {
        if day != self.today() || self.is_locked(day) {
            warn!(%day, "ignoring write to a day that is not editable");
            return Ok(WriteOutcome::Rejected);
        }

        let key = entry_key(day);
        if text.trim().is_empty() {
            self.storage.remove(&key)?;
            debug!(%day, "cleared entry");
            return Ok(WriteOutcome::Cleared);
        }

        self.storage.set(&key, text)?;
        debug!(%day, bytes = text.len(), "saved entry");
        Ok(WriteOutcome::Saved)
    }

    pub fn lock(&mut self, day: DayKey) -> Result<WriteOutcome> {
        if day != self.today() || self.is_locked(day) || self.get(day).is_none() {
            return Ok(WriteOutcome::Rejected);
        }

        self.storage.set(&lock_key(day), LOCKED_VALUE)?;
        info!(%day, "locked entry");
        Ok(WriteOutcome::Saved)
    }

    /// Days holding non-blank text, oldest first.
    pub fn days_with_entries(&self) -> Vec<DayKey> {
        self.storage
            .keys()
            .iter()
            .filter_map(|key| key.strip_prefix(ENTRY_KEY_PREFIX))
            .filter(|rest| !rest.ends_with(LOCK_SUFFIX))
            .filter_map(|rest| DayKey::parse(rest).ok())
            .filter(|day| self.get(*day).is_some())
            .collect()
    }

    /// Copies entries and locks stored under the legacy prefix to the current
    /// prefix. Existing non-empty values are never overwritten and legacy keys
    /// are left in place. Returns the number of keys copied.
    pub fn migrate_legacy(&mut self) -> Result<usize> {
        let legacy_keys: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(LEGACY_KEY_PREFIX) && !key.ends_with(LOCK_SUFFIX))
            .collect();

        let mut copied = 0;
        for key in legacy_keys {
            let rest = &key[LEGACY_KEY_PREFIX.len()..];
            let new_key = format!("{}{}", ENTRY_KEY_PREFIX, rest);

            if let Some(value) = self.storage.get(&key) {
                if self.copy_if_vacant(&new_key, &value)? {
                    copied += 1;
                }
            }

            let old_lock_key = format!("{}{}", key, LOCK_SUFFIX);
            if let Some(lock_value) = self.storage.get(&old_lock_key) {
                let new_lock_key = format!("{}{}", new_key, LOCK_SUFFIX);
                if self.copy_if_vacant(&new_lock_key, &lock_value)? {
                    copied += 1;
                }
            }
        }

        if copied > 0 {
            info!(copied, "migrated legacy entries");
        }
        Ok(copied)
    }

    fn copy_if_vacant(&mut self, key: &str, value: &str) -> Result<bool> {
        let vacant = self.storage.get(key).map_or(true, |existing| existing.is_empty());
        if vacant {
            self.storage.set(key, value)?;
        }
        Ok(vacant)
    }
}
