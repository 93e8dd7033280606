use crate::date::DayKey;
use crate::entry::EntryStore;
use crate::storage::Storage;

/// Consecutive days with an entry, counting back from `today`.
pub fn compute<S: Storage>(store: &EntryStore<S>, today: DayKey) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);

    while let Some(current) = day {
        if store.get(current).is_none() {
            break;
        }
        streak += 1;
        day = current.pred();
    }

    streak
}
