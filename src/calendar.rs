use crate::date::{DayKey, Month};
use crate::entry::EntryStore;
use crate::storage::Storage;

pub const WEEKDAY_HEADER: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];

/// One cell of the month grid. Leading blanks carry `day: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: Option<DayKey>,
    pub day_number: u32,
    pub has_entry: bool,
    pub locked: bool,
    pub is_today: bool,
    pub is_current_month: bool,
}

impl CalendarDay {
    fn blank() -> Self {
        CalendarDay {
            day: None,
            day_number: 0,
            has_entry: false,
            locked: false,
            is_today: false,
            is_current_month: false,
        }
    }
}

/// Sunday-first grid for `month`: blanks up to the weekday of the 1st, then
/// every day of the month.
pub fn project<S: Storage>(month: Month, store: &EntryStore<S>, today: DayKey) -> Vec<CalendarDay> {
    let leading = month
        .first_day()
        .map(|first| first.weekday_from_sunday())
        .unwrap_or(0);

    let mut days: Vec<CalendarDay> = (0..leading).map(|_| CalendarDay::blank()).collect();

    for day_number in 1..=month.days_in_month() {
        let Some(day) = month.day(day_number) else {
            continue;
        };
        days.push(CalendarDay {
            day: Some(day),
            day_number,
            has_entry: store.get(day).is_some(),
            locked: store.is_locked(day),
            is_today: day == today,
            is_current_month: true,
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::storage::MemoryStorage;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    #[test]
    fn march_2024_starts_on_friday() {
        let today = day("2024-03-15");
        let store = EntryStore::new(MemoryStorage::new(), FixedClock(today));

        let grid = project(Month::of(today), &store, today);

        assert_eq!(grid.len(), 5 + 31);
        assert!(grid[..5].iter().all(|cell| !cell.is_current_month && cell.day.is_none()));
        assert_eq!(grid[5].day, Some(day("2024-03-01")));
        assert_eq!(grid[5].day_number, 1);
        assert_eq!(grid.last().unwrap().day_number, 31);
    }

    #[test]
    fn sunday_first_month_has_no_blanks() {
        let today = day("2024-09-10");
        let store = EntryStore::new(MemoryStorage::new(), FixedClock(today));

        let grid = project(Month::of(DayKey::from_ymd(2024, 9, 1).unwrap()), &store, today);

        assert_eq!(grid.len(), 30);
        assert_eq!(grid[0].day_number, 1);
    }

    #[test]
    fn cells_carry_entry_lock_and_today_flags() {
        let today = day("2024-02-10");
        let mut storage = MemoryStorage::new();
        storage.set("twofourty-entry-2024-02-03", "old").unwrap();
        storage.set("twofourty-entry-2024-02-03-locked", "true").unwrap();
        storage.set("twofourty-entry-2024-02-04", " ").unwrap();
        storage.set("twofourty-entry-2024-02-10", "today").unwrap();
        let store = EntryStore::new(storage, FixedClock(today));

        let grid = project(Month::of(today), &store, today);
        let cell = |n: u32| grid.iter().find(|c| c.day_number == n).unwrap();

        // Feb 2024 starts on a Thursday.
        assert_eq!(grid.len(), 4 + 29);
        assert!(cell(3).has_entry && cell(3).locked);
        assert!(!cell(4).has_entry);
        assert!(cell(10).has_entry && cell(10).is_today && !cell(10).locked);
        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn other_months_have_no_today() {
        let today = day("2024-03-15");
        let store = EntryStore::new(MemoryStorage::new(), FixedClock(today));

        let grid = project(Month::of(today).next(), &store, today);

        assert!(grid.iter().all(|c| !c.is_today));
        assert_eq!(grid.iter().filter(|c| c.is_current_month).count(), 30);
    }
}
