use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::calendar::WEEKDAY_HEADER;
use crate::date::{DayKey, Month};
use crate::editor::{EditorController, InputOutcome, ViewMode, LIMIT_NOTICE, MAX_WORDS};
use crate::error::Result;
use crate::history::HISTORY_DAYS;
use crate::storage::Storage;
use crate::view;

const SIDEBAR_WIDTH: u16 = 42;
const CELL_WIDTH: u16 = 4;
const MAIN_MIN_WIDTH: u16 = 20;
// Poll interval while the word counter is waiting to hide.
const FAST_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Calendar,
    History,
}

/// Full-screen front end over an [`EditorController`].
pub struct App<S> {
    editor: EditorController<S>,
    focus: Focus,
    month: Month,
    calendar_cursor: DayKey,
    history_cursor: usize,
    // Char index into the draft.
    cursor: usize,
    terminal_width: u16,
    terminal_height: u16,
    dirty: bool,
}

impl<S: Storage> App<S> {
    pub fn new(editor: EditorController<S>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(editor, width, height))
    }

    fn with_size(editor: EditorController<S>, width: u16, height: u16) -> Self {
        let today = editor.today();
        let cursor = editor.draft().chars().count();
        App {
            editor,
            focus: Focus::Editor,
            month: Month::of(today),
            calendar_cursor: today,
            history_cursor: 0,
            cursor,
            terminal_width: width,
            terminal_height: height,
            dirty: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.enter_raw_mode()?;
        // Restore the terminal even when the loop failed, then report the error
        let result = self.event_loop();
        self.leave_raw_mode()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            // Only redraws when something marked the screen dirty
            self.render()?;

            // Counter timeout and midnight rollover are polled, not event driven
            let today = self.editor.today();
            if self.editor.tick(Instant::now()) {
                if self.editor.today() != today {
                    self.follow_new_day();
                }
                self.clamp_cursor();
                self.dirty = true;
            }

            // Poll faster while the counter is about to hide so it disappears on time
            let timeout = if self.editor.counter_pending() {
                FAST_POLL
            } else {
                IDLE_POLL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    // Windows reports both press and release; act on press and repeat
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        if self.handle_key_event(key_event)? {
                            break;
                        }
                    }
                    // Bracketed paste arrives as one chunk and goes through the word limit once
                    Event::Paste(text) => self.insert_text(&text)?,
                    Event::Resize(width, height) => {
                        self.terminal_width = width;
                        self.terminal_height = height;
                        self.dirty = true;
                    }
                    _ => {}
                }
            }
        }
        info!("leaving editor");
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        self.dirty = true;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        execute!(
            io::stdout(),
            Show,
            EnableLineWrap,
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Returns true when the app should exit.
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        // Global keys work the same whatever pane has focus
        match key_event.code {
            KeyCode::Char('q') if ctrl => return Ok(true),
            KeyCode::Char('l') if ctrl => {
                // Lock-in only succeeds while editing a non-empty draft for today
                if self.editor.lock_in()? {
                    self.focus = Focus::Editor;
                }
                self.dirty = true;
                return Ok(false);
            }
            KeyCode::Tab => {
                self.cycle_focus();
                return Ok(false);
            }
            KeyCode::Esc => {
                self.return_to_today();
                return Ok(false);
            }
            _ => {}
        }

        // Everything else belongs to the focused pane
        match self.focus {
            Focus::Editor => self.handle_editor_key(key_event)?,
            Focus::Calendar => self.handle_calendar_key(key_event),
            Focus::History => self.handle_history_key(key_event),
        }
        Ok(false)
    }

    fn handle_editor_key(&mut self, key_event: KeyEvent) -> Result<()> {
        // Cursor movement is local; every edit rebuilds the draft and hands it to the controller
        match key_event.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.draft_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.draft_len(),
            KeyCode::Enter => self.insert_text("\n")?,
            KeyCode::Backspace => {
                // Remove the char before the cursor, moving back only if the edit was kept
                if self.cursor > 0 {
                    let mut chars: Vec<char> = self.editor.draft().chars().collect();
                    chars.remove(self.cursor - 1);
                    let text: String = chars.into_iter().collect();
                    if self.editor.on_input(&text, Instant::now())? == InputOutcome::Accepted {
                        self.cursor -= 1;
                    }
                    self.clamp_cursor();
                }
            }
            KeyCode::Delete => {
                let mut chars: Vec<char> = self.editor.draft().chars().collect();
                if self.cursor < chars.len() {
                    chars.remove(self.cursor);
                    let text: String = chars.into_iter().collect();
                    self.editor.on_input(&text, Instant::now())?;
                    self.clamp_cursor();
                }
            }
            KeyCode::Char(c) => {
                // Skip unbound ctrl/alt chords instead of typing their letter
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.insert_text(&c.to_string())?;
                }
            }
            _ => return Ok(()),
        }
        self.dirty = true;
        Ok(())
    }

    fn insert_text(&mut self, inserted: &str) -> Result<()> {
        // Splice at the cursor by char index so multi-byte umlauts stay intact
        let mut chars: Vec<char> = self.editor.draft().chars().collect();
        let at = self.cursor.min(chars.len());
        let added: Vec<char> = inserted.chars().collect();
        let count = added.len();
        chars.splice(at..at, added);
        let text: String = chars.into_iter().collect();

        // Where the cursor lands depends on what the word limit did to the text
        match self.editor.on_input(&text, Instant::now())? {
            InputOutcome::Accepted => self.cursor = at + count,
            InputOutcome::Clamped => self.cursor = self.draft_len(),
            InputOutcome::Cleared => self.cursor = 0,
            InputOutcome::Ignored => {}
        }
        self.clamp_cursor();
        self.dirty = true;
        Ok(())
    }

    fn handle_calendar_key(&mut self, key_event: KeyEvent) {
        // Arrows walk days and weeks, crossing into the neighbouring month as needed
        match key_event.code {
            KeyCode::Left => self.move_calendar_cursor(-1),
            KeyCode::Right => self.move_calendar_cursor(1),
            KeyCode::Up => self.move_calendar_cursor(-7),
            KeyCode::Down => self.move_calendar_cursor(7),
            KeyCode::PageUp | KeyCode::Char('<') => self.show_month(self.month.prev()),
            KeyCode::PageDown | KeyCode::Char('>') => self.show_month(self.month.next()),
            KeyCode::Enter => {
                // Selecting never writes; today resumes editing, any other day is read-only
                self.select_day(self.calendar_cursor);
                self.focus = Focus::Editor;
            }
            _ => return,
        }
        self.dirty = true;
    }

    fn handle_history_key(&mut self, key_event: KeyEvent) {
        // Rows run from today back six days
        match key_event.code {
            KeyCode::Up => self.history_cursor = self.history_cursor.saturating_sub(1),
            KeyCode::Down => self.history_cursor = (self.history_cursor + 1).min(HISTORY_DAYS - 1),
            KeyCode::Enter => {
                if let Some(entry) = self.editor.history().get(self.history_cursor) {
                    if entry.is_today {
                        self.return_to_today();
                    } else {
                        self.select_day(entry.day);
                    }
                }
                self.focus = Focus::Editor;
            }
            _ => return,
        }
        self.dirty = true;
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => {
                self.calendar_cursor = self.editor.active_day();
                self.month = Month::of(self.calendar_cursor);
                Focus::Calendar
            }
            Focus::Calendar => {
                self.history_cursor = 0;
                Focus::History
            }
            Focus::History => Focus::Editor,
        };
        self.dirty = true;
    }

    fn move_calendar_cursor(&mut self, days: i64) {
        let mut cursor = self.calendar_cursor;
        for _ in 0..days.unsigned_abs() {
            let step = if days < 0 { cursor.pred() } else { cursor.succ() };
            // Stop at the edge of the representable calendar
            let Some(next) = step else { break };
            cursor = next;
        }
        self.calendar_cursor = cursor;
        // The grid follows the cursor into the next or previous month
        self.month = Month::of(self.calendar_cursor);
    }

    fn show_month(&mut self, month: Month) {
        // Keep the same day number, clamped to the shorter month
        let day = self.calendar_cursor.day_number().min(month.days_in_month());
        if let Some(cursor) = month.day(day) {
            self.calendar_cursor = cursor;
        }
        self.month = month;
    }

    fn select_day(&mut self, day: DayKey) {
        debug!(%day, "selected day");
        self.editor.select_day(day);
        self.cursor = self.draft_len();
    }

    fn return_to_today(&mut self) {
        self.editor.select_today();
        self.focus = Focus::Editor;
        self.month = Month::of(self.editor.today());
        self.calendar_cursor = self.editor.today();
        self.cursor = self.draft_len();
        self.dirty = true;
    }

    // The session moved past midnight; point the sidebar at the new day.
    fn follow_new_day(&mut self) {
        let today = self.editor.today();
        info!(%today, "following the new day");
        self.month = Month::of(today);
        self.calendar_cursor = today;
        self.history_cursor = 0;
        if self.editor.active_day() == today {
            self.cursor = self.draft_len();
        }
    }

    fn draft_len(&self) -> usize {
        self.editor.draft().chars().count()
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.draft_len());
    }

    fn main_x(&self) -> u16 {
        SIDEBAR_WIDTH + 2
    }

    fn main_width(&self) -> u16 {
        self.terminal_width
            .saturating_sub(self.main_x() + 2)
            .max(MAIN_MIN_WIDTH)
    }

    fn render(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut stdout = io::stdout();
        execute!(stdout, Hide, Clear(ClearType::All))?;

        self.render_header()?;
        self.render_calendar()?;
        self.render_history()?;
        let cursor = self.render_editor()?;
        self.render_status_bar()?;

        match (self.focus, cursor) {
            (Focus::Editor, Some((x, y))) if self.editor.mode() == ViewMode::EditingToday => {
                execute!(stdout, MoveTo(x, y), Show)?;
            }
            _ => execute!(stdout, Hide)?,
        }

        stdout.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn render_header(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let label = self.editor.today().label();
        let label_x = self
            .terminal_width
            .saturating_sub(label.chars().count() as u16 + 2);
        execute!(
            stdout,
            MoveTo(2, 1),
            SetAttribute(Attribute::Bold),
            Print("twofourty"),
            SetAttribute(Attribute::Reset),
            MoveTo(label_x, 1),
            SetForegroundColor(Color::DarkGrey),
            Print(label),
            ResetColor
        )
    }

    fn render_calendar(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let focused = self.focus == Focus::Calendar;

        let title = format!("‹  {}  ›", self.month.label());
        let title_x = 2 + (7 * CELL_WIDTH).saturating_sub(title.chars().count() as u16) / 2;
        execute!(
            stdout,
            MoveTo(title_x, 3),
            SetForegroundColor(if focused { Color::White } else { Color::Grey }),
            Print(title),
            ResetColor
        )?;

        for (i, name) in WEEKDAY_HEADER.iter().enumerate() {
            execute!(
                stdout,
                MoveTo(2 + i as u16 * CELL_WIDTH + 1, 4),
                SetForegroundColor(Color::DarkGrey),
                Print(name),
                ResetColor
            )?;
        }

        let selected = self.editor.selected().map(|s| s.day);
        for (i, cell) in self.editor.calendar(self.month).iter().enumerate() {
            let Some(day) = cell.day.filter(|_| cell.is_current_month) else {
                continue;
            };
            let x = 2 + (i % 7) as u16 * CELL_WIDTH;
            let y = 5 + (i / 7) as u16;
            let marker = match (cell.has_entry, cell.locked) {
                (true, true) => '•',
                (true, false) => '·',
                _ => ' ',
            };
            let color = if cell.is_today {
                Color::Yellow
            } else if Some(day) == selected {
                Color::Cyan
            } else if cell.has_entry {
                Color::White
            } else {
                Color::DarkGrey
            };

            execute!(stdout, MoveTo(x, y), SetForegroundColor(color))?;
            if focused && day == self.calendar_cursor {
                execute!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            execute!(
                stdout,
                Print(format!("{:>3}{}", cell.day_number, marker)),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_history(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let top = 13;
        let focused = self.focus == Focus::History;
        let preview_width = (SIDEBAR_WIDTH - 20) as usize;

        for (i, entry) in self.editor.history().iter().enumerate() {
            let y = top + i as u16;
            let mut label = if entry.is_today { "today".to_string() } else { entry.label.clone() };
            if entry.locked {
                label.push_str(" •");
            }
            let preview = if entry.has_entry {
                view::truncate(&entry.preview, preview_width)
            } else {
                "no entry".to_string()
            };

            execute!(stdout, MoveTo(2, y))?;
            if focused && i == self.history_cursor {
                execute!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            execute!(
                stdout,
                SetForegroundColor(if entry.is_today { Color::White } else { Color::Grey }),
                Print(format!("{:<18}", label)),
                SetAttribute(Attribute::Reset),
                SetForegroundColor(Color::DarkGrey),
                Print(preview),
                ResetColor
            )?;
        }
        Ok(())
    }

    /// Draws the text pane and returns the screen position of the cursor.
    fn render_editor(&self) -> io::Result<Option<(u16, u16)>> {
        let mut stdout = io::stdout();
        let x = self.main_x();
        let width = self.main_width();

        execute!(
            stdout,
            MoveTo(x, 3),
            SetForegroundColor(Color::DarkGrey),
            Print(view::progress_bar(self.editor.progress(), width as usize)),
            ResetColor,
            MoveTo(x, 4),
            Print("daily entry")
        )?;

        if self.editor.counter_visible() {
            let counter = format!("{} / {} words", self.editor.word_count(), MAX_WORDS);
            let counter_x = x + width.saturating_sub(counter.chars().count() as u16);
            execute!(stdout, MoveTo(counter_x, 4), Print(counter))?;
        }

        if let Some(streak) = view::streak_label(self.editor.streak()) {
            execute!(
                stdout,
                MoveTo(x, 5),
                SetForegroundColor(Color::Yellow),
                Print(streak),
                ResetColor
            )?;
        }

        if let Some(notice) = self.editor.notice() {
            execute!(
                stdout,
                MoveTo(x, 6),
                SetForegroundColor(Color::DarkGrey),
                Print(notice),
                ResetColor
            )?;
        }

        let top = 8;
        let visible_height = self.terminal_height.saturating_sub(top + 4).max(1) as usize;

        if self.editor.draft().is_empty() {
            execute!(
                stdout,
                MoveTo(x, top),
                SetForegroundColor(Color::DarkGrey),
                Print(view::truncate(self.editor.placeholder(), width as usize)),
                ResetColor
            )?;
            return Ok(Some((x, top)));
        }

        let (lines, (cursor_row, cursor_col)) =
            view::wrap(self.editor.draft(), width as usize, self.cursor);
        let offset = (cursor_row + 1).saturating_sub(visible_height);
        let color = match self.editor.mode() {
            ViewMode::EditingToday => Color::White,
            _ => Color::Grey,
        };

        execute!(stdout, SetForegroundColor(color))?;
        for (row, line) in lines.iter().skip(offset).take(visible_height).enumerate() {
            execute!(stdout, MoveTo(x, top + row as u16), Print(line))?;
        }
        execute!(stdout, ResetColor)?;

        Ok(Some((
            x + cursor_col as u16,
            top + (cursor_row - offset) as u16,
        )))
    }

    fn render_status_bar(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let x = self.main_x();
        let y = self.terminal_height.saturating_sub(3);

        let color = match self.editor.mode() {
            ViewMode::EditingToday if !self.editor.can_lock() => Color::DarkGrey,
            _ => Color::Grey,
        };
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(color),
            Print(self.editor.status_line()),
            ResetColor
        )?;

        if self.editor.limit_reached() {
            execute!(
                stdout,
                MoveTo(x, y + 1),
                SetForegroundColor(Color::Red),
                Print(LIMIT_NOTICE),
                ResetColor
            )?;
        }

        execute!(
            stdout,
            MoveTo(2, y + 2),
            SetForegroundColor(Color::DarkGrey),
            Print("tab focus · esc today · ctrl+l lock in · ctrl+q quit"),
            ResetColor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::entry::EntryStore;
    use crate::storage::MemoryStorage;

    fn app_with(storage: MemoryStorage) -> App<MemoryStorage> {
        let today = DayKey::parse("2024-03-15").unwrap();
        let store = EntryStore::new(storage, FixedClock(today));
        let editor = EditorController::hydrate(store, Duration::from_secs(3));
        App::with_size(editor, 120, 40)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App<MemoryStorage>, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn typing_autosaves_every_keystroke() {
        let mut app = app_with(MemoryStorage::new());

        type_str(&mut app, "hi");

        assert_eq!(app.editor.draft(), "hi");
        assert_eq!(
            app.editor.store().storage().get("twofourty-entry-2024-03-15").as_deref(),
            Some("hi")
        );
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn editing_in_the_middle_moves_the_cursor() {
        let mut app = app_with(MemoryStorage::new());
        type_str(&mut app, "ac");
        app.handle_key_event(key(KeyCode::Left)).unwrap();
        type_str(&mut app, "b");
        assert_eq!(app.editor.draft(), "abc");

        app.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.editor.draft(), "ac");
        assert_eq!(app.cursor, 1);

        app.handle_key_event(key(KeyCode::Delete)).unwrap();
        assert_eq!(app.editor.draft(), "a");
    }

    #[test]
    fn paste_goes_through_the_word_limit() {
        let mut app = app_with(MemoryStorage::new());
        let pasted = vec!["word"; MAX_WORDS + 5].join(" ");

        app.insert_text(&pasted).unwrap();

        assert_eq!(app.editor.word_count(), MAX_WORDS);
        assert_eq!(app.cursor, app.draft_len());
    }

    #[test]
    fn ctrl_l_locks_and_blocks_typing() {
        let mut app = app_with(MemoryStorage::new());
        type_str(&mut app, "done");

        app.handle_key_event(ctrl('l')).unwrap();
        type_str(&mut app, "!");

        assert_eq!(app.editor.mode(), ViewMode::LockedToday);
        assert_eq!(app.editor.draft(), "done");
    }

    #[test]
    fn calendar_selection_is_read_only_and_esc_returns() {
        let mut storage = MemoryStorage::new();
        storage.set("twofourty-entry-2024-03-14", "yesterday").unwrap();
        let mut app = app_with(storage);
        type_str(&mut app, "today");

        app.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Calendar);
        app.handle_key_event(key(KeyCode::Left)).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.editor.mode(), ViewMode::ViewingOther);
        assert_eq!(app.editor.draft(), "yesterday");
        type_str(&mut app, "x");
        assert_eq!(app.editor.draft(), "yesterday");

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.editor.mode(), ViewMode::EditingToday);
        assert_eq!(app.editor.draft(), "today");
        assert_eq!(
            app.editor.store().get(DayKey::parse("2024-03-14").unwrap()).unwrap().text,
            "yesterday"
        );
    }

    #[test]
    fn calendar_paging_keeps_the_day_in_range() {
        let mut app = app_with(MemoryStorage::new());
        app.calendar_cursor = DayKey::parse("2024-03-31").unwrap();
        app.focus = Focus::Calendar;

        app.handle_key_event(key(KeyCode::PageUp)).unwrap();

        assert_eq!(app.month, Month::of(DayKey::from_ymd(2024, 2, 1).unwrap()));
        assert_eq!(app.calendar_cursor, DayKey::parse("2024-02-29").unwrap());

        app.handle_key_event(key(KeyCode::Char('>'))).unwrap();
        assert_eq!(app.month, Month::of(DayKey::from_ymd(2024, 3, 1).unwrap()));
    }

    #[test]
    fn calendar_arrows_walk_across_month_edges() {
        let mut app = app_with(MemoryStorage::new());
        app.calendar_cursor = DayKey::parse("2024-03-31").unwrap();
        app.focus = Focus::Calendar;

        app.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(app.calendar_cursor, DayKey::parse("2024-04-01").unwrap());
        assert_eq!(app.month, Month::of(app.calendar_cursor));

        app.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(app.calendar_cursor, DayKey::parse("2024-03-25").unwrap());
        assert_eq!(app.month.label(), "Mär. 2024");
    }

    #[test]
    fn history_enter_selects_the_row() {
        let mut storage = MemoryStorage::new();
        storage.set("twofourty-entry-2024-03-13", "two days ago").unwrap();
        let mut app = app_with(storage);

        app.handle_key_event(key(KeyCode::Tab)).unwrap();
        app.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::History);
        app.handle_key_event(key(KeyCode::Down)).unwrap();
        app.handle_key_event(key(KeyCode::Down)).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.editor.active_day(), DayKey::parse("2024-03-13").unwrap());
        assert_eq!(app.editor.draft(), "two days ago");
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut app = app_with(MemoryStorage::new());
        assert!(app.handle_key_event(ctrl('q')).unwrap());
        assert!(!app.handle_key_event(key(KeyCode::Char('q'))).unwrap());
    }
}
