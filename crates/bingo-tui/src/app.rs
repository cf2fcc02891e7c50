use crate::celebrations::CelebrationManager;
use crate::theme::Theme;
use bingo_core::{
    BingoError, DateKey, ItemPool, PoolProvider, Position, SeasonalPool, Session, SessionStore,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Where today's labels come from
pub enum CardPool {
    Seasonal(SeasonalPool),
    Custom(ItemPool),
}

impl PoolProvider for CardPool {
    fn pool_for(&self, date: &DateKey) -> ItemPool {
        match self {
            CardPool::Seasonal(pool) => pool.pool_for(date),
            CardPool::Custom(pool) => pool.pool_for(date),
        }
    }
}

/// The main application state
pub struct App<S> {
    /// Today's session
    pub session: Session<S, CardPool>,
    /// Currently selected cell
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Highlights for newly completed lines
    pub celebrations: CelebrationManager,
    /// Waiting for the player to confirm a reset
    pub confirm_reset: bool,
    /// Date fixed on the command line; the wall clock is ignored when set
    pinned_date: Option<DateKey>,
}

impl<S: SessionStore> App<S> {
    pub fn new(session: Session<S, CardPool>, theme: Theme, pinned_date: Option<DateKey>) -> Self {
        let side = session.side();
        Self {
            session,
            cursor: Position::new(side / 2, side / 2),
            theme,
            message: None,
            message_timer: 0,
            celebrations: CelebrationManager::new(),
            confirm_reset: false,
            pinned_date,
        }
    }

    /// Faster ticks while a completed line is pulsing
    pub fn get_tick_rate(&self) -> Duration {
        if self.celebrations.has_active_celebrations() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        }
    }

    fn today(&self) -> DateKey {
        self.pinned_date.unwrap_or_else(DateKey::today)
    }

    /// Update highlights, messages and the day (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        self.celebrations.update();

        let today = self.today();
        match self.session.refresh(today) {
            Ok(true) => {
                self.celebrations.reset();
                self.confirm_reset = false;
                self.show_message(&format!("New day, new card for {}", today));
            }
            Ok(false) => {}
            Err(e) => self.report("Could not start the new day", &e),
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30;
    }

    fn report(&mut self, what: &str, e: &BingoError) {
        warn!("{}: {}", what, e);
        self.show_message(&format!("{}: {}", what, e));
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.reset();
            } else {
                self.show_message("Reset cancelled");
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor(),
            KeyCode::Char('r') => {
                if self.session.completion().is_empty() {
                    self.show_message("Nothing to reset");
                } else {
                    self.confirm_reset = true;
                }
            }
            KeyCode::Char('t') => self.theme = self.theme.toggled(),
            _ => {}
        }
        AppAction::Continue
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = self.session.side() as i32 - 1;
        let row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(row, col);
    }

    fn toggle_cursor(&mut self) {
        let index = self.cursor.index(self.session.side());
        match self.session.toggle(index) {
            Ok(toggle) => {
                if !toggle.newly_completed.is_empty() {
                    self.celebrations.start(&toggle.newly_completed);
                    self.show_message("BINGO!");
                }
            }
            Err(e) => self.report("Could not save", &e),
        }
    }

    fn reset(&mut self) {
        let today = self.today();
        match self.session.reset(today) {
            Ok(()) => {
                self.celebrations.reset();
                self.show_message("Card reset");
            }
            Err(e) => self.report("Reset failed", &e),
        }
    }

    /// Whether a cell lies on any completed line
    pub fn is_on_completed_line(&self, index: usize) -> bool {
        let side = self.session.side();
        self.session
            .completed_lines()
            .iter()
            .any(|line| line.contains(index, side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_core::{MemoryStore, SessionStore, CARD_SIDE};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App<MemoryStore> {
        let date = DateKey::parse("2025-07-01").unwrap();
        let session = Session::open(
            MemoryStore::new(),
            CardPool::Seasonal(SeasonalPool::park()),
            date,
            CARD_SIDE,
        )
        .unwrap();
        App::new(session, Theme::dark(), Some(date))
    }

    #[test]
    fn test_cursor_starts_centered_and_clamps() {
        let mut app = app();
        assert_eq!(app.cursor, Position::new(2, 2));
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Up));
            app.handle_key(key(KeyCode::Char('h')));
        }
        assert_eq!(app.cursor, Position::new(0, 0));
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.cursor, Position::new(4, 4));
    }

    #[test]
    fn test_space_toggles_cell_under_cursor() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.session.is_checked(12));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.session.is_checked(12));
    }

    #[test]
    fn test_completing_row_celebrates() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('k')));
        app.handle_key(key(KeyCode::Char('k')));
        for _ in 0..2 {
            app.handle_key(key(KeyCode::Left));
        }
        for i in 0..5 {
            app.handle_key(key(KeyCode::Char(' ')));
            if i < 4 {
                assert!(!app.celebrations.has_active_celebrations());
                app.handle_key(key(KeyCode::Right));
            }
        }
        assert_eq!(app.session.bingo_count(), 1);
        assert!(app.celebrations.has_active_celebrations());
        assert_eq!(app.message.as_deref(), Some("BINGO!"));
        assert!(app.is_on_completed_line(3));
        assert!(!app.is_on_completed_line(5));
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' ')));

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.confirm_reset);
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.session.is_checked(12));

        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.session.checked_count(), 0);
        assert_eq!(
            app.session.store().load().unwrap().unwrap().checked,
            vec![false; 25]
        );
    }

    #[test]
    fn test_pinned_date_never_rolls_over() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' ')));
        app.tick();
        assert!(app.session.is_checked(12));
        assert_eq!(app.session.date(), DateKey::parse("2025-07-01").unwrap());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(matches!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit));
        assert!(matches!(app.handle_key(key(KeyCode::Esc)), AppAction::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(app.handle_key(ctrl_c), AppAction::Quit));
    }

    #[test]
    fn test_custom_pool_provider() {
        let pool = ItemPool::new((0..30).map(|i| format!("spot {}", i)));
        let provider = CardPool::Custom(pool.clone());
        let date = DateKey::parse("2025-07-01").unwrap();
        assert_eq!(provider.pool_for(&date), pool);
    }
}
