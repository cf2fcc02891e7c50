use crate::generator::generate_square;
use crate::{
    BingoError, CompletedLines, CompletionState, DateKey, Grid, LineId, PoolProvider,
    SessionStore, StoreError,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// The persisted unit: one day's card and the player's progress on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub grid: Vec<String>,
    pub checked: Vec<bool>,
    pub completed_lines: Vec<usize>,
    pub date: DateKey,
}

impl SessionRecord {
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(StoreError::Corrupt)
    }
}

/// Outcome of checking or unchecking one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub index: usize,
    /// New state of the cell
    pub checked: bool,
    /// Lines completed by this toggle that were not complete before it
    pub newly_completed: Vec<LineId>,
    pub bingo_count: usize,
}

/// The live daily session.
///
/// Owns the store and keeps it in step with every mutation. A session only
/// ever holds one day's card; moving to another day replaces grid, checks and
/// lines together.
pub struct Session<S, P> {
    store: S,
    provider: P,
    side: usize,
    date: DateKey,
    grid: Grid,
    completion: CompletionState,
    lines: CompletedLines,
}

impl<S: SessionStore, P: PoolProvider> Session<S, P> {
    /// Resume today's stored session, or start a new one.
    ///
    /// Stored records from another day, with the wrong shape, or that fail to
    /// parse are discarded and replaced by a freshly generated card.
    pub fn open(store: S, provider: P, today: DateKey, side: usize) -> Result<Self, BingoError> {
        let restored = match store.load() {
            Ok(Some(record)) => Self::restore(record, &today, side),
            Ok(None) => None,
            Err(StoreError::Corrupt(e)) => {
                warn!("discarding unreadable session record: {}", e);
                None
            }
            Err(e) => return Err(e.into()),
        };

        match restored {
            Some((grid, completion)) => {
                debug!("resumed session for {}", today);
                let lines = completion.completed_lines();
                Ok(Self {
                    store,
                    provider,
                    side,
                    date: today,
                    grid,
                    completion,
                    lines,
                })
            }
            None => {
                let grid = Self::fresh_grid(&provider, &today, side)?;
                let mut session = Self {
                    store,
                    provider,
                    side,
                    date: today,
                    grid,
                    completion: CompletionState::new(side),
                    lines: CompletedLines::new(),
                };
                session.persist()?;
                info!("started new session for {}", today);
                Ok(session)
            }
        }
    }

    fn restore(
        record: SessionRecord,
        today: &DateKey,
        side: usize,
    ) -> Option<(Grid, CompletionState)> {
        if record.date != *today {
            info!("stored session is from {}, starting {}", record.date, today);
            return None;
        }
        if record.grid.len() != side * side {
            warn!(
                "stored card has {} cells, expected {}",
                record.grid.len(),
                side * side
            );
            return None;
        }

        let grid = Grid::from_labels(record.grid).ok()?;
        let completion = match CompletionState::from_checked(side, record.checked) {
            Ok(completion) => completion,
            Err(e) => {
                warn!("stored check marks are unusable: {}", e);
                return None;
            }
        };

        let stored_lines = CompletedLines::from_indices(&record.completed_lines, side);
        if stored_lines != completion.completed_lines() {
            debug!("stored completed lines were stale, recomputing");
        }
        Some((grid, completion))
    }

    fn fresh_grid(provider: &P, date: &DateKey, side: usize) -> Result<Grid, BingoError> {
        let pool = provider.pool_for(date);
        generate_square(date, &pool, side)
    }

    /// Replace everything with a new card for `date`. The grid is generated
    /// before any state changes, so a failure leaves the session untouched.
    fn start_fresh(&mut self, date: DateKey) -> Result<(), BingoError> {
        let grid = Self::fresh_grid(&self.provider, &date, self.side)?;
        self.date = date;
        self.grid = grid;
        self.completion = CompletionState::new(self.side);
        self.lines = CompletedLines::new();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), BingoError> {
        let record = self.record();
        self.store.save(&record)?;
        Ok(())
    }

    /// Check or uncheck one cell and persist the result.
    ///
    /// If the store rejects the write the toggle is undone, so memory and
    /// storage never disagree.
    pub fn toggle(&mut self, index: usize) -> Result<Toggle, BingoError> {
        let previous = self.lines.clone();
        let checked = self.completion.toggle(index)?;
        self.lines = self.completion.completed_lines();

        if let Err(e) = self.persist() {
            self.completion.toggle(index)?;
            self.lines = previous;
            return Err(e);
        }

        let newly_completed = self.lines.newly_completed(&previous);
        debug!(
            "cell {} {} ({} lines complete)",
            index,
            if checked { "checked" } else { "unchecked" },
            self.lines.len()
        );
        for line in &newly_completed {
            info!("bingo on {}", line);
        }

        Ok(Toggle {
            index,
            checked,
            newly_completed,
            bingo_count: self.lines.len(),
        })
    }

    /// Move to `today` if the calendar has rolled over. Returns whether the
    /// session was replaced.
    pub fn refresh(&mut self, today: DateKey) -> Result<bool, BingoError> {
        if today == self.date {
            return Ok(false);
        }
        info!("day changed from {} to {}, starting a new card", self.date, today);
        self.start_fresh(today)?;
        Ok(true)
    }

    /// Throw away all progress and start `today`'s card from scratch.
    pub fn reset(&mut self, today: DateKey) -> Result<(), BingoError> {
        self.store.clear()?;
        self.start_fresh(today)?;
        info!("session reset for {}", self.date);
        Ok(())
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    pub fn completed_lines(&self) -> &CompletedLines {
        &self.lines
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.completion.is_checked(index)
    }

    /// Number of lines complete right now; unchecking can lower it.
    pub fn bingo_count(&self) -> usize {
        self.lines.len()
    }

    pub fn checked_count(&self) -> usize {
        self.completion.checked_count()
    }

    /// Share of cells checked, `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        if self.grid.is_empty() {
            0.0
        } else {
            self.checked_count() as f32 / self.grid.len() as f32
        }
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            grid: self.grid.labels().to_vec(),
            checked: self.completion.as_slice().to_vec(),
            completed_lines: self.lines.to_indices(self.side),
            date: self.date,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate, FileStore, ItemPool, MemoryStore, SeasonalPool, CARD_CELLS};

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn open(store: MemoryStore, today: &str) -> Session<MemoryStore, SeasonalPool> {
        Session::open(store, SeasonalPool::park(), key(today), 5).unwrap()
    }

    /// Fails every save after the first `allowed`
    struct FlakyStore {
        inner: MemoryStore,
        allowed: usize,
    }

    impl SessionStore for FlakyStore {
        fn load(&self) -> Result<Option<SessionRecord>, StoreError> {
            self.inner.load()
        }

        fn save(&mut self, record: &SessionRecord) -> Result<(), StoreError> {
            if self.allowed == 0 {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.allowed -= 1;
            self.inner.save(record)
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_open_generates_and_persists() {
        let session = open(MemoryStore::new(), "2025-01-01");
        assert_eq!(session.date(), key("2025-01-01"));
        assert_eq!(session.grid().len(), CARD_CELLS);
        assert_eq!(session.checked_count(), 0);

        let stored = session.store().load().unwrap().unwrap();
        assert_eq!(stored, session.record());

        let pool = SeasonalPool::park().pool_for(&key("2025-01-01"));
        let expected = generate(&key("2025-01-01"), &pool, CARD_CELLS).unwrap();
        assert_eq!(session.grid(), &expected);
    }

    #[test]
    fn test_reopen_same_day_keeps_progress() {
        let mut session = open(MemoryStore::new(), "2025-01-01");
        session.toggle(3).unwrap();
        session.toggle(17).unwrap();

        let store = session.store().clone();
        let resumed = open(store, "2025-01-01");
        assert!(resumed.is_checked(3));
        assert!(resumed.is_checked(17));
        assert_eq!(resumed.checked_count(), 2);
        assert_eq!(resumed.grid(), session.grid());
    }

    #[test]
    fn test_stale_record_is_replaced() {
        let mut session = open(MemoryStore::new(), "2025-01-01");
        for i in 0..5 {
            session.toggle(i).unwrap();
        }
        let old_grid = session.grid().clone();

        let fresh = open(session.store().clone(), "2025-01-02");
        assert_eq!(fresh.date(), key("2025-01-02"));
        assert!(fresh.completion().as_slice().iter().all(|&c| !c));
        assert!(fresh.completed_lines().is_empty());
        assert_ne!(fresh.grid(), &old_grid);

        let stored = fresh.store().load().unwrap().unwrap();
        assert_eq!(stored.date, key("2025-01-02"));
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let session = open(MemoryStore::with_blob("definitely not json"), "2025-04-01");
        assert_eq!(session.checked_count(), 0);
        assert_eq!(session.store().load().unwrap(), Some(session.record()));
    }

    #[test]
    fn test_misshapen_record_is_discarded() {
        let record = SessionRecord {
            grid: vec!["only".into(), "three".into(), "cells".into()],
            checked: vec![true, true, true],
            completed_lines: vec![0],
            date: key("2025-04-01"),
        };
        let store = MemoryStore::with_blob(record.to_json().unwrap());
        let session = open(store, "2025-04-01");
        assert_eq!(session.grid().len(), 25);
        assert_eq!(session.checked_count(), 0);

        let mut record = session.record();
        record.checked.pop();
        let session = open(MemoryStore::with_blob(record.to_json().unwrap()), "2025-04-01");
        assert_eq!(session.completion().as_slice().len(), 25);
    }

    #[test]
    fn test_stored_lines_are_recomputed() {
        let mut record = open(MemoryStore::new(), "2025-04-01").record();
        record.checked[..5].iter_mut().for_each(|c| *c = true);
        record.completed_lines = vec![3, 7];

        let session = open(MemoryStore::with_blob(record.to_json().unwrap()), "2025-04-01");
        assert_eq!(
            session.completed_lines().iter().collect::<Vec<_>>(),
            [LineId::Row(0)]
        );
    }

    #[test]
    fn test_toggle_reports_new_lines() {
        let mut session = open(MemoryStore::new(), "2025-06-10");
        for i in [0, 6, 12, 18] {
            let toggle = session.toggle(i).unwrap();
            assert!(toggle.checked);
            assert!(toggle.newly_completed.is_empty());
        }

        let toggle = session.toggle(24).unwrap();
        assert_eq!(toggle.newly_completed, [LineId::MainDiagonal]);
        assert_eq!(toggle.bingo_count, 1);

        let stored = session.store().load().unwrap().unwrap();
        assert_eq!(stored.completed_lines, [10]);
        assert!(stored.checked[24]);
    }

    #[test]
    fn test_bingo_count_is_a_live_snapshot() {
        let mut session = open(MemoryStore::new(), "2025-06-10");
        for i in [10, 11, 12, 13, 14, 2, 7, 17, 22] {
            session.toggle(i).unwrap();
        }
        assert_eq!(session.bingo_count(), 2);

        let toggle = session.toggle(12).unwrap();
        assert!(!toggle.checked);
        assert!(toggle.newly_completed.is_empty());
        assert_eq!(toggle.bingo_count, 0);
        assert_eq!(session.bingo_count(), 0);

        let toggle = session.toggle(12).unwrap();
        assert_eq!(toggle.newly_completed, [LineId::Row(2), LineId::Column(2)]);
        assert_eq!(session.bingo_count(), 2);
    }

    #[test]
    fn test_toggle_out_of_bounds_changes_nothing() {
        let mut session = open(MemoryStore::new(), "2025-06-10");
        assert!(matches!(
            session.toggle(25),
            Err(BingoError::CellOutOfBounds { index: 25, len: 25 })
        ));
        assert_eq!(session.checked_count(), 0);
    }

    #[test]
    fn test_failed_save_rolls_back_toggle() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            allowed: 1,
        };
        let mut session = Session::open(store, SeasonalPool::park(), key("2025-06-10"), 5).unwrap();

        assert!(matches!(
            session.toggle(4),
            Err(BingoError::Store(StoreError::Io(_)))
        ));
        assert!(!session.is_checked(4));
        assert!(session.store().load().unwrap().unwrap().checked.iter().all(|&c| !c));
    }

    #[test]
    fn test_refresh_only_on_day_change() {
        let mut session = open(MemoryStore::new(), "2025-08-31");
        session.toggle(0).unwrap();

        assert!(!session.refresh(key("2025-08-31")).unwrap());
        assert!(session.is_checked(0));

        assert!(session.refresh(key("2025-09-01")).unwrap());
        assert_eq!(session.date(), key("2025-09-01"));
        assert_eq!(session.checked_count(), 0);
        assert!(session.grid().labels().iter().all(|l| l != "Grill"));
    }

    #[test]
    fn test_reset_clears_progress_keeps_card() {
        let mut session = open(MemoryStore::new(), "2025-02-02");
        let grid = session.grid().clone();
        for i in 0..5 {
            session.toggle(i).unwrap();
        }

        session.reset(key("2025-02-02")).unwrap();
        assert_eq!(session.grid(), &grid);
        assert_eq!(session.checked_count(), 0);
        assert_eq!(session.bingo_count(), 0);
        assert_eq!(session.store().load().unwrap(), Some(session.record()));
    }

    #[test]
    fn test_small_pool_is_surfaced() {
        let pool = ItemPool::new((0..10).map(|i| i.to_string()));
        let result = Session::open(MemoryStore::new(), pool, key("2025-02-02"), 5);
        assert!(matches!(
            result,
            Err(BingoError::PoolTooSmall {
                available: 10,
                required: 25
            })
        ));
    }

    #[test]
    fn test_progress() {
        let mut session = open(MemoryStore::new(), "2025-02-02");
        assert_eq!(session.progress(), 0.0);
        for i in 0..5 {
            session.toggle(i).unwrap();
        }
        assert!((session.progress() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_file_store_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("park_bingo.json");

        let mut session = Session::open(
            FileStore::new(&path),
            SeasonalPool::park(),
            key("2025-10-19"),
            5,
        )
        .unwrap();
        session.toggle(12).unwrap();

        let resumed = Session::open(
            FileStore::new(&path),
            SeasonalPool::park(),
            key("2025-10-19"),
            5,
        )
        .unwrap();
        assert!(resumed.is_checked(12));
        assert_eq!(resumed.grid(), session.grid());
    }
}
