//! Print a day's card and play a few cells

use bingo_core::{
    completed_lines, generate, DateKey, MemoryStore, Season, SeasonalPool, Session, CARD_CELLS,
    CARD_SIDE,
};

fn main() -> Result<(), bingo_core::BingoError> {
    let date: DateKey = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or_else(DateKey::today);

    let park = SeasonalPool::park();
    let season = Season::of(date.date());
    let pool = park.items(season);
    println!("Card for {} ({}, {} labels in the pool)\n", date, season, pool.len());

    let grid = generate(&date, &pool, CARD_CELLS)?;
    println!("{}", grid);

    // The detector on its own
    let mut checked = vec![false; CARD_CELLS];
    for i in [0, 6, 12, 18, 24] {
        checked[i] = true;
    }
    let lines = completed_lines(&checked, CARD_SIDE)?;
    println!("Diagonal check-offs complete: {:?}\n", lines.iter().collect::<Vec<_>>());

    // A session in memory
    let mut session = Session::open(MemoryStore::new(), park, date, CARD_SIDE)?;
    for index in [4, 8, 12, 16, 20] {
        let toggle = session.toggle(index)?;
        let label = session.grid().get(index).unwrap_or_default();
        println!("Checked {:<22} new lines: {:?}", label, toggle.newly_completed);
    }
    println!(
        "\n{} Bingo{}! Progress {}/{}",
        session.bingo_count(),
        if session.bingo_count() == 1 { "" } else { "s" },
        session.checked_count(),
        CARD_CELLS
    );

    Ok(())
}
