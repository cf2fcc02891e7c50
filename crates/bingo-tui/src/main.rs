mod app;
mod celebrations;
mod render;
mod theme;

use anyhow::Context;
use app::{App, CardPool};
use bingo_core::{DateKey, FileStore, ItemPool, SeasonalPool, Session, SessionStore, CARD_SIDE};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use theme::Theme;

/// The daily park bingo card in your terminal
#[derive(Debug, Parser)]
#[command(name = "park-bingo", version, about)]
struct Args {
    /// Play the card of this day (YYYY-MM-DD) instead of today's
    #[arg(long)]
    date: Option<DateKey>,

    /// Directory holding the saved session
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON array of labels to use instead of the seasonal park set
    #[arg(long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Discard today's progress before starting
    #[arg(long)]
    reset: bool,

    /// Print the card and progress, then exit
    #[arg(long)]
    print: bool,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let pool = match &args.items {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading item list {}", path.display()))?;
            CardPool::Custom(ItemPool::from_json(&json)?)
        }
        None => CardPool::Seasonal(SeasonalPool::park()),
    };

    let save_path = args
        .data_dir
        .clone()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("park_bingo.json");
    log::debug!("session file: {}", save_path.display());

    let today = args.date.unwrap_or_else(DateKey::today);
    let mut session = Session::open(FileStore::new(save_path), pool, today, CARD_SIDE)
        .context("opening today's session")?;
    if args.reset {
        session.reset(today)?;
    }

    if args.print {
        print_card(&session);
        return Ok(());
    }

    let theme = if args.light { Theme::light() } else { Theme::dark() };
    let mut app = App::new(session, theme, args.date);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result.context("terminal UI failed")
}

fn run_app<S: SessionStore>(stdout: &mut io::Stdout, app: &mut App<S>) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn print_card<S: SessionStore>(session: &Session<S, CardPool>) {
    println!("Park Bingo, card of {}\n", session.date());
    print!("{}", session.grid());

    let checked: Vec<&str> = session
        .grid()
        .labels()
        .iter()
        .enumerate()
        .filter(|(i, _)| session.is_checked(*i))
        .map(|(_, label)| label.as_str())
        .collect();
    if !checked.is_empty() {
        println!("\nChecked: {}", checked.join(", "));
    }

    println!(
        "\nProgress: {}/{}",
        session.checked_count(),
        session.grid().len()
    );
    let bingos = session.bingo_count();
    if bingos > 0 {
        let lines: Vec<String> = session
            .completed_lines()
            .iter()
            .map(|line| line.to_string())
            .collect();
        println!(
            "{} Bingo{}! ({})",
            bingos,
            if bingos > 1 { "s" } else { "" },
            lines.join(", ")
        );
    }
}
