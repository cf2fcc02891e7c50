use crate::app::App;
use crate::celebrations::CelebrationManager;
use bingo_core::{Position, SessionStore};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

/// Text columns inside one cell
pub const CELL_WIDTH: usize = 14;
/// Text lines inside one cell
pub const CELL_LINES: usize = 2;

pub fn render<S: SessionStore>(stdout: &mut io::Stdout, app: &App<S>) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    let side = app.session.side();

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let grid_width = (side * (CELL_WIDTH + 1) + 1) as u16;
    let grid_height = (side * (CELL_LINES + 1) + 1) as u16;

    let start_x = term_width.saturating_sub(grid_width) / 2;
    let start_y = if term_height > grid_height + 10 { 2 } else { 1 };

    render_header(stdout, app, start_x, start_y)?;
    render_grid(stdout, app, start_x, start_y + 3)?;
    render_status(stdout, app, start_x, start_y + 4 + grid_height)?;
    render_controls(stdout, app, start_x, start_y + 7 + grid_height)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }
    if app.confirm_reset {
        render_message(stdout, app, "Reset today's card? (y/n)", term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_header<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ PARK BINGO ═══"),
        MoveTo(x, y + 1),
        SetForegroundColor(theme.info),
        Print(format!("Card of {}", app.session.date()))
    )
}

fn render_grid<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let side = app.session.side();
    let border = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(side));

    for row in 0..side {
        let top = y + (row * (CELL_LINES + 1)) as u16;
        execute!(
            stdout,
            MoveTo(x, top),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print(&border)
        )?;

        for line in 0..CELL_LINES {
            let line_y = top + 1 + line as u16;
            execute!(
                stdout,
                MoveTo(x, line_y),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            for col in 0..side {
                render_cell_line(stdout, app, Position::new(row, col), line)?;
                execute!(
                    stdout,
                    SetBackgroundColor(theme.bg),
                    SetForegroundColor(theme.border),
                    Print("|")
                )?;
            }
        }
    }

    let bottom = y + (side * (CELL_LINES + 1)) as u16;
    execute!(
        stdout,
        MoveTo(x, bottom),
        SetForegroundColor(theme.border),
        Print(&border)
    )
}

fn render_cell_line<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    pos: Position,
    line: usize,
) -> io::Result<()> {
    let theme = &app.theme;
    let side = app.session.side();
    let index = pos.index(side);
    let checked = app.session.is_checked(index);

    let mut bg = if pos == app.cursor {
        theme.cursor_bg
    } else if checked {
        theme.checked_bg
    } else {
        theme.bg
    };
    let mut fg = if checked { theme.checked_fg } else { theme.fg };

    let intensity = app.celebrations.cell_intensity(index, side);
    if intensity > 0.0 {
        bg = CelebrationManager::throb_color(bg, intensity);
    } else if app.is_on_completed_line(index) && pos != app.cursor {
        fg = theme.bingo;
    }

    let label = app.session.grid().get(index).unwrap_or_default();
    let lines = wrap_label(label, CELL_WIDTH);
    let text = lines.get(line).map(String::as_str).unwrap_or("");

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(format!("{:^width$}", text, width = CELL_WIDTH))
    )
}

fn render_status<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let cells = session.grid().len();

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print(format!("Progress: {}/{}  ", session.checked_count(), cells))
    )?;

    let bar_width = 30;
    let filled = (session.progress() * bar_width as f32).round() as usize;
    execute!(
        stdout,
        SetForegroundColor(theme.checked_bg),
        Print("█".repeat(filled)),
        SetForegroundColor(theme.border),
        Print("░".repeat(bar_width - filled))
    )?;

    let bingos = session.bingo_count();
    if bingos > 0 {
        execute!(
            stdout,
            MoveTo(x, y + 1),
            SetForegroundColor(theme.bingo),
            Print(format!("✦ {} Bingo{}!", bingos, if bingos > 1 { "s" } else { "" }))
        )?;
    }
    Ok(())
}

fn render_controls<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space/Enter", "Check"),
        ("r", "Reset"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    for (i, (key, desc)) in controls.iter().enumerate() {
        let cx = x + (i as u16 % 3) * 22;
        let cy = y + i as u16 / 3;
        execute!(
            stdout,
            MoveTo(cx, cy),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }
    Ok(())
}

fn render_message<S: SessionStore>(
    stdout: &mut io::Stdout,
    app: &App<S>,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.cursor_bg),
        Print(&padded)
    )
}

/// Word-wrap a label into at most `CELL_LINES` lines of `width` columns.
/// Words longer than a line are split with a hyphen; overflow ends in `…`.
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut words: Vec<String> = Vec::new();
    for word in label.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= width {
            words.push(word.to_string());
        } else {
            let mut rest = &chars[..];
            while rest.len() > width {
                let (head, tail) = rest.split_at(width - 1);
                words.push(head.iter().collect::<String>() + "-");
                rest = tail;
            }
            words.push(rest.iter().collect());
        }
    }

    for word in words {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > CELL_LINES {
        lines.truncate(CELL_LINES);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(width - 1);
            *last = chars.into_iter().collect::<String>() + "…";
        }
    }
    lines
}
