//! Animated grid search in the terminal.
//!
//! Run: cargo run --bin gridpath -- --algorithm astar --priority euclidean

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::{Point, Snapshot};
use gridpath_demos::{Action, Board, DEFAULT_MAP, HELP, Shade};
use gridpath_search::{SearchConfig, SearchEvent, SearchRun, SleepTicks, Tick, TickSource};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text map: `.` empty, `#` wall, `S` start, `G` goal. Defaults to a
    /// built-in maze.
    map: Option<PathBuf>,

    /// Search algorithm: dfs, bfs or astar
    #[arg(short, long, default_value = "bfs")]
    algorithm: String,

    /// Neighbour order for dfs/bfs (topLeft, topRight, bottomLeft,
    /// bottomRight) or heuristic for astar (manhattan, euclidean)
    #[arg(short, long, default_value = "default")]
    priority: String,

    /// Milliseconds between steps
    #[arg(short, long, default_value_t = 50)]
    delay: u64,

    /// Write debug logs to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print events line by line instead of animating the grid
    #[arg(long)]
    plain: bool,
}

/// How long to block on input once a run has finished.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn shade_style(shade: Shade) -> (char, Color, Color) {
    match shade {
        Shade::Empty => ('.', Color::DarkGrey, Color::Reset),
        Shade::Wall => ('#', Color::Grey, Color::DarkGrey),
        Shade::Start => ('S', Color::Black, Color::Green),
        Shade::Goal => ('G', Color::Black, Color::Red),
        Shade::Visited => ('o', Color::Blue, Color::Reset),
        Shade::Path => ('*', Color::Black, Color::Yellow),
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Raw-mode alternate screen; restored on drop.
struct Screen {
    out: io::Stdout,
}

impl Screen {
    fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    fn draw(&mut self, board: &Board, status: &str) -> io::Result<()> {
        let s = board.snapshot();
        for y in 0..s.height() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for x in 0..s.width() {
                let (ch, fg, bg) = shade_style(board.shade(Point::new(x, y)));
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(ch)
                )?;
            }
        }
        let line = s.height() as u16 + 1;
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, line),
            terminal::Clear(ClearType::CurrentLine),
            Print(status),
            cursor::MoveTo(0, line + 1),
            Print(HELP)
        )?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Waits between ticks by polling the keyboard until the delay runs out.
/// Key presses are queued for the main loop.
#[derive(Default)]
struct KeyTicks {
    actions: Vec<Action>,
    error: Option<io::Error>,
}

impl KeyTicks {
    fn poll(&mut self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(());
            }
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                if let Some(action) = Action::from_key(code) {
                    self.actions.push(action);
                    return Ok(());
                }
            }
            if left.is_zero() {
                return Ok(());
            }
        }
    }

    fn take(&mut self) -> io::Result<Vec<Action>> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(std::mem::take(&mut self.actions)),
        }
    }
}

impl TickSource for KeyTicks {
    fn wait(&mut self, delay: Duration) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.poll(delay) {
            self.error = Some(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Main loops
// ---------------------------------------------------------------------------

fn animate(snapshot: &Snapshot, config: &SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = Board::new(snapshot.clone());
    let mut run = SearchRun::start(snapshot, config)?;
    let mut screen = Screen::open()?;
    let mut ticks = KeyTicks::default();

    loop {
        match run.tick() {
            Tick::Continue(event) => {
                if let Some(e) = event {
                    board.apply(&e);
                }
                screen.draw(&board, &board.status(config, run.delay()))?;
                ticks.wait(run.delay());
            }
            Tick::Finished(e) => {
                board.apply(&e);
                screen.draw(&board, &board.status(config, run.delay()))?;
            }
            Tick::Idle => ticks.wait(IDLE_POLL),
        }

        for action in ticks.take()? {
            match action {
                Action::Quit => {
                    run.cancel();
                    return Ok(());
                }
                Action::Restart => {
                    run.cancel();
                    let delay = run.delay();
                    board.reset();
                    run = SearchRun::start(snapshot, config)?;
                    run.set_delay(delay);
                    log::debug!("restarted");
                }
                Action::Faster | Action::Slower => {
                    run.set_delay(action.adjust(run.delay()));
                    screen.draw(&board, &board.status(config, run.delay()))?;
                }
            }
        }
    }
}

fn print_events(snapshot: &Snapshot, config: &SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut run = SearchRun::start(snapshot, config)?;
    let mut out = io::stdout().lock();
    let mut result = Ok(());
    run.run_with(&mut SleepTicks, |e| {
        if result.is_ok() {
            result = match e {
                SearchEvent::Visited { pos } => writeln!(out, "visited {pos}"),
                SearchEvent::Found { path_len } => writeln!(out, "found, {path_len} steps"),
                SearchEvent::PathStep { pos } => writeln!(out, "path {pos}"),
                SearchEvent::PathComplete => writeln!(out, "done"),
                SearchEvent::NotFound => writeln!(out, "no path"),
                SearchEvent::Cancelled => writeln!(out, "cancelled"),
            };
        }
    });
    Ok(result?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        let file = File::create(path)?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    let snapshot: Snapshot = match &args.map {
        Some(path) => fs::read_to_string(path)?.parse()?,
        None => DEFAULT_MAP.parse()?,
    };
    let config = SearchConfig::from_tags(&args.algorithm, &args.priority, args.delay)?;

    if args.plain {
        print_events(&snapshot, &config)
    } else {
        animate(&snapshot, &config)
    }
}
