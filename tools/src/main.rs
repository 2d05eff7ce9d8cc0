//! postle: play the daily puzzle from a terminal.
//!
//! Usage:
//!   postle --data-dir ./data --db postle.db
//!   postle --date 2024-05-03 --html
//!   postle --ipc-mode

use anyhow::Result;
use chrono::NaiveDate;
use postle_core::{
    clock::{Clock, FixedClock, SystemClock},
    config::{GameData, PostleConfig},
    controller::GameController,
    game::{GameStatus, Transition},
    posting::PostingFields,
    roster::Suggestion,
    store::{GameStore, SqliteStorage},
    types::{AuthorName, DATE_FORMAT},
    view::{render_posting, InputState, MarkupSurface, Region},
};
use std::env;
use std::io::{self, BufRead, Write};

type Session = GameController<SqliteStorage, MarkupSurface>;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Guess { name: String },
    Suggest { fragment: String },
    Render,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    date:         String,
    status:       GameStatus,
    guesses:      Vec<AuthorName>,
    guesses_left: usize,
    max_guesses:  usize,
    input:        InputState,
    accepted:     Option<bool>,
    error:        Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let html = args.iter().any(|a| a == "--html");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let db = string_arg(&args, "--db").unwrap_or("postle.db");
    let date = match string_arg(&args, "--date") {
        Some(d) => Some(
            NaiveDate::parse_from_str(d, DATE_FORMAT)
                .map_err(|e| anyhow::anyhow!("--date {d}: {e}"))?,
        ),
        None => None,
    };

    let config = PostleConfig::load(data_dir)?;
    let data = GameData::load(data_dir)?;

    let storage = if db == ":memory:" {
        SqliteStorage::in_memory()?
    } else {
        SqliteStorage::open(db)?
    };
    storage.migrate()?;

    let clock: Box<dyn Clock> = match date {
        Some(d) => Box::new(FixedClock::new(d)),
        None => Box::new(SystemClock),
    };

    let mut session = GameController::start(
        MarkupSurface::new(),
        &data.puzzles,
        data.roster,
        GameStore::new(storage, &config),
        clock.as_ref(),
        &config,
    )?;

    if ipc_mode {
        run_ipc_loop(&mut session)
    } else {
        run_interactive(&mut session, html)
    }
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("unparseable IPC command {:?}: {e}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(session, None, None);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Guess { name } => {
                let state = match session.submit(&name) {
                    Ok(t) => build_ui_state(session, Some(matches!(t, Transition::Advanced(_))), None),
                    // The guess still counts for this session.
                    Err(e) => build_ui_state(session, Some(true), Some(e.to_string())),
                };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Suggest { fragment } => {
                let suggestions: Vec<Suggestion> = session.suggestions(&fragment);
                let reply = serde_json::json!({ "suggestions": suggestions });
                writeln!(stdout, "{}", reply)?;
            }
            IpcCommand::Render => {
                let reply = serde_json::json!({ "html": session.surface().to_html() });
                writeln!(stdout, "{}", reply)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn run_interactive(session: &mut Session, html: bool) -> Result<()> {
    println!("Postle — {}", session.date());
    println!();
    print_surface(session, html);

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut line = String::new();

    while !session.status().is_terminal() {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if handle.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        if let Some(fragment) = input.strip_prefix('?') {
            for s in session.suggestions(fragment) {
                println!("  {}", s.value);
            }
            continue;
        }

        match session.submit(input) {
            Ok(Transition::Ignored(_)) => continue,
            Ok(Transition::Advanced(_)) => {}
            Err(e) => eprintln!("warning: progress not saved: {e}"),
        }
        print_guesses(session);
    }

    if let Some(fields) = session.revealed_posting() {
        println!();
        println!("{}", session.surface().input().value);
        print_revealed(&fields, html);
    }
    Ok(())
}

fn print_surface(session: &Session, html: bool) {
    let surface = session.surface();
    if html {
        println!("{}", surface.to_html());
        return;
    }
    let text = |r| surface.region(r).unwrap_or("");
    println!("{}  {}", text(Region::Status), text(Region::Rating));
    println!("{}", text(Region::Published));
    println!("---");
    println!("{}", text(Region::Title));
    println!("{}", text(Region::Message).replace("<br>", "\n"));
    println!();
    print_guesses(session);
}

fn print_guesses(session: &Session) {
    let state = session.state();
    for (i, guess) in state.guesses().iter().enumerate() {
        println!("  {}. {guess}", i + 1);
    }
    if !state.status().is_terminal() {
        println!("  ({} left)", state.guesses_left());
    }
}

fn print_revealed(fields: &PostingFields, html: bool) {
    let mut surface = MarkupSurface::new();
    render_posting(&mut surface, fields);
    if html {
        println!("{}", surface.to_html());
        return;
    }
    println!("{}", surface.region(Region::Username).unwrap_or(""));
    if let Some(link) = surface.region(Region::Link) {
        println!("{link}");
    }
}

fn build_ui_state(session: &Session, accepted: Option<bool>, error: Option<String>) -> UiState {
    let state = session.state();
    UiState {
        date:         session.date().to_string(),
        status:       state.status(),
        guesses:      state.guesses().to_vec(),
        guesses_left: state.guesses_left(),
        max_guesses:  state.max_guesses(),
        input:        session.surface().input().clone(),
        accepted,
        error,
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
