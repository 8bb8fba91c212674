mod api;
mod app;
mod config;
mod films;
mod logging;
mod roman;
mod ui;

use api::{FilmSource, HttpFilmSource};
use app::{App, CatalogState, InputMode};
use clap::{Parser, Subcommand};
use config::{CliOverrides, Config};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use films::SortMode;
use indicatif::{ProgressBar, ProgressStyle};
use logging::LogTarget;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// TUI explorer for the Star Wars film catalog with crowd-sourced ratings
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the film catalog API
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Base URL of the ratings API
    #[arg(long, global = true)]
    ratings_url: Option<String>,

    /// Ratings API key (overrides OMDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Print the film list with ratings and exit
    List {
        /// Only list films whose title contains this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Sort order: year, episode, or title
        #[arg(long, default_value = "")]
        sort: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(CliOverrides {
        catalog_url: cli.catalog_url,
        ratings_url: cli.ratings_url,
        api_key: cli.api_key,
    })?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::List { search, sort } => {
            logging::init(&config.log_level, LogTarget::Stderr)?;
            run_list(&config, &search, SortMode::from_param(&sort)).await?;
        }
        Commands::Run => {
            logging::init(&config.log_level, LogTarget::File)?;
            log::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

            let source = Arc::new(HttpFilmSource::from_config(&config)?);
            let mut app = App::new(source, config.total_stars);
            app.load_catalog();

            // Init terminal
            let mut terminal = ratatui::init();

            // Initial page size setup
            let size = terminal.size()?;
            app.update_page_size(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                log::error!("Exiting on error: {}", e);
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_list(
    config: &Config,
    search: &str,
    sort: SortMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = Arc::new(HttpFilmSource::from_config(config)?);
    let mut app = App::new(source, config.total_stars);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Fetching films...");

    app.load_catalog();
    while app.next_event().await {
        if matches!(app.catalog, CatalogState::Loaded(_)) {
            spinner.set_message(format!("Fetching ratings ({} left)...", app.pending()));
        }
    }
    spinner.finish_and_clear();

    if let CatalogState::Error(msg) = &app.catalog {
        eprintln!("Error fetching movies: {msg}");
        std::process::exit(1);
    }

    app.set_sort_mode(sort);
    app.set_search_query(search.to_string());
    for film in app.visible_films() {
        let title = format!("Episode {} - {}", roman::to_roman(film.episode_id), film.title);
        println!(
            "EPISODE {:<3} {:<40} {}  {}",
            film.episode_id,
            title,
            app.star_rating_for(film).glyphs(),
            film.release_date
        );
    }
    Ok(())
}

async fn run_app<S: FilmSource>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_events();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so fetch results show up promptly
        if crossterm::event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key<S: FilmSource>(app: &mut App<S>, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
    } else {
        handle_list_key(app, key);
    }
}

/// Every keystroke goes straight to the search query.
fn handle_search_input<S: FilmSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.pop_search_char();
        }
        KeyCode::Char(c) => {
            app.push_search_char(c);
        }
        _ => {}
    }
}

fn handle_list_key<S: FilmSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('r') => {
            if matches!(app.catalog, CatalogState::Error(_)) {
                app.load_catalog();
            }
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('o') => {
            app.cycle_sort_mode();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Char('g') => {
            app.list_first();
        }
        KeyCode::Char('G') => {
            app.list_last();
        }
        KeyCode::Char('J') => {
            app.scroll_down();
        }
        KeyCode::Char('K') => {
            app.scroll_up();
        }
        KeyCode::Enter => {
            app.select_highlighted();
        }
        KeyCode::Esc => {
            // Clear search
            if !app.search_query.is_empty() {
                app.set_search_query(String::new());
            }
        }
        _ => {}
    }
}
