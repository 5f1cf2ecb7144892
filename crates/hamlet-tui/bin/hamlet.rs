//! Hamlet: seeded town generator
//!
//! Main entry point for the viewer.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use hamlet_core::{TownConfig, TownRng, generate_with_retries};
use hamlet_tui::{App, PaletteMode, Theme, logging};

/// Procedural town generator
#[derive(Parser, Debug)]
#[command(name = "hamlet")]
#[command(author, version, about = "Hamlet - grow a town from a seed", long_about = None)]
struct Args {
    /// Seed for the first town (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// JSON file with generation tunables
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Failed attempts tolerated before giving up
    #[arg(long = "max-retries")]
    max_retries: Option<u32>,

    /// Print the town as text and exit
    #[arg(long = "print")]
    print: bool,

    /// Palette for the interactive view (pico8, ansi)
    #[arg(long = "palette", default_value = "pico8")]
    palette: PaletteMode,

    /// Debug logging in print mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(|| TownRng::from_entropy().seed());

    if args.print {
        return print_town(&config, seed, args.verbose);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::detect().with_palette(args.palette);
    let mut app = App::new(config, seed, theme);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn load_config(args: &Args) -> io::Result<TownConfig> {
    let mut config = match &args.config {
        Some(path) => TownConfig::load_from_file(path).map_err(io::Error::other)?,
        None => TownConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(max_retries) = args.max_retries {
        config.retry.max_retries = max_retries;
    }
    config.validate().map_err(io::Error::other)?;
    Ok(config)
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let evt = event::read()?;
            app.handle_event(evt);
        }
    }
    Ok(())
}

fn print_town(config: &TownConfig, seed: u64, verbose: bool) -> io::Result<()> {
    logging::init(verbose).map_err(|e| io::Error::other(e.to_string()))?;

    let generated = generate_with_retries(config, seed).map_err(io::Error::other)?;
    let stats = generated.town.stats();
    print!("{}", generated.town.grid().to_ascii());
    eprintln!(
        "seed {} ({} failed attempts): {} streets, {}/{} buildings standing",
        generated.seed, generated.failures, stats.streets, stats.standing, stats.buildings_placed
    );
    Ok(())
}
