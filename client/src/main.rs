use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use game::{
    controller::{announcement, Game},
    field::Field,
};
use log::{error, info};
use terminal::{Terminal, TerminalKeys};

mod terminal;

#[derive(Parser)]
#[command(version, about = "Two-player pong in the terminal")]
struct Cli {
    /// Field height in rows, walls included
    #[arg(long, default_value_t = 20)]
    height: u16,
    /// Field width in columns
    #[arg(long, default_value_t = 50)]
    width: u16,
    /// Write logs to this file, filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // the game owns the terminal, so logs only ever go to a file.
    if let Some(path) = &cli.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("failed to open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }
    let field = match Field::new(cli.height, cli.width) {
        Ok(field) => field,
        Err(err) => {
            eprintln!("invalid field: {err}");
            return ExitCode::FAILURE;
        }
    };
    let terminal = match Terminal::open(field.screen_rows(), field.screen_cols()) {
        Ok(terminal) => terminal,
        Err(err) => {
            eprintln!("failed to initialise terminal: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!("starting a {}x{} game", field.height(), field.width());
    match Game::new(field, terminal, TerminalKeys).run() {
        Ok(game_over) => {
            println!("{}", announcement(game_over));
            ExitCode::SUCCESS
        }
        Err(err) => {
            terminal::force_restore();
            error!("game failed: {err}");
            eprintln!("error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
