use std::{
    io::{IsTerminal, stdout},
    path::PathBuf,
    sync::Arc,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, eyre};
use cube_state::{CubeState, Outcome, SolverRequest, decode, encode, to_facelet_string, validate};
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use solver_client::{
    Algorithm, ClientConfig, CommandSolver, Session, SessionError, SolverService,
};

mod files;
mod render;
mod repl;

/// Paints Rubik's cube states and sends them to a solving service
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The solver client configuration, in TOML format. Defaults to
    /// `<config dir>/cube-solve/config.toml` when that file exists.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the solver request body for a state file.
    Encode {
        /// The cube state; a .json or .toml file
        state: PathBuf,
        /// Print the 54 character URFDLB facelet string instead
        #[arg(long)]
        facelets: bool,
    },
    /// Turn solver notation back into a cube state.
    Decode {
        /// A JSON file holding the notation, bare or wrapped in `rubiks_cube`
        notation: PathBuf,
    },
    /// Check that a state could be a real cube without asking the solver.
    Check {
        /// The cube state; a .json or .toml file
        state: PathBuf,
    },
    /// Send a state to the solver and print the answer.
    Solve {
        /// The cube state; a .json or .toml file
        state: PathBuf,
        /// Which solver to use. Defaults to the configured one.
        #[arg(long, short = 'a')]
        algorithm: Option<Algorithm>,
        /// Run the local check first and only send the cube if it passes
        #[arg(long)]
        precheck: bool,
    },
    /// Draw a state as an unfolded cube.
    Show {
        /// The cube state; a .json or .toml file
        state: PathBuf,
    },
    /// Paint a cube interactively.
    Edit {
        /// A state to start from. Starts blank if not given.
        state: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let colored = stdout().is_terminal();

    match cli.command {
        Commands::Encode { state, facelets } => {
            let state = files::load_state(&state)?;

            if facelets {
                println!("{}", to_facelet_string(&state)?);
            } else {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&SolverRequest::new(&state)?)?
                );
            }
        }
        Commands::Decode { notation } => {
            let state = decode(&files::load_notation(&notation)?)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Check { state } => {
            let state = files::load_state(&state)?;
            validate(&encode(&state)?)?;
            println!("The cube is valid");
        }
        Commands::Solve {
            state,
            algorithm,
            precheck,
        } => {
            let state = files::load_state(&state)?;
            let config = ClientConfig::load_or_default(cli.config.as_deref())?;
            let algorithm = algorithm.unwrap_or(config.default_algorithm);

            if precheck {
                validate(&encode(&state)?)?;
                info!("Local check passed");
            }

            solve(state, CommandSolver::new(config), algorithm)?;
        }
        Commands::Show { state } => {
            print!("{}", render::net(&files::load_state(&state)?, colored));
        }
        Commands::Edit { state } => {
            let cube = match state {
                Some(path) => files::load_state(&path)?,
                None => CubeState::blank(),
            };
            let config = ClientConfig::load_or_default(cli.config.as_deref())?;
            let algorithm = config.default_algorithm;
            let service: Arc<dyn SolverService> = Arc::new(CommandSolver::new(config));

            repl::run(Session::new(cube), &service, algorithm, colored)?;
        }
    }

    Ok(())
}

fn solve(
    state: CubeState,
    service: CommandSolver,
    algorithm: Algorithm,
) -> color_eyre::Result<()> {
    let mut session = Session::new(state);
    session.submit(Arc::new(service), algorithm)?;

    let outcome = session
        .wait()
        .ok_or_eyre("The solve was dropped before it replied")??;

    match outcome {
        Outcome::Rejected(errors) => Err(eyre!(
            "The solver rejected the cube: {}",
            errors.join(", ")
        )),
        outcome => {
            println!("{outcome}");
            Ok(())
        }
    }
}

/// Prints the result of a solve as it arrives.
fn report_outcome(result: Result<&Outcome, SessionError>) {
    match result {
        Ok(outcome @ Outcome::Rejected(_)) => {
            eprintln!("{} {outcome}", "Rejected:".red());
        }
        Ok(outcome) => println!("{}", outcome.green()),
        Err(e) => eprintln!("{} {e}", "Solve failed:".red()),
    }
}
