use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::ValueEnum;
use cube_state::{Color, CubeState, Face, Facelet, ScanReply};
use log::debug;
use owo_colors::OwoColorize;
use solver_client::{Algorithm, Session, SolverService};

use crate::{files, render, report_outcome};

const HELP: &str = "\
Commands:
  color <name>              pick the paint color (white, yellow, red, orange, blue, green)
  paint <face> <1-9>        paint a sticker, e.g. `paint U 5`
  clear <face> <1-9>        unpaint a sticker
  face <face> <9 colors>    set a whole face; use `.` for unpainted stickers
  scan <face> <file>        apply a scanner reply (JSON with a `colors` list) to a face
  show                      draw the cube
  solve [lbl|kociemba]      send the cube to the solver; the answer shows up when it arrives
  wait                      block until the pending solve answers
  save <file> / load <file> write or read a state file (.json or .toml)
  reset [blank|solved]      start over
  help                      this text
  quit                      leave";

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Color(Color),
    Paint { face: Face, index: usize },
    Clear { face: Face, index: usize },
    Face { face: Face, facelets: Vec<Facelet> },
    Scan { face: Face, path: PathBuf },
    Show,
    Solve(Option<Algorithm>),
    Wait,
    Save(PathBuf),
    Load(PathBuf),
    Reset { solved: bool },
    Help,
    Quit,
}

fn parse_face(word: Option<&str>) -> Result<Face, String> {
    word.ok_or("Expected a face (F, B, L, R, U or D)")?
        .parse()
        .map_err(|e| format!("{e}"))
}

fn parse_index(word: Option<&str>) -> Result<usize, String> {
    let position = word
        .ok_or("Expected a sticker position from 1 to 9")?
        .parse::<usize>()
        .map_err(|e| format!("{e}"))?;

    if (1..=9).contains(&position) {
        Ok(position - 1)
    } else {
        Err(format!("Sticker position {position} is not between 1 and 9"))
    }
}

fn parse_path(word: Option<&str>) -> Result<PathBuf, String> {
    word.map(PathBuf::from).ok_or_else(|| "Expected a file path".to_owned())
}

/// Returns `Ok(None)` for a blank line.
fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let mut words = line.split_whitespace();

    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "color" | "colour" => ReplCommand::Color(
            words
                .next()
                .ok_or("Expected a color")?
                .parse()
                .map_err(|e| format!("{e}"))?,
        ),
        "paint" | "p" => ReplCommand::Paint {
            face: parse_face(words.next())?,
            index: parse_index(words.next())?,
        },
        "clear" => ReplCommand::Clear {
            face: parse_face(words.next())?,
            index: parse_index(words.next())?,
        },
        "face" => {
            let face = parse_face(words.next())?;
            let facelets = words
                .by_ref()
                .map(|word| match word {
                    "." | "-" => Ok(None),
                    _ => word.parse::<Color>().map(Some).map_err(|e| format!("{e}")),
                })
                .collect::<Result<Vec<_>, _>>()?;
            ReplCommand::Face { face, facelets }
        }
        "scan" => ReplCommand::Scan {
            face: parse_face(words.next())?,
            path: parse_path(words.next())?,
        },
        "show" => ReplCommand::Show,
        "solve" => ReplCommand::Solve(
            words
                .next()
                .map(|word| Algorithm::from_str(word, true))
                .transpose()?,
        ),
        "wait" => ReplCommand::Wait,
        "save" => ReplCommand::Save(parse_path(words.next())?),
        "load" => ReplCommand::Load(parse_path(words.next())?),
        "reset" => match words.next() {
            None | Some("blank") => ReplCommand::Reset { solved: false },
            Some("solved") => ReplCommand::Reset { solved: true },
            Some(other) => return Err(format!("Cannot reset to `{other}`")),
        },
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("Unknown command `{other}`; type `help` for a list")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("Unexpected `{extra}` after `{name}`"));
    }

    Ok(Some(command))
}

/// Interactive editor. The session lives here for as long as the REPL runs; every command goes
/// through it.
pub fn run(
    mut session: Session,
    service: &Arc<dyn SolverService>,
    default_algorithm: Algorithm,
    colored: bool,
) -> color_eyre::Result<()> {
    eprintln!("Type `help` for a list of commands.");
    print!("{}", render::net(session.cube(), colored));

    let stdin = io::stdin();

    loop {
        if let Some(result) = session.poll() {
            report_outcome(result);
        }

        let prompt = format!("[{}] > ", session.brush());
        if colored {
            eprint!("{}", prompt.bold());
        } else {
            eprint!("{prompt}");
        }
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        debug!(target: "repl", "{command:?}");

        match command {
            ReplCommand::Color(color) => session.select_color(color),
            ReplCommand::Paint { face, index } => match session.paint(face, index) {
                Ok(()) => print!("{}", render::net(session.cube(), colored)),
                Err(e) => eprintln!("{e}"),
            },
            ReplCommand::Clear { face, index } => match session.clear(face, index) {
                Ok(()) => print!("{}", render::net(session.cube(), colored)),
                Err(e) => eprintln!("{e}"),
            },
            ReplCommand::Face { face, facelets } => match session.replace_face(face, facelets) {
                Ok(()) => print!("{}", render::net(session.cube(), colored)),
                Err(e) => eprintln!("{e}"),
            },
            ReplCommand::Scan { face, path } => {
                let scan = fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|text| {
                        serde_json::from_str::<ScanReply>(&text).map_err(|e| e.to_string())
                    });

                match scan.map(|scan| session.apply_scan(face, &scan)) {
                    Ok(Ok(0)) => print!("{}", render::net(session.cube(), colored)),
                    Ok(Ok(n)) => {
                        print!("{}", render::net(session.cube(), colored));
                        eprintln!("{n} stickers could not be read; paint them by hand");
                    }
                    Ok(Err(e)) => eprintln!("{e}"),
                    Err(e) => eprintln!("Failed to read the scan {path:?}: {e}"),
                }
            }
            ReplCommand::Show => {
                print!("{}", render::net(session.cube(), colored));
                if let Some(outcome) = session.outcome() {
                    println!("{outcome}");
                }
            }
            ReplCommand::Solve(algorithm) => {
                let algorithm = algorithm.unwrap_or(default_algorithm);
                match session.submit(Arc::clone(service), algorithm) {
                    Ok(()) => eprintln!("Sent to the {algorithm:?} solver"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            ReplCommand::Wait => match session.wait() {
                Some(result) => report_outcome(result),
                None => eprintln!("Nothing is being solved"),
            },
            ReplCommand::Save(path) => match files::save_state(&path, session.cube()) {
                Ok(()) => eprintln!("Saved to {path:?}"),
                Err(e) => eprintln!("{e:#}"),
            },
            ReplCommand::Load(path) => match files::load_state(&path) {
                Ok(cube) => {
                    session.replace_cube(cube);
                    print!("{}", render::net(session.cube(), colored));
                }
                Err(e) => eprintln!("{e:#}"),
            },
            ReplCommand::Reset { solved } => {
                session.replace_cube(if solved {
                    CubeState::solved()
                } else {
                    CubeState::blank()
                });
                print!("{}", render::net(session.cube(), colored));
            }
            ReplCommand::Help => eprintln!("{HELP}"),
            ReplCommand::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cube_state::{Color, Face};
    use solver_client::Algorithm;

    use super::{ReplCommand, parse_command};

    #[test]
    fn parse_paint() {
        assert_eq!(
            parse_command("paint U 5\n"),
            Ok(Some(ReplCommand::Paint {
                face: Face::Top,
                index: 4
            }))
        );
        assert!(parse_command("paint U 0").is_err());
        assert!(parse_command("paint U 10").is_err());
        assert!(parse_command("paint Q 1").is_err());
        assert!(parse_command("paint U").is_err());
        assert!(parse_command("paint U 1 2").is_err());
    }

    #[test]
    fn parse_face_list() {
        assert_eq!(
            parse_command("face R white . red y O b - g green"),
            Ok(Some(ReplCommand::Face {
                face: Face::Right,
                facelets: vec![
                    Some(Color::White),
                    None,
                    Some(Color::Red),
                    Some(Color::Yellow),
                    Some(Color::Orange),
                    Some(Color::Blue),
                    None,
                    Some(Color::Green),
                    Some(Color::Green),
                ]
            }))
        );
        // Length is checked by the cube, not the parser
        assert!(matches!(
            parse_command("face R white"),
            Ok(Some(ReplCommand::Face { facelets, .. })) if facelets.len() == 1
        ));
        assert!(parse_command("face R purple").is_err());
    }

    #[test]
    fn parse_misc() {
        assert_eq!(parse_command("   \n"), Ok(None));
        assert_eq!(
            parse_command("color Orange"),
            Ok(Some(ReplCommand::Color(Color::Orange)))
        );
        assert_eq!(
            parse_command("solve kociemba"),
            Ok(Some(ReplCommand::Solve(Some(Algorithm::Kociemba))))
        );
        assert_eq!(parse_command("solve"), Ok(Some(ReplCommand::Solve(None))));
        assert!(parse_command("solve cfop").is_err());
        assert_eq!(
            parse_command("reset solved"),
            Ok(Some(ReplCommand::Reset { solved: true }))
        );
        assert_eq!(parse_command("quit"), Ok(Some(ReplCommand::Quit)));
        assert!(parse_command("dance").is_err());
    }
}
