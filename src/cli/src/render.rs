use std::fmt::Write;

use cube_state::{Color, CubeState, Face, Facelet};
use owo_colors::OwoColorize;

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::White => (240, 240, 240),
        Color::Yellow => (250, 204, 21),
        Color::Red => (239, 68, 68),
        Color::Orange => (249, 115, 22),
        Color::Blue => (37, 99, 235),
        Color::Green => (34, 197, 94),
    }
}

fn sticker(facelet: Facelet, colored: bool) -> String {
    match (facelet, colored) {
        (Some(color), true) => {
            let (r, g, b) = rgb(color);
            format!(" {} ", color.code())
                .black()
                .on_truecolor(r, g, b)
                .to_string()
        }
        (Some(color), false) => format!(" {} ", color.code()),
        (None, true) => " · ".dimmed().to_string(),
        (None, false) => " . ".to_owned(),
    }
}

fn row(state: &CubeState, face: Face, row: usize, colored: bool) -> String {
    (0..3)
        .map(|col| sticker(state.facelet(face, row * 3 + col).flatten(), colored))
        .collect()
}

/// Draws the cube unfolded: the top face above the front, the bottom face below it, and the left,
/// front, right and back faces side by side.
///
/// ```text
///           U U U
///           U U U
///           U U U
///  L L L  F F F  R R R  B B B
///  ...
/// ```
#[must_use]
pub fn net(state: &CubeState, colored: bool) -> String {
    let mut out = String::new();
    let indent = " ".repeat(9 + 1);

    for r in 0..3 {
        let _ = writeln!(out, "{indent}{}", row(state, Face::Top, r, colored));
    }

    for r in 0..3 {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            row(state, Face::Left, r, colored),
            row(state, Face::Front, r, colored),
            row(state, Face::Right, r, colored),
            row(state, Face::Back, r, colored),
        );
    }

    for r in 0..3 {
        let _ = writeln!(out, "{indent}{}", row(state, Face::Bottom, r, colored));
    }

    out
}
