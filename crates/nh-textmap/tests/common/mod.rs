//! Shared helpers for map integration tests

#![allow(dead_code)]

use nh_textmap::glyph::*;
use nh_textmap::{Grid, MapConfig, Position};

/// Player glyph (any monster glyph will do)
pub const PLAYER: Glyph = monster(330);
pub const NEWT: Glyph = monster(12);
pub const SHOPKEEPER: Glyph = monster(270);

/// A parsed ASCII map
pub struct Sketch {
    pub glyphs: Grid<Glyph>,
    pub player: Position,
}

/// Parse an ASCII map.
///
/// ` ` unseen stone, `.` room floor, `#` corridor, `|`/`-` walls,
/// `+` closed door, `o` open door, `=` iron bars, `{` fountain,
/// `<`/`>` stairs, `^` trap, `@` player, `:` newt, `S` shopkeeper.
/// Short rows are padded with stone.
pub fn sketch(rows: &[&str]) -> Sketch {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut player = Position::default();
    let rows = rows
        .iter()
        .enumerate()
        .map(|(y, row)| {
            format!("{row:<width$}")
                .chars()
                .enumerate()
                .map(|(x, c)| match c {
                    '.' => cmap(S_ROOM),
                    '#' => cmap(S_CORR),
                    '|' => cmap(S_VWALL),
                    '-' => cmap(S_VWALL + 1),
                    '+' => cmap(S_VCDOOR),
                    'o' => cmap(S_VODOOR),
                    '=' => cmap(S_BARS),
                    '{' => cmap(S_FOUNTAIN),
                    '<' => cmap(S_UPSTAIR),
                    '>' => cmap(S_DNSTAIR),
                    '^' => cmap(S_ARROW_TRAP),
                    ':' => NEWT,
                    'S' => SHOPKEEPER,
                    '@' => {
                        player = Position::new(x, y);
                        PLAYER
                    }
                    _ => cmap(S_STONE),
                })
                .collect()
        })
        .collect();
    Sketch {
        glyphs: Grid::from_rows(rows).expect("sketch rows must have equal length"),
        player,
    }
}

/// Configuration sized to a sketch
pub fn config_for(sketch: &Sketch) -> MapConfig {
    MapConfig {
        width: sketch.glyphs.width(),
        height: sketch.glyphs.height(),
        ..MapConfig::default()
    }
}
