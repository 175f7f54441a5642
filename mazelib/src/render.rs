//! Read-only console renderings of a maze, for operator debugging. Not
//! part of the solving protocol.

use crate::maze::Maze;

/// Compact dump: one text row per maze row, underscores and pipes for
/// walls, with distinct glyphs for the start and treasure rooms.
pub fn render(maze: &Maze) -> String {
    let grid = maze.grid();
    let mut out = String::new();

    out.push('_');
    for _ in 0..grid.width() {
        out.push_str("___");
    }
    out.push('\n');

    for y in 0..grid.height() {
        out.push('|');
        for x in 0..grid.width() {
            let room = grid.at(x, y);
            if room.walls.bottom {
                out.push_str(if room.treasure {
                    "⏅_"
                } else if room.start {
                    "⏂_"
                } else {
                    "__"
                });
            } else {
                out.push_str(if room.treasure {
                    "⏃ "
                } else if room.start {
                    "⏀ "
                } else {
                    "  "
                });
            }
            out.push(if room.walls.right { '|' } else { '_' });
        }
        out.push('\n');
    }

    out
}

/// Fancier dump with a three-by-three glyph block per room: walls on the
/// edges, and the center showing visited rooms, the start flag, the
/// treasure, or Icarus himself.
pub fn render_pretty(maze: &Maze) -> String {
    let grid = maze.grid();
    let (w, h) = (grid.width() as usize, grid.height() as usize);
    let mut cells = vec![vec![" "; w * 3]; h * 3];

    let at = maze.icarus();
    for y in 0..h {
        for x in 0..w {
            let room = grid.at(x as i32, y as i32);
            let (r, c) = (y * 3, x * 3);

            cells[r][c] = "▛";
            cells[r][c + 2] = "▜";
            cells[r + 2][c] = "▙";
            cells[r + 2][c + 2] = "▟";

            if room.walls.top {
                cells[r][c + 1] = "▀";
            }
            if room.walls.bottom {
                cells[r + 2][c + 1] = "▄";
            }
            if room.walls.left {
                cells[r + 1][c] = "▌";
            }
            if room.walls.right {
                cells[r + 1][c + 2] = "▐";
            }

            if room.visited {
                cells[r + 1][c + 1] = "·";
            }
            if room.treasure {
                cells[r + 1][c + 1] = "×";
            } else if room.start {
                cells[r + 1][c + 1] = "⚑";
            }
            if at.x == x as i32 && at.y == y as i32 {
                cells[r + 1][c + 1] = "☉";
            }
        }
    }

    let mut out = String::new();
    for row in &cells {
        for cell in row {
            out.push_str(cell);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use crate::grid::Coordinate;
    use crate::maze::Maze;

    fn sample() -> Maze {
        Maze::new(
            generate::empty_maze(3, 2),
            Coordinate { x: 0, y: 0 },
            Coordinate { x: 2, y: 1 },
        )
        .unwrap()
    }

    #[test]
    fn compact_render_has_one_line_per_row_plus_header() {
        let text = render(&sample());
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains('|'));
    }

    #[test]
    fn pretty_render_shows_icarus_and_treasure() {
        let text = render_pretty(&sample());
        assert_eq!(text.lines().count(), 6);
        // Icarus overrides the start flag on the waking room.
        assert!(text.contains('☉'));
        assert!(text.contains('×'));
        assert!(!text.contains('⚑'));
    }
}
