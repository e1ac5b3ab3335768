//! Text renderings of a map and of its partition tree

use dg_core::dungeon::BspNode;
use dg_core::geometry::Rect;
use dg_core::{Map, TileKind};

/// Symbols for partition leaves, cycled when there are more leaves
const LEAF_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz@#$%&*+=?";

fn tile_char(kind: Option<TileKind>) -> char {
    match kind {
        Some(TileKind::Wall) | None => '#',
        Some(TileKind::Floor(_)) => '.',
        Some(TileKind::Tunnel) => ',',
        Some(TileKind::Door) => '+',
        Some(TileKind::Custom(_)) => '?',
    }
}

fn to_text(grid: Vec<Vec<char>>) -> String {
    let mut out = String::new();
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// One character per tile, one line per row
///
/// With `labels`, each room rectangle gets its two-digit room number stamped
/// at its top-left corner.
pub fn render_ascii(map: &Map, labels: bool) -> String {
    let mut grid: Vec<Vec<char>> = (0..map.height())
        .map(|y| (0..map.width()).map(|x| tile_char(map.tile_kind(x, y))).collect())
        .collect();

    if labels {
        for (i, room) in map.rooms().iter().enumerate() {
            let label = format!("{:02}", i % 100);
            for rect in &room.rects {
                stamp(&mut grid, rect, &label);
            }
        }
    }

    to_text(grid)
}

fn stamp(grid: &mut [Vec<char>], rect: &Rect, label: &str) {
    let Some(row) = grid.get_mut(rect.y as usize) else {
        return;
    };
    for (k, ch) in label.chars().enumerate() {
        let x = rect.x + k as i32;
        if x >= rect.right() {
            break;
        }
        if let Some(cell) = row.get_mut(x as usize) {
            *cell = ch;
        }
    }
}

/// Leaves of a partition tree, each filled with its own symbol and outlined
pub fn render_partition(tree: &BspNode) -> String {
    let root = *tree.rect();
    let (max_x, max_y) = (root.right(), root.bottom());
    let mut grid = vec![vec![' '; max_x.max(0) as usize]; max_y.max(0) as usize];

    for (i, r) in tree.leaves().iter().enumerate() {
        let fill = char::from(LEAF_CHARS[i % LEAF_CHARS.len()]);
        for p in r.cells() {
            grid[p.y as usize][p.x as usize] = fill;
        }

        // Outline interior borders only
        for x in r.x..r.right() {
            if r.y > 0 {
                grid[r.y as usize][x as usize] = '-';
            }
            if r.bottom() < max_y {
                grid[(r.bottom() - 1) as usize][x as usize] = '-';
            }
        }
        for y in r.y..r.bottom() {
            if r.x > 0 {
                grid[y as usize][r.x as usize] = '|';
            }
            if r.right() < max_x {
                grid[y as usize][(r.right() - 1) as usize] = '|';
            }
        }
    }

    to_text(grid)
}
