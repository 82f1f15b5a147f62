use crate::types::{Board, PlacedPiece};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Interior fill per palette slot, standing in for the palette colours.
const FILL: [char; 8] = ['.', ':', '*', '=', '#', '%', '~', 'o'];

/// Draws a board and its pieces as ASCII art, scaled to fit 80x40 cells.
pub fn render_board(board: &Board) -> String {
    let scale = f64::min(MAX_WIDTH / board.width, MAX_HEIGHT / board.height);
    if !scale.is_finite() {
        return String::new();
    }
    let grid_w = (board.width * scale).round() as usize;
    let grid_h = (board.height * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &board.placed_pieces {
        let sx = (p.rect.x * scale).round() as usize;
        let sy = (p.rect.y * scale).round() as usize;
        let sw = (p.rect.w * scale).round() as usize;
        let sh = (p.rect.h * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        fill_rect(&mut grid, sx, sy, sw, sh, FILL[p.palette_index % FILL.len()]);
        draw_rect(&mut grid, sx, sy, sw, sh);
        draw_label(&mut grid, p, sx, sy, sw, sh);
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

/// Centres the piece label inside its outline, clipped to the interior.
fn draw_label(grid: &mut [Vec<char>], p: &PlacedPiece, sx: usize, sy: usize, sw: usize, sh: usize) {
    if sw <= 2 || sh <= 1 {
        return;
    }
    let label: Vec<char> = p.label.chars().collect();
    let cx = sx + sw / 2;
    let cy = sy + sh / 2;
    let start_x = cx.saturating_sub(label.len() / 2);

    for (i, &ch) in label.iter().enumerate() {
        let x = start_x + i;
        if x > sx && x < sx + sw && cy < grid.len() && x < grid[cy].len() {
            grid[cy][x] = ch;
        }
    }
}

fn fill_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize, ch: char) {
    for row in grid.iter_mut().take(y + h).skip(y + 1) {
        for cell in row.iter_mut().take(x + w).skip(x + 1) {
            *cell = ch;
        }
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    let edge = |cell: char, line: char| {
        if cell == '+' || (cell == '|' && line == '-') || (cell == '-' && line == '|') {
            '+'
        } else {
            line
        }
    };

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            if y < rows {
                grid[y][i] = edge(grid[y][i], '-');
            }
            if y + h < rows {
                grid[y + h][i] = edge(grid[y + h][i], '-');
            }
        }
    }

    // Vertical edges
    for j in y..=y + h {
        if j < rows {
            if x < cols {
                grid[j][x] = edge(grid[j][x], '|');
            }
            if x + w < cols {
                grid[j][x + w] = edge(grid[j][x + w], '|');
            }
        }
    }

    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
