use crate::types::Board;

/// Share of `total_area` covered by `used_area`, in percent. Kerf is not used area.
pub fn efficiency(used_area: f64, total_area: f64) -> f64 {
    if total_area > 0.0 {
        used_area / total_area * 100.0
    } else {
        0.0
    }
}

/// Fills in `efficiency` and `waste` for one board from its placed pieces.
pub fn apply_board_stats(board: &mut Board) {
    let used: f64 = board.placed_pieces.iter().map(|p| p.rect.area()).sum();
    board.efficiency = efficiency(used, board.width * board.height);
    board.waste = 100.0 - board.efficiency;
}

/// Aggregate `(efficiency, waste)` over boards.
///
/// Efficiency is the plain mean of the per-board figures: a nearly empty last
/// board pulls the total down as much as a full one pushes it up.
pub fn summarize(boards: &[Board]) -> (f64, f64) {
    if boards.is_empty() {
        return (0.0, 0.0);
    }
    let mean = boards.iter().map(|b| b.efficiency).sum::<f64>() / boards.len() as f64;
    (mean, 100.0 - mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlacedPiece, Rect};

    fn board_with(pieces: &[Rect]) -> Board {
        Board {
            id: 1,
            width: 100.0,
            height: 100.0,
            placed_pieces: pieces
                .iter()
                .enumerate()
                .map(|(i, r)| PlacedPiece {
                    rect: *r,
                    instance_id: format!("p-{i}"),
                    original_id: "p".to_string(),
                    palette_index: 0,
                    label: String::new(),
                    rotated: false,
                })
                .collect(),
            free_rects: Vec::new(),
            efficiency: 0.0,
            waste: 100.0,
        }
    }

    #[test]
    fn test_board_stats() {
        let mut b = board_with(&[
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(50.0, 0.0, 50.0, 50.0),
        ]);
        apply_board_stats(&mut b);
        assert!((b.efficiency - 50.0).abs() < 1e-9);
        assert!((b.waste - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_board_is_all_waste() {
        let mut b = board_with(&[]);
        apply_board_stats(&mut b);
        assert_eq!(b.efficiency, 0.0);
        assert_eq!(b.waste, 100.0);
    }

    #[test]
    fn test_zero_area_board() {
        assert_eq!(efficiency(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_total_is_unweighted_mean() {
        // 9 pieces on the first board, 1 on the second: still a plain 50/50 average
        let mut full = board_with(&[]);
        full.placed_pieces = (0..9)
            .map(|i| PlacedPiece {
                rect: Rect::new(i as f64 * 10.0, 0.0, 10.0, 100.0),
                instance_id: format!("p-{i}"),
                original_id: "p".to_string(),
                palette_index: 0,
                label: String::new(),
                rotated: false,
            })
            .collect();
        let mut sparse = board_with(&[Rect::new(0.0, 0.0, 10.0, 100.0)]);
        apply_board_stats(&mut full);
        apply_board_stats(&mut sparse);
        assert!((full.efficiency - 90.0).abs() < 1e-9);
        assert!((sparse.efficiency - 10.0).abs() < 1e-9);

        let (eff, waste) = summarize(&[full, sparse]);
        assert!((eff - 50.0).abs() < 1e-9);
        assert!((waste - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_boards() {
        assert_eq!(summarize(&[]), (0.0, 0.0));
    }
}
