use tracing::{debug, info, trace, warn};

use crate::expand::{UnitPiece, expand_demands};
use crate::guillotine::{BoardBin, Candidate};
use crate::stats;
use crate::types::{BoardSearch, OptimizationResult, PieceDemand, Settings, Size};

/// Lays out `demands` on as many boards of `settings` size as needed.
///
/// Single greedy pass: pieces go largest first into the free rectangle that
/// leaves the least area unused, and a placement is never revisited.
pub fn optimize(demands: &[PieceDemand], settings: &Settings) -> OptimizationResult {
    Solver::new(*settings).solve(demands)
}

pub struct Solver {
    settings: Settings,
}

impl Solver {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn solve(&self, demands: &[PieceDemand]) -> OptimizationResult {
        let pieces = expand_demands(demands);
        let board = self.settings.board();

        let mut bins = vec![BoardBin::new(1, board, self.settings.kerf)];
        let mut unplaced = Vec::new();

        for piece in &pieces {
            if let Some((bi, candidate)) = self.find_slot(&bins, piece.size) {
                let board_id = bins[bi].id();
                let placed = bins[bi].place(candidate, piece);
                trace!(
                    board = board_id,
                    piece = %placed.instance_id,
                    x = placed.rect.x,
                    y = placed.rect.y,
                    rotated = placed.rotated,
                    "placed piece"
                );
            } else if let Some(rotated) = BoardBin::empty_board_orientation(
                board,
                piece.size,
                self.settings.allow_rotation,
            ) {
                let mut bin = BoardBin::new(bins.len() as u32 + 1, board, self.settings.kerf);
                let placed = if rotated {
                    piece.size.rotated()
                } else {
                    piece.size
                };
                let candidate = Candidate {
                    free_idx: 0,
                    rotated,
                    leftover: board.area() - placed.area(),
                };
                bin.place(candidate, piece);
                debug!(board = bin.id(), piece = %piece.instance_id, "opened board");
                bins.push(bin);
            } else {
                warn!(
                    piece = %piece.instance_id,
                    size = %piece.size,
                    board = %board,
                    "piece does not fit on an empty board"
                );
                unplaced.push(Self::unplaced(piece));
            }
        }

        let mut boards: Vec<_> = bins.into_iter().map(BoardBin::into_board).collect();
        for b in &mut boards {
            stats::apply_board_stats(b);
        }
        let (total_efficiency, total_waste) = stats::summarize(&boards);

        info!(
            pieces = pieces.len(),
            boards = boards.len(),
            unplaced = unplaced.len(),
            efficiency = total_efficiency,
            "optimization finished"
        );

        OptimizationResult {
            total_boards: boards.len(),
            boards,
            total_efficiency,
            total_waste,
            unplaced_pieces: unplaced,
        }
    }

    /// Picks the board and free rectangle for `piece` among the open boards.
    fn find_slot(&self, bins: &[BoardBin], piece: Size) -> Option<(usize, Candidate)> {
        let allow_rotate = self.settings.allow_rotation;
        match self.settings.search {
            BoardSearch::Global => {
                let mut best: Option<(usize, Candidate)> = None;
                for (bi, bin) in bins.iter().enumerate() {
                    if let Some(candidate) = bin.find_best(piece, allow_rotate)
                        && best.is_none_or(|(_, b)| candidate.leftover < b.leftover)
                    {
                        best = Some((bi, candidate));
                    }
                }
                best
            }
            BoardSearch::FirstFit => bins.iter().enumerate().find_map(|(bi, bin)| {
                bin.find_best(piece, allow_rotate)
                    .map(|candidate| (bi, candidate))
            }),
        }
    }

    fn unplaced(piece: &UnitPiece) -> PieceDemand {
        PieceDemand::new(piece.original_id.clone(), piece.size.w, piece.size.h, 1)
    }
}
