use crate::expand::UnitPiece;
use crate::types::{Board, PlacedPiece, Rect, Size};

/// Free regions of one board, in insertion order. Adjacent regions are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeRects {
    rects: Vec<Rect>,
}

impl FreeRects {
    pub fn new(initial: Rect) -> Self {
        Self {
            rects: vec![initial],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Removes the rectangle at `idx`, keeping the order of the others.
    pub fn remove(&mut self, idx: usize) -> Rect {
        self.rects.remove(idx)
    }

    pub fn extend(&mut self, rects: impl IntoIterator<Item = Rect>) {
        self.rects.extend(rects);
    }

    pub fn into_vec(self) -> Vec<Rect> {
        self.rects
    }
}

/// Splits `free` after a piece of `placed` size went into its top-left corner.
///
/// Kerf is added once per axis. The axis with less leftover gets the strip
/// that spans the whole of `free`; the other strip is bounded by the piece.
pub fn split(free: Rect, placed: Size, kerf: f64) -> Vec<Rect> {
    let actual_w = placed.w + kerf;
    let actual_h = placed.h + kerf;
    let free_w = free.w - actual_w;
    let free_h = free.h - actual_h;

    let (first, second) = if free_w < free_h {
        (
            Rect::new(free.x, free.y + actual_h, free.w, free_h),
            Rect::new(free.x + actual_w, free.y, free_w, actual_h),
        )
    } else {
        (
            Rect::new(free.x + actual_w, free.y, free_w, free.h),
            Rect::new(free.x, free.y + actual_h, actual_w, free_h),
        )
    };

    [first, second]
        .into_iter()
        .filter(|r| !r.is_degenerate())
        .collect()
}

/// A fitting free rectangle for a piece, with the area it would leave unused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub free_idx: usize,
    pub rotated: bool,
    pub leftover: f64,
}

/// One stock board while the placement engine is running.
#[derive(Debug, Clone)]
pub struct BoardBin {
    id: u32,
    size: Size,
    kerf: f64,
    pub free_rects: FreeRects,
    pub placements: Vec<PlacedPiece>,
}

impl BoardBin {
    pub fn new(id: u32, size: Size, kerf: f64) -> Self {
        Self {
            id,
            size,
            kerf,
            free_rects: FreeRects::new(Rect::at(0.0, 0.0, size)),
            placements: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(|p| p.rect.area()).sum()
    }

    /// Best-area-fit over this board's free rectangles. Ties keep the first
    /// candidate seen, normal orientation before rotated.
    pub fn find_best(&self, piece: Size, allow_rotate: bool) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            let free_size = free.size();
            let mut consider = |size: Size, rotated: bool| {
                if !size.fits_in(&free_size) {
                    return;
                }
                let leftover = free_size.area() - size.area();
                if best.is_none_or(|b| leftover < b.leftover) {
                    best = Some(Candidate {
                        free_idx: idx,
                        rotated,
                        leftover,
                    });
                }
            };

            consider(piece, false);
            if allow_rotate && !piece.is_square() {
                consider(piece.rotated(), true);
            }
        }

        best
    }

    /// Orientation a fresh board would use for `piece`: normal when it fits,
    /// otherwise rotated. `None` when neither fits.
    pub fn empty_board_orientation(board: Size, piece: Size, allow_rotate: bool) -> Option<bool> {
        if piece.fits_in(&board) {
            Some(false)
        } else if allow_rotate && piece.rotated().fits_in(&board) {
            Some(true)
        } else {
            None
        }
    }

    pub fn place(&mut self, candidate: Candidate, piece: &UnitPiece) -> &PlacedPiece {
        let free = self.free_rects.remove(candidate.free_idx);
        let placed = if candidate.rotated {
            piece.size.rotated()
        } else {
            piece.size
        };

        self.free_rects.extend(split(free, placed, self.kerf));
        self.placements.push(PlacedPiece {
            rect: Rect::at(free.x, free.y, placed),
            instance_id: piece.instance_id.clone(),
            original_id: piece.original_id.clone(),
            palette_index: piece.palette_index,
            label: piece.label.clone(),
            rotated: candidate.rotated,
        });
        &self.placements[self.placements.len() - 1]
    }

    /// Finishes the board. Efficiency figures are filled in by the stats pass.
    pub fn into_board(self) -> Board {
        Board {
            id: self.id,
            width: self.size.w,
            height: self.size.h,
            placed_pieces: self.placements,
            free_rects: self.free_rects.into_vec(),
            efficiency: 0.0,
            waste: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, w: f64, h: f64) -> UnitPiece {
        UnitPiece {
            instance_id: format!("{id}-0"),
            original_id: id.to_string(),
            size: Size::new(w, h),
            palette_index: 0,
            label: format!("{w}x{h}"),
        }
    }

    #[test]
    fn test_split_wide_leftover_keeps_right_strip_full_height() {
        // freeW = 2137, freeH = 717 -> right strip spans the full height
        let rects = split(
            Rect::new(0.0, 0.0, 2440.0, 1220.0),
            Size::new(300.0, 500.0),
            3.0,
        );
        assert_eq!(
            rects,
            vec![
                Rect::new(303.0, 0.0, 2137.0, 1220.0),
                Rect::new(0.0, 503.0, 303.0, 717.0),
            ]
        );
    }

    #[test]
    fn test_split_tall_leftover_keeps_bottom_strip_full_width() {
        // freeW = 97, freeH = 797 -> bottom strip spans the full width
        let rects = split(
            Rect::new(10.0, 20.0, 400.0, 1000.0),
            Size::new(300.0, 200.0),
            3.0,
        );
        assert_eq!(
            rects,
            vec![
                Rect::new(10.0, 223.0, 400.0, 797.0),
                Rect::new(313.0, 20.0, 97.0, 203.0),
            ]
        );
    }

    #[test]
    fn test_split_exact_fit_leaves_nothing() {
        let rects = split(Rect::new(0.0, 0.0, 100.0, 100.0), Size::new(100.0, 100.0), 0.0);
        assert!(rects.is_empty());

        // Kerf pushes both leftovers negative
        let rects = split(Rect::new(0.0, 0.0, 100.0, 100.0), Size::new(99.0, 99.0), 3.0);
        assert!(rects.is_empty());
    }

    #[test]
    fn test_split_full_width_piece_keeps_bottom_only() {
        let rects = split(Rect::new(0.0, 0.0, 100.0, 100.0), Size::new(100.0, 40.0), 3.0);
        assert_eq!(rects, vec![Rect::new(0.0, 43.0, 100.0, 57.0)]);
    }

    #[test]
    fn test_split_children_stay_inside_parent() {
        let parent = Rect::new(5.0, 5.0, 300.0, 200.0);
        for (w, h) in [(10.0, 10.0), (299.0, 1.0), (1.0, 199.0), (150.0, 150.0)] {
            let rects = split(parent, Size::new(w, h), 2.0);
            let piece = Rect::at(parent.x, parent.y, Size::new(w, h));
            for r in &rects {
                assert!(parent.contains(r), "{r:?} escapes {parent:?}");
                assert!(!piece.intersects(r), "{r:?} overlaps the piece");
            }
            if rects.len() == 2 {
                assert!(!rects[0].intersects(&rects[1]));
            }
        }
    }

    #[test]
    fn test_free_rects_remove_keeps_order() {
        let mut free = FreeRects::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        free.extend([Rect::new(1.0, 0.0, 1.0, 1.0), Rect::new(2.0, 0.0, 1.0, 1.0)]);
        let removed = free.remove(0);
        assert_eq!(removed.x, 0.0);
        let xs: Vec<f64> = free.iter().map(|r| r.x).collect();
        assert_eq!(xs, [1.0, 2.0]);
        assert_eq!(free.len(), 2);
    }

    #[test]
    fn test_place_single_piece() {
        let mut bin = BoardBin::new(1, Size::new(2440.0, 1220.0), 3.0);
        let piece = unit("1", 300.0, 500.0);
        let c = bin.find_best(piece.size, true).unwrap();
        assert!(!c.rotated);
        let p = bin.place(c, &piece).clone();
        assert_eq!(p.rect, Rect::new(0.0, 0.0, 300.0, 500.0));
        assert_eq!(p.instance_id, "1-0");
        assert_eq!(bin.free_rects.len(), 2);
        assert_eq!(bin.used_area(), 150_000.0);
    }

    #[test]
    fn test_rotation_when_normal_does_not_fit() {
        let bin = BoardBin::new(1, Size::new(500.0, 900.0), 0.0);
        let c = bin.find_best(Size::new(800.0, 400.0), true).unwrap();
        assert!(c.rotated);
        assert_eq!(c.leftover, 500.0 * 900.0 - 800.0 * 400.0);

        assert!(bin.find_best(Size::new(800.0, 400.0), false).is_none());
    }

    #[test]
    fn test_rotated_piece_footprint() {
        let mut bin = BoardBin::new(1, Size::new(500.0, 900.0), 0.0);
        let piece = unit("1", 800.0, 400.0);
        let c = bin.find_best(piece.size, true).unwrap();
        let p = bin.place(c, &piece);
        assert_eq!(p.rect, Rect::new(0.0, 0.0, 400.0, 800.0));
        assert!(p.rotated);
    }

    #[test]
    fn test_tie_prefers_first_rectangle() {
        let mut bin = BoardBin::new(1, Size::new(100.0, 100.0), 0.0);
        bin.free_rects = FreeRects::new(Rect::new(0.0, 0.0, 50.0, 50.0));
        bin.free_rects.extend([Rect::new(50.0, 50.0, 50.0, 50.0)]);
        let c = bin.find_best(Size::new(20.0, 30.0), true).unwrap();
        assert_eq!(c.free_idx, 0);
        assert!(!c.rotated);
    }

    #[test]
    fn test_best_area_fit_picks_tightest() {
        let mut bin = BoardBin::new(1, Size::new(1000.0, 1000.0), 0.0);
        bin.free_rects = FreeRects::new(Rect::new(0.0, 0.0, 500.0, 500.0));
        bin.free_rects.extend([
            Rect::new(500.0, 0.0, 110.0, 60.0),
            Rect::new(0.0, 500.0, 200.0, 200.0),
        ]);
        let c = bin.find_best(Size::new(100.0, 50.0), true).unwrap();
        assert_eq!(c.free_idx, 1);
        assert_eq!(c.leftover, 110.0 * 60.0 - 5000.0);
    }

    #[test]
    fn test_rotation_wins_only_when_strictly_better() {
        // 60x110 slot: only the rotated 50x100 fits
        let mut bin = BoardBin::new(1, Size::new(1000.0, 1000.0), 0.0);
        bin.free_rects = FreeRects::new(Rect::new(0.0, 0.0, 60.0, 110.0));
        let c = bin.find_best(Size::new(100.0, 50.0), true).unwrap();
        assert!(c.rotated);

        // 200x200 slot: both fit with equal leftover, normal wins
        bin.free_rects = FreeRects::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        let c = bin.find_best(Size::new(100.0, 50.0), true).unwrap();
        assert!(!c.rotated);
    }

    #[test]
    fn test_empty_board_orientation() {
        let board = Size::new(2440.0, 1220.0);
        assert_eq!(
            BoardBin::empty_board_orientation(board, Size::new(300.0, 500.0), true),
            Some(false)
        );
        assert_eq!(
            BoardBin::empty_board_orientation(board, Size::new(1000.0, 2000.0), true),
            Some(true)
        );
        assert_eq!(
            BoardBin::empty_board_orientation(board, Size::new(1000.0, 2000.0), false),
            None
        );
        assert_eq!(
            BoardBin::empty_board_orientation(board, Size::new(3000.0, 3000.0), true),
            None
        );
    }

    #[test]
    fn test_piece_too_large() {
        let bin = BoardBin::new(1, Size::new(100.0, 100.0), 0.0);
        assert!(bin.find_best(Size::new(200.0, 50.0), true).is_none());
    }
}
