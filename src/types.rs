use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Width and height of a piece or board, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn is_square(&self) -> bool {
        self.w == self.h
    }

    pub fn fits_in(&self, other: &Size) -> bool {
        self.w <= other.w && self.h <= other.h
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

impl FromStr for Size {
    type Err = Error;

    /// Parses `WxH`, e.g. `2440x1220`. Both sides must be positive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDimensions(s.to_string());
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let w = w.trim().parse::<f64>().map_err(|_| invalid())?;
        let h = h.trim().parse::<f64>().map_err(|_| invalid())?;
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(invalid());
        }
        Ok(Size::new(w, h))
    }
}

/// Axis-aligned rectangle in board-local coordinates, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(x: f64, y: f64, size: Size) -> Self {
        Self::new(x, y, size.w, size.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// True when the rectangle has no usable extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Overlap with positive area. Rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A requested piece type and how many copies of it are needed.
///
/// Entries with a non-positive width, height or quantity are accepted here and
/// silently skipped by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceDemand {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PieceDemand {
    pub fn new(id: impl Into<String>, width: f64, height: f64, quantity: i64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            quantity,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.quantity > 0
    }

    /// Parses `WxH:qty` or `WxH:qty:id`. `default_id` is used when no id is given.
    pub fn parse(s: &str, default_id: &str) -> Result<Self> {
        let invalid = || Error::InvalidPiece(s.to_string());
        let mut parts = s.splitn(3, ':');
        let size = parts
            .next()
            .ok_or_else(invalid)?
            .parse::<Size>()
            .map_err(|_| invalid())?;
        let qty = parts
            .next()
            .ok_or_else(invalid)?
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid())?;
        if qty <= 0 {
            return Err(invalid());
        }
        let id = match parts.next() {
            Some(id) if !id.trim().is_empty() => id.trim(),
            Some(_) => return Err(invalid()),
            None => default_id,
        };
        Ok(PieceDemand::new(id, size.w, size.h, qty))
    }
}

/// Accepts any JSON number as a quantity. Fractional values round up, so
/// `2.5` requests three copies.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("quantity must be a finite number"));
    }
    Ok(value.ceil() as i64)
}

/// How the placement engine picks a board for each piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoardSearch {
    /// Best-area-fit across every free rectangle of every open board.
    #[default]
    Global,
    /// Best-area-fit within the first open board that admits the piece.
    FirstFit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub board_width: f64,
    pub board_height: f64,
    pub kerf: f64,
    pub allow_rotation: bool,
    pub search: BoardSearch,
}

impl Settings {
    pub const DEFAULT_BOARD_WIDTH: f64 = 2440.0;
    pub const DEFAULT_BOARD_HEIGHT: f64 = 1220.0;
    pub const DEFAULT_KERF: f64 = 3.0;

    pub fn new(board_width: f64, board_height: f64, kerf: f64) -> Self {
        Self {
            board_width,
            board_height,
            kerf,
            ..Self::default()
        }
    }

    pub fn board(&self) -> Size {
        Size::new(self.board_width, self.board_height)
    }

    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.board_width, self.board_height);
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(Error::InvalidBoard {
                width: w,
                height: h,
            });
        }
        if !(self.kerf >= 0.0 && self.kerf.is_finite()) {
            return Err(Error::InvalidKerf(self.kerf));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: Self::DEFAULT_BOARD_WIDTH,
            board_height: Self::DEFAULT_BOARD_HEIGHT,
            kerf: Self::DEFAULT_KERF,
            allow_rotation: true,
            search: BoardSearch::Global,
        }
    }
}

/// Final position of one unit piece. `w`/`h` are post-rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPiece {
    #[serde(flatten)]
    pub rect: Rect,
    pub instance_id: String,
    pub original_id: String,
    pub palette_index: usize,
    pub label: String,
    pub rotated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u32,
    pub width: f64,
    pub height: f64,
    pub placed_pieces: Vec<PlacedPiece>,
    pub free_rects: Vec<Rect>,
    pub efficiency: f64,
    pub waste: f64,
}

impl Board {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub boards: Vec<Board>,
    pub total_boards: usize,
    pub total_efficiency: f64,
    pub total_waste: f64,
    pub unplaced_pieces: Vec<PieceDemand>,
}

impl OptimizationResult {
    pub fn placed_count(&self) -> usize {
        self.boards.iter().map(|b| b.placed_pieces.len()).sum()
    }

    pub fn unplaced_count(&self) -> usize {
        self.unplaced_pieces.len()
    }
}
