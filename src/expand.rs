use crate::types::{PieceDemand, Size};

/// Fill colours keyed by [`UnitPiece::palette_index`]. Renderers pick from here.
pub const PALETTE: [&str; 8] = [
    "#fca5a5", // red
    "#fde047", // yellow
    "#86efac", // green
    "#93c5fd", // blue
    "#d8b4fe", // purple
    "#fdba74", // orange
    "#94a3b8", // slate
    "#5eead4", // teal
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One physical copy of a demanded piece.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPiece {
    pub instance_id: String,
    pub original_id: String,
    pub size: Size,
    pub palette_index: usize,
    pub label: String,
}

/// Expands demands into unit pieces, largest area first.
///
/// Invalid demands are skipped without consuming a palette slot. Pieces of
/// equal area keep their expansion order.
pub fn expand_demands(demands: &[PieceDemand]) -> Vec<UnitPiece> {
    let mut pieces = Vec::new();
    for (pos, d) in demands.iter().filter(|d| d.is_valid()).enumerate() {
        let size = d.size();
        let label = d.label.clone().unwrap_or_else(|| size.to_string());
        for k in 0..d.quantity {
            pieces.push(UnitPiece {
                instance_id: format!("{}-{}", d.id, k),
                original_id: d.id.clone(),
                size,
                palette_index: pos % PALETTE.len(),
                label: label.clone(),
            });
        }
    }
    // sort_by is stable
    pieces.sort_by(|a, b| b.size.area().total_cmp(&a.size.area()));
    pieces
}
