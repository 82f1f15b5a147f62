use std::fmt::Write;

use crate::types::OptimizationResult;

pub const CSV_HEADER: &str = "board_id,piece_id,width,height,x,y";

/// One row per placed piece, boards in order. The piece column is the
/// instance id, so copies of the same demand stay distinguishable.
pub fn to_csv(result: &OptimizationResult) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for board in &result.boards {
        for p in &board.placed_pieces {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "{},{},{},{},{},{}",
                board.id,
                csv_field(&p.instance_id),
                p.rect.w,
                p.rect.h,
                p.rect.x,
                p.rect.y
            );
        }
    }
    out
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
