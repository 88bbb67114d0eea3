use crate::config::MalformedRowPolicy;
use crate::model::{DrawResult, DrawRow, ParserError};
use tracing::warn;

/// Types every row, returning the kept rows next to their typed draws.
pub fn normalize_all(
    rows: Vec<DrawRow>,
    policy: MalformedRowPolicy,
) -> Result<(Vec<DrawRow>, Vec<DrawResult>), ParserError> {
    let mut kept = Vec::with_capacity(rows.len());
    let mut draws = Vec::with_capacity(rows.len());

    for row in rows {
        match normalize_row(&row) {
            Ok(draw) => {
                kept.push(row);
                draws.push(draw);
            }
            Err(e) if policy == MalformedRowPolicy::Skip => {
                warn!("Skipping malformed row: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((kept, draws))
}

fn normalize_row(row: &DrawRow) -> Result<DrawResult, ParserError> {
    DrawResult::try_from(row)
}
