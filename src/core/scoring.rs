//! Scoring module - quadratic line-clear rewards
//!
//! One rule: clearing `k` rows in a single resolution step awards
//! `k * k * 10` points, so simultaneous clears pay far better than the same
//! rows cleared one at a time (4 at once is 160, four singles are 40).

/// Points for `lines` rows cleared in one lock resolution
pub fn line_clear_score(lines: u32) -> u32 {
    lines * lines * 10
}
