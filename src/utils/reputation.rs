//! Placeholder reputation heuristic.
//!
//! Nothing in the lookup handlers produces these flags yet; the score is a
//! standalone helper.

use crate::domain::model::is_truthy;
use serde_json::{Map, Value};

pub const BASE_SCORE: i32 = 50;
pub const BREACHED_PENALTY: i32 = 20;
pub const SUSPICIOUS_ACTIVITY_PENALTY: i32 = 15;
pub const VERIFIED_BONUS: i32 = 10;

pub fn calculate_reputation_score(flags: &Map<String, Value>) -> u8 {
    let mut score = BASE_SCORE;

    if flag_is_set(flags, "breached") {
        score -= BREACHED_PENALTY;
    }
    if flag_is_set(flags, "suspicious_activity") {
        score -= SUSPICIOUS_ACTIVITY_PENALTY;
    }
    if flag_is_set(flags, "verified") {
        score += VERIFIED_BONUS;
    }

    score.clamp(0, 100) as u8
}

fn flag_is_set(flags: &Map<String, Value>, key: &str) -> bool {
    flags.get(key).is_some_and(is_truthy)
}
