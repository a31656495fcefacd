//! Validation for registration fields
//!
//! Every validator returns the trimmed value on success so callers store
//! exactly what was checked.

use crate::errors::{GoalTrackError, Result};

pub const MAX_NAME_CHARS: usize = 64;
pub const MAX_GOAL_CHARS: usize = 200;

/// Display name: non-empty, single line, at most [`MAX_NAME_CHARS`]
pub fn validate_display_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GoalTrackError::InvalidName {
            reason: "Name cannot be empty".to_string(),
        });
    }
    if name.contains('\n') {
        return Err(GoalTrackError::InvalidName {
            reason: "Name must fit on one line".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(GoalTrackError::InvalidName {
            reason: format!("Name is longer than {} characters", MAX_NAME_CHARS),
        });
    }
    Ok(name.to_string())
}

/// Goal text: non-empty, single line, at most [`MAX_GOAL_CHARS`]
pub fn validate_goal(goal: &str) -> Result<String> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(GoalTrackError::InvalidGoal {
            reason: "Goal cannot be empty".to_string(),
        });
    }
    if goal.contains('\n') {
        return Err(GoalTrackError::InvalidGoal {
            reason: "Goal must fit on one line".to_string(),
        });
    }
    if goal.chars().count() > MAX_GOAL_CHARS {
        return Err(GoalTrackError::InvalidGoal {
            reason: format!("Goal is longer than {} characters", MAX_GOAL_CHARS),
        });
    }
    Ok(goal.to_string())
}

/// Emoji tag: exactly one displayable glyph
///
/// Multi-codepoint emoji (skin tones, ZWJ families, flags, keycaps) count
/// as one glyph.
pub fn validate_emoji(emoji: &str) -> Result<String> {
    let emoji = emoji.trim();
    let invalid = |reason: &str| GoalTrackError::InvalidEmoji {
        emoji: emoji.to_string(),
        reason: reason.to_string(),
    };

    if emoji.is_empty() {
        return Err(invalid("Emoji cannot be empty"));
    }
    if emoji.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("Emoji cannot contain whitespace"));
    }
    match glyph_count(emoji) {
        1 => Ok(emoji.to_string()),
        0 => Err(invalid("Emoji has no visible character")),
        _ => Err(invalid("Use exactly one emoji")),
    }
}

/// Count user-perceived glyphs
///
/// Covers what appears in emoji tags: combining marks, variation
/// selectors, skin-tone modifiers, keycaps, tag sequences, zero-width
/// joiners and regional-indicator pairs. Not a full UAX #29 segmenter.
fn glyph_count(s: &str) -> usize {
    let mut count = 0;
    let mut joined = false;
    let mut open_flag = false;

    for c in s.chars() {
        if c == '\u{200D}' {
            joined = true;
            continue;
        }
        if is_extender(c) {
            continue;
        }
        if joined {
            joined = false;
            continue;
        }
        if is_regional_indicator(c) {
            if open_flag {
                open_flag = false;
                continue;
            }
            open_flag = true;
            count += 1;
            continue;
        }
        open_flag = false;
        count += 1;
    }

    count
}

fn is_extender(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'     // combining diacritics
        | '\u{20D0}'..='\u{20FF}'   // combining marks for symbols, incl. keycap
        | '\u{FE00}'..='\u{FE0F}'   // variation selectors
        | '\u{1F3FB}'..='\u{1F3FF}' // skin tone modifiers
        | '\u{E0020}'..='\u{E007F}' // tag sequences
    )
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}
