//! Validation layer - level index and level configuration checks, plus the
//! `lvlText` sanitizer.
//!
//! All checks run before any id is allocated, so a failed call never leaves a
//! partially built definition behind.

use log::warn;
use serde_json::Value;
use std::collections::HashSet;

use crate::error::Error;
use crate::model::{AbstractNumConfig, LevelConfig};
use crate::Result;

/// Deepest level index a definition may use.
pub const MAX_LEVEL: i32 = 8;

/// Maximum number of levels in one definition.
pub const MAX_LEVELS: usize = 9;

/// Bullet glyph code points that may appear in a level text.
///
/// Covers the Unicode glyphs used by the presets plus the private-use code
/// points Symbol and Wingdings map their bullets to.
pub const RECOGNIZED_BULLETS: &[char] = &[
    '\u{2022}', // bullet
    '\u{25E6}', // white bullet
    '\u{25CB}', // white circle
    '\u{25CF}', // black circle
    '\u{25AA}', // black small square
    '\u{25AB}', // white small square
    '\u{25A0}', // black square
    '\u{25A1}', // white square
    '\u{25C6}', // black diamond
    '\u{25C7}', // white diamond
    '\u{25BA}', // black right-pointing pointer
    '\u{27A2}', // arrowhead
    '\u{2713}', // check mark
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{00B7}', // middle dot
    '\u{F0A7}', // Wingdings square
    '\u{F0B7}', // Symbol bullet
    '\u{F0D8}', // Wingdings arrowhead
    '\u{F0FC}', // Wingdings check
    '\u{F076}', // Wingdings diamond
];

const ALLOWED_PUNCTUATION: &[char] = &[
    ' ', '.', ',', ':', ';', '(', ')', '[', ']', '{', '}', '-', '/', '\\', '|', '*', '+', '#',
    '!', '?', '_', '~', '=', '\u{00A7}', '\u{00B6}',
];

/// Checks that `ilvl` is a level index in `[0, 8]`.
pub fn validate_level_index(ilvl: i32, context: Option<&str>) -> Result<()> {
    if (0..=MAX_LEVEL).contains(&ilvl) {
        Ok(())
    } else {
        Err(Error::LevelOutOfRange {
            value: ilvl.to_string(),
            context: context.map(str::to_string),
        })
    }
}

/// Checks the shape of a level configuration array.
pub fn validate_level_configs(configs: &[LevelConfig]) -> Result<()> {
    if configs.is_empty() {
        return Err(Error::EmptyLevels);
    }
    if configs.len() > MAX_LEVELS {
        return Err(Error::TooManyLevels(configs.len()));
    }

    let mut seen = HashSet::new();
    for config in configs {
        validate_level_index(config.ilvl, Some("level configuration"))?;
        if !seen.insert(config.ilvl) {
            return Err(Error::DuplicateLevel(config.ilvl));
        }
        if config.lvl_text.is_empty() {
            return Err(Error::EmptyLevelText(config.ilvl));
        }
        if config.start < 0 {
            return Err(Error::InvalidStart {
                ilvl: config.ilvl,
                value: config.start.to_string(),
            });
        }
        if let Some(restart) = config.lvl_restart {
            validate_level_index(restart, Some("lvlRestart"))?;
            check_restart_ancestor(config.ilvl, restart)?;
        }
    }
    Ok(())
}

/// Pre-flight check on a raw, definition-shaped JSON value.
///
/// Surfaces the same failures as building the definition, without allocating
/// an id. Also rejects the shapes typed input cannot express: a non-array
/// `levels` field and fractional level indices or start values.
pub fn validate_config(raw: &Value) -> Result<()> {
    let Value::Object(map) = raw else {
        return Err(Error::InvalidConfig(format!(
            "expected a definition object, got {}",
            json_type_name(raw)
        )));
    };

    let levels = match map.get("levels") {
        Some(Value::Array(levels)) => levels,
        Some(other) => return Err(Error::NotAnArray(json_type_name(other).to_string())),
        None => return Err(Error::NotAnArray("nothing".to_string())),
    };
    if levels.is_empty() {
        return Err(Error::EmptyLevels);
    }
    if levels.len() > MAX_LEVELS {
        return Err(Error::TooManyLevels(levels.len()));
    }

    let mut seen = HashSet::new();
    for (idx, level) in levels.iter().enumerate() {
        let Value::Object(level) = level else {
            return Err(Error::InvalidConfig(format!(
                "level entry {} must be an object, got {}",
                idx,
                json_type_name(level)
            )));
        };

        let ilvl = match level.get("ilvl") {
            Some(value) => raw_level_index(value)?,
            None => {
                return Err(Error::InvalidConfig(format!(
                    "level entry {} is missing ilvl",
                    idx
                )))
            }
        };
        if !seen.insert(ilvl) {
            return Err(Error::DuplicateLevel(ilvl));
        }

        match level.get("lvlText") {
            Some(Value::String(text)) if !text.is_empty() => {}
            _ => return Err(Error::EmptyLevelText(ilvl)),
        }

        if let Some(start) = level.get("start") {
            match start.as_i64() {
                Some(n) if (0..=i32::MAX as i64).contains(&n) => {}
                _ => {
                    return Err(Error::InvalidStart {
                        ilvl,
                        value: start.to_string(),
                    })
                }
            }
        }

        if let Some(restart) = level.get("lvlRestart") {
            check_restart_ancestor(ilvl, raw_level_index(restart)?)?;
        }
    }

    let config: AbstractNumConfig = serde_json::from_value(raw.clone())?;
    validate_level_configs(&config.levels)
}

// lvlRestart names an ancestor, so it must be shallower than the level itself.
fn check_restart_ancestor(ilvl: i32, restart: i32) -> Result<()> {
    if restart < ilvl {
        Ok(())
    } else {
        Err(Error::LevelOutOfRange {
            value: restart.to_string(),
            context: Some("lvlRestart".to_string()),
        })
    }
}

fn raw_level_index(value: &Value) -> Result<i32> {
    let out_of_range = || Error::LevelOutOfRange {
        value: value.to_string(),
        context: Some("raw level configuration".to_string()),
    };
    let ilvl = value.as_i64().ok_or_else(out_of_range)?;
    let ilvl = i32::try_from(ilvl).map_err(|_| out_of_range())?;
    validate_level_index(ilvl, Some("raw level configuration"))?;
    Ok(ilvl)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Filters a level text pattern down to an allow-list.
///
/// Keeps `%1`..`%9` placeholders, alphanumerics, ordinary punctuation and
/// recognized bullet glyphs. Everything else is dropped, including the
/// characters that could break out of an attribute (`< > & " '`); nothing is
/// re-encoded as an entity.
pub fn sanitize_lvl_text(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut stripped = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '%' {
            match chars.peek() {
                Some(&digit @ '1'..='9') => {
                    sanitized.push('%');
                    sanitized.push(digit);
                    chars.next();
                }
                _ => stripped += 1,
            }
        } else if is_allowed_char(ch) {
            sanitized.push(ch);
        } else {
            stripped += 1;
        }
    }

    if stripped > 0 {
        warn!(
            "Stripped {} disallowed character(s) from lvlText {:?}",
            stripped, text
        );
    }
    sanitized
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&ch) || RECOGNIZED_BULLETS.contains(&ch)
}
