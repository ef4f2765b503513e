//! Level tables for the named presets.
//!
//! Every builder here is pure; ids are assigned by the service afterwards.

use crate::model::{CustomLegalFormat, LevelConfig, NumberFormat, Preset};
use crate::NumberingOptions;

/// Left indent per level, in twips (0.5in).
pub const INDENT_UNIT: i32 = 720;

/// Hanging indent of every level, in twips (0.25in).
pub const HANGING_UNIT: i32 = 360;

/// Number of levels a full preset defines.
pub const PRESET_DEPTH: usize = 9;

/// Levels bound to `Heading1`..`Heading6`.
const HEADING_BOUND_LEVELS: usize = 6;

/// One distinct glyph per level of the bulleted preset.
pub const BULLET_GLYPHS: [char; PRESET_DEPTH] = [
    '\u{2022}', '\u{25CB}', '\u{25AA}', '\u{25AB}', '\u{25C6}', '\u{25C7}', '\u{27A2}', '\u{2713}',
    '\u{2013}',
];

const OUTLINE_CYCLE: [NumberFormat; 5] = [
    NumberFormat::UpperRoman,
    NumberFormat::UpperLetter,
    NumberFormat::Decimal,
    NumberFormat::LowerLetter,
    NumberFormat::LowerRoman,
];

const MIXED_OUTLINE_CYCLE: [NumberFormat; 4] = [
    NumberFormat::UpperLetter,
    NumberFormat::Decimal,
    NumberFormat::LowerLetter,
    NumberFormat::LowerRoman,
];

/// Levels 0..LEGAL_PREFIX_DEPTH of the mixed preset use the legal convention.
const LEGAL_PREFIX_DEPTH: usize = 3;

/// Builds the full level table for `preset`.
pub fn preset_levels(preset: Preset, options: &NumberingOptions) -> Vec<LevelConfig> {
    match preset {
        Preset::Legal => legal_levels(PRESET_DEPTH, options),
        Preset::Outline => outline_levels(options),
        Preset::Numbered => numbered_levels(options),
        Preset::Bulleted => bulleted_levels(options),
        Preset::Hybrid => hybrid_levels(options),
        Preset::MixedLegalOutline => mixed_legal_outline_levels(options),
    }
}

/// Legal dotted-decimal levels: `%1`, `%1.%2`, `%1.%2.%3`, ...
pub fn legal_levels(count: usize, options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..count.min(PRESET_DEPTH))
        .map(|k| legal_level(k, 1, legal_pattern(k), options))
        .collect()
}

/// Legal-style levels with caller-chosen starts and wrapping convention.
pub fn custom_legal_levels(
    format: &CustomLegalFormat,
    options: &NumberingOptions,
) -> Vec<LevelConfig> {
    (0..format.levels)
        .map(|k| {
            let start = format.start_values.get(k).copied().unwrap_or(1);
            legal_level(k, start, format.suffix.pattern(k), options)
        })
        .collect()
}

fn legal_pattern(k: usize) -> String {
    (1..=k + 1)
        .map(|i| format!("%{}", i))
        .collect::<Vec<_>>()
        .join(".")
}

fn legal_level(k: usize, start: i32, text: String, options: &NumberingOptions) -> LevelConfig {
    let mut level = base_level(k, NumberFormat::Decimal, text, options).start(start);
    if k > 0 {
        level = level.lvl_restart(k as i32 - 1);
    }
    if k < HEADING_BOUND_LEVELS {
        level = level.p_style(format!("Heading{}", k + 1));
    }
    level
}

fn outline_levels(options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..PRESET_DEPTH)
        .map(|k| {
            let fmt = OUTLINE_CYCLE[k % OUTLINE_CYCLE.len()];
            base_level(k, fmt, outline_pattern(fmt, k), options)
        })
        .collect()
}

// Upper-case and decimal levels take a trailing dot, lower-case ones parentheses.
fn outline_pattern(fmt: NumberFormat, k: usize) -> String {
    match fmt {
        NumberFormat::UpperRoman | NumberFormat::UpperLetter | NumberFormat::Decimal => {
            format!("%{}.", k + 1)
        }
        NumberFormat::LowerLetter | NumberFormat::LowerRoman => format!("(%{})", k + 1),
        NumberFormat::Bullet => BULLET_GLYPHS[k % PRESET_DEPTH].to_string(),
    }
}

fn numbered_levels(options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..PRESET_DEPTH)
        .map(|k| base_level(k, NumberFormat::Decimal, format!("%{}.", k + 1), options))
        .collect()
}

fn bulleted_levels(options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..PRESET_DEPTH)
        .map(|k| bullet_level(k, BULLET_GLYPHS[k], options))
        .collect()
}

fn bullet_level(k: usize, glyph: char, options: &NumberingOptions) -> LevelConfig {
    base_level(k, NumberFormat::Bullet, glyph.to_string(), options).font(&options.bullet_font)
}

fn hybrid_levels(options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..PRESET_DEPTH)
        .map(|k| {
            let n = k + 1;
            match k {
                0 => base_level(k, NumberFormat::Decimal, format!("%{}.", n), options),
                1 => base_level(k, NumberFormat::LowerLetter, format!("(%{})", n), options),
                2 => base_level(k, NumberFormat::LowerRoman, format!("(%{})", n), options),
                3 => bullet_level(k, BULLET_GLYPHS[0], options),
                4 => base_level(k, NumberFormat::Decimal, format!("[%{}]", n), options),
                5 => base_level(k, NumberFormat::LowerLetter, format!("[%{}]", n), options),
                6 => bullet_level(k, BULLET_GLYPHS[1], options),
                7 => bullet_level(k, BULLET_GLYPHS[2], options),
                _ => bullet_level(k, BULLET_GLYPHS[8], options),
            }
        })
        .collect()
}

fn mixed_legal_outline_levels(options: &NumberingOptions) -> Vec<LevelConfig> {
    (0..PRESET_DEPTH)
        .map(|k| {
            if k < LEGAL_PREFIX_DEPTH {
                return legal_level(k, 1, legal_pattern(k), options);
            }
            let fmt = MIXED_OUTLINE_CYCLE[(k - LEGAL_PREFIX_DEPTH) % MIXED_OUTLINE_CYCLE.len()];
            let text = match fmt {
                NumberFormat::UpperLetter => format!("%{}.", k + 1),
                _ => format!("(%{})", k + 1),
            };
            let mut level = base_level(k, fmt, text, options).lvl_restart(k as i32 - 1);
            if k < HEADING_BOUND_LEVELS {
                level = level.p_style(format!("Heading{}", k + 1));
            }
            level
        })
        .collect()
}

fn base_level(
    k: usize,
    fmt: NumberFormat,
    text: String,
    options: &NumberingOptions,
) -> LevelConfig {
    LevelConfig::new(k as i32, fmt, text)
        .justification(options.justification)
        .indent(options.indent_unit * (k as i32 + 1), options.hanging_unit)
}
