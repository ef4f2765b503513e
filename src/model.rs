//! Numbering data model: level configurations, abstract definitions and instances.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number format of a single level (`w:numFmt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    Decimal,
    UpperRoman,
    LowerRoman,
    UpperLetter,
    LowerLetter,
    Bullet,
}

impl NumberFormat {
    /// Value written to `w:numFmt/@w:val`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::Bullet => "bullet",
        }
    }
}

/// Level justification (`w:lvlJc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

impl Justification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }
}

/// Multi-level type of an abstract definition (`w:multiLevelType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiLevelType {
    SingleLevel,
    #[default]
    Multilevel,
    HybridMultilevel,
}

impl MultiLevelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MultiLevelType::SingleLevel => "singleLevel",
            MultiLevelType::Multilevel => "multilevel",
            MultiLevelType::HybridMultilevel => "hybridMultilevel",
        }
    }
}

/// Paragraph indentation of a level, in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Indent {
    pub left: i32,
    pub hanging: i32,
}

/// Configuration of one numbering level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub ilvl: i32,
    #[serde(default = "default_start")]
    pub start: i32,
    pub num_fmt: NumberFormat,
    pub lvl_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_style: Option<String>,
    #[serde(default)]
    pub lvl_jc: Justification,
    #[serde(default)]
    pub indent: Indent,
    /// Zero-based ancestor level whose increment resets this counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lvl_restart: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

fn default_start() -> i32 {
    1
}

impl LevelConfig {
    /// Creates a left-justified level starting at 1 with no indentation.
    pub fn new(ilvl: i32, num_fmt: NumberFormat, lvl_text: impl Into<String>) -> Self {
        Self {
            ilvl,
            start: 1,
            num_fmt,
            lvl_text: lvl_text.into(),
            p_style: None,
            lvl_jc: Justification::Left,
            indent: Indent::default(),
            lvl_restart: None,
            font: None,
        }
    }

    pub fn start(mut self, start: i32) -> Self {
        self.start = start;
        self
    }

    pub fn p_style(mut self, style: impl Into<String>) -> Self {
        self.p_style = Some(style.into());
        self
    }

    pub fn indent(mut self, left: i32, hanging: i32) -> Self {
        self.indent = Indent { left, hanging };
        self
    }

    pub fn lvl_restart(mut self, ancestor: i32) -> Self {
        self.lvl_restart = Some(ancestor);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn justification(mut self, jc: Justification) -> Self {
        self.lvl_jc = jc;
        self
    }

    /// Returns a copy whose `lvl_text` went through the allow-list sanitizer.
    pub fn sanitized(&self) -> Self {
        Self {
            lvl_text: crate::validation::sanitize_lvl_text(&self.lvl_text),
            ..self.clone()
        }
    }
}

/// Input of `create_abstract_num`: a name plus raw level configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractNumConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub multi_level_type: MultiLevelType,
    pub levels: Vec<LevelConfig>,
}

impl AbstractNumConfig {
    pub fn new(name: impl Into<String>, levels: Vec<LevelConfig>) -> Self {
        Self {
            name: name.into(),
            multi_level_type: MultiLevelType::Multilevel,
            levels,
        }
    }

    /// Parses a raw JSON configuration.
    ///
    /// The raw value is pre-flighted first so shape errors (non-array levels,
    /// fractional starts) surface as the matching validation error rather than
    /// a generic decode failure. Every `lvlText` is sanitized.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        crate::validation::validate_config(&raw)?;
        let mut config: AbstractNumConfig = serde_json::from_value(raw)?;
        config.levels = config.levels.iter().map(LevelConfig::sanitized).collect();
        crate::validation::validate_level_configs(&config.levels)?;
        Ok(config)
    }
}

/// A reusable numbering definition (`w:abstractNum`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractNumDefinition {
    pub abstract_num_id: i32,
    pub name: String,
    pub multi_level_type: MultiLevelType,
    pub levels: Vec<LevelConfig>,
}

impl AbstractNumDefinition {
    /// Finds the level configuration for `ilvl`.
    pub fn level(&self, ilvl: i32) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.ilvl == ilvl)
    }
}

/// Start override for one level of an instance (`w:lvlOverride`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelOverride {
    pub ilvl: i32,
    pub start_override: i32,
}

/// A concrete use of a definition (`w:num`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumInstance {
    pub num_id: i32,
    pub abstract_num_id: i32,
    pub lvl_overrides: Vec<LevelOverride>,
}

/// Minimal paragraph numbering reference (`w:numPr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumPr {
    pub num_id: i32,
    pub ilvl: i32,
}

impl NumPr {
    pub fn to_xml(&self) -> String {
        format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            self.ilvl, self.num_id
        )
    }
}

impl fmt::Display for NumPr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Definitions plus the instances referencing them; the unit handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingDocument {
    pub definitions: Vec<AbstractNumDefinition>,
    pub instances: Vec<NumInstance>,
}

impl NumberingDocument {
    pub fn new(definitions: Vec<AbstractNumDefinition>, instances: Vec<NumInstance>) -> Self {
        Self {
            definitions,
            instances,
        }
    }

    pub fn definition(&self, abstract_num_id: i32) -> Option<&AbstractNumDefinition> {
        self.definitions
            .iter()
            .find(|d| d.abstract_num_id == abstract_num_id)
    }

    pub fn instance(&self, num_id: i32) -> Option<&NumInstance> {
        self.instances.iter().find(|n| n.num_id == num_id)
    }
}

/// Named, pre-composed definition recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    Legal,
    Outline,
    Numbered,
    Bulleted,
    Hybrid,
    MixedLegalOutline,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Legal,
        Preset::Outline,
        Preset::Numbered,
        Preset::Bulleted,
        Preset::Hybrid,
        Preset::MixedLegalOutline,
    ];

    /// Human-readable name stored on the definition.
    pub fn display_name(&self) -> &'static str {
        match self {
            Preset::Legal => "Legal",
            Preset::Outline => "Outline",
            Preset::Numbered => "Numbered",
            Preset::Bulleted => "Bulleted",
            Preset::Hybrid => "Hybrid",
            Preset::MixedLegalOutline => "Mixed Legal Outline",
        }
    }

    pub fn multi_level_type(&self) -> MultiLevelType {
        match self {
            Preset::Legal | Preset::Outline | Preset::MixedLegalOutline => {
                MultiLevelType::Multilevel
            }
            Preset::Numbered | Preset::Bulleted | Preset::Hybrid => {
                MultiLevelType::HybridMultilevel
            }
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "legal" => Ok(Preset::Legal),
            "outline" => Ok(Preset::Outline),
            "numbered" => Ok(Preset::Numbered),
            "bulleted" => Ok(Preset::Bulleted),
            "hybrid" => Ok(Preset::Hybrid),
            "mixedlegaloutline" => Ok(Preset::MixedLegalOutline),
            _ => Err(Error::UnknownPreset(s.to_string())),
        }
    }
}

/// Wrapping convention for custom legal formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegalSuffix {
    /// `%1.`, `%1.%2.`, ...
    #[default]
    Dot,
    /// `(%1)`, `(%1)(%2)`, ...
    Parens,
}

impl LegalSuffix {
    fn wrap(&self, placeholder: usize) -> String {
        match self {
            LegalSuffix::Dot => format!("%{}.", placeholder),
            LegalSuffix::Parens => format!("(%{})", placeholder),
        }
    }

    /// Compounding pattern for zero-based level `ilvl`.
    pub fn pattern(&self, ilvl: usize) -> String {
        (1..=ilvl + 1).map(|i| self.wrap(i)).collect()
    }
}

impl FromStr for LegalSuffix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(LegalSuffix::Dot),
            "()" => Ok(LegalSuffix::Parens),
            other => Err(Error::InvalidConfig(format!(
                "unsupported legal suffix {:?}; expected \".\" or \"()\"",
                other
            ))),
        }
    }
}

/// Parameters of `create_custom_legal_format`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomLegalFormat {
    pub levels: usize,
    /// Per-level starting counters; missing entries default to 1.
    pub start_values: Vec<i32>,
    pub suffix: LegalSuffix,
}
