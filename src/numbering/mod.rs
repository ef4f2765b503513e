//! Numbering builders: definitions, instances and their serialization.
//!
//! The three capabilities are separate traits so callers can depend on just
//! the part they use; [`NumberingService`] implements all of them.

mod presets;
mod resolver;
mod service;

use crate::model::{
    AbstractNumConfig, AbstractNumDefinition, CustomLegalFormat, LevelOverride, NumInstance,
    NumPr, Preset,
};
use crate::Result;

pub use self::presets::{
    custom_legal_levels, legal_levels, preset_levels, BULLET_GLYPHS, HANGING_UNIT, INDENT_UNIT,
    PRESET_DEPTH,
};
pub use self::resolver::MarkerResolver;
pub use self::service::NumberingService;

/// Builds abstract numbering definitions.
pub trait DefinitionBuilder {
    /// Wraps caller-supplied levels into a new definition with the next id.
    fn create_abstract_num(&mut self, config: AbstractNumConfig) -> Result<AbstractNumDefinition>;

    /// Builds a definition from a named preset.
    fn create_multilevel_list(&mut self, preset: Preset) -> Result<AbstractNumDefinition>;

    /// Legal preset with exactly `levels` levels, clamped into `[1, 9]`.
    fn get_legal_numbering_format(&mut self, levels: i32) -> Result<AbstractNumDefinition>;

    /// Legal-style definition with custom starts and wrapping.
    fn create_custom_legal_format(
        &mut self,
        format: &CustomLegalFormat,
    ) -> Result<AbstractNumDefinition>;
}

/// Allocates numbering instances referencing a definition.
pub trait InstanceBuilder {
    fn create_num_instance(&mut self, abstract_num_id: i32) -> NumInstance;

    /// Instance restarting `ilvl` at `start_override`.
    fn create_restart_instance(
        &mut self,
        abstract_num_id: i32,
        ilvl: i32,
        start_override: i32,
    ) -> Result<NumInstance>;

    /// Instance that explicitly continues the definition's numbering.
    fn create_continuation_instance(&mut self, abstract_num_id: i32) -> NumInstance;

    fn create_instance_with_overrides(
        &mut self,
        abstract_num_id: i32,
        overrides: Vec<LevelOverride>,
    ) -> Result<NumInstance>;
}

/// Renders definitions and instances into markup.
pub trait NumberingSerializer {
    fn generate_numbering_xml(
        &self,
        definitions: &[AbstractNumDefinition],
        instances: &[NumInstance],
    ) -> String;

    fn generate_num_pr(&self, num_id: i32, ilvl: i32) -> Result<NumPr>;

    /// Pre-flight check on a raw definition; allocates nothing.
    fn validate_config(&self, raw: &serde_json::Value) -> Result<()>;
}
