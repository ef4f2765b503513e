//! Numbering service - owns id counters and composes builders and serializer.

use log::debug;

use super::presets::{custom_legal_levels, legal_levels, preset_levels, PRESET_DEPTH};
use super::{DefinitionBuilder, InstanceBuilder, NumberingSerializer};
use crate::error::Error;
use crate::model::{
    AbstractNumConfig, AbstractNumDefinition, CustomLegalFormat, LevelConfig, LevelOverride,
    MultiLevelType, NumInstance, NumPr, Preset,
};
use crate::render;
use crate::validation::{self, validate_level_configs, validate_level_index, MAX_LEVELS};
use crate::{NumberingOptions, Result};

const FIRST_ABSTRACT_NUM_ID: i32 = 0;
/// numId 0 means "no numbering" in a paragraph reference.
const FIRST_NUM_ID: i32 = 1;

/// Id allocator and facade over definition, instance and serializer operations.
///
/// One service per document-generation session; call [`reset`](Self::reset)
/// before reusing it for another document.
#[derive(Debug, Clone)]
pub struct NumberingService {
    options: NumberingOptions,
    next_abstract_num_id: i32,
    next_num_id: i32,
}

impl Default for NumberingService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl NumberingService {
    /// Creates a new service with the given options.
    pub fn new(options: NumberingOptions) -> Self {
        Self {
            options,
            next_abstract_num_id: FIRST_ABSTRACT_NUM_ID,
            next_num_id: FIRST_NUM_ID,
        }
    }

    /// Creates a new service with default options.
    pub fn with_defaults() -> Self {
        Self::new(NumberingOptions::default())
    }

    pub fn options(&self) -> &NumberingOptions {
        &self.options
    }

    /// The abstractNumId the next definition will receive.
    pub fn current_abstract_num_id(&self) -> i32 {
        self.next_abstract_num_id
    }

    /// The numId the next instance will receive.
    pub fn current_num_id(&self) -> i32 {
        self.next_num_id
    }

    /// Restores both counters to their initial values.
    pub fn reset(&mut self) {
        debug!("Resetting numbering id counters");
        self.next_abstract_num_id = FIRST_ABSTRACT_NUM_ID;
        self.next_num_id = FIRST_NUM_ID;
    }

    /// Restart instance with the conventional start value of 1.
    pub fn create_restart_instance_at_one(
        &mut self,
        abstract_num_id: i32,
        ilvl: i32,
    ) -> Result<NumInstance> {
        self.create_restart_instance(abstract_num_id, ilvl, 1)
    }

    fn build_definition(
        &mut self,
        name: String,
        multi_level_type: MultiLevelType,
        levels: Vec<LevelConfig>,
    ) -> Result<AbstractNumDefinition> {
        validate_level_configs(&levels)?;

        let abstract_num_id = self.next_abstract_num_id;
        self.next_abstract_num_id += 1;
        debug!(
            "Allocated abstractNumId {} for {:?} ({} levels)",
            abstract_num_id,
            name,
            levels.len()
        );

        Ok(AbstractNumDefinition {
            abstract_num_id,
            name,
            multi_level_type,
            levels,
        })
    }

    fn build_instance(
        &mut self,
        abstract_num_id: i32,
        lvl_overrides: Vec<LevelOverride>,
    ) -> NumInstance {
        let num_id = self.next_num_id;
        self.next_num_id += 1;
        debug!(
            "Allocated numId {} -> abstractNumId {} with {} override(s)",
            num_id,
            abstract_num_id,
            lvl_overrides.len()
        );

        NumInstance {
            num_id,
            abstract_num_id,
            lvl_overrides,
        }
    }
}

impl DefinitionBuilder for NumberingService {
    fn create_abstract_num(&mut self, config: AbstractNumConfig) -> Result<AbstractNumDefinition> {
        self.build_definition(config.name, config.multi_level_type, config.levels)
    }

    fn create_multilevel_list(&mut self, preset: Preset) -> Result<AbstractNumDefinition> {
        debug!("Building {:?} preset", preset);
        let levels = preset_levels(preset, &self.options);
        self.build_definition(
            preset.display_name().to_string(),
            preset.multi_level_type(),
            levels,
        )
    }

    fn get_legal_numbering_format(&mut self, levels: i32) -> Result<AbstractNumDefinition> {
        let count = levels.clamp(1, PRESET_DEPTH as i32) as usize;
        let levels = legal_levels(count, &self.options);
        self.build_definition(
            Preset::Legal.display_name().to_string(),
            Preset::Legal.multi_level_type(),
            levels,
        )
    }

    fn create_custom_legal_format(
        &mut self,
        format: &CustomLegalFormat,
    ) -> Result<AbstractNumDefinition> {
        if format.levels > MAX_LEVELS {
            return Err(Error::TooManyLevels(format.levels));
        }
        let levels = custom_legal_levels(format, &self.options);
        self.build_definition(
            "Custom Legal".to_string(),
            MultiLevelType::Multilevel,
            levels,
        )
    }
}

impl InstanceBuilder for NumberingService {
    fn create_num_instance(&mut self, abstract_num_id: i32) -> NumInstance {
        self.build_instance(abstract_num_id, Vec::new())
    }

    fn create_restart_instance(
        &mut self,
        abstract_num_id: i32,
        ilvl: i32,
        start_override: i32,
    ) -> Result<NumInstance> {
        self.create_instance_with_overrides(
            abstract_num_id,
            vec![LevelOverride {
                ilvl,
                start_override,
            }],
        )
    }

    fn create_continuation_instance(&mut self, abstract_num_id: i32) -> NumInstance {
        self.build_instance(abstract_num_id, Vec::new())
    }

    fn create_instance_with_overrides(
        &mut self,
        abstract_num_id: i32,
        overrides: Vec<LevelOverride>,
    ) -> Result<NumInstance> {
        for lvl_override in &overrides {
            validate_level_index(lvl_override.ilvl, Some("level override"))?;
            if lvl_override.start_override < 0 {
                return Err(Error::InvalidStart {
                    ilvl: lvl_override.ilvl,
                    value: lvl_override.start_override.to_string(),
                });
            }
        }
        Ok(self.build_instance(abstract_num_id, overrides))
    }
}

impl NumberingSerializer for NumberingService {
    fn generate_numbering_xml(
        &self,
        definitions: &[AbstractNumDefinition],
        instances: &[NumInstance],
    ) -> String {
        render::generate_numbering_xml(definitions, instances)
    }

    fn generate_num_pr(&self, num_id: i32, ilvl: i32) -> Result<NumPr> {
        render::generate_num_pr(num_id, ilvl)
    }

    fn validate_config(&self, raw: &serde_json::Value) -> Result<()> {
        validation::validate_config(raw)
    }
}
