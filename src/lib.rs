//! # lexnum
//!
//! Multilevel list numbering for legal document assembly.
//!
//! Builds WordprocessingML numbering definitions (legal, outline, bulleted and
//! hybrid presets or custom level tables), allocates instances with counter
//! overrides, and serializes both into a `<w:numbering>` fragment. For export
//! paths without native lists, [`scheme`] stamps plain-text prefixes onto
//! headings instead.
//!
//! ## Example
//!
//! ```
//! use lexnum::{DefinitionBuilder, InstanceBuilder, NumberingSerializer, NumberingService, Preset};
//!
//! let mut service = NumberingService::with_defaults();
//! let legal = service.create_multilevel_list(Preset::Legal).unwrap();
//! let first = service.create_num_instance(legal.abstract_num_id);
//! let schedule = service.create_restart_instance(legal.abstract_num_id, 0, 1).unwrap();
//!
//! let xml = service.generate_numbering_xml(&[legal], &[first, schedule]);
//! assert!(xml.starts_with("<w:numbering"));
//! ```

pub mod error;
pub mod model;
pub mod numbering;
pub mod numerals;
pub mod render;
pub mod scheme;
pub mod validation;

pub use crate::model::{
    AbstractNumConfig, AbstractNumDefinition, CustomLegalFormat, Indent, Justification,
    LegalSuffix, LevelConfig, LevelOverride, MultiLevelType, NumInstance, NumPr, NumberFormat,
    NumberingDocument, Preset,
};
pub use error::{Error, Result};
pub use numbering::{
    DefinitionBuilder, InstanceBuilder, MarkerResolver, NumberingSerializer, NumberingService,
};
pub use render::{NumberingXmlRenderer, Renderer};
pub use scheme::{apply_scheme, Heading, HeadingNumberer, NumberingScheme};

/// Options shared by every definition a service builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingOptions {
    /// Left indent added per level, in twips.
    pub indent_unit: i32,
    /// Hanging indent of each level, in twips.
    pub hanging_unit: i32,
    /// Font bound to bullet glyphs.
    pub bullet_font: String,
    /// Justification of every preset level.
    pub justification: Justification,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            indent_unit: numbering::INDENT_UNIT,
            hanging_unit: numbering::HANGING_UNIT,
            bullet_font: "Segoe UI Symbol".to_string(),
            justification: Justification::Left,
        }
    }
}

/// Builds a preset definition with one instance and renders it.
///
/// `levels` truncates the legal preset; other presets always carry nine levels.
pub fn render_preset(preset: Preset, levels: Option<i32>) -> Result<String> {
    let mut service = NumberingService::with_defaults();
    let definition = match (preset, levels) {
        (Preset::Legal, Some(levels)) => service.get_legal_numbering_format(levels)?,
        _ => service.create_multilevel_list(preset)?,
    };
    let instance = service.create_num_instance(definition.abstract_num_id);
    Ok(service.generate_numbering_xml(&[definition], &[instance]))
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    fn to_py_err(e: Error) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
    }

    /// Renders the numbering XML for a named preset.
    #[pyfunction]
    #[pyo3(signature = (preset, levels=None))]
    fn numbering_xml(preset: &str, levels: Option<i32>) -> PyResult<String> {
        let preset: Preset = preset.parse().map_err(to_py_err)?;
        render_preset(preset, levels).map_err(to_py_err)
    }

    /// Prefixes `(level, text)` headings under a plain-text scheme.
    #[pyfunction]
    fn apply_heading_scheme(scheme: &str, headings: Vec<(usize, String)>) -> PyResult<Vec<String>> {
        let scheme: NumberingScheme = scheme.parse().map_err(to_py_err)?;
        let headings: Vec<Heading> = headings
            .into_iter()
            .map(|(level, text)| Heading::new(level, text))
            .collect();
        Ok(apply_scheme(scheme, &headings))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn lexnum(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(numbering_xml, m)?)?;
        m.add_function(wrap_pyfunction!(apply_heading_scheme, m)?)?;
        Ok(())
    }
}
