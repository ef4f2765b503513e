//! Marker resolver - previews the visible list markers a numbering produces.

use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::error::Error;
use crate::model::{AbstractNumDefinition, NumberFormat, NumberingDocument};
use crate::numerals::format_number;
use crate::validation::validate_level_index;
use crate::Result;

const LEVEL_COUNT: usize = 9;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%([1-9])").expect("placeholder pattern is valid"))
}

/// Resolver for generated numbering definitions.
pub struct MarkerResolver<'a> {
    document: &'a NumberingDocument,
    /// Maps abstractNumId -> current counters (one per level, None = not started).
    /// Keyed by definition so instances without overrides continue the count.
    counters: HashMap<i32, [Option<i32>; LEVEL_COUNT]>,
    /// (numId, ilvl) pairs whose startOverride has already been applied.
    applied_overrides: HashSet<(i32, i32)>,
}

impl<'a> MarkerResolver<'a> {
    pub fn new(document: &'a NumberingDocument) -> Self {
        Self {
            document,
            counters: HashMap::new(),
            applied_overrides: HashSet::new(),
        }
    }

    /// Gets the marker for a paragraph numbered `(num_id, ilvl)`, e.g. "1.2" or "(b)".
    /// Updates the internal counter state.
    pub fn next_marker(&mut self, num_id: i32, ilvl: i32) -> Result<String> {
        validate_level_index(ilvl, Some("marker"))?;
        let instance = self
            .document
            .instance(num_id)
            .ok_or(Error::UnknownNumId(num_id))?;
        let abs_id = instance.abstract_num_id;
        let definition = self
            .document
            .definition(abs_id)
            .ok_or(Error::UnknownAbstractNumId(abs_id))?;
        let level = definition.level(ilvl).ok_or(Error::UndefinedLevel {
            abstract_num_id: abs_id,
            ilvl,
        })?;

        // An instance override takes effect the first time the instance reaches that level.
        let pending_override = instance
            .lvl_overrides
            .iter()
            .find(|o| o.ilvl == ilvl)
            .map(|o| o.start_override)
            .filter(|_| self.applied_overrides.insert((num_id, ilvl)));

        let counters = self.counters.entry(abs_id).or_insert([None; LEVEL_COUNT]);
        let idx = ilvl as usize;
        counters[idx] = Some(match (pending_override, counters[idx]) {
            (Some(start), _) => start,
            (None, None) => level.start,
            // Counters stop at i32::MAX rather than wrap.
            (None, Some(current)) => current.saturating_add(1),
        });

        // A deeper level without lvlRestart restarts after any shallower level;
        // with lvlRestart = r it restarts only after levels 0..=r.
        for deeper in (idx + 1)..LEVEL_COUNT {
            let restarts = definition
                .level(deeper as i32)
                .and_then(|l| l.lvl_restart)
                .map_or(true, |r| ilvl <= r);
            if restarts {
                counters[deeper] = None;
            }
        }

        Ok(render_marker(definition, counters, &level.lvl_text))
    }

    /// Forgets all counters and applied overrides.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.applied_overrides.clear();
    }
}

fn render_marker(
    definition: &AbstractNumDefinition,
    counters: &[Option<i32>; LEVEL_COUNT],
    lvl_text: &str,
) -> String {
    placeholder_regex()
        .replace_all(lvl_text, |caps: &Captures| {
            let idx = caps[1].parse::<usize>().map_or(0, |n| n - 1);
            let referenced = definition.level(idx as i32);
            let fmt = referenced.map_or(NumberFormat::Decimal, |l| l.num_fmt);
            // A level that has not been used yet shows its start value.
            let value = counters[idx]
                .or_else(|| referenced.map(|l| l.start))
                .unwrap_or(1);
            format_number(fmt, value.max(0) as u32)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AbstractNumConfig, LevelConfig, Preset};
    use crate::numbering::{DefinitionBuilder, InstanceBuilder, NumberingService};
    use pretty_assertions::assert_eq;

    fn markers(resolver: &mut MarkerResolver, seq: &[(i32, i32)]) -> Vec<String> {
        seq.iter()
            .map(|&(num_id, ilvl)| resolver.next_marker(num_id, ilvl).unwrap())
            .collect()
    }

    #[test]
    fn test_legal_markers_compound_and_reset() {
        let mut service = NumberingService::with_defaults();
        let legal = service.create_multilevel_list(Preset::Legal).unwrap();
        let num = service.create_num_instance(legal.abstract_num_id);
        let doc = NumberingDocument::new(vec![legal], vec![num]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(&mut resolver, &[(1, 0), (1, 1), (1, 1), (1, 2), (1, 0), (1, 1)]),
            vec!["1", "1.1", "1.2", "1.2.1", "2", "2.1"]
        );
    }

    #[test]
    fn test_outline_markers_use_level_formats() {
        let mut service = NumberingService::with_defaults();
        let outline = service.create_multilevel_list(Preset::Outline).unwrap();
        let num = service.create_num_instance(outline.abstract_num_id);
        let doc = NumberingDocument::new(vec![outline], vec![num]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(
                &mut resolver,
                &[(1, 0), (1, 1), (1, 2), (1, 3), (1, 3), (1, 4), (1, 0)]
            ),
            vec!["I.", "A.", "1.", "(a)", "(b)", "(i)", "II."]
        );
    }

    #[test]
    fn test_continuation_and_restart_instances() {
        let mut service = NumberingService::with_defaults();
        let numbered = service.create_multilevel_list(Preset::Numbered).unwrap();
        let abs_id = numbered.abstract_num_id;
        let first = service.create_num_instance(abs_id);
        let cont = service.create_continuation_instance(abs_id);
        let restart = service.create_restart_instance(abs_id, 0, 1).unwrap();
        let doc = NumberingDocument::new(vec![numbered], vec![first, cont, restart]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(&mut resolver, &[(1, 0), (1, 0), (2, 0), (3, 0), (3, 0)]),
            vec!["1.", "2.", "3.", "1.", "2."]
        );
    }

    #[test]
    fn test_lvl_restart_limits_which_levels_reset() {
        // Level 2 restarts only after level 0, so it keeps counting across level 1 items.
        let levels = vec![
            LevelConfig::new(0, NumberFormat::Decimal, "%1."),
            LevelConfig::new(1, NumberFormat::UpperLetter, "%2."),
            LevelConfig::new(2, NumberFormat::LowerRoman, "%3.").lvl_restart(0),
        ];
        let mut service = NumberingService::with_defaults();
        let def = service
            .create_abstract_num(AbstractNumConfig::new("Continuous", levels))
            .unwrap();
        let num = service.create_num_instance(def.abstract_num_id);
        let doc = NumberingDocument::new(vec![def], vec![num]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(
                &mut resolver,
                &[(1, 0), (1, 1), (1, 2), (1, 1), (1, 2), (1, 0), (1, 2)]
            ),
            vec!["1.", "A.", "i.", "B.", "ii.", "2.", "i."]
        );
    }

    #[test]
    fn test_level_start_values_are_honored() {
        let levels = vec![LevelConfig::new(0, NumberFormat::UpperLetter, "Exhibit %1").start(3)];
        let mut service = NumberingService::with_defaults();
        let def = service
            .create_abstract_num(AbstractNumConfig::new("Exhibits", levels))
            .unwrap();
        let num = service.create_num_instance(def.abstract_num_id);
        let doc = NumberingDocument::new(vec![def], vec![num]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(&mut resolver, &[(1, 0), (1, 0)]),
            vec!["Exhibit C", "Exhibit D"]
        );
        resolver.reset();
        assert_eq!(resolver.next_marker(1, 0).unwrap(), "Exhibit C");
    }

    #[test]
    fn test_counter_at_max_start_does_not_overflow() {
        let levels = vec![LevelConfig::new(0, NumberFormat::Decimal, "%1.").start(i32::MAX)];
        let mut service = NumberingService::with_defaults();
        let def = service
            .create_abstract_num(AbstractNumConfig::new("Huge", levels))
            .unwrap();
        let num = service.create_num_instance(def.abstract_num_id);
        let restart = service
            .create_restart_instance(def.abstract_num_id, 0, i32::MAX)
            .unwrap();
        let doc = NumberingDocument::new(vec![def], vec![num, restart]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(
            markers(&mut resolver, &[(1, 0), (1, 0), (2, 0), (2, 0)]),
            vec!["2147483647.", "2147483647.", "2147483647.", "2147483647."]
        );
    }

    #[test]
    fn test_unknown_references_fail() {
        let mut service = NumberingService::with_defaults();
        let def = service.get_legal_numbering_format(2).unwrap();
        let num = service.create_num_instance(def.abstract_num_id);
        let orphan = service.create_num_instance(42);
        let doc = NumberingDocument::new(vec![def], vec![num, orphan]);

        let mut resolver = MarkerResolver::new(&doc);
        assert_eq!(resolver.next_marker(9, 0), Err(Error::UnknownNumId(9)));
        assert_eq!(
            resolver.next_marker(1, 5),
            Err(Error::UndefinedLevel {
                abstract_num_id: 0,
                ilvl: 5
            })
        );
        assert_eq!(
            resolver.next_marker(2, 0),
            Err(Error::UnknownAbstractNumId(42))
        );
        assert!(matches!(
            resolver.next_marker(1, 9),
            Err(Error::LevelOutOfRange { .. })
        ));
    }
}
