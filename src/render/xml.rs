use log::debug;

use super::escape::escape_xml_attr;
use crate::model::{AbstractNumDefinition, LevelConfig, NumInstance, NumPr, NumberingDocument};
use crate::render::Renderer;
use crate::validation::validate_level_index;
use crate::Result;

/// WordprocessingML main namespace bound to the `w:` prefix.
pub const W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Renders definitions and instances as a `<w:numbering>` fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberingXmlRenderer;

impl Renderer for NumberingXmlRenderer {
    fn render(&self, document: &NumberingDocument) -> Result<String> {
        Ok(generate_numbering_xml(
            &document.definitions,
            &document.instances,
        ))
    }
}

/// Serializes definitions followed by instances.
///
/// Structure is not re-validated here; text values are escaped once.
pub fn generate_numbering_xml(
    definitions: &[AbstractNumDefinition],
    instances: &[NumInstance],
) -> String {
    debug!(
        "Rendering {} abstract numbering(s) and {} instance(s)",
        definitions.len(),
        instances.len()
    );

    let mut out = String::new();
    out.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, W_NAMESPACE));
    for definition in definitions {
        write_abstract_num(&mut out, definition);
    }
    for instance in instances {
        write_num(&mut out, instance);
    }
    out.push_str("</w:numbering>");
    out
}

/// Builds the paragraph numbering reference for `(num_id, ilvl)`.
pub fn generate_num_pr(num_id: i32, ilvl: i32) -> Result<NumPr> {
    validate_level_index(ilvl, Some("paragraph numbering reference"))?;
    Ok(NumPr { num_id, ilvl })
}

fn write_abstract_num(out: &mut String, definition: &AbstractNumDefinition) {
    out.push_str(&format!(
        r#"<w:abstractNum w:abstractNumId="{}">"#,
        definition.abstract_num_id
    ));
    out.push_str(&format!(
        r#"<w:multiLevelType w:val="{}"/>"#,
        definition.multi_level_type.as_str()
    ));
    if !definition.name.is_empty() {
        out.push_str(&format!(
            r#"<w:name w:val="{}"/>"#,
            escape_xml_attr(&definition.name)
        ));
    }
    for level in &definition.levels {
        write_level(out, level);
    }
    out.push_str("</w:abstractNum>");
}

// Child order follows CT_Lvl: start, numFmt, lvlRestart, pStyle, lvlText, lvlJc, pPr, rPr.
fn write_level(out: &mut String, level: &LevelConfig) {
    out.push_str(&format!(r#"<w:lvl w:ilvl="{}">"#, level.ilvl));
    out.push_str(&format!(r#"<w:start w:val="{}"/>"#, level.start));
    out.push_str(&format!(
        r#"<w:numFmt w:val="{}"/>"#,
        level.num_fmt.as_str()
    ));
    if let Some(restart) = level.lvl_restart {
        // w:lvlRestart is one-based; 0 would mean "never restart".
        out.push_str(&format!(r#"<w:lvlRestart w:val="{}"/>"#, restart + 1));
    }
    if let Some(style) = &level.p_style {
        out.push_str(&format!(
            r#"<w:pStyle w:val="{}"/>"#,
            escape_xml_attr(style)
        ));
    }
    out.push_str(&format!(
        r#"<w:lvlText w:val="{}"/>"#,
        escape_xml_attr(&level.lvl_text)
    ));
    out.push_str(&format!(r#"<w:lvlJc w:val="{}"/>"#, level.lvl_jc.as_str()));
    out.push_str(&format!(
        r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
        level.indent.left, level.indent.hanging
    ));
    if let Some(font) = &level.font {
        let font = escape_xml_attr(font);
        out.push_str(&format!(
            r#"<w:rPr><w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:hint="default"/></w:rPr>"#,
            font
        ));
    }
    out.push_str("</w:lvl>");
}

fn write_num(out: &mut String, instance: &NumInstance) {
    out.push_str(&format!(r#"<w:num w:numId="{}">"#, instance.num_id));
    out.push_str(&format!(
        r#"<w:abstractNumId w:val="{}"/>"#,
        instance.abstract_num_id
    ));
    for lvl_override in &instance.lvl_overrides {
        out.push_str(&format!(
            r#"<w:lvlOverride w:ilvl="{}"><w:startOverride w:val="{}"/></w:lvlOverride>"#,
            lvl_override.ilvl, lvl_override.start_override
        ));
    }
    out.push_str("</w:num>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{LevelOverride, MultiLevelType, NumberFormat};

    fn definition(levels: Vec<LevelConfig>) -> AbstractNumDefinition {
        AbstractNumDefinition {
            abstract_num_id: 0,
            name: "Test".to_string(),
            multi_level_type: MultiLevelType::Multilevel,
            levels,
        }
    }

    #[test]
    fn test_level_text_is_escaped() {
        let def = definition(vec![LevelConfig::new(0, NumberFormat::Decimal, "<%1>&")]);
        let xml = generate_numbering_xml(&[def], &[]);
        assert!(xml.contains(r#"<w:lvlText w:val="&lt;%1&gt;&amp;"/>"#));
        assert!(!xml.contains("<%1>"));
    }

    #[test]
    fn test_level_elements_follow_schema_order() {
        let level = LevelConfig::new(1, NumberFormat::Decimal, "%1.%2")
            .p_style("Heading2")
            .lvl_restart(0)
            .indent(1440, 360);
        let xml = generate_numbering_xml(&[definition(vec![level])], &[]);
        assert!(xml.contains(concat!(
            r#"<w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="decimal"/>"#,
            r#"<w:lvlRestart w:val="1"/><w:pStyle w:val="Heading2"/>"#,
            r#"<w:lvlText w:val="%1.%2"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="1440" w:hanging="360"/></w:pPr></w:lvl>"#
        )));
    }

    #[test]
    fn test_bullet_font_renders_run_fonts() {
        let level = LevelConfig::new(0, NumberFormat::Bullet, "\u{2022}").font("Symbol");
        let xml = generate_numbering_xml(&[definition(vec![level])], &[]);
        assert!(xml.contains(r#"<w:rFonts w:ascii="Symbol" w:hAnsi="Symbol" w:hint="default"/>"#));
    }

    #[test]
    fn test_instances_follow_definitions_with_overrides() {
        let instance = NumInstance {
            num_id: 2,
            abstract_num_id: 0,
            lvl_overrides: vec![LevelOverride {
                ilvl: 0,
                start_override: 5,
            }],
        };
        let def = definition(vec![LevelConfig::new(0, NumberFormat::Decimal, "%1.")]);
        let xml = generate_numbering_xml(&[def], &[instance]);

        let abstract_pos = xml.find("<w:abstractNum ").expect("abstractNum present");
        let num_pos = xml.find("<w:num ").expect("num present");
        assert!(abstract_pos < num_pos);
        assert!(xml.ends_with(concat!(
            r#"<w:num w:numId="2"><w:abstractNumId w:val="0"/>"#,
            r#"<w:lvlOverride w:ilvl="0"><w:startOverride w:val="5"/></w:lvlOverride>"#,
            r#"</w:num></w:numbering>"#
        )));
    }

    #[test]
    fn test_generate_num_pr_validates_level() {
        assert_eq!(generate_num_pr(4, 2), Ok(NumPr { num_id: 4, ilvl: 2 }));
        assert!(matches!(
            generate_num_pr(4, 9),
            Err(Error::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_renderer_trait_matches_free_function() {
        let doc = NumberingDocument::new(
            vec![definition(vec![LevelConfig::new(0, NumberFormat::Decimal, "%1.")])],
            vec![],
        );
        let rendered = NumberingXmlRenderer
            .render(&doc)
            .expect("render should work");
        assert_eq!(rendered, generate_numbering_xml(&doc.definitions, &[]));
    }
}
