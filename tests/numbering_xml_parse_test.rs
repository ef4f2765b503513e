use hard_xml::XmlRead;
use lexnum::{
    AbstractNumConfig, DefinitionBuilder, InstanceBuilder, LevelConfig, NumberFormat,
    NumberingSerializer, NumberingService, Preset,
};

#[derive(Debug, XmlRead)]
#[xml(tag = "w:numbering")]
struct Numbering {
    #[xml(child = "w:abstractNum")]
    abstract_nums: Vec<AbstractNum>,
    #[xml(child = "w:num")]
    nums: Vec<Num>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:abstractNum")]
struct AbstractNum {
    #[xml(attr = "w:abstractNumId")]
    abstract_num_id: Option<i32>,
    #[xml(child = "w:name")]
    name: Option<Name>,
    #[xml(child = "w:lvl")]
    levels: Vec<Lvl>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:name")]
struct Name {
    #[xml(attr = "w:val")]
    value: Option<String>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:lvl")]
struct Lvl {
    #[xml(attr = "w:ilvl")]
    ilvl: Option<i32>,
    #[xml(child = "w:start")]
    start: Option<Start>,
    #[xml(child = "w:numFmt")]
    num_fmt: Option<NumFmt>,
    #[xml(child = "w:lvlRestart")]
    lvl_restart: Option<LvlRestart>,
    #[xml(child = "w:lvlText")]
    lvl_text: Option<LvlText>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:start")]
struct Start {
    #[xml(attr = "w:val")]
    value: Option<i32>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:numFmt")]
struct NumFmt {
    #[xml(attr = "w:val")]
    value: Option<String>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:lvlRestart")]
struct LvlRestart {
    #[xml(attr = "w:val")]
    value: Option<i32>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:lvlText")]
struct LvlText {
    #[xml(attr = "w:val")]
    value: Option<String>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:num")]
struct Num {
    #[xml(attr = "w:numId")]
    num_id: Option<i32>,
    #[xml(child = "w:abstractNumId")]
    abstract_num_id: Option<AbstractNumId>,
    #[xml(child = "w:lvlOverride")]
    overrides: Vec<LvlOverride>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:abstractNumId")]
struct AbstractNumId {
    #[xml(attr = "w:val")]
    value: Option<i32>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:lvlOverride")]
struct LvlOverride {
    #[xml(attr = "w:ilvl")]
    ilvl: Option<i32>,
    #[xml(child = "w:startOverride")]
    start_override: Option<StartOverride>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "w:startOverride")]
struct StartOverride {
    #[xml(attr = "w:val")]
    value: Option<i32>,
}

fn parse(xml: &str) -> Numbering {
    Numbering::from_str(xml).expect("Failed to parse numbering XML")
}

#[test]
fn test_every_preset_parses_as_numbering_part() {
    let mut service = NumberingService::with_defaults();
    let definitions: Vec<_> = Preset::ALL
        .iter()
        .map(|&preset| service.create_multilevel_list(preset).unwrap())
        .collect();
    let instances: Vec<_> = definitions
        .iter()
        .map(|d| service.create_num_instance(d.abstract_num_id))
        .collect();

    let numbering = parse(&service.generate_numbering_xml(&definitions, &instances));

    assert_eq!(numbering.abstract_nums.len(), Preset::ALL.len());
    assert_eq!(numbering.nums.len(), Preset::ALL.len());
    for (idx, abstract_num) in numbering.abstract_nums.iter().enumerate() {
        assert_eq!(abstract_num.abstract_num_id, Some(idx as i32));
        assert_eq!(abstract_num.levels.len(), 9);
        let ilvls: Vec<_> = abstract_num.levels.iter().map(|l| l.ilvl).collect();
        assert_eq!(ilvls, (0..9).map(Some).collect::<Vec<_>>());
        assert!(abstract_num
            .levels
            .iter()
            .all(|l| l.start.is_some() && l.num_fmt.is_some() && l.lvl_text.is_some()));
    }
    for (idx, num) in numbering.nums.iter().enumerate() {
        assert_eq!(num.num_id, Some(idx as i32 + 1));
        assert_eq!(
            num.abstract_num_id.as_ref().and_then(|a| a.value),
            Some(idx as i32)
        );
    }
}

#[test]
fn test_legal_levels_carry_restart_and_text() {
    let mut service = NumberingService::with_defaults();
    let legal = service.get_legal_numbering_format(3).unwrap();
    let numbering = parse(&service.generate_numbering_xml(&[legal], &[]));

    let abstract_num = &numbering.abstract_nums[0];
    assert_eq!(
        abstract_num.name.as_ref().and_then(|n| n.value.as_deref()),
        Some("Legal")
    );
    let texts: Vec<_> = abstract_num
        .levels
        .iter()
        .map(|l| l.lvl_text.as_ref().and_then(|t| t.value.clone()))
        .collect();
    assert_eq!(
        texts,
        vec![
            Some("%1".to_string()),
            Some("%1.%2".to_string()),
            Some("%1.%2.%3".to_string())
        ]
    );

    // Level 0 never restarts; level k restarts after level k-1 (one-based on the wire).
    assert!(abstract_num.levels[0].lvl_restart.is_none());
    assert_eq!(
        abstract_num.levels[2].lvl_restart.as_ref().and_then(|r| r.value),
        Some(2)
    );
}

#[test]
fn test_overrides_parse_back() {
    let mut service = NumberingService::with_defaults();
    let outline = service.create_multilevel_list(Preset::Outline).unwrap();
    let first = service.create_num_instance(outline.abstract_num_id);
    let restart = service
        .create_restart_instance(outline.abstract_num_id, 1, 4)
        .unwrap();
    let numbering = parse(&service.generate_numbering_xml(&[outline], &[first, restart]));

    assert!(numbering.nums[0].overrides.is_empty());
    let lvl_override = &numbering.nums[1].overrides[0];
    assert_eq!(lvl_override.ilvl, Some(1));
    assert_eq!(
        lvl_override.start_override.as_ref().and_then(|s| s.value),
        Some(4)
    );
}

#[test]
fn test_custom_definition_parses_back() {
    let levels = vec![
        LevelConfig::new(0, NumberFormat::UpperLetter, "Exhibit %1").start(2),
        LevelConfig::new(1, NumberFormat::LowerRoman, "Part %2").lvl_restart(0),
    ];
    let mut service = NumberingService::with_defaults();
    let def = service
        .create_abstract_num(AbstractNumConfig::new("Exhibits", levels))
        .unwrap();
    let numbering = parse(&service.generate_numbering_xml(&[def], &[]));

    let levels = &numbering.abstract_nums[0].levels;
    assert_eq!(levels[0].start.as_ref().and_then(|s| s.value), Some(2));
    assert_eq!(
        levels[1].num_fmt.as_ref().and_then(|f| f.value.as_deref()),
        Some("lowerRoman")
    );
    assert_eq!(levels[1].lvl_restart.as_ref().and_then(|r| r.value), Some(1));
}
