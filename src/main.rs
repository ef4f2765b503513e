//! CLI for lexnum - multilevel list numbering generator

use clap::{Parser, Subcommand};
use lexnum::{
    AbstractNumConfig, DefinitionBuilder, HeadingNumberer, InstanceBuilder, LevelOverride,
    NumberingScheme, NumberingSerializer, NumberingService, Preset,
};
use log::warn;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the numbering XML of a preset
    Preset {
        #[arg(value_enum)]
        preset: Preset,

        /// Number of levels (legal preset only, clamped to 1-9)
        #[arg(long)]
        levels: Option<i32>,

        /// Add a second instance restarting LEVEL at START (repeatable, e.g. 0=1)
        #[arg(long = "restart", value_parser = parse_override)]
        restarts: Vec<LevelOverride>,

        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a JSON level configuration and render its numbering XML
    Custom {
        /// JSON file with `name` and `levels`
        config: PathBuf,

        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Prefix markdown-style `#` headings with plain-text numbering
    Headings {
        #[arg(long, value_enum, default_value = "decimal")]
        scheme: NumberingScheme,

        /// Input file (reads stdin if not specified)
        input: Option<PathBuf>,
    },
}

fn parse_override(value: &str) -> Result<LevelOverride, String> {
    let (ilvl, start) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LEVEL=START, got {:?}", value))?;
    let ilvl = ilvl
        .trim()
        .parse()
        .map_err(|_| format!("invalid level {:?}", ilvl))?;
    let start_override = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start {:?}", start))?;
    Ok(LevelOverride {
        ilvl,
        start_override,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::Preset {
            preset,
            levels,
            restarts,
            output,
        } => {
            let mut service = NumberingService::with_defaults();
            let definition = match (preset, levels) {
                (Preset::Legal, Some(levels)) => service.get_legal_numbering_format(levels)?,
                (_, Some(levels)) => {
                    warn!(
                        "--levels {} has no effect on the {:?} preset; it always defines 9 levels",
                        levels, preset
                    );
                    service.create_multilevel_list(preset)?
                }
                (_, None) => service.create_multilevel_list(preset)?,
            };
            let mut instances = vec![service.create_num_instance(definition.abstract_num_id)];
            if !restarts.is_empty() {
                instances.push(
                    service.create_instance_with_overrides(definition.abstract_num_id, restarts)?,
                );
            }
            let xml = service.generate_numbering_xml(&[definition], &instances);
            write_output(&xml, output)
        }
        Command::Custom { config, output } => {
            let json = std::fs::read_to_string(&config)?;
            let config = AbstractNumConfig::from_json(&json)?;
            let mut service = NumberingService::with_defaults();
            let definition = service.create_abstract_num(config)?;
            let instance = service.create_num_instance(definition.abstract_num_id);
            let xml = service.generate_numbering_xml(&[definition], &[instance]);
            write_output(&xml, output)
        }
        Command::Headings { scheme, input } => {
            let text = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            print!("{}", number_markdown_headings(scheme, &text));
            Ok(())
        }
    }
}

fn write_output(content: &str, output: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            println!("Successfully wrote numbering to {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Numbers `#` heading lines in order. Other lines, and everything inside
/// ``` or ~~~ fences, pass through; line endings are kept as they were.
fn number_markdown_headings(scheme: NumberingScheme, text: &str) -> String {
    let mut numberer = HeadingNumberer::new(scheme);
    let mut open_fence: Option<&str> = None;
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let (body, ending) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        let fence = ["```", "~~~"]
            .into_iter()
            .find(|marker| body.trim_start().starts_with(*marker));
        match (open_fence, fence) {
            (None, Some(marker)) => open_fence = Some(marker),
            (Some(open), Some(marker)) if open == marker => open_fence = None,
            (None, None) => {
                out.push_str(&number_heading_line(&mut numberer, body));
                out.push_str(ending);
                continue;
            }
            (Some(_), _) => {}
        }
        out.push_str(line);
    }
    out
}

fn number_heading_line(numberer: &mut HeadingNumberer, line: &str) -> String {
    let level = line.chars().take_while(|&c| c == '#').count();
    match line[level..].strip_prefix(' ') {
        Some(title) if level > 0 => {
            format!("{} {}", &line[..level], numberer.number_heading(level, title))
        }
        _ => line.to_string(),
    }
}
