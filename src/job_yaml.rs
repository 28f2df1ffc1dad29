use crate::export;
use crate::wavetable::{build_rom, WaveformShape, BLOCK_COUNT, BLOCK_SIZE};
use anyhow::bail;
use simplelog::{error, info};
use std::fs;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

const YAML_VERSION: f64 = 0.1;

/// One export artifact requested by a job file.
struct ExportJob {
    format: ExportFormat,
    path: String,
}

enum ExportFormat {
    Csv,
    Text,
    Wav { shape: WaveformShape, cycles: u32 },
}

struct ExportRun {
    num_blocks: usize,
    block_size: usize,
    jobs: Vec<ExportJob>,
}

fn parse_usize(value: &Yaml) -> Option<usize> {
    match value {
        Yaml::Integer(n) if *n >= 0 => Some(*n as usize),
        _ => None,
    }
}

fn parse_run(doc: &Yaml) -> Result<ExportRun, anyhow::Error> {
    let version = doc["version"].as_f64().unwrap_or(0.0);
    if version != YAML_VERSION {
        error!("<b>Please use the <red>latest YAML</> <b>version.</>");
        bail!("unsupported job file version {}", version);
    }
    info!(
        "<b>Using <magenta>YAML parsing</> <b>version: <b><cyan>{}</>",
        version
    );

    let rom = &doc["rom"];

    let num_blocks = match &rom["blocks"] {
        Yaml::BadValue => BLOCK_COUNT, // not given, fixed layout
        value => match parse_usize(value) {
            Some(n) => n,
            None => {
                error!("<b>Invalid format for <red>blocks</> <b>value.</>");
                bail!("'blocks' must be a non-negative integer");
            }
        },
    };

    let block_size = match &rom["block-size"] {
        Yaml::BadValue => BLOCK_SIZE,
        value => match parse_usize(value) {
            Some(n) => n,
            None => {
                error!("<b>Invalid format for <red>block-size</> <b>value.</>");
                bail!("'block-size' must be a non-negative integer");
            }
        },
    };

    let mut jobs: Vec<ExportJob> = Vec::new();
    for entry in rom["exports"].clone().into_iter() {
        let format = entry["format"].as_str();
        let path = entry["path"].as_str();

        let (format, path) = match (format, path) {
            (Some(f), Some(p)) => (f, p.to_string()),
            _ => {
                error!("<b>Export entry missing <red>format</> <b>or <red>path</><b>.</>");
                bail!("every export needs a 'format' and a 'path'");
            }
        };

        let format = match format {
            "csv" => ExportFormat::Csv,
            "txt" => ExportFormat::Text,
            "wav" => {
                let shape = entry["shape"]
                    .as_str()
                    .and_then(WaveformShape::from_name);
                let shape = match shape {
                    Some(shape) => shape,
                    None => {
                        error!(
                            "<b>WAV export needs a valid <red>shape</> <b>(sine, square, sawtooth, triangle).</>"
                        );
                        bail!("wav export '{}' has no valid 'shape'", path);
                    }
                };

                let cycles = match &entry["cycles"] {
                    Yaml::BadValue => 400,
                    value => match parse_usize(value) {
                        Some(n) => n as u32,
                        None => {
                            error!("<b>Invalid format for <red>cycles</> <b>value.</>");
                            bail!("'cycles' must be a non-negative integer");
                        }
                    },
                };

                ExportFormat::Wav { shape, cycles }
            }
            other => {
                error!("<b>Export format <red>not found</><b>: {}.</>", other);
                bail!("unknown export format '{}'", other);
            }
        };

        jobs.push(ExportJob { format, path });
    }

    Ok(ExportRun {
        num_blocks,
        block_size,
        jobs,
    })
}

/// Loads a job file, bakes the ROM once and runs every export in it.
pub fn run_from_yaml(file: &str) -> Result<(), anyhow::Error> {
    info!("<b>Loading jobs from <red>{}</><b>.</>", file);
    let yaml = fs::read_to_string(file)?;

    let docs = YamlLoader::load_from_str(&yaml)?;
    let run = parse_run(&docs[0])?;

    let rom = build_rom(run.num_blocks, run.block_size)?;
    info!(
        "<b>ROM image ready: <cyan>{}</> <b>samples.</>",
        rom.len()
    );

    for job in &run.jobs {
        let path = Path::new(&job.path);
        match &job.format {
            ExportFormat::Csv => export::save_csv(&rom, path)?,
            ExportFormat::Text => export::save_text(&rom, path)?,
            ExportFormat::Wav { shape, cycles } => {
                export::save_wav(&rom, *shape, *cycles, path)?
            }
        }
    }

    Ok(())
}
