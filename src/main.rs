mod astable;
mod export;
mod job_yaml;
mod wavetable;

use std::path::Path;

// DEBUGGING, LOGGING
use simplelog::*;

// MY STUFF
use astable::{frequency, solve_c, solve_ra, solve_rb};
use wavetable::{RomBuilder, WaveformShape};

fn main() -> Result<(), anyhow::Error> {
    // LOGGER INIT
    TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("Failed to start simplelog");

    info!("<b>Running <blue>function generator toolkit</>");

    // ROM EXPORTS
    match std::env::args().nth(1) {
        Some(job_file) => job_yaml::run_from_yaml(&job_file)?,
        None => default_exports()?,
    }

    // 555 TIMER WALKTHROUGH
    solver_walkthrough();

    info!("<green><tick></> <b>Program finished <green>successfully</>");
    Ok(())
}

/// The export run used when no job file is given on the command line.
fn default_exports() -> Result<(), anyhow::Error> {
    let rom = RomBuilder::new().build()?;

    info!("<b>ROM image ready: <cyan>{}</> <b>samples.</>", rom.len());

    export::save_csv(&rom, Path::new("rom.csv"))?;
    export::save_text(&rom, Path::new("rom.txt"))?;
    export::save_wav(&rom, WaveformShape::Sine, 400, Path::new("sine.wav"))?;

    Ok(())
}

/// Worked component examples for the astable timer, reported without
/// crashing on unrealizable targets.
fn solver_walkthrough() {
    let ra = 1e3; // ohms
    let rb = 2e3; // ohms
    let c = 100e-9; // farads (100 nF)

    match frequency(ra, rb, c) {
        Ok(f) => info!(
            "<b>Frequency for RA=1k, RB=2k, C=100n: <cyan>{:.2} Hz</>",
            f
        ),
        Err(e) => warn!("<b>Frequency: <yellow>{}</>", e),
    }

    match solve_ra(1e3, rb, c) {
        Ok(v) => info!("<b>RA needed for <u>1 kHz</><b>: <cyan>{:.2} ohm</>", v),
        Err(e) => warn!("<b>RA for 1 kHz: <yellow>{}</>", e),
    }

    match solve_rb(500.0, ra, c) {
        Ok(v) => info!("<b>RB needed for <u>500 Hz</><b>: <cyan>{:.2} ohm</>", v),
        Err(e) => warn!("<b>RB for 500 Hz: <yellow>{}</>", e),
    }

    match solve_c(2e3, ra, rb) {
        Ok(v) => info!(
            "<b>C needed for <u>2 kHz</><b>: <cyan>{:.2} nF</>",
            v * 1e9
        ),
        Err(e) => warn!("<b>C for 2 kHz: <yellow>{}</>", e),
    }
}
