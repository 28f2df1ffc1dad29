use crate::wavetable::{RomImage, WaveformShape};
use simplelog::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Values per line in the plain-text dump.
pub const VALUES_PER_LINE: usize = 8;
/// Sample rate used for the WAV audition render. With 256-sample blocks
/// this plays the table at about 172 Hz.
pub const AUDITION_SAMPLE_RATE: u32 = 44100;

/// Writes `address,value` rows, one per sample, in address order.
pub fn write_csv<W: Write>(rom: &RomImage, mut out: W) -> std::io::Result<()> {
    writeln!(out, "address,value")?;
    for (address, value) in rom.samples().iter().enumerate() {
        writeln!(out, "{},{}", address, value)?;
    }
    Ok(())
}

/// Writes address-prefixed lines of eight consecutive values. The last
/// line is shorter when the total is not a multiple of eight.
pub fn write_text<W: Write>(rom: &RomImage, mut out: W) -> std::io::Result<()> {
    for (line, chunk) in rom.samples().chunks(VALUES_PER_LINE).enumerate() {
        write!(out, "{:>4}:", line * VALUES_PER_LINE)?;
        for value in chunk {
            write!(out, " {}", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn save_csv(rom: &RomImage, path: &Path) -> Result<(), anyhow::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    write_csv(rom, &mut file)?;
    file.flush()?;

    info!(
        "<b>ROM saved as <green>CSV</> <b>to <u>{}</> <b>({} samples).</>",
        path.display(),
        rom.len()
    );
    Ok(())
}

pub fn save_text(rom: &RomImage, path: &Path) -> Result<(), anyhow::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    write_text(rom, &mut file)?;
    file.flush()?;

    info!(
        "<b>ROM saved as <green>text dump</> <b>to <u>{}</>.",
        path.display()
    );
    Ok(())
}

/// Renders one shape's block to an 8-bit mono WAV, looped `cycles` times,
/// for auditioning the table on speakers.
pub fn save_wav(
    rom: &RomImage,
    shape: WaveformShape,
    cycles: u32,
    path: &Path,
) -> Result<(), anyhow::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: AUDITION_SAMPLE_RATE,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let block = rom.block(shape);
    for _ in 0..cycles {
        for sample in block {
            // Table samples are offset binary; hound wants signed 8 bit.
            writer.write_sample((*sample as i16 - 128) as i8)?;
        }
    }
    writer.finalize()?;

    info!(
        "<b>Audition render of <cyan>{}</> <b>saved to <u>{}</> <b>({} cycles).</>",
        shape.name(),
        path.display(),
        cycles
    );
    Ok(())
}
