use std::f64::consts::PI;
use thiserror::Error;

#[cfg(feature = "verbose_rom")]
use simplelog::info;

/// Samples per waveform block in the default ROM layout (one full period).
pub const BLOCK_SIZE: usize = 256;
/// Number of waveform blocks in the ROM image. The layout is a format
/// contract: exactly one block per shape, in [BLOCK_ORDER].
pub const BLOCK_COUNT: usize = 4;
/// Full scale of a quantized sample (8-bit output memory width).
pub const SAMPLE_MAX: f64 = 255.0;

/// Block layout of the ROM image. Address `i` falls in block `i / BLOCK_SIZE`.
pub const BLOCK_ORDER: [WaveformShape; BLOCK_COUNT] = [
    WaveformShape::Sine,
    WaveformShape::Square,
    WaveformShape::Sawtooth,
    WaveformShape::Triangle,
];

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RomError {
    #[error("{shape} block needs at least {min} samples, got {requested}")]
    BlockTooShort {
        shape: &'static str,
        min: usize,
        requested: usize,
    },
    #[error("ROM layout is fixed at {expected} waveform blocks, got {requested}")]
    BlockCount { requested: usize, expected: usize },
}

/// The four waveform shapes the ROM image holds, one period each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformShape {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl WaveformShape {
    pub fn name(&self) -> &'static str {
        match self {
            WaveformShape::Sine => "sine",
            WaveformShape::Square => "square",
            WaveformShape::Sawtooth => "sawtooth",
            WaveformShape::Triangle => "triangle",
        }
    }

    /// Lookup by the lowercase name used in job files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sine" => Some(WaveformShape::Sine),
            "square" => Some(WaveformShape::Square),
            "sawtooth" => Some(WaveformShape::Sawtooth),
            "triangle" => Some(WaveformShape::Triangle),
            _ => None,
        }
    }

    /// Generates one period of this shape with `num_samples` samples.
    pub fn generate(&self, num_samples: usize) -> Result<Vec<u8>, RomError> {
        match self {
            WaveformShape::Sine => generate_sine(num_samples),
            WaveformShape::Square => generate_square(num_samples),
            WaveformShape::Sawtooth => generate_sawtooth(num_samples),
            WaveformShape::Triangle => generate_triangle(num_samples),
        }
    }
}

fn check_block_len(
    shape: &'static str,
    num_samples: usize,
    min: usize,
) -> Result<(), RomError> {
    if num_samples < min {
        Err(RomError::BlockTooShort {
            shape,
            min,
            requested: num_samples,
        })
    } else {
        Ok(())
    }
}

/// One period of a sine wave, quantized to [0, 255].
///
/// `sin` spans [-1, 1]; each sample is shifted into [0, 1] before scaling,
/// so the first sample sits on the 127.5 midpoint and rounds up to 128.
///
/// All four generators round half away from zero (`f64::round`).
pub fn generate_sine(num_samples: usize) -> Result<Vec<u8>, RomError> {
    check_block_len("sine", num_samples, 2)?;

    let mut samples = Vec::with_capacity(num_samples);
    for n in 0..num_samples {
        let theta = 2.0 * PI * n as f64 / num_samples as f64;
        let normalized = (theta.sin() + 1.0) / 2.0;
        samples.push((normalized * SAMPLE_MAX).round() as u8);
    }
    Ok(samples)
}

/// One period of a square wave: high half first, then low. Odd lengths give
/// the extra sample to the low half (floor split).
pub fn generate_square(num_samples: usize) -> Result<Vec<u8>, RomError> {
    check_block_len("square", num_samples, 2)?;

    let half_point = num_samples / 2;
    let samples = (0..num_samples)
        .map(|n| if n < half_point { 255 } else { 0 })
        .collect();
    Ok(samples)
}

/// One period of a sawtooth: linear ramp 0..=255. Dividing by
/// `num_samples - 1` pins the first and last samples to the exact
/// boundary values instead of drifting below full scale.
pub fn generate_sawtooth(num_samples: usize) -> Result<Vec<u8>, RomError> {
    check_block_len("sawtooth", num_samples, 2)?;

    let mut samples = Vec::with_capacity(num_samples);
    for n in 0..num_samples {
        let value = n as f64 * SAMPLE_MAX / (num_samples - 1) as f64;
        samples.push(value.round() as u8);
    }
    Ok(samples)
}

/// One period of a triangle: rise over the first `num_samples / 2` samples,
/// then the mirrored fall. Needs at least four samples so each ramp has a
/// non-degenerate slope.
pub fn generate_triangle(num_samples: usize) -> Result<Vec<u8>, RomError> {
    check_block_len("triangle", num_samples, 4)?;

    let half_point = num_samples / 2;
    let mut samples = Vec::with_capacity(num_samples);
    for n in 0..half_point {
        let value = n as f64 * SAMPLE_MAX / (half_point - 1) as f64;
        samples.push(value.round() as u8);
    }
    for n in half_point..num_samples {
        // Mirror of the rising ramp. Odd lengths leave one extra sample at
        // the midpoint; it sits on the peak.
        let value = (num_samples - 1 - n) as f64 * SAMPLE_MAX / (half_point - 1) as f64;
        samples.push(value.round().min(SAMPLE_MAX) as u8);
    }
    Ok(samples)
}

/// The assembled lookup table: every block of [BLOCK_ORDER] concatenated,
/// `block_size` samples each, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    data: Vec<u8>,
    block_size: usize,
}

impl RomImage {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The flat sample sequence, in address order.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Maps an address to its shape and in-block offset.
    pub fn locate(&self, address: usize) -> Option<(WaveformShape, usize)> {
        if address >= self.data.len() {
            return None;
        }
        let shape = BLOCK_ORDER[address / self.block_size];
        Some((shape, address % self.block_size))
    }

    /// The block holding one period of `shape`.
    pub fn block(&self, shape: WaveformShape) -> &[u8] {
        // Every shape appears exactly once in BLOCK_ORDER.
        let index = BLOCK_ORDER.iter().position(|s| *s == shape).unwrap();
        &self.data[index * self.block_size..(index + 1) * self.block_size]
    }
}

/// Assembles the ROM image. `num_blocks` must be exactly [BLOCK_COUNT];
/// any other count is a layout violation, not a tunable.
pub fn build_rom(num_blocks: usize, block_size: usize) -> Result<RomImage, RomError> {
    if num_blocks != BLOCK_COUNT {
        return Err(RomError::BlockCount {
            requested: num_blocks,
            expected: BLOCK_COUNT,
        });
    }

    let mut data = Vec::with_capacity(num_blocks * block_size);
    for shape in BLOCK_ORDER {
        #[cfg(feature = "verbose_rom")]
        info!(
            "<b>Baking <cyan>{}</> <b>block ({} samples).</>",
            shape.name(),
            block_size
        );

        data.extend(shape.generate(block_size)?);
    }

    Ok(RomImage { data, block_size })
}

/// The [RomBuilder] is the proper way of generating a [RomImage] when the
/// defaults are enough.
/// # Usage
/// ```rust
/// let rom = RomBuilder::new().build().unwrap(); // 4 x 256 image
///
/// let small = RomBuilder::new().with_block_size(64).build().unwrap();
/// ```
pub struct RomBuilder {
    num_blocks: Option<usize>,
    block_size: Option<usize>,
}

impl RomBuilder {
    pub fn new() -> Self {
        Self {
            num_blocks: None,
            block_size: None,
        }
    }

    /// Sets the samples per block. Defaults to [BLOCK_SIZE].
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Sets the block count. Anything but [BLOCK_COUNT] is rejected at
    /// build time; the field exists so callers can surface the layout
    /// error instead of silently fixing it up.
    pub fn with_num_blocks(mut self, num_blocks: usize) -> Self {
        self.num_blocks = Some(num_blocks);
        self
    }

    /// Tries to assemble a [RomImage] from the given configuration.
    ///
    /// # Expected errors
    /// * Block count other than [BLOCK_COUNT].
    /// * Block size too short for one of the generators.
    pub fn build(self) -> Result<RomImage, RomError> {
        let num_blocks = self.num_blocks.unwrap_or(BLOCK_COUNT);
        let block_size = self.block_size.unwrap_or(BLOCK_SIZE);

        build_rom(num_blocks, block_size)
    }
}
