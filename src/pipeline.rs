//! Whole-file pipelines built from the codec stages.
//!
//! | mode           | stages                                   |
//! |----------------|------------------------------------------|
//! | `encode`       | unpack → encode → pack (zero padded)     |
//! | `decode`       | unpack → decode → pack (drops tail bits) |
//! | `inject`       | unpack → noise → pack                    |
//! | `encode-noisy` | unpack → encode → noise → pack           |
//!
//! Files are raw bytes with no header; the codeword count is implied by the
//! file size.

use crate::cs::ecc::bits;
use crate::cs::ecc::hamming::{DecodeReport, HammingDecoder, HammingEncoder, CODEWORD_BITS};
use crate::cs::ecc::noise::{NoiseInjector, NoiseParameters, NoiseReport};
use crate::cs::error::{Error, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

/// Reads a whole file into memory.
pub fn read_all_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Writes `bytes` to `path`, replacing any existing file.
pub fn write_all_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

/// Which transform a pipeline run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Encode,
    Decode,
    Inject,
    EncodeNoisy,
}

impl Mode {
    pub fn uses_noise(self) -> bool {
        matches!(self, Mode::Inject | Mode::EncodeNoisy)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Encode => "encode",
            Mode::Decode => "decode",
            Mode::Inject => "inject",
            Mode::EncodeNoisy => "encode-noisy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub mode: Mode,
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// Codewords produced (encode) or consumed (decode, inject)
    pub codewords: usize,
    pub decode: Option<DecodeReport>,
    pub noise: Option<NoiseReport>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} bytes -> {} bytes, {} codewords",
            self.mode, self.input_bytes, self.output_bytes, self.codewords
        )?;
        if let Some(noise) = self.noise {
            write!(f, ", {} flipped", noise.flipped)?;
        }
        if let Some(decode) = self.decode {
            write!(f, ", {} corrected", decode.corrected)?;
        }
        Ok(())
    }
}

/// Runs the encode, decode and noise transforms over byte buffers or files.
///
/// The noise injector is only built the first time a noisy mode runs, and is
/// then reused for every later run, so a pipeline seeds its generator at most
/// once.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    encoder: HammingEncoder,
    decoder: HammingDecoder,
    noise: NoiseParameters,
    seed: Option<u64>,
    injector: Option<NoiseInjector>,
}

impl Pipeline {
    /// A pipeline with default noise parameters and a clock-seeded injector.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline with custom noise parameters and an optional fixed seed.
    pub fn with_noise(noise: NoiseParameters, seed: Option<u64>) -> Result<Self> {
        noise.validate()?;
        Ok(Self {
            noise,
            seed,
            ..Self::default()
        })
    }

    /// A pipeline that uses an existing injector for the noisy modes.
    pub fn with_injector(injector: NoiseInjector) -> Self {
        Self {
            noise: injector.parameters(),
            seed: injector.seed(),
            injector: Some(injector),
            ..Self::default()
        }
    }

    fn injector(&mut self) -> Result<&mut NoiseInjector> {
        let injector = match self.injector.take() {
            Some(injector) => injector,
            None => match self.seed {
                Some(seed) => NoiseInjector::with_seed(self.noise, seed)?,
                None => NoiseInjector::new(self.noise)?,
            },
        };
        Ok(self.injector.insert(injector))
    }

    /// Applies `mode` to an in-memory buffer.
    ///
    /// # Arguments
    ///
    /// * `mode` - Transform to apply
    /// * `data` - Raw input bytes
    ///
    /// # Returns
    ///
    /// The transformed bytes and a summary of the run, or an error if the
    /// noise injector could not be built
    pub fn apply(&mut self, mode: Mode, data: &[u8]) -> Result<(Vec<u8>, Summary)> {
        let mut summary = Summary {
            mode,
            input_bytes: data.len(),
            output_bytes: 0,
            codewords: 0,
            decode: None,
            noise: None,
        };

        let output = match mode {
            Mode::Encode => {
                let encoded = self.encoder.encode(bits::unpack(data));
                summary.codewords = encoded.len() / CODEWORD_BITS;
                bits::pack(&encoded, true)
            }
            Mode::Decode => {
                let (decoded, report) = self.decoder.decode_with_report(&bits::unpack(data));
                summary.codewords = report.codewords;
                summary.decode = Some(report);
                bits::pack(&decoded, false)
            }
            Mode::Inject => {
                let (noisy, report) = inject_bytes(data, self.injector()?);
                summary.codewords = report.codewords;
                summary.noise = Some(report);
                noisy
            }
            Mode::EncodeNoisy => {
                let (noisy, report) = encode_noisy_bytes(data, self.injector()?);
                summary.codewords = report.codewords;
                summary.noise = Some(report);
                noisy
            }
        };

        summary.output_bytes = output.len();
        Ok((output, summary))
    }

    /// Reads `input`, applies `mode` and writes the result to `output`.
    ///
    /// # Arguments
    ///
    /// * `mode` - Transform to apply
    /// * `input` - File to read
    /// * `output` - File to create or replace
    ///
    /// # Returns
    ///
    /// A summary of the run, or `Error::Io` naming the file that failed
    pub fn run(&mut self, mode: Mode, input: &Path, output: &Path) -> Result<Summary> {
        let data = read_all_bytes(input)?;
        debug!("{}: read {} bytes from {}", mode, data.len(), input.display());

        let (transformed, summary) = self.apply(mode, &data)?;

        write_all_bytes(output, &transformed)?;
        debug!(
            "{}: wrote {} bytes to {}",
            mode,
            transformed.len(),
            output.display()
        );
        Ok(summary)
    }
}

/// Injects noise into an already encoded buffer.
pub fn inject_bytes(data: &[u8], injector: &mut NoiseInjector) -> (Vec<u8>, NoiseReport) {
    let mut noisy = bits::unpack(data);
    let report = injector.inject_in_place(&mut noisy);
    (bits::pack(&noisy, true), report)
}

/// Encodes a buffer and injects noise into the codewords in one pass.
pub fn encode_noisy_bytes(data: &[u8], injector: &mut NoiseInjector) -> (Vec<u8>, NoiseReport) {
    let mut encoded = HammingEncoder::new().encode(bits::unpack(data));
    let report = injector.inject_in_place(&mut encoded);
    (bits::pack(&encoded, true), report)
}
