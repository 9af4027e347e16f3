//! Sources of the treated/control rectangle pair: fixed configuration or a terminal prompt

use crate::analysis::analyzer::Region;
use crate::io::configuration::{DEFAULT_CONTROL_ROI, DEFAULT_TREATED_ROI, MAX_PROMPT_ATTEMPTS};
use crate::io::error::{AnalysisError, Result, file_system_error};
use crate::spatial::{Image, Rectangle, RectanglePair};
use std::io::{BufRead, Write};

/// Supplies the rectangle pair before the first extraction
pub trait RectanglePairProvider {
    /// Produce the treated and control rectangles
    ///
    /// `reference` is the first image of the series, available for display or
    /// sanity checks; providers must not rely on it for anything else.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::RoiNotSet`] if a rectangle could not be obtained
    fn provide(&mut self, reference: &Image) -> Result<RectanglePair>;
}

/// Returns a pair fixed at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProvider {
    pair: RectanglePair,
}

impl FixedProvider {
    /// Use the given pair for every run
    pub const fn new(pair: RectanglePair) -> Self {
        Self { pair }
    }

    /// The rectangles measured on the reference photograph series
    ///
    /// # Errors
    ///
    /// Returns an error if a configured default rectangle has a zero dimension
    pub fn from_defaults() -> Result<Self> {
        Ok(Self::new(RectanglePair {
            treated: Rectangle::from_tuple(DEFAULT_TREATED_ROI)?,
            control: Rectangle::from_tuple(DEFAULT_CONTROL_ROI)?,
        }))
    }

    /// Configured pair
    pub const fn pair(&self) -> RectanglePair {
        self.pair
    }
}

impl RectanglePairProvider for FixedProvider {
    fn provide(&mut self, reference: &Image) -> Result<RectanglePair> {
        for (region, rect) in [
            (Region::Treated, self.pair.treated),
            (Region::Control, self.pair.control),
        ] {
            let clipped = rect.clamp_to(reference.width(), reference.height());
            if clipped.area() < rect.width() as usize * rect.height() as usize {
                log::warn!(
                    "{region} ROI {rect} extends past the {}x{} reference image and will be clipped",
                    reference.width(),
                    reference.height()
                );
            }
        }
        Ok(self.pair)
    }
}

/// Asks for each rectangle on a line-oriented terminal
///
/// Input lines use the `x,y,width,height` form. Malformed lines are reported
/// and re-prompted up to [`MAX_PROMPT_ATTEMPTS`] times per rectangle.
pub struct InteractiveProvider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveProvider<R, W> {
    /// Prompt on `output` and read answers from `input`
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, region: Region) -> Result<Rectangle> {
        for _ in 0..MAX_PROMPT_ATTEMPTS {
            write!(self.output, "{region} ROI (x,y,width,height): ")
                .and_then(|()| self.output.flush())
                .map_err(file_system_error("<terminal>", "write prompt"))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(file_system_error("<terminal>", "read rectangle"))?;
            if read == 0 {
                break;
            }

            match line.trim().parse::<Rectangle>() {
                Ok(rect) => return Ok(rect),
                Err(e) => writeln!(self.output, "  {e}")
                    .map_err(file_system_error("<terminal>", "write prompt"))?,
            }
        }

        Err(AnalysisError::RoiNotSet {
            region: region.as_str(),
        })
    }
}

impl InteractiveProvider<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> RectanglePairProvider for InteractiveProvider<R, W> {
    fn provide(&mut self, reference: &Image) -> Result<RectanglePair> {
        writeln!(
            self.output,
            "Reference image is {}x{} pixels",
            reference.width(),
            reference.height()
        )
        .map_err(file_system_error("<terminal>", "write prompt"))?;

        let treated = self.ask(Region::Treated)?;
        let control = self.ask(Region::Control)?;
        Ok(RectanglePair { treated, control })
    }
}
