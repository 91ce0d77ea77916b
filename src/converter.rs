use tracing::{debug, info, warn};

use crate::{
    common::{threshold_from, ConvError, ConvResult, ModuleCount, DEFAULT_THRESHOLD},
    raster::Raster,
    reader,
    render::render_vector,
    sampler::{build_fill_matrix, pixels_per_tile, FillMatrix},
};

// Builder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ConverterBuilder {
    steps: Option<u32>,
    threshold: i64,
    detect: bool,
    trim: bool,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self { steps: None, threshold: DEFAULT_THRESHOLD as i64, detect: true, trim: false }
    }

    /// Module count used when detection is disabled or fails.
    pub fn steps(&mut self, steps: u32) -> &mut Self {
        self.steps = Some(steps);
        self
    }

    pub fn unset_steps(&mut self) -> &mut Self {
        self.steps = None;
        self
    }

    pub fn threshold(&mut self, threshold: i64) -> &mut Self {
        self.threshold = threshold;
        self
    }

    pub fn detect(&mut self, detect: bool) -> &mut Self {
        self.detect = detect;
        self
    }

    pub fn trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn metadata(&self) -> String {
        let steps = match self.steps {
            Some(s) => s.to_string(),
            None => "None".to_string(),
        };
        format!(
            "{{ Steps: {steps}, Threshold: {}, Detect: {}, Trim: {} }}",
            self.threshold, self.detect, self.trim
        )
    }

    pub fn build(&self) -> ConvResult<Converter> {
        let threshold = threshold_from(self.threshold)?;
        let steps = self.steps.map(ModuleCount::new).transpose()?;
        if !self.detect && steps.is_none() {
            return Err(ConvError::MissingModuleCount);
        }
        debug!("Configured converter {}", self.metadata());

        Ok(Converter { steps, threshold, detect: self.detect, trim: self.trim })
    }
}

// Converter
//------------------------------------------------------------------------------

/// Validated conversion settings. Reusable across rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    steps: Option<ModuleCount>,
    threshold: u8,
    detect: bool,
    trim: bool,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn steps(&self) -> Option<ModuleCount> {
        self.steps
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    // ENTRY POINT FOR CONVERSION
    /// Resolves the module count, samples every module and returns the fill matrix ready for
    /// vector output.
    pub fn convert<R: Raster>(&self, mut raster: R) -> ConvResult<Conversion> {
        if self.trim {
            let (w, h) = raster.trim_border()?;
            debug!("Trimmed raster to {w}x{h}");
        }

        let (steps, detected, mut working) = if self.detect {
            self.detect_steps(raster)?
        } else {
            let steps = self.steps.ok_or(ConvError::MissingModuleCount)?;
            (steps, false, raster)
        };

        let ppt = pixels_per_tile(working.width(), steps);
        let matrix = build_fill_matrix(&mut working, steps, self.threshold)?;
        info!(
            "Converted {steps} symbol: {} filled modules, {ppt}px per tile, {}",
            matrix.len(),
            if detected { "detected" } else { "configured" }
        );

        Ok(Conversion { steps, pixels_per_tile: ppt, detected, matrix })
    }

    /// Detected count and the working raster it was found on, or the configured count and the
    /// untouched raster when detection gives nothing usable.
    fn detect_steps<R: Raster>(&self, raster: R) -> ConvResult<(ModuleCount, bool, R)> {
        let err = match reader::detect(&raster, self.threshold) {
            Ok(d) => match ModuleCount::new(d.steps) {
                Ok(steps) => return Ok((steps, true, d.raster)),
                Err(e) => e,
            },
            Err(e @ ConvError::Detection(_)) => e,
            Err(e) => return Err(e),
        };

        match self.steps {
            Some(steps) => {
                warn!("{err}; falling back to configured {steps}");
                Ok((steps, false, raster))
            }
            None => Err(err),
        }
    }
}

// Conversion
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    steps: ModuleCount,
    pixels_per_tile: u32,
    detected: bool,
    matrix: FillMatrix,
}

impl Conversion {
    pub fn steps(&self) -> ModuleCount {
        self.steps
    }

    pub fn pixels_per_tile(&self) -> u32 {
        self.pixels_per_tile
    }

    /// False when the module count came from configuration.
    pub fn detected(&self) -> bool {
        self.detected
    }

    pub fn matrix(&self) -> &FillMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> FillMatrix {
        self.matrix
    }

    pub fn to_svg(&self) -> String {
        render_vector(self.steps, &self.matrix)
    }
}
