use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use image::imageops::FilterType;
use tracing::{error, info};

use qrsvg::{logger, ConvResult, Converter, ImageRaster, RasterOptions, DEFAULT_THRESHOLD};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qrsvg", version, about = "Convert a QR code image into an SVG tile grid")]
struct Cli {
    /// Raster image holding one QR symbol
    input: PathBuf,

    /// Output SVG path [default: INPUT with an .svg extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Module count per side, used when detection is off or fails
    #[arg(long)]
    steps: Option<u32>,

    /// Luminance at or below which a module counts as dark
    #[arg(long, default_value_t = DEFAULT_THRESHOLD as i64, allow_negative_numbers = true)]
    threshold: i64,

    /// Skip module count detection
    #[arg(long)]
    no_detect: bool,

    /// Crop near-white margins before processing
    #[arg(long)]
    trim: bool,

    /// Resampling filter for rescaling
    #[arg(long, value_enum, default_value_t = Filter::Lanczos3)]
    filter: Filter,

    /// Also write a PNG rendering of the sampled modules
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn run(cli: &Cli) -> ConvResult<()> {
    let mut builder = Converter::builder();
    builder.threshold(cli.threshold).detect(!cli.no_detect).trim(cli.trim);
    if let Some(steps) = cli.steps {
        builder.steps(steps);
    }
    let converter = builder.build()?;

    let opts = RasterOptions::default().filter(cli.filter.into());
    let raster = ImageRaster::open(&cli.input, opts)?;
    let conversion = converter.convert(raster)?;

    let output = cli.output.clone().unwrap_or_else(|| cli.input.with_extension("svg"));
    std::fs::write(&output, conversion.to_svg())?;
    info!("Wrote {}", output.display());

    if let Some(path) = &cli.preview {
        write_preview(path, &conversion)?;
    }
    Ok(())
}

fn write_preview(path: &Path, conversion: &qrsvg::Conversion) -> ConvResult<()> {
    let img = conversion.matrix().to_image(conversion.pixels_per_tile(), 4);
    img.save(path)?;
    info!("Wrote preview {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {e}", cli.input.display());
            ExitCode::FAILURE
        }
    }
}
