use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ditherworks::{
    color_palette::{ColorMode, PALETTES},
    config::ProcessConfig,
    dithering::DitheringType,
    run,
    utils::{image as image_utils, pixel::RGB},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ditherworks")]
#[command(about = "Dither images down to a small, fixed palette", long_about = None)]
struct Cli {
    /// Image to dither
    #[arg(required_unless_present_any = ["list_palettes", "list_algorithms"])]
    input: Option<PathBuf>,

    /// Where to write the PNG result
    #[arg(required_unless_present_any = ["list_palettes", "list_algorithms"])]
    output: Option<PathBuf>,

    /// JSON process config, flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Algorithm identifier, see --list-algorithms
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Palette name from the catalog, see --list-palettes
    #[arg(short, long, conflicts_with = "colors")]
    palette: Option<String>,

    /// Custom palette as comma separated hex colors
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// Halftone cell size
    #[arg(long)]
    dot_size: Option<usize>,

    /// Integer upscale of the output
    #[arg(long)]
    scale: Option<u32>,

    #[arg(long)]
    list_palettes: bool,

    #[arg(long)]
    list_algorithms: bool,
}

impl Cli {
    fn process_config(&self) -> Result<ProcessConfig> {
        let mut config = match &self.config {
            Some(path) => ProcessConfig::read_config(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ProcessConfig::default(),
        };

        if let Some(name) = &self.algorithm {
            config.algorithm = name.parse()?;
        }
        if let Some(name) = &self.palette {
            config.color_mode = ColorMode::from_palette_name(name)?;
        }
        if let Some(colors) = &self.colors {
            if colors.len() < 2 {
                bail!("--colors needs at least two colors");
            }
            let colors = colors
                .iter()
                .map(|hex| RGB::from_hex(hex))
                .collect::<Result<Vec<_>, _>>()?;
            config.color_mode = ColorMode::custom(colors)?;
        }
        if let Some(dot_size) = self.dot_size {
            config.dot_size = dot_size;
        }
        if let Some(scale) = self.scale {
            if scale == 0 {
                bail!("--scale must be at least 1");
            }
            config.output_scale = scale;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherworks=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    if cli.list_algorithms {
        for kind in DitheringType::ALL {
            println!("{kind}");
        }
        return Ok(());
    }
    if cli.list_palettes {
        for palette in PALETTES.iter() {
            let colors = palette.colors.iter().map(RGB::to_hex).collect::<Vec<_>>();
            println!(
                "{:<14} {:<22} {:<8} {}",
                palette.id,
                palette.name,
                palette.category.as_str(),
                colors.join(",")
            );
        }
        return Ok(());
    }

    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        bail!("input and output paths are required");
    };
    let config = cli.process_config()?;

    let image = image_utils::read_image(input)
        .with_context(|| format!("reading image {}", input.display()))?;
    info!(
        algorithm = %config.algorithm,
        width = image.width(),
        height = image.height(),
        "dithering {}",
        input.display()
    );

    let processed_image = run(&config, image)?;
    image_utils::write_image(&processed_image, output, image::ImageFormat::Png)
        .with_context(|| format!("writing image {}", output.display()))?;
    info!("wrote {}", output.display());

    Ok(())
}
