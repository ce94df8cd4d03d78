use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use ditherworks::{
    dithering::threshold::{
        blue_noise::blue_noise,
        matrices::{BAYER_4X4, BAYER_SIDE},
    },
    texture::Texture,
    utils::image::write_png_texture,
};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for ditherworks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the threshold tiles as grayscale PNGs for inspection
    GenerateMatrices {
        #[arg(long, default_value = "target/matrices")]
        out_dir: PathBuf,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateMatrices { out_dir } => generate_matrices(&out_dir),
        Commands::Ci => ci(),
    }
}

fn generate_matrices(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;

    let bayer = Texture::from_vec(
        BAYER_SIDE as u32,
        BAYER_SIDE as u32,
        1,
        BAYER_4X4.iter().map(|v| v * 16).collect(),
    );
    let path = out_dir.join("bayer_4x4.png");
    write_png_texture(bayer.as_texture_slice(), &path)?;
    println!("wrote {}", path.display());

    let noise = blue_noise().map(|v| (v * 256.0) as u8);
    let path = out_dir.join("blue_noise_64x64.png");
    write_png_texture(noise.as_texture_slice(), &path)?;
    println!("wrote {}", path.display());

    Ok(())
}

/// can run benches, tests, bundle reports and so on...
fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
            "-A",
            "clippy::needless_range_loop",
        ],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
