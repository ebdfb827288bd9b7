use clap::Parser;
use cornerconv::filter::{
    box_filter, edge_filter, emboss_filter, feature_normalize, gaussian_filter, gx_filter,
    gy_filter, highpass_filter, sharpen_filter,
};
use cornerconv::gradient::sobel;
use cornerconv::io::{load_image, save_image};
use cornerconv::{
    convolve_with, smooth, ChannelMode, CornerConvResult, Descriptor, HarrisConfig,
    HarrisDetector, Image,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "cornerconv CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum FilterConfig {
    Box { size: usize },
    Gaussian { sigma: f32 },
    Highpass,
    Sharpen,
    Emboss,
    Edge,
    Gx,
    Gy,
}

impl FilterConfig {
    fn build(&self) -> CornerConvResult<Image> {
        match *self {
            FilterConfig::Box { size } => box_filter(size),
            FilterConfig::Gaussian { sigma } => gaussian_filter(sigma),
            FilterConfig::Highpass => Ok(highpass_filter()),
            FilterConfig::Sharpen => Ok(sharpen_filter()),
            FilterConfig::Emboss => Ok(emboss_filter()),
            FilterConfig::Edge => Ok(edge_filter()),
            FilterConfig::Gx => Ok(gx_filter()),
            FilterConfig::Gy => Ok(gy_filter()),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ConvolveConfig {
    filter: FilterConfig,
    #[serde(default = "default_true")]
    preserve: bool,
    #[serde(default)]
    normalize: bool,
}

#[derive(Debug, Deserialize)]
struct SmoothConfig {
    sigma: f32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SobelOutput {
    #[default]
    Magnitude,
    Direction,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SobelConfig {
    blur_sigma: Option<f32>,
    output: SobelOutput,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct HarrisConfigJson {
    sigma: f32,
    threshold: f32,
    nms_radius: usize,
    alpha: f32,
    include_descriptors: bool,
}

impl Default for HarrisConfigJson {
    fn default() -> Self {
        let cfg = HarrisConfig::default();
        Self {
            sigma: cfg.sigma,
            threshold: cfg.threshold,
            nms_radius: cfg.nms_radius,
            alpha: cfg.alpha,
            include_descriptors: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Operation {
    Convolve(ConvolveConfig),
    Smooth(SmoothConfig),
    Sobel(SobelConfig),
    Harris(HarrisConfigJson),
}

#[derive(Debug, Deserialize)]
struct Config {
    image_path: String,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    output_image_path: Option<String>,
    #[serde(default)]
    parallel: bool,
    operation: Operation,
}

#[derive(Debug, Serialize)]
struct CornerRecord {
    x: usize,
    y: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor: Option<Vec<f32>>,
}

impl CornerRecord {
    fn from_descriptor(d: Descriptor, include_descriptor: bool) -> Self {
        Self {
            x: d.x,
            y: d.y,
            descriptor: include_descriptor.then_some(d.data),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    width: usize,
    height: usize,
    count: usize,
    corners: Vec<CornerRecord>,
}

fn filtered_image(config: &Config, image: &Image) -> Result<Image, Box<dyn std::error::Error>> {
    let result = match &config.operation {
        Operation::Convolve(cfg) => {
            let filter = cfg.filter.build()?;
            let mode = ChannelMode::from_preserve(cfg.preserve);
            let mut out = convolve_with(image, &filter, mode, config.parallel)?;
            if cfg.normalize {
                feature_normalize(&mut out);
            }
            out
        }
        Operation::Smooth(cfg) => smooth(image, cfg.sigma)?,
        Operation::Sobel(cfg) => {
            let source = match cfg.blur_sigma {
                Some(sigma) => smooth(image, sigma)?,
                None => image.clone(),
            };
            let (magnitude, direction) = sobel(&source)?;
            let mut out = match cfg.output {
                SobelOutput::Magnitude => magnitude,
                SobelOutput::Direction => direction,
            };
            feature_normalize(&mut out);
            out
        }
        Operation::Harris(_) => return Err("harris does not produce an image".into()),
    };
    Ok(result)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("cornerconv=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let image = load_image(&config.image_path)?;

    if let Operation::Harris(cfg) = &config.operation {
        let detector = HarrisDetector::new(HarrisConfig {
            sigma: cfg.sigma,
            threshold: cfg.threshold,
            nms_radius: cfg.nms_radius,
            alpha: cfg.alpha,
            parallel: config.parallel,
        });
        let descriptors = detector.detect(&image)?;
        let corners: Vec<CornerRecord> = descriptors
            .into_iter()
            .map(|d| CornerRecord::from_descriptor(d, cfg.include_descriptors))
            .collect();
        let output = Output {
            width: image.width(),
            height: image.height(),
            count: corners.len(),
            corners,
        };
        let json = serde_json::to_string_pretty(&output)?;
        match &config.output_path {
            Some(path) => {
                fs::write(path, json)?;
                tracing::info!(path = path.as_str(), count = output.count, "wrote corners");
            }
            None => println!("{json}"),
        }
        return Ok(());
    }

    let path = config
        .output_image_path
        .as_deref()
        .ok_or("output_image_path must be set for image operations")?;
    let out = filtered_image(&config, &image)?;
    save_image(&out, path)?;
    tracing::info!(path, channels = out.channels(), "wrote image");
    Ok(())
}
