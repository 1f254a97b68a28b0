use clap::Parser;
use respimg::{ImageOptions, Loading, Output, OutputMode, render};

#[derive(Parser)]
#[command(name = "respimg")]
#[command(about = "Generate responsive <img> markup with CDN transform URLs")]
#[command(long_about = "\
Generate responsive <img> markup with CDN transform URLs

Builds a Cloudinary-style fetch URL for the image, computes srcset/sizes
candidates for responsive loading, and prints either the finished tag or the
attribute mapping as JSON.

Examples:

  respimg --url https://assets.example.com/hero.png --alt Hero --width 1280
  respimg --url https://assets.example.com/hero.png --alt Hero --width 1280 \\
          --height 720 --fill --hi-def --attr class=p-hero --output-mode attrs")]
#[command(version)]
struct Cli {
    /// Source image URL (absolute, with a hostname)
    #[arg(long)]
    url: String,

    /// Alt text for accessibility
    #[arg(long, default_value = "")]
    alt: String,

    /// Display width in pixels
    #[arg(long)]
    width: u32,

    /// Display height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Crop and fill to the exact width x height (needs --height)
    #[arg(long)]
    fill: bool,

    /// Apply the CDN sharpen effect
    #[arg(long)]
    sharpen: bool,

    /// Loading strategy: lazy, auto or eager
    #[arg(long, default_value = "lazy")]
    loading: Loading,

    /// CDN format override (e.g. webp); auto-detected when omitted
    #[arg(long)]
    format: Option<String>,

    /// Extra attribute as name=value (repeatable)
    #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// Sizes template; every {} is replaced with the display width
    #[arg(long, default_value = respimg::DEFAULT_SIZES)]
    sizes: String,

    /// Comma-separated candidate widths for srcset
    #[arg(long, value_delimiter = ',', value_name = "W,W,...")]
    srcset_widths: Option<Vec<u32>>,

    /// Double the srcset width cap for high-DPI displays
    #[arg(long)]
    hi_def: bool,

    /// Output: html (the tag) or attrs (JSON mapping)
    #[arg(long, default_value = "html")]
    output_mode: OutputMode,
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let opts = ImageOptions {
        height: cli.height,
        fill: cli.fill,
        sharpen: cli.sharpen,
        loading: cli.loading,
        format: cli.format,
        attrs: cli.attrs.into_iter().collect(),
        sizes: cli.sizes,
        srcset_widths: cli.srcset_widths,
        hi_def: cli.hi_def,
    };

    match render(&cli.url, &cli.alt, cli.width, &opts, cli.output_mode)? {
        Output::Html(tag) => println!("{tag}"),
        Output::Attrs(attrs) => println!("{}", serde_json::to_string_pretty(&attrs)?),
    }
    Ok(())
}
