// ABOUTME: CLI for shading HTML pages with the shades engine.
// ABOUTME: Loads a page from URL, file, or stdin, applies one shading pass, and prints the result.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use shades_dom::DomWindow;
use shades_engine::{ShadeSettings, Shader};

/// Darken bright backgrounds of an HTML page.
#[derive(Parser, Debug)]
#[command(name = "shades-cli")]
#[command(about = "Shade bright page backgrounds and print the result", long_about = None)]
struct Args {
    /// Page URL (http/https), local file path, or "-" to read from stdin.
    target: String,

    /// Settings file (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lightness cutoff above which an element is shaded.
    #[arg(long)]
    threshold: Option<f64>,

    /// Target lightness for shaded backgrounds.
    #[arg(long, conflicts_with = "color")]
    lightness: Option<f64>,

    /// Fixed replacement color for shaded backgrounds.
    #[arg(long)]
    color: Option<String>,

    /// Write the shaded HTML here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = build_settings(&args)?;

    let html = load_html(&args.target)?;
    let mut window = DomWindow::parse(&html);
    let mut shader = Shader::new();
    shader.set_background_if_unset(&mut window, &settings.background_color());
    shader.shade(&mut window, &settings.config());

    let shaded = window.html();
    match &args.output {
        Some(path) => {
            fs::write(path, shaded).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(shaded.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Settings come from the optional JSON file, with flag overrides on top.
/// A lightness override switches fixed-color mode off; a color override
/// switches it on.
fn build_settings(args: &Args) -> Result<ShadeSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let raw =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ShadeSettings::default(),
    };

    if let Some(threshold) = args.threshold {
        settings.threshold = threshold;
    }
    if let Some(lightness) = args.lightness {
        settings.lightness = lightness;
        settings.use_color = false;
    }
    if let Some(color) = &args.color {
        settings.color = color.clone();
        settings.use_color = true;
    }

    Ok(settings)
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        let resp = reqwest::blocking::get(target)?.error_for_status()?;
        return Ok(resp.text()?);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
