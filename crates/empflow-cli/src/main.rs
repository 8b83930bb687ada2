use clap::{Args, Parser, Subcommand, ValueEnum};
use empflow::render::raster::{RasterError, RasterOptions};
use empflow::render::{HeadlessError, HeadlessRenderer, embed_local_images};
use empflow::{
    ContainerSize, EmpflowConfig, InputFormat, Measurement, Settings, SlotInputs, Viewport,
};
use futures::executor::block_on;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EMPFLOW_LOG";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error on `{}`: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] empflow::Error),
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "empflow", version, about = "Headless renderer for the empflow infographic")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings document (JSON or YAML). Repeat to deep-merge several, later ones win.
    #[arg(long, global = true, value_name = "PATH")]
    config: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the viewport class (and `tall`) for a viewport size.
    Classify {
        #[arg(long)]
        viewport_width: f64,
        #[arg(long)]
        viewport_height: f64,
        /// Print `{"class": .., "tall": ..}` instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Print the derived scale tokens.
    Tokens {
        #[command(flatten)]
        size: SizeArgs,
        /// Print CSS custom properties instead of JSON.
        #[arg(long)]
        css: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the layout model as JSON.
    Layout {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        size: SizeArgs,
        #[arg(long)]
        pretty: bool,
    },
    /// Render to SVG (stdout by default) or PNG/JPG/PDF.
    Render {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        size: SizeArgs,
        #[arg(long, value_enum, default_value_t = RenderFormat::Svg)]
        format: RenderFormat,
        /// Raster pixels per SVG unit.
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
        /// CSS color painted under the drawing.
        #[arg(long)]
        background: Option<String>,
        /// Root SVG id (sanitized).
        #[arg(long)]
        id: Option<String>,
        /// Draw dots at their start positions without animation.
        #[arg(long = "static")]
        static_dots: bool,
        /// Inline local images as data URLs.
        #[arg(long)]
        embed_images: bool,
        /// Output path (`-` for stdout). Raster output defaults to the input path with the
        /// format's extension, or `out.<ext>` for stdin.
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Slot inputs document; `-` or omitted reads stdin.
    input: Option<String>,
    /// Input format; defaults to the file extension (JSON for stdin).
    #[arg(long, value_enum)]
    input_format: Option<InputFormatArg>,
}

#[derive(Debug, Args)]
struct SizeArgs {
    /// Measured container width. Without a container size the layout uses the unmeasured fallback.
    #[arg(long, requires = "container_height")]
    container_width: Option<f64>,
    #[arg(long, requires = "container_width")]
    container_height: Option<f64>,
    /// Viewport width; defaults to the container width (or 1800).
    #[arg(long)]
    viewport_width: Option<f64>,
    /// Viewport height; defaults to the container height (or 900).
    #[arg(long)]
    viewport_height: Option<f64>,
}

impl SizeArgs {
    fn measurement(&self) -> Measurement {
        let container = match (self.container_width, self.container_height) {
            (Some(w), Some(h)) => Some(ContainerSize::new(w, h)),
            _ => None,
        };
        let viewport = Viewport::new(
            self.viewport_width
                .or(container.map(|c| c.width))
                .unwrap_or(1800.0),
            self.viewport_height
                .or(container.map(|c| c.height))
                .unwrap_or(900.0),
        );
        Measurement::new(container, viewport)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormatArg {
    Json,
    Yaml,
    Json5,
}

impl From<InputFormatArg> for InputFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Yaml => InputFormat::Yaml,
            InputFormatArg::Json5 => InputFormat::Json5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderFormat {
    Svg,
    Png,
    #[value(alias = "jpeg")]
    Jpg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpg => "jpg",
            RenderFormat::Pdf => "pdf",
        }
    }
}

#[derive(Serialize)]
struct ClassifyOut {
    class: empflow::ViewportClass,
    tall: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })
}

fn load_settings(paths: &[PathBuf]) -> Result<Settings> {
    let mut merged = EmpflowConfig::empty_object();
    for path in paths {
        let text = read_file(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        let config = if is_yaml {
            EmpflowConfig::from_yaml_str(&text)?
        } else {
            EmpflowConfig::from_json_str(&text)?
        };
        merged.deep_merge(config.as_value());
        tracing::debug!(path = %path.display(), "loaded config");
    }
    Ok(Settings::from_config(&merged)?)
}

fn input_path(input: &InputArgs) -> Option<&Path> {
    input
        .input
        .as_deref()
        .filter(|p| *p != "-")
        .map(Path::new)
}

fn read_inputs(input: &InputArgs) -> Result<SlotInputs> {
    let path = input_path(input);
    let text = match path {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let format = match (input.input_format, path) {
        (Some(f), _) => f.into(),
        (None, Some(path)) => InputFormat::from_path(path),
        (None, None) => InputFormat::Json,
    };
    Ok(SlotInputs::parse(&text, format)?)
}

/// Directory relative image references resolve against.
fn base_dir(input: &InputArgs) -> PathBuf {
    input_path(input)
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_output(bytes: &[u8], out: Option<&str>) -> Result<()> {
    match out {
        None | Some("-") => {
            std::io::stdout().lock().write_all(bytes)?;
            Ok(())
        }
        Some(path) => std::fs::write(path, bytes).map_err(|source| CliError::File {
            path: PathBuf::from(path),
            source,
        }),
    }
}

fn default_raster_out(input: &InputArgs, format: RenderFormat) -> String {
    match input_path(input) {
        Some(path) => path.with_extension(format.extension()).to_string_lossy().into_owned(),
        None => format!("out.{}", format.extension()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli.config)?;
    let renderer = HeadlessRenderer::new().with_settings(settings);

    match cli.command {
        Command::Classify {
            viewport_width,
            viewport_height,
            json,
        } => {
            let profile = renderer
                .settings
                .breakpoints
                .classify(Viewport::new(viewport_width, viewport_height));
            if json {
                write_json(
                    &ClassifyOut {
                        class: profile.class,
                        tall: profile.tall,
                    },
                    false,
                )?;
            } else if profile.tall {
                println!("{} tall", profile.class);
            } else {
                println!("{}", profile.class);
            }
            Ok(())
        }
        Command::Tokens { size, css, pretty } => {
            let tokens = renderer.tokens(&size.measurement());
            if css {
                let mut out = std::io::stdout().lock();
                for (name, value) in tokens.css_vars() {
                    writeln!(out, "{name}: {value};")?;
                }
                Ok(())
            } else {
                write_json(&tokens, pretty)
            }
        }
        Command::Layout {
            input,
            size,
            pretty,
        } => {
            let inputs = read_inputs(&input)?;
            let layout = renderer.layout_sync(&inputs, &size.measurement());
            write_json(&layout, pretty)
        }
        Command::Render {
            input,
            size,
            format,
            scale,
            background,
            id,
            static_dots,
            embed_images,
            out,
        } => {
            let mut inputs = read_inputs(&input)?;
            let resources = base_dir(&input);
            if embed_images {
                embed_local_images(&mut inputs, &resources)?;
            }

            let mut renderer = renderer;
            if let Some(id) = id.as_deref() {
                renderer.svg.diagram_id = Some(empflow::render::sanitize_svg_id(id));
            }
            renderer.svg.animate = !static_dots;
            renderer.svg.background = background.clone();

            let measurement = size.measurement();
            let raster = RasterOptions {
                scale,
                background,
                resources_dir: Some(resources),
                ..Default::default()
            };
            let bytes = match format {
                RenderFormat::Svg => block_on(renderer.render_svg(&inputs, &measurement)).into_bytes(),
                RenderFormat::Png => renderer.render_png_sync(&inputs, &measurement, &raster)?,
                RenderFormat::Jpg => renderer.render_jpeg_sync(&inputs, &measurement, &raster)?,
                RenderFormat::Pdf => renderer.render_pdf_sync(&inputs, &measurement, &raster)?,
            };
            let out = match (format, out) {
                (_, Some(out)) => Some(out),
                (RenderFormat::Svg, None) => None,
                (_, None) => Some(default_raster_out(&input, format)),
            };
            write_output(&bytes, out.as_deref())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
