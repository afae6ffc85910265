use std::fs;
use std::path::{Path, PathBuf};

use function_chart::api::{ChartBuilder, ChartEngine};
use function_chart::config::ChartConfig;
use function_chart::core::{ClipPolicy, SignalSnapshot};
use function_chart::render::SvgRenderer;
use function_chart::telemetry;

const USAGE: &str = "Usage: function_chart_render --config <path> [--signals <path>] \
[--output <path>] [--format svg|json] [--clip unclipped|break] [--verbose]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Json,
}

struct CliArgs {
    config_path: PathBuf,
    signals_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    format: OutputFormat,
    clip_policy: ClipPolicy,
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = if args.verbose {
        telemetry::init_tracing("function_chart=debug")
    } else {
        telemetry::init_default_tracing()
    };

    let raw_config = read_file(&args.config_path)?;
    let config = ChartConfig::from_json_str(&raw_config).map_err(|err| err.to_string())?;
    let snapshot = match &args.signals_path {
        Some(path) => {
            SignalSnapshot::from_json_str(&read_file(path)?).map_err(|err| err.to_string())?
        }
        None => SignalSnapshot::default(),
    };
    let builder = ChartBuilder::new().with_clip_policy(args.clip_policy);

    let output = match args.format {
        OutputFormat::Json => builder
            .build(&config, &snapshot)
            .and_then(|scene| scene.to_json_pretty())
            .map(|json| format!("{json}\n"))
            .map_err(|err| err.to_string())?,
        OutputFormat::Svg => {
            let mut engine = ChartEngine::new(SvgRenderer::new(), config)
                .map_err(|err| err.to_string())?
                .with_builder(builder);
            engine.set_signals(snapshot);
            engine.render().map_err(|err| err.to_string())?;
            engine.into_renderer().into_document()
        }
    };

    match &args.output_path {
        Some(path) => fs::write(path, output)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => print!("{output}"),
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut signals_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut format = OutputFormat::Svg;
    let mut clip_policy = ClipPolicy::Unclipped;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--signals" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --signals".to_owned())?;
                signals_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --format".to_owned())?;
                format = match value.as_str() {
                    "svg" => OutputFormat::Svg,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("unknown format `{other}` (expected svg or json)")),
                };
            }
            "--clip" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --clip".to_owned())?;
                clip_policy = match value.as_str() {
                    "unclipped" => ClipPolicy::Unclipped,
                    "break" => ClipPolicy::BreakSegments,
                    other => {
                        return Err(format!(
                            "unknown clip policy `{other}` (expected unclipped or break)"
                        ));
                    }
                };
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    let config_path = config_path.ok_or_else(|| format!("missing --config\n{USAGE}"))?;
    Ok(CliArgs {
        config_path,
        signals_path,
        output_path,
        format,
        clip_policy,
        verbose,
    })
}
