use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use nalgebra::Point2;
use signfit::{order_quad, FitReport, FitRequest, Quad};

#[derive(Parser, Debug)]
#[command(name = "signfit", version, about = "Fit a sign rectangle onto four picked points")]
struct Cli {
    /// Log level for stderr output (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON fit request and write a JSON report.
    Fit {
        /// Path to the request JSON.
        request: PathBuf,
        /// Report path; overrides `output_path` from the request.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print four `x,y` points in canonical TL, TR, BR, BL order.
    Order {
        #[arg(
            num_args = 4,
            required = true,
            allow_hyphen_values = true,
            value_parser = parse_point
        )]
        points: Vec<Point2<f64>>,
    },
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level `{s}`"))
}

fn parse_point(s: &str) -> Result<Point2<f64>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok(Point2::new(parse(x)?, parse(y)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    signfit::init_tracing(cli.log_level, false).map_err(|e| e as Box<dyn std::error::Error>)?;
    #[cfg(not(feature = "tracing"))]
    signfit::init_logging(cli.log_level)?;

    match cli.command {
        Command::Fit { request, output } => run_fit(request, output),
        Command::Order { points } => run_order(&points),
    }
}

fn run_fit(
    request_path: PathBuf,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let req = FitRequest::load_json(&request_path)?;
    let report = FitReport::run(&req, &request_path);

    let output_path = output.unwrap_or_else(|| req.output_path());
    report.write_json(&output_path)?;
    println!("wrote fit report to {}", output_path.display());

    match report.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn run_order(points: &[Point2<f64>]) -> Result<(), Box<dyn std::error::Error>> {
    let ordered = order_quad(&Quad::from_slice(points)?);
    println!("{}", serde_json::to_string(&ordered)?);
    Ok(())
}
