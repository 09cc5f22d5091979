use bmi_core::engine::compute_measurement;
use bmi_core::*;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod display;
mod repl;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body Mass Index calculator with session history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI once and print the result
    Calc {
        /// Weight in the selected units (kg or lb)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Height in the selected units (m or ft)
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Unit system: metric or imperial
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Skip the form range checks and pass values straight to the engine
        #[arg(long)]
        raw: bool,
    },

    /// Draw the band chart
    Chart {
        /// BMI to mark on the chart
        #[arg(long)]
        bmi: Option<f64>,

        /// Write an SVG file instead of printing a text strip
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// SVG width in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: Option<u32>,

        /// SVG height in pixels
        #[arg(long = "chart-height", value_parser = clap::value_parser!(u32).range(1..))]
        chart_height: Option<u32>,
    },

    /// Show the BMI categories and their colours
    Categories,

    /// Start an interactive session (default)
    Session,
}

fn main() -> ExitCode {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Calc {
            weight,
            height,
            units,
            json,
            raw,
        } => cmd_calc(&config, weight, height, units, json, raw),
        Commands::Chart {
            bmi,
            output,
            width,
            chart_height,
        } => cmd_chart(&config, bmi, output, width, chart_height),
        Commands::Categories => {
            println!("{}", display::categories_table());
            Ok(())
        }
        Commands::Session => cmd_session(&config),
    }
}

fn cmd_calc(
    config: &Config,
    weight: f64,
    height: f64,
    units: Option<UnitSystem>,
    json: bool,
    raw: bool,
) -> Result<()> {
    let units = units.unwrap_or(config.form.default_units);

    let measurement = if raw {
        to_metric(weight, height, units)
    } else {
        let mut form = FormState::new(units, &config.form);
        form.set_weight(weight)?;
        form.set_height(height)?;
        form.measurement()
    };

    let reading = compute_measurement(&measurement)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("{}", reading);
    }
    Ok(())
}

fn cmd_chart(
    config: &Config,
    bmi: Option<f64>,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let chart = BandChart::new(bmi);

    match output {
        Some(path) => {
            let svg = chart.render_svg(
                width.unwrap_or(config.chart.width),
                height.unwrap_or(config.chart.height),
            )?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, svg)?;
            println!("✓ Chart written to {}", path.display());
        }
        None => {
            println!("{}", chart.render_text(config.chart.text_width));
            println!("{}", chart.text_legend());
        }
    }
    Ok(())
}

fn cmd_session(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(config, stdin.lock(), stdout.lock())?;
    Ok(())
}
