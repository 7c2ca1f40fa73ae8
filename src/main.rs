use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use radar_ring::config::RadarConfig;
use radar_ring::radar::RadarRenderer;
use radar_ring::ring::{FrameSink, JsonLinesSink, TextSink};
use radar_ring::scenario::{Replay, Scenario};

#[derive(Parser)]
#[command(name = "radar-ring")]
#[command(about = "Aircraft bearing display for LED rings")]
struct Cli {
    /// Radar config file (YAML). Defaults to the 36-pixel reference board.
    #[arg(short, long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate { scenario: String },
    /// Replay a scenario and print every frame
    Run {
        scenario: String,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Sleep for the scenario interval between ticks
        #[arg(long)]
        realtime: bool,
    },
    /// Print the self-test color cycle
    SelfTest {
        #[arg(long, default_value_t = 4)]
        cycles: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Validate { scenario } => validate(&scenario),
        Commands::Run {
            scenario,
            format,
            realtime,
        } => run(config, &scenario, format, realtime),
        Commands::SelfTest { cycles } => self_test(config, cycles),
    }
}

fn load_config(path: Option<&str>) -> Result<RadarConfig, ExitCode> {
    let Some(path) = path else {
        return Ok(RadarConfig::default());
    };

    RadarConfig::from_file(path).map_err(|e| {
        eprintln!("Error loading config {}: {}", path, e);
        ExitCode::FAILURE
    })
}

fn validate(path: &str) -> ExitCode {
    match Scenario::from_file(path) {
        Ok(scenario) => {
            println!("Scenario is valid ({} ticks)", scenario.ticks.len());
            if let Some(interval) = scenario.interval {
                println!("  interval: {}", humantime::format_duration(interval));
            }
            let fixes = scenario
                .ticks
                .iter()
                .filter(|t| t.position.is_some())
                .count();
            println!("  ticks with position fix: {}", fixes);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Scenario error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: RadarConfig, path: &str, format: Format, realtime: bool) -> ExitCode {
    let scenario = match Scenario::from_file(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Scenario error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "replaying {} ticks on a {}-pixel ring",
        scenario.ticks.len(),
        config.ring.size
    );

    let mut replay = Replay::new(config);
    let stdout = io::stdout().lock();
    let result = match format {
        Format::Text => replay.run(&scenario, &mut TextSink::new(stdout), realtime),
        Format::Json => replay.run(&scenario, &mut JsonLinesSink::new(stdout), realtime),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn self_test(config: RadarConfig, cycles: usize) -> ExitCode {
    let mut renderer = RadarRenderer::new(config);
    let mut sink = TextSink::new(io::stdout().lock());

    for _ in 0..cycles {
        if let Err(e) = sink.show(&renderer.self_test()) {
            eprintln!("Self test failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
