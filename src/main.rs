use clap::{Parser, Subcommand};
use std::path::Path;

use snowshoes::cli::commands::{self, parse_cell};
use snowshoes::config::cost::CostConfig;
use snowshoes::world::CellCoord;

#[derive(Parser)]
#[command(name = "snowshoes")]
#[command(about = "Grid movement cost evaluator for snow, ice, doors and debris")]
#[command(version)]
struct Cli {
    /// Path to the cost configuration file; built-in rules are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a winter scenario from procedural parameters
    Generate {
        /// Path to a scenario parameters TOML file
        #[arg(short, long)]
        params: Option<String>,

        /// Override the seed from the parameters file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output scenario file (JSON)
        #[arg(short, long, default_value = "scenario.json")]
        output: String,
    },

    /// Evaluate the cost of entering a cell
    Eval {
        /// Scenario file (JSON or TOML)
        #[arg(short, long)]
        scenario: String,

        /// Actor id
        #[arg(short, long, default_value_t = 1)]
        actor: u32,

        /// Previous cell as x,z
        #[arg(long, value_parser = parse_cell)]
        from: Option<CellCoord>,

        /// Target cell as x,z
        #[arg(long, value_parser = parse_cell)]
        to: CellCoord,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the cheapest route between two cells
    Route {
        #[arg(short, long)]
        scenario: String,

        #[arg(short, long, default_value_t = 1)]
        actor: u32,

        #[arg(long, value_parser = parse_cell)]
        from: CellCoord,

        #[arg(long, value_parser = parse_cell)]
        to: CellCoord,

        #[arg(long)]
        json: bool,
    },

    /// Inspect a scenario or a single cell
    Inspect {
        #[arg(short, long)]
        scenario: String,

        /// Cell to inspect as x,z
        #[arg(long, value_parser = parse_cell)]
        cell: Option<CellCoord>,
    },
}

fn load_config(path: Option<&str>) -> CostConfig {
    match path {
        Some(p) => match CostConfig::from_file(Path::new(p)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => CostConfig::default(),
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("snowshoes={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    init_logging(&config.log_level);

    let result = match cli.command {
        Commands::Generate {
            params,
            seed,
            output,
        } => commands::generate(params.as_deref(), seed, &output),
        Commands::Eval {
            scenario,
            actor,
            from,
            to,
            json,
        } => commands::eval(&config, &scenario, actor, from, to, json),
        Commands::Route {
            scenario,
            actor,
            from,
            to,
            json,
        } => commands::route(&config, &scenario, actor, from, to, json),
        Commands::Inspect { scenario, cell } => commands::inspect(&config, &scenario, cell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
