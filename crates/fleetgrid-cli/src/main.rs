use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fleet",
    about = "fleetgrid — autoscaling advisor and cost simulator",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to fleetgrid.toml (default: ./fleetgrid.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fleetgrid.toml scaffold with the reference policy
    Init {
        /// Directory to write the scaffold into
        #[arg(short, long, default_value = ".")]
        path: String,
    },
    /// Advise on a single scaling decision
    Decide {
        /// Servers currently running
        #[arg(short, long)]
        servers: u32,
        /// Predicted load in requests per minute
        #[arg(short, long)]
        load: f64,
        /// Evaluation instant as unix seconds (default: now)
        #[arg(long)]
        at: Option<u64>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Estimate the dollar cost of running a fleet
    Cost {
        /// Number of servers
        #[arg(short, long)]
        servers: u32,
        /// Duration in hours
        #[arg(long, default_value_t = 1.0)]
        hours: f64,
    },
    /// Replay a load history and compare static vs. autoscaled cost
    Simulate {
        /// JSON file holding an array of {timestamp, requests, bytes}
        #[arg(short, long)]
        samples: String,
        /// Baseline fleet size (default from config)
        #[arg(long)]
        static_servers: Option<u32>,
        /// Starting autoscaled fleet size (default from config)
        #[arg(long)]
        initial_servers: Option<u32>,
        /// Minutes each sample covers (default from config)
        #[arg(long)]
        interval_minutes: Option<f64>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Forecast future load from a history file
    Forecast {
        /// JSON file holding an array of {timestamp, requests, bytes}
        #[arg(short, long)]
        samples: String,
        /// Model identifier (moving_average, linear_trend, arima, prophet, lstm)
        #[arg(short, long, default_value = "moving_average")]
        model: String,
        /// Minutes to forecast ahead
        #[arg(long, default_value_t = 5)]
        horizon: u32,
        /// Directory learned-model artifacts are resolved under
        #[arg(long, default_value = "models")]
        model_dir: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fleetgrid_engine=info".parse()?)
                .add_directive("fleetgrid_sim=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { path } => commands::init::run(&path),
        Commands::Decide {
            servers,
            load,
            at,
            format,
        } => commands::decide::run(&config, servers, load, at, &format),
        Commands::Cost { servers, hours } => commands::cost::run(&config, servers, hours),
        Commands::Simulate {
            samples,
            static_servers,
            initial_servers,
            interval_minutes,
            format,
        } => commands::simulate::run(
            &config,
            &samples,
            static_servers,
            initial_servers,
            interval_minutes,
            &format,
        ),
        Commands::Forecast {
            samples,
            model,
            horizon,
            model_dir,
            format,
        } => commands::forecast::run(&samples, &model, horizon, &model_dir, &format),
    }
}
