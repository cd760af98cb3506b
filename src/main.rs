use std::{
    fs::File,
    io::{stdout, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use env_logger::Target;
use log::{debug, error, info};

use mini_vouchers::{
    actor::{Loader, Reporter},
    config::{log_level, Action, Config},
    Result,
};

/// A minimal voucher system: links customer orders to barcodes read from CSV
/// files and reports on them.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CLIArguments {
    /// The action to execute.
    #[arg(value_enum, default_value_t = Action::Print)]
    action: Action,

    /// List of barcodes, in a CSV file. The expected data is a set of unique
    /// `barcode`s that are optionally mapped to an `order_id`.
    #[arg(long, default_value = "barcodes.csv")]
    barcodes: PathBuf,

    /// List of customer orders, in a CSV file. The expected data is a set of
    /// unique `order_id`s each mapped to a `customer_id`, optionally with the
    /// `barcodes` they were attributed.
    #[arg(long, default_value = "orders.csv")]
    orders: PathBuf,

    /// Output file to write the report to. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file. Defaults to stderr.
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Amount of customers listed by the `top` action.
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Decrease log level verbosity. May be used several times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Increase log level verbosity. May be used several times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl CLIArguments {
    fn config(&self) -> Config {
        Config {
            barcodes: self.barcodes.clone(),
            orders: self.orders.clone(),
            action: self.action,
            limit: self.limit,
        }
    }
}

struct Application {
    config: Config,
    output: Option<PathBuf>,
}

impl Application {
    fn new(config: Config, output: Option<PathBuf>) -> Self {
        Self { config, output }
    }

    fn run(&self) -> Result<()> {
        info!("Starting MINI_VOUCHERS version {}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration: {:?}", self.config);

        let system = Loader::from_config(&self.config)?.run()?;

        // Only open the output once the data is known to be sound.
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Cannot create output file '{}'.", path.display()))?,
            )),
            None => Box::new(stdout().lock()),
        };
        Reporter::new(system, writer).run(self.config.action, self.config.limit)?;

        Ok(())
    }
}

fn init_logger(arguments: &CLIArguments) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(arguments.verbose, arguments.quiet));

    if let Some(path) = &arguments.log {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file '{}'.", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();

    Ok(())
}

fn main() -> Result<()> {
    let arguments = CLIArguments::parse();
    init_logger(&arguments)?;
    let application = Application::new(arguments.config(), arguments.output.clone());

    let result = application.run();

    match &result {
        Ok(_) => {
            info!("MINI_VOUCHERS completed successfully");
        }
        Err(error) => {
            error!("MINI_VOUCHERS failed with error: {}", error);
        }
    };

    result
}
