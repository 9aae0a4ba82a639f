// Trading Bot CLI
// Places orders against the mock exchange and runs the exchange itself

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use trading_bot::{
    logging, validation, Config, LoggingConfig, OrderId, OrderType, Side, TimeInForce, TradingError,
};

// Load command modules from cli directory
#[path = "../cli/exchange_commands.rs"]
mod exchange_commands;
#[path = "../cli/order_commands.rs"]
mod order_commands;

#[derive(Parser)]
#[command(name = "trading-bot")]
#[command(version = "0.2.0")]
#[command(about = "Order placement bot with a built-in mock exchange", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file and create the log directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Place an order
    Order {
        /// Trading pair (e.g., BTCUSDT)
        #[arg(long, value_parser = validation::validate_symbol)]
        symbol: String,

        /// BUY or SELL
        #[arg(long, value_parser = validation::validate_side)]
        side: Side,

        /// MARKET, LIMIT or STOP_MARKET
        #[arg(long = "type", value_parser = validation::validate_order_type)]
        order_type: OrderType,

        #[arg(long, value_parser = validation::validate_quantity)]
        quantity: Decimal,

        /// Limit price (LIMIT only)
        #[arg(long, value_parser = validation::validate_price)]
        price: Option<Decimal>,

        /// Trigger price (STOP_MARKET only)
        #[arg(long, value_parser = validation::validate_stop_price)]
        stop_price: Option<Decimal>,

        #[arg(long, default_value = "GTC", value_parser = validation::validate_time_in_force)]
        time_in_force: TimeInForce,

        /// Use the exchange at exchange.base_url instead of starting one in-process
        #[arg(long)]
        remote: bool,
    },

    /// Look up an order on a running exchange
    Query {
        #[arg(long)]
        order_id: OrderId,
    },

    /// Run the mock exchange until Ctrl-C
    Serve {
        /// Override server.port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the exchange clock
    Time,

    /// Serve the JSON order API (POST /api/order, GET /api/orders)
    Web {
        /// Override web.port
        #[arg(short, long)]
        port: Option<u16>,

        /// Use the exchange at exchange.base_url instead of starting one in-process
        #[arg(long)]
        remote: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n  ✗ FAILED - {}\n", e.user_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), TradingError> {
    // Init doesn't need a config (it creates it)
    if let Commands::Init { force } = cli.command {
        let console_only = LoggingConfig {
            log_to_file: false,
            ..LoggingConfig::default()
        };
        let _log_guard = logging::init(&console_only, cli.verbose)?;
        return exchange_commands::init_workspace(&cli.config, force);
    }

    let config = Config::load_or_default(&cli.config)?;
    let _log_guard = logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Init { .. } => Ok(()),

        Commands::Order {
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
            time_in_force,
            remote,
        } => {
            let args = order_commands::OrderArgs {
                symbol,
                side,
                order_type,
                quantity,
                price,
                stop_price,
                time_in_force,
            };
            order_commands::place_order(&args, &config, remote).await
        }

        Commands::Query { order_id } => order_commands::query_order(order_id, &config).await,

        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            exchange_commands::serve(&config).await
        }

        Commands::Time => exchange_commands::show_time(&config).await,

        Commands::Web { port, remote } => {
            let mut config = config;
            if let Some(port) = port {
                config.web.port = port;
            }
            order_commands::serve_web(&config, remote).await
        }
    }
}
