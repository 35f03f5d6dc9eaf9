use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jjxcapital", about = "JJXCAPITAL arbitrage/P2P trade journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account (signs you in)
    Register {
        email: String,
        password: String,
        /// Display name shown on the profile
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Sign out
    Logout,
    /// Show the current profile
    Whoami,
    /// Save a trade operation (profit = sell - buy, derived on save)
    Save {
        /// Base asset symbol (e.g. BTC)
        base: String,
        /// Quote asset symbol (e.g. USDT)
        quote: String,
        /// Buy price; blank or unparseable defaults to 0
        price_buy: String,
        /// Sell price; blank or unparseable defaults to 0
        price_sell: String,
        /// Exchange the trade ran on
        #[arg(long)]
        exchange: Option<String>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
        /// Trade date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// List operations, newest first
    Ops {
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Only operations created at or after this instant (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        since: Option<String>,
    },
    /// Follow the operation list live; every change re-prints the full snapshot
    Watch,
    /// Profit totals, per-pair breakdown and cumulative chart series
    Summary,
    /// Upgrade to the premium plan
    Upgrade {
        /// Payment method (paypal, binance-pay, blockchain-pay)
        #[arg(long, default_value = "paypal")]
        method: String,
    },
    /// Complete a pending premium checkout
    Confirm {
        /// Order id printed by `upgrade`
        order_id: String,
    },
}
