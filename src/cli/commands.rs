use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedlog")]
#[command(about = "Terminal RSS subscription manager with a persistent article history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe to a feed URL
    Add {
        /// Feed URL to subscribe to (RSS or Atom)
        url: String,

        /// Subscription name (defaults to the feed's title)
        #[arg(long)]
        name: Option<String>,
    },

    /// List all subscriptions
    List,

    /// Remove a subscription (interactive selection)
    Remove,

    /// Browse a subscription's article history page by page
    Read {
        /// Subscription position as shown by `list` (interactive if omitted)
        position: Option<usize>,
    },

    /// Fetch the latest articles for every subscription
    Refresh,
}
