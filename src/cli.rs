use clap::{Parser, Subcommand};

/// corsgate, a CORS-bypassing HTTP forwarding proxy
#[derive(Parser)]
#[command(name = "corsgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Serve {
        /// Port to bind (overrides CORSGATE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
