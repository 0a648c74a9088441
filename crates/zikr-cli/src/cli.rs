use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "zikr")]
#[command(bin_name = "zikr")]
#[command(version)]
#[command(about = "Guided zikr and muraqba practice session timer")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "List available practice plans")]
    List,
    #[command(about = "Print the playback sequence for a plan")]
    Show {
        #[arg(value_name = "PLAN", help = "Plan id or name")]
        plan: String,
    },
    #[command(about = "Play a practice plan session")]
    Play {
        #[arg(value_name = "PLAN", help = "Plan id or name")]
        plan: String,
    },
}
