use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "parlor", about = "Parlor account profile tools")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/parlor.toml")]
    pub config: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Change the name and/or about of a seeded user
    UpdateProfile(UpdateProfileArgs),
}

#[derive(ClapArgs, Debug)]
pub struct UpdateProfileArgs {
    /// Acting user id
    #[arg(long)]
    pub user: i64,

    /// Permanent auth key id of the session issuing the change
    #[arg(long)]
    pub auth_key: i64,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub about: Option<String>,
}
