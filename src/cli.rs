use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jobly", about = "Job board REST service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply migrations and serve HTTP (the default)
    Serve,

    /// Apply pending migrations and exit
    Migrate,

    /// Print a signed bearer token
    Token {
        #[arg(long)]
        username: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
