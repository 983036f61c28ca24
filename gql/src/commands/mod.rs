mod build;
mod check;
mod completions;

use build::BuildCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use gqlschema_builder::SchemaBuilder;
use gqlschema_ir::SchemaGraph;
use gqlschema_manifest::GqlToml;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gqlschema_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for gqlschema_builder::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Run a build pass over an opened manifest.
pub(crate) fn build_graph(gql_toml: &GqlToml) -> SchemaGraph {
    let manifest = gql_toml.manifest();
    let catalog = manifest.catalog().unwrap_or_exit();
    let builder = SchemaBuilder::new(manifest.builder_options());
    catalog.build(&builder).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "gql")]
#[command(version)]
#[command(about = "Build GraphQL schemas from TOML type manifests")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schema and write it as SDL or JSON
    Build(BuildCommand),

    /// Validate gqlschema.toml and report what a build would produce
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
