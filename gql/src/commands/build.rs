use std::{fs, path::PathBuf};

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use gqlschema_emit::{EmitOptions, Indent, render};
use gqlschema_manifest::GqlToml;
use tracing::info;

use super::{UnwrapOrExit, build_graph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// GraphQL schema definition language
    Sdl,
    /// The type graph as JSON
    Json,
}

#[derive(Args)]
pub struct BuildCommand {
    /// Path to gqlschema.toml (defaults to ./gqlschema.toml)
    #[arg(short, long, default_value = "gqlschema.toml")]
    pub config: PathBuf,

    /// Output file (overrides [schema].output; stdout when neither is set)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sdl)]
    pub format: OutputFormat,

    /// Omit description strings from SDL output
    #[arg(long)]
    pub no_descriptions: bool,

    /// Indent SDL with tabs instead of two spaces
    #[arg(long)]
    pub tabs: bool,
}

impl BuildCommand {
    /// Run the build command
    pub fn run(&self) -> Result<()> {
        let gql_toml = GqlToml::open(&self.config).unwrap_or_exit();
        let graph = build_graph(&gql_toml);

        let text = match self.format {
            OutputFormat::Sdl => {
                let options = EmitOptions {
                    indent: if self.tabs { Indent::Tab } else { Indent::default() },
                    descriptions: !self.no_descriptions,
                };
                render(&graph, &options)
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&graph)
                    .wrap_err("Failed to serialize schema graph")?;
                json.push('\n');
                json
            }
        };

        match self.output.clone().or_else(|| gql_toml.output_path()) {
            Some(path) => {
                fs::write(&path, text)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "wrote schema");
                println!(
                    "Built {} records, {} dictionaries, {} enums into {}",
                    graph.records().count(),
                    graph.dictionaries().count(),
                    graph.enums().count(),
                    path.display()
                );
            }
            None => print!("{text}"),
        }

        Ok(())
    }
}
