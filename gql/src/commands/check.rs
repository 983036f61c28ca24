use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use gqlschema_manifest::GqlToml;

use super::{UnwrapOrExit, build_graph};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to gqlschema.toml (defaults to ./gqlschema.toml)
    #[arg(short, long, default_value = "gqlschema.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let gql_toml = GqlToml::open(&self.config).unwrap_or_exit();
        let graph = build_graph(&gql_toml);

        println!("✓ {} is valid\n", self.config.display());

        let roots = gql_toml.manifest().roots();
        println!("  roots: {}\n", roots.join(", "));

        print_section("record", &graph.record_names());
        print_section("dictionary", &graph.dictionary_names());
        print_section("enum", &graph.enum_names());

        let placeholders: Vec<&str> = graph
            .enums()
            .filter(|e| e.is_placeholder())
            .map(|e| e.name.as_str())
            .collect();
        if !placeholders.is_empty() {
            eprintln!(
                "warning: no values declared for enum{} {}",
                if placeholders.len() == 1 { "" } else { "s" },
                placeholders.join(", ")
            );
        }

        Ok(())
    }
}

fn print_section(kind: &str, names: &[&str]) {
    if names.is_empty() {
        return;
    }
    let plural = match (kind, names.len()) {
        (_, 1) => kind.to_string(),
        ("dictionary", _) => "dictionaries".to_string(),
        _ => format!("{kind}s"),
    };
    println!("  {} {}:", names.len(), plural);
    for name in names {
        println!("    {name}");
    }
    println!();
}
