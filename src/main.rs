//! Command-line interface for metadoc

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use metadoc::handles::HandleNormalizer;
#[cfg(feature = "cli")]
use metadoc::locations::Reference;
#[cfg(feature = "cli")]
use metadoc::settings::Settings;
#[cfg(feature = "cli")]
use metadoc::validators::{Schema, SchemaRegistry, TypeSpec};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "metadoc")]
#[command(author, version, about = "Metadata identifier resolution and containment tool", long_about = None)]
struct Cli {
    /// Log library events at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the canonical hdl: form of a handle identifier
    Normalize {
        /// Identifier in any handle form
        #[arg(value_name = "ID")]
        identifier: String,

        /// Handle proxy prefix to strip
        #[arg(long)]
        proxy: Option<String>,
    },

    /// Resolve an identifier to a dereferenceable location
    Resolve {
        /// Identifier to resolve
        #[arg(value_name = "ID")]
        identifier: String,

        /// Location of the document the identifier appears in
        #[arg(short, long)]
        base: Option<String>,

        /// Handle proxy to resolve hdl: identifiers through
        #[arg(long)]
        proxy: Option<String>,
    },

    /// Inspect a schema declaration and display its types
    Inspect {
        /// Path to the JSON schema declaration
        #[arg(value_name = "DECLARATION")]
        declaration: PathBuf,

        /// Show detailed information about a specific type
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check whether one type may directly contain another
    Contains {
        /// Path to the JSON schema declaration
        #[arg(value_name = "DECLARATION")]
        declaration: PathBuf,

        /// Container type name
        parent: String,

        /// Candidate child type name
        child: String,
    },
}

#[cfg(feature = "cli")]
type CliResult = Result<bool, Box<dyn std::error::Error>>;

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Normalize { identifier, proxy } => cmd_normalize(&identifier, proxy),
        Commands::Resolve {
            identifier,
            base,
            proxy,
        } => cmd_resolve(&identifier, base, proxy),
        Commands::Inspect {
            declaration,
            type_name,
            json,
        } => cmd_inspect(declaration, type_name, json),
        Commands::Contains {
            declaration,
            parent,
            child,
        } => cmd_contains(declaration, &parent, &child),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn settings(proxy: Option<String>) -> Result<Settings, metadoc::Error> {
    match proxy {
        Some(proxy) => Settings::new().with_handle_proxy(&proxy),
        None => Ok(Settings::new()),
    }
}

#[cfg(feature = "cli")]
fn cmd_normalize(identifier: &str, proxy: Option<String>) -> CliResult {
    let normalizer: HandleNormalizer = settings(proxy)?.normalizer();
    match normalizer.normalize(identifier) {
        Some(handle) => {
            println!("{}", handle);
            Ok(true)
        }
        None => {
            eprintln!("'{}' is not a handle", identifier);
            Ok(false)
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_resolve(identifier: &str, base: Option<String>, proxy: Option<String>) -> CliResult {
    let chain = settings(proxy)?.default_chain();
    let base = base.as_deref().map(Reference::parse).transpose()?;

    match chain.resolve_identifier(&base, identifier)? {
        Some(location) => {
            println!("{}", location);
            Ok(true)
        }
        None => {
            eprintln!("No resolver accepts '{}'", identifier);
            Ok(false)
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_inspect(declaration: PathBuf, type_name: Option<String>, json_output: bool) -> CliResult {
    let mut registry = SchemaRegistry::new();
    let schema = registry.load_file(&declaration)?;

    if let Some(type_name) = type_name {
        let ty = schema
            .get(&type_name)
            .ok_or_else(|| format!("Type '{}' not found", type_name))?;
        print_type_details(&schema, ty, json_output)?;
        return Ok(true);
    }

    if json_output {
        let types: Vec<_> = schema.types().map(|ty| type_json(&schema, ty)).collect();
        let output = serde_json::json!({
            "location": schema.location(),
            "targetNamespace": schema.target_namespace(),
            "statistics": {
                "types": schema.len(),
                "containers": schema.containers().count(),
                "containmentEdges": schema.edge_count(),
            },
            "types": types,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Schema: {}", schema.location().unwrap_or("<anonymous>"));
        if let Some(ns) = schema.target_namespace() {
            println!("Target namespace: {}", ns);
        }
        println!();
        println!("Types ({}):", schema.len());
        for ty in schema.types() {
            let kind = if ty.is_container() { "container" } else { "element" };
            println!(
                "  {} [{}] attributes: {}, children: {}",
                ty.name(),
                kind,
                ty.attributes().len(),
                ty.containable_types().count()
            );
        }
    }

    Ok(true)
}

#[cfg(feature = "cli")]
fn type_json(schema: &Schema, ty: &TypeSpec) -> serde_json::Value {
    let attributes: Vec<_> = ty
        .attributes()
        .map(|attr| {
            serde_json::json!({
                "name": attr.name(),
                "namespace": attr.namespace_uri(),
                "type": attr.value_type(),
                "mandatory": attr.is_mandatory(),
                "default": attr.default_value(),
            })
        })
        .collect();
    let children: Vec<&str> = schema.containable_types(ty).map(TypeSpec::name).collect();

    serde_json::json!({
        "name": ty.name(),
        "container": ty.is_container(),
        "attributes": attributes,
        "containableTypes": children,
    })
}

#[cfg(feature = "cli")]
fn print_type_details(
    schema: &Schema,
    ty: &TypeSpec,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&type_json(schema, ty))?);
        return Ok(());
    }

    println!("Type: {}", ty.name());
    println!("Container: {}", if ty.is_container() { "yes" } else { "no" });

    println!();
    println!("Attributes ({}):", ty.attributes().len());
    for attr in ty.attributes() {
        let mut line = format!("  {} : {}", attr.key(), attr.value_type());
        if attr.is_mandatory() {
            line.push_str(" (mandatory)");
        }
        if let Some(default) = attr.default_value() {
            line.push_str(&format!(" default=\"{}\"", default));
        }
        println!("{}", line);
    }

    if ty.is_container() {
        println!();
        println!("Containable types:");
        for child in schema.containable_types(ty) {
            println!("  {}", child.name());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_contains(declaration: PathBuf, parent: &str, child: &str) -> CliResult {
    let mut registry = SchemaRegistry::new();
    let schema = registry.load_file(&declaration)?;

    for name in [parent, child] {
        if schema.get(name).is_none() {
            return Err(format!("Type '{}' not found", name).into());
        }
    }

    let allowed = schema.can_contain(parent, child);
    println!("{}", if allowed { "yes" } else { "no" });
    Ok(allowed)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
