//! Traffic policy compiler CLI.
//!
//! ```text
//! route file (TOML)
//!     → config::load_config
//!     → config::apply_overrides (--base-domain, --disabled, --log-level)
//!     → PolicyContext (base domain, enabled flag)
//!     → RouteTreeCompiler
//!     → PolicyDocument::build()
//!     → stdout
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use traffic_policy::config::{
    apply_overrides, load_config, ConfigError, ConfigOverrides, PolicyConfig,
};
use traffic_policy::observability::init_logging;
use traffic_policy::routing::CompiledRules;
use traffic_policy::{PolicyContext, PolicyRule};

#[derive(Parser)]
#[command(name = "traffic-policy")]
#[command(about = "Compile route trees into traffic policy documents", long_about = None)]
struct Cli {
    /// Override the configured log level.
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the policy document for a route file
    Compile {
        config: PathBuf,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Override the configured base domain
        #[arg(long)]
        base_domain: Option<String>,

        /// Emit the document with enforcement disabled
        #[arg(long)]
        disabled: bool,
    },
    /// List compiled rules with their match expressions
    Routes { config: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Compile {
            config,
            pretty,
            base_domain,
            disabled,
        } => {
            let overrides = ConfigOverrides {
                base_domain,
                disabled,
                log_level: cli.log_level,
            };
            let config = prepare(&config, &overrides)?;

            let context = PolicyContext::from_config(&config);
            let document = context.document_for(&config.route_nodes());
            let json = if pretty {
                document.build_pretty()?
            } else {
                document.build()?
            };
            println!("{}", json);
        }
        Commands::Routes { config } => {
            let overrides = ConfigOverrides {
                log_level: cli.log_level,
                ..ConfigOverrides::default()
            };
            let config = prepare(&config, &overrides)?;

            let context = PolicyContext::from_config(&config);
            print_rules(&context.compile(&config.route_nodes()));
        }
    }

    Ok(())
}

/// Load the route file, apply command-line overrides, then start logging.
fn prepare(path: &Path, overrides: &ConfigOverrides) -> Result<PolicyConfig, ConfigError> {
    let config = apply_overrides(load_config(path)?, overrides)?;
    init_logging(&config.observability.log_level);

    tracing::info!(
        path = %path.display(),
        routes = config.routes.len(),
        base_domain = %config.base_domain,
        enabled = config.enabled,
        "Route file loaded"
    );
    Ok(config)
}

fn print_rules(rules: &CompiledRules) {
    let directions = [("inbound", &rules.inbound), ("outbound", &rules.outbound)];
    for (direction, list) in directions {
        for (index, rule) in list.iter().enumerate() {
            println!("{}", describe_rule(direction, index, rule));
        }
    }
}

fn describe_rule(direction: &str, index: usize, rule: &PolicyRule) -> String {
    let actions: Vec<_> = rule.actions().iter().map(|a| a.kind.as_str()).collect();
    format!(
        "{}[{}] {:?} {} -> {}",
        direction,
        index,
        rule.name().unwrap_or(""),
        rule.expressions().join(" && "),
        actions.join(", ")
    )
}
