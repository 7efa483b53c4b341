use anyhow::Result;
use clap::{Parser, Subcommand};
use gdclj_core::{BridgeConfig, EntryDispatcher, ProcessEnv, RuntimeOptions};
use gdclj_extension::{BOOTSTRAP, logging};
use gdclj_jvm::JvmBootstrapper;

#[derive(Parser)]
#[command(
    name = "gdclj",
    about = "gdclj diagnostics: inspect and dry-run the Clojure bootstrap outside Godot"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration and JVM options
    Config,
    /// Start the JVM, load the entry namespace and resolve the entry point
    /// without calling it
    Check,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            let config = BridgeConfig::from_env(&ProcessEnv)?;
            let options = RuntimeOptions::from_config(&config);
            println!("classpath: {}", config.classpath);
            println!("entry: {}/{}", config.entry.namespace, config.entry.function);
            println!("minimum level: {}", config.host.minimum_level);
            println!("jvm options:");
            for option in options.option_strings() {
                println!("  {option}");
            }
        }
        Command::Check => {
            let dispatcher = EntryDispatcher::new(JvmBootstrapper::new(), &BOOTSTRAP);
            let report = dispatcher.preflight(&ProcessEnv)?;
            println!(
                "ok: {}/{} resolved ({} stages)",
                report.namespace,
                report.function,
                report.stages.len()
            );
        }
    }

    Ok(())
}
