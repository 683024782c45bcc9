//! ng-snippets - Batch-generate Angular components from HTML snippets

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use snippet_core::config::resolve_generator;
use snippet_core::{
    check_generator, DiskWorkspace, FrameworkConfig, Pipeline, ProcessScaffolder, SnippetSettings,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Angular CLI configuration
#[derive(Clone)]
pub struct AngularConfig;

impl FrameworkConfig for AngularConfig {
    fn name(&self) -> &'static str {
        "angular"
    }

    fn display_name(&self) -> &'static str {
        "Angular"
    }

    fn generator_program(&self) -> &'static str {
        "ng"
    }

    fn generator_env(&self) -> &'static str {
        "NG_SNIPPETS_GENERATOR"
    }

    fn docs_url(&self) -> &'static str {
        "https://angular.dev/cli"
    }

    fn leaf_args(&self, path: &str, owner: &str, tag: &str, force: bool) -> Vec<String> {
        let mut args = vec![
            "generate".to_string(),
            "component".to_string(),
            path.to_string(),
            format!("--module={}", owner),
            "--export".to_string(),
            "--flat=false".to_string(),
            "--skip-tests".to_string(),
            format!("--selector={}", tag),
        ];
        if force {
            args.push("--force".to_string());
        }
        args
    }

    fn container_args(&self, path: &str, force: bool) -> Vec<String> {
        let mut args = vec![
            "generate".to_string(),
            "module".to_string(),
            path.to_string(),
            "--flat=false".to_string(),
        ];
        if force {
            args.push("--force".to_string());
        }
        args
    }
}

#[derive(Parser, Debug)]
#[command(name = "ng-snippets")]
#[command(about = "Batch-generate Angular components, modules and Storybook stories from HTML snippets")]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate components, modules and stories for every snippet (default)
    Generate(GenerateArgs),
    /// Check that the Angular CLI can be invoked
    Check(CheckArgs),
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Directory containing the snippet files
    #[arg(long = "snippets-dir", default_value = "Templates/Snippets")]
    pub snippets_dir: PathBuf,

    /// Angular project root the generator runs in
    #[arg(long = "project-dir", default_value = ".")]
    pub project_dir: PathBuf,

    /// Settings file (defaults to snippets.yaml in the snippets directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generator command line, e.g. "npx ng"
    #[arg(long)]
    pub generator: Option<String>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            snippets_dir: PathBuf::from("Templates/Snippets"),
            project_dir: PathBuf::from("."),
            config: None,
            generator: None,
        }
    }
}

#[derive(ClapArgs, Debug, Default)]
pub struct CheckArgs {
    /// Generator command line, e.g. "npx ng"
    #[arg(long)]
    pub generator: Option<String>,
}

/// Initialize tracing on stderr so generator output keeps stdout
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ng_snippets=debug,snippet_core=debug"
    } else {
        "ng_snippets=info,snippet_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn generate<C: FrameworkConfig>(config: &C, args: GenerateArgs) -> Result<bool> {
    let settings = SnippetSettings::load(&args.snippets_dir, args.config.as_deref())?;
    let conventions = settings.conventions_or(config.conventions());
    let command = resolve_generator(config, args.generator.as_deref());

    let scaffolder = ProcessScaffolder::new(config.clone(), command, &args.project_dir);
    let workspace = DiskWorkspace::new(&args.project_dir);
    tracing::info!(
        framework = config.name(),
        generator = %scaffolder.command(),
        snippets = %args.snippets_dir.display(),
        project = %workspace.root().display(),
        "starting generation"
    );
    let mut pipeline = Pipeline::new(workspace, scaffolder, conventions);

    let report = pipeline.generate_all(&args.snippets_dir, &settings).await?;
    report.print_summary(&args.snippets_dir);
    Ok(report.is_success())
}

fn check<C: FrameworkConfig>(config: &C, args: CheckArgs) -> bool {
    let command = resolve_generator(config, args.generator.as_deref());
    let info = check_generator(&command);

    if info.available {
        println!(
            "  {} {} ({})",
            "✓".green(),
            info.command,
            info.version.as_deref().unwrap_or("unknown version")
        );
    } else {
        println!(
            "  {} {}",
            "✗".red(),
            format!("{} CLI not found: {}", config.display_name(), info.command).red()
        );
        println!(
            "  Set {} or see {}",
            config.generator_env().cyan(),
            config.docs_url()
        );
    }
    info.available
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    let config = AngularConfig;

    let success = match args.command {
        Some(Command::Generate(generate_args)) => generate(&config, generate_args).await?,
        Some(Command::Check(check_args)) => check(&config, check_args),
        // No subcommand provided, default to generate with default paths
        None => generate(&config, GenerateArgs::default()).await?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
