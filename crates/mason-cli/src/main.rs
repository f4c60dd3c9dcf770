mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mason", about = "Render, build and push containerized Python programs")]
#[command(version)]
struct Cli {
    /// Jar declaration file
    #[arg(long, short = 'j', global = true, default_value = "jar.toml")]
    jar: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Dockerfile and entry script
    Render {
        /// Print only the Dockerfile
        #[arg(long, conflicts_with = "script")]
        manifest: bool,
        /// Print only the entry script
        #[arg(long)]
        script: bool,
    },
    /// Write the Dockerfile and entry script to the container directory
    Save {
        /// Replace an existing container directory
        #[arg(long)]
        overwrite: bool,
    },
    /// Build the container image (saves first if needed)
    Build,
    /// Run the entry script in the built image
    Run {
        /// Entry argument as NAME=VALUE; sequence values are comma-separated
        #[arg(long = "arg", short = 'a', value_name = "NAME=VALUE")]
        args: Vec<String>,
    },
    /// Log in to a container registry
    Login(RegistryArgs),
    /// Log in, tag the image for the registry and push it
    Push {
        #[command(flatten)]
        registry: RegistryArgs,
        /// Stream push progress
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Print a JSON description of the container
    Inspect,
}

#[derive(clap::Args)]
struct RegistryArgs {
    /// Registry account (defaults to [registry].username in mason.toml)
    #[arg(long, short = 'u')]
    username: Option<String>,
    /// Registry host (defaults to [registry].default in mason.toml)
    #[arg(long)]
    registry: Option<String>,
    /// Read the password from stdin instead of MASON_REGISTRY_PASSWORD
    #[arg(long)]
    password_stdin: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), ".env loaded"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { manifest, script } => commands::render(&cli.jar, manifest, script)?,
        Commands::Save { overwrite } => commands::save(&cli.jar, overwrite)?,
        Commands::Build => commands::build(&cli.jar).await?,
        Commands::Run { args } => commands::run(&cli.jar, &args).await?,
        Commands::Login(registry) => commands::login(&cli.jar, &registry.into()).await?,
        Commands::Push { registry, verbose } => {
            commands::push(&cli.jar, &registry.into(), verbose).await?
        }
        Commands::Inspect => commands::inspect(&cli.jar)?,
    }

    Ok(())
}

impl From<RegistryArgs> for commands::Credentials {
    fn from(args: RegistryArgs) -> Self {
        Self {
            username: args.username,
            registry: args.registry,
            password_stdin: args.password_stdin,
        }
    }
}
