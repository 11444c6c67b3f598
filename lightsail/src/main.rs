use clap::{Parser, Subcommand, ValueEnum};
use lightsail::{LightsailApi, NotFoundExt, ProviderConfig};
use serde::Serialize;
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(
    name = "lightsail-wait",
    version,
    about = "Wait for AWS Lightsail operations and resources to settle"
)]
struct Cli {
    /// AWS region (falls back to AWS_REGION, then us-east-1)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Shared config profile (falls back to AWS_PROFILE)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the Lightsail endpoint URL (falls back to LIGHTSAIL_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Wait for an operation to report Completed or Succeeded
    Operation { id: String },

    /// Wait for a relational database to become available
    Database {
        name: String,

        /// Wait for the backup retention flag to read this value instead
        #[arg(long)]
        backup_retention: Option<bool>,
    },

    /// Wait for a container service to become READY, RUNNING or DISABLED
    ContainerService { name: String },

    /// Read the current state once, printing "gone" if it no longer exists
    Status {
        #[arg(value_enum)]
        kind: Kind,
        name: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Operation,
    Database,
    ContainerService,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ProviderConfig {
        region: cli.region,
        profile: cli.profile,
        endpoint: cli.endpoint,
    };
    let api: Arc<dyn LightsailApi> = Arc::new(config.client().await?);

    let output = run(cli.command, api).await?;
    println!("{}", output);

    Ok(())
}

async fn run(command: Command, api: Arc<dyn LightsailApi>) -> Result<String, BoxError> {
    match command {
        Command::Operation { id } => {
            tracing::info!("Waiting for Lightsail Operation ({})", id);
            let snapshot = lightsail::wait_operation(api, &id).await?;
            render(&snapshot.into_payload())
        }
        Command::Database {
            name,
            backup_retention: Some(desired),
        } => {
            tracing::info!(
                "Waiting for Lightsail Database ({}) backup retention to become {}",
                name,
                desired
            );
            let snapshot =
                lightsail::wait_database_backup_retention_modified(api, &name, desired).await?;
            render(&snapshot.into_payload())
        }
        Command::Database {
            name,
            backup_retention: None,
        } => {
            tracing::info!("Waiting for Lightsail Database ({}) to become available", name);
            let snapshot = lightsail::wait_database_modified(api, &name).await?;
            render(&snapshot.into_payload())
        }
        Command::ContainerService { name } => {
            tracing::info!("Waiting for Lightsail Container Service ({})", name);
            let snapshot = lightsail::wait_container_service(api, &name).await?;
            render(&snapshot.into_payload())
        }
        Command::Status { kind, name } => {
            let current = match kind {
                Kind::Operation => api
                    .get_operation(&name)
                    .await
                    .found()?
                    .map(serde_json::to_value)
                    .transpose()?,
                Kind::Database => api
                    .get_relational_database(&name)
                    .await
                    .found()?
                    .map(serde_json::to_value)
                    .transpose()?,
                Kind::ContainerService => api
                    .get_container_service(&name)
                    .await
                    .found()?
                    .map(serde_json::to_value)
                    .transpose()?,
            };

            match current {
                Some(value) => render(&value),
                None => Ok("gone".to_string()),
            }
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, BoxError> {
    Ok(serde_json::to_string_pretty(value)?)
}
