//! Command-line entry point: serve the HTTP API, or add and list schools
//! directly against the database.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use school_directory::config::AppConfig;
use school_directory::db::Database;
use school_directory::http::HttpServer;
use school_directory::logging::init_logging;
use school_directory::models::NewSchool;
use school_directory::repository::SqliteSchoolRepo;
use school_directory::service::{ImageUpload, SchoolService, SubmissionFlow, SubmissionState};
use school_directory::upload::ImageStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,

        /// Bind port override
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Register a school from the command line
    Add {
        /// School name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// City
        #[arg(long)]
        city: String,

        /// State
        #[arg(long)]
        state: String,

        /// 10-digit contact number
        #[arg(long)]
        contact: String,

        /// Contact email address
        #[arg(long)]
        email_id: String,

        /// Path to an image file to upload with the record
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Print the directory listing
    List {
        /// Case-insensitive search over name, city, and address
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = init_logging(
        Some(&config.logging.level),
        config.logging.file_path.as_deref().map(std::path::Path::new),
    )?;

    let cli = Cli::parse();

    let database =
        Database::with_max_connections(&config.database.path, config.database.max_connections)?;
    let repository = Arc::new(SqliteSchoolRepo::new(database));
    let images = Arc::new(ImageStore::new(
        &config.upload.directory,
        config.upload.max_file_size_mb,
        config.upload.allowed_types.clone(),
    )?);
    let service = SchoolService::new(repository, images);

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            HttpServer::new(&config, service).start().await?;
        }
        Commands::Add {
            name,
            address,
            city,
            state,
            contact,
            email_id,
            image,
        } => {
            let form = NewSchool {
                name,
                address,
                city,
                state,
                contact,
                email_id,
                image: None,
            };
            let upload = image.map(read_image).transpose()?;

            let mut flow = SubmissionFlow::new(service);
            match flow.submit(form, upload).await {
                SubmissionState::Success { id } => info!(id, "school registered"),
                SubmissionState::Failed(failure) => {
                    error!(?failure, "submission failed");
                    anyhow::bail!("submission failed");
                }
                other => anyhow::bail!("unexpected submission state: {other:?}"),
            }
        }
        Commands::List { search } => {
            let schools = service.list(search.as_deref()).await?;

            info!(count = schools.len(), "schools found");
            for school in schools {
                info!(
                    id = school.id,
                    name = %school.name,
                    city = %school.city,
                    address = %school.address,
                    image = %school.image,
                    "school"
                );
            }
        }
    }

    Ok(())
}

/// Read an image file from disk for CLI submissions.
fn read_image(path: PathBuf) -> Result<ImageUpload> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read image file {}", path.display()))?;

    let content_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };

    Ok(ImageUpload {
        content_type: content_type.to_string(),
        bytes,
    })
}
