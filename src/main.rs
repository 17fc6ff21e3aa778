use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use plugin_release::actions::WorkflowEnv;
use plugin_release::config::{DEFAULT_PROJECT_PATH, ReleaseConfig};
use plugin_release::manifest::types::parse_payload;
use plugin_release::project::workflow::update_version;
use plugin_release::release::artifact::ArtifactFetcher;
use plugin_release::release::workflow::{apply_release, update_manifest};
use plugin_release::version::registries::NuGetRegistry;

#[derive(Parser)]
#[command(name = "plugin-release")]
#[command(version, about = "Release automation for Jellyfin plugins")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Increment AssemblyVersion and FileVersion of the project file
    UpdateVersion {
        /// Project file, relative to --root
        #[arg(long, default_value = DEFAULT_PROJECT_PATH)]
        project: PathBuf,
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Announce the built release to the manifest repository and sync docs
    UpdateManifest {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Add an announced release to a manifest file and prune old ABIs
    ApplyRelease {
        #[arg(long)]
        manifest: PathBuf,
        /// Release payload, bare or as a repository_dispatch event document
        #[arg(long)]
        payload: PathBuf,
        /// Do not download the artifact to verify its checksum
        #[arg(long)]
        skip_verify: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::UpdateVersion { project, root } => {
            let project = root.join(project);
            update_version(&project, &root, &WorkflowEnv::from_env())
                .context("Error updating version")?;
        }
        Command::UpdateManifest { root } => {
            let config = ReleaseConfig::from_env().with_root(root);
            let registry = NuGetRegistry::new(&config.nuget_base_url);
            update_manifest(&config, &registry)
                .await
                .context("Error updating manifest")?;
        }
        Command::ApplyRelease {
            manifest,
            payload: payload_path,
            skip_verify,
        } => {
            let content = std::fs::read_to_string(&payload_path)
                .with_context(|| format!("Failed to read {}", payload_path.display()))?;
            let payload = parse_payload(&content).with_context(|| {
                format!("Invalid release payload in {}", payload_path.display())
            })?;

            let fetcher = (!skip_verify).then(ArtifactFetcher::default);
            apply_release(&manifest, &payload, fetcher.as_ref())
                .await
                .context("Error applying release")?;
        }
    }

    Ok(())
}
