use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bootstrap_asset::{AssetStore, ContentHash, DirFetcher, StoreConfig, WritableAsset};
use bootstrap_manifests::{register_all, InfraEnv, INFRA_ENV_FILENAME};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("bootstrap-manifests")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and inspect agent installer manifests")
        .subcommand_required(true)
        .arg(
            Arg::new("dir")
                .long("dir")
                .global(true)
                .env("BOOTSTRAP_ASSET_DIR")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding install-config.yaml, agent-config.yaml and generated manifests"),
        )
        .subcommand(
            Command::new("generate")
                .about("Resolve the InfraEnv manifest and write it to the asset directory")
                .arg(
                    Arg::new("no-load")
                        .long("no-load")
                        .action(ArgAction::SetTrue)
                        .help("Regenerate even if manifests were written before"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Load the previously written InfraEnv manifest and print a summary")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

/// What `show` prints
#[derive(Debug, Serialize)]
struct Summary<'a> {
    file: &'a Path,
    hash: ContentHash,
    name: &'a str,
    namespace: &'a str,
    cluster: &'a str,
    cpu_architecture: Option<&'a str>,
    proxy: bool,
    ntp_sources: &'a [String],
}

impl Summary<'_> {
    fn render_text(&self) -> String {
        let arch = match self.cpu_architecture {
            Some(arch) if !arch.is_empty() => arch,
            _ => "any",
        };
        let ntp = if self.ntp_sources.is_empty() {
            "none".to_string()
        } else {
            self.ntp_sources.join(", ")
        };
        format!(
            "file:         {}\nhash:         {}\ninfraenv:     {}/{}\ncluster:      {}\narchitecture: {}\nproxy:        {}\nntp sources:  {}",
            self.file.display(),
            self.hash.short(),
            self.namespace,
            self.name,
            self.cluster,
            arch,
            if self.proxy { "yes" } else { "no" },
            ntp,
        )
    }
}

fn asset_dir(args: &ArgMatches) -> PathBuf {
    args.get_one::<PathBuf>("dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn generate(dir: PathBuf, load_from_disk: bool) -> Result<()> {
    let config = StoreConfig::new()
        .with_asset_dir(dir.clone())
        .with_load_from_disk(load_from_disk);
    let mut store = AssetStore::new(config);
    register_all(&mut store);

    let infra_env = store
        .fetch::<InfraEnv>()
        .context("failed to resolve the InfraEnv manifest")?;

    if infra_env.files().is_empty() {
        println!("no install configuration found in {}, nothing to write", dir.display());
        return Ok(());
    }
    for file in infra_env.files() {
        let path = file.persist(&dir)?;
        tracing::info!(path = %path.display(), hash = %file.hash().short(), "wrote manifest");
        println!("{} ({})", path.display(), infra_env.state());
    }
    Ok(())
}

fn show(dir: &Path, json: bool) -> Result<()> {
    let mut infra_env = InfraEnv::default();
    let found = infra_env
        .load(&DirFetcher::new(dir))
        .with_context(|| format!("failed to load manifests from {}", dir.display()))?;
    let (Some(manifest), Some(file)) = (infra_env.manifest(), infra_env.files().first()) else {
        debug_assert!(!found);
        println!("{} has not been generated in {}", INFRA_ENV_FILENAME, dir.display());
        return Ok(());
    };

    let summary = Summary {
        file: file.filename(),
        hash: file.hash(),
        name: &manifest.metadata.name,
        namespace: &manifest.metadata.namespace,
        cluster: &manifest.spec.cluster_ref.name,
        cpu_architecture: manifest.spec.cpu_architecture.as_deref(),
        proxy: manifest.spec.proxy.is_some(),
        ntp_sources: manifest.spec.additional_ntp_sources.as_deref().unwrap_or_default(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.render_text());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => generate(asset_dir(args), !args.get_flag("no-load")),
        Some(("show", args)) => show(&asset_dir(args), args.get_flag("json")),
        _ => unreachable!("subcommand_required is set"),
    }
}
