use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gallery_core::{GalleryApi, GalleryController, GallerySettings, HttpGalleryClient, ItemAction};
use shared::domain::SortKey;

mod browse;
mod logging;
mod platform;
mod render;

use platform::SystemPlatform;
use render::{describe, render_state};

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Browse the PDF scans served by a gallery backend")]
struct Cli {
    /// TOML settings file (defaults to ./gallery.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    items_per_row: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one page of the gallery
    List {
        /// Sorting and filtering are mutually exclusive
        #[arg(long, value_parser = parse_sort_key, conflicts_with = "filter")]
        sort: Option<SortKey>,
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Open {
        name: String,
    },
    Download {
        name: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Print {
        name: String,
    },
    Delete {
        name: String,
    },
    /// Interactive session reading commands from stdin
    Browse,
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|err: shared::error::ValidationError| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut settings =
        GallerySettings::load(cli.config.as_deref()).context("failed to load gallery settings")?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(items_per_row) = cli.items_per_row {
        settings.items_per_row = items_per_row;
    }
    if let Command::Download { out: Some(dir), .. } = &cli.command {
        settings.download_dir = dir.clone();
    }
    settings.validate()?;

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let api: Arc<dyn GalleryApi> =
        Arc::new(HttpGalleryClient::with_timeout(settings.endpoints()?, timeout)?);
    let platform = SystemPlatform::new(
        api.clone(),
        settings.download_dir.clone(),
        settings.print_command.clone(),
    );
    let controller = GalleryController::new(api, Arc::new(platform), settings.items_per_row);

    match cli.command {
        Command::Browse => browse::run(controller).await,
        Command::List {
            sort,
            desc,
            filter,
            page,
        } => {
            controller.start().await;
            if let Some(pattern) = filter {
                controller.filter_by_name(pattern).await;
            }
            if let Some(key) = sort {
                controller.sort_by(key).await;
                if desc {
                    controller.sort_by(key).await;
                }
            }
            let state = controller.set_page(page).await;
            print!("{}", render_state(&state, describe));
            if let Some(err) = state.last_error() {
                bail!("could not load documents: {err}");
            }
            Ok(())
        }
        Command::Open { name } => item_action(&controller, ItemAction::Open, &name).await,
        Command::Download { name, .. } => {
            item_action(&controller, ItemAction::Download, &name).await
        }
        Command::Print { name } => item_action(&controller, ItemAction::Print, &name).await,
        Command::Delete { name } => {
            load_or_fail(&controller).await?;
            let response = controller
                .delete(&name)
                .await
                .with_context(|| format!("failed to delete '{name}'"))?;
            println!("{}", response.body);
            if !response.is_success() {
                bail!("backend refused to delete '{name}' (status {})", response.status);
            }
            Ok(())
        }
    }
}

async fn load_or_fail(controller: &GalleryController) -> Result<()> {
    let state = controller.start().await;
    if let Some(err) = state.last_error() {
        bail!("could not load documents: {err}");
    }
    Ok(())
}

async fn item_action(
    controller: &GalleryController,
    action: ItemAction,
    name: &str,
) -> Result<()> {
    load_or_fail(controller).await?;
    controller
        .perform(action, name)
        .await
        .with_context(|| format!("failed to {} '{name}'", action.as_str()))
}
