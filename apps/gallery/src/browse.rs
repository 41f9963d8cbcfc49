//! Interactive session: stdin commands drive the controller, a renderer task
//! redraws on every published state change.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use gallery_core::{GalleryController, ItemAction, PageNav};
use shared::domain::SortKey;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::warn;

use crate::render::{describe, render_state};

const HELP: &str = "\
commands:
  sort <name|date|size>      sort (repeat to flip direction)
  filter [text]              filter by name, empty clears
  page <n|first|last|next|prev>
  refresh                    reload in the background
  open|download|print|delete <name>
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Sort(SortKey),
    Filter(String),
    Page(PageNav),
    Refresh,
    Item(ItemAction, String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let item = |action: ItemAction| -> Result<BrowseCommand> {
        if rest.is_empty() {
            bail!("usage: {} <name>", action.as_str());
        }
        Ok(BrowseCommand::Item(action, rest.to_string()))
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "sort" => BrowseCommand::Sort(rest.parse()?),
        "filter" => BrowseCommand::Filter(rest.to_string()),
        "page" => BrowseCommand::Page(parse_page(rest)?),
        "next" => BrowseCommand::Page(PageNav::Next),
        "prev" => BrowseCommand::Page(PageNav::Prev),
        "refresh" => BrowseCommand::Refresh,
        "open" => item(ItemAction::Open)?,
        "download" => item(ItemAction::Download)?,
        "print" => item(ItemAction::Print)?,
        "delete" => item(ItemAction::Delete)?,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

fn parse_page(arg: &str) -> Result<PageNav> {
    match arg {
        "first" => Ok(PageNav::First),
        "last" => Ok(PageNav::Last),
        "next" => Ok(PageNav::Next),
        "prev" | "previous" => Ok(PageNav::Prev),
        number => number
            .parse::<usize>()
            .map(PageNav::To)
            .map_err(|_| anyhow!("usage: page <n|first|last|next|prev>")),
    }
}

pub async fn run(controller: Arc<GalleryController>) -> Result<()> {
    let mut updates = controller.subscribe();
    print!("{}", render_state(&controller.snapshot().await, describe));

    let renderer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(state) => {
                    println!();
                    print!("{}", render_state(&state, describe));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind state updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    controller.spawn_refresh();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            BrowseCommand::Sort(key) => {
                controller.sort_by(key).await;
            }
            BrowseCommand::Filter(pattern) => {
                controller.filter_by_name(pattern).await;
            }
            BrowseCommand::Page(nav) => {
                controller.navigate(nav).await;
            }
            BrowseCommand::Refresh => {
                controller.spawn_refresh();
            }
            BrowseCommand::Item(ItemAction::Delete, name) => {
                let task = controller.spawn_delete(name.clone());
                tokio::spawn(async move {
                    match task.await {
                        Ok(Ok(response)) => println!("delete {name}: {}", response.body),
                        Ok(Err(err)) => eprintln!("delete {name}: {err}"),
                        Err(err) => eprintln!("delete {name}: task failed: {err}"),
                    }
                });
            }
            BrowseCommand::Item(action, name) => {
                if let Err(err) = controller.perform(action, &name).await {
                    eprintln!("{err}");
                }
            }
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Quit => break,
        }
    }

    renderer.abort();
    Ok(())
}
