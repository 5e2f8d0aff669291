use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use geotrack_core::{
    usecases::{lookup_ip, search_place, IpQuery},
    widget::Widget,
};
use geotrack_gateways::{http_client, ipapi::IpApi, mapbox::Mapbox};

use crate::{config::Config, render::Report};

/// Locate IP addresses and places.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Locate an IP address (your own if omitted)
    Ip { address: Option<String> },
    /// Search a place by its name
    Place {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

pub async fn run(args: Args) -> Result<()> {
    let Args { config, command } = args;
    let cfg = Config::try_load_from_file_or_default(config)?;
    let client = http_client(cfg.http.timeout)?;
    let mut widget = Widget::default();

    match command {
        Command::Ip { address } => {
            let gateway = IpApi {
                client,
                api_base_url: cfg.ip_lookup.base_url,
            };
            let query = IpQuery::from_input(address.as_deref().unwrap_or_default());
            let ticket = widget.begin_ip_lookup();
            let result = lookup_ip(&gateway, &query).await;
            widget.finish_ip_lookup(ticket, result);
        }
        Command::Place { name } => {
            let gateway = Mapbox {
                client,
                api_base_url: cfg.geocoding.base_url,
                access_token: cfg.geocoding.access_token,
                country: cfg.geocoding.country,
                limit: cfg.geocoding.limit,
            };
            let Some((ticket, query)) = widget.begin_place_search(&name.join(" ")) else {
                log::warn!("No place name given");
                return Ok(());
            };
            let result = search_place(&gateway, &query).await;
            widget.finish_place_search(ticket, result);
        }
    }

    print!("{}", Report(&widget));
    match widget.panel().error() {
        Some(err) => Err(anyhow!("{err}")),
        None => Ok(()),
    }
}
