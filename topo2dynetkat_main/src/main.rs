// Topo2DyNetKAT: Encoding SDN Topologies as DyNetKAT Terms
// Copyright (C) 2021  The Topo2DyNetKAT Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use topo2dynetkat::behavior::*;
use topo2dynetkat::encode::{
    BigSwitchEncoder, Encoder, EncodingInfo, SimpleEncoder, SymbolEncoding,
};
use topo2dynetkat::sdn::{FlowTableUpdate, Network};
use topo2dynetkat::topology_zoo;
use topo2dynetkat::utils::SEED;

use clap::{Parser, Subcommand, ValueEnum};
use log::*;
use rand::prelude::*;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    info!("Loading topology {}", args.gml_file.display());
    let topology = topology_zoo::load_topology(&args.gml_file)?;
    info!("Topology has {} nodes and {} links", topology.num_nodes(), topology.num_edges());

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mode = args.mode.into();
    let net: Network = match args.behavior {
        BehaviorSelection::OutsideHostConn { hosts, controllers, outside_hosts } => {
            let behavior = OutsideHostConn { hosts, controllers, outside_hosts, mode };
            network_with_behavior(topology, &behavior, &mut rng)?
        }
        BehaviorSelection::LinkCostChanging {
            hosts,
            controllers,
            attempts,
            min_cost,
            max_cost,
        } => {
            let behavior =
                LinkCostChanging { hosts, controllers, attempts, min_cost, max_cost, mode };
            network_with_behavior(topology, &behavior, &mut rng)?
        }
    };
    debug!("Resulting network:\n{}", net);

    let info = EncodingInfo::new(&net)?;
    let symbols = match args.symbols {
        Symbols::Ascii => SymbolEncoding::ascii(),
        Symbols::Latex => SymbolEncoding::latex(),
    };
    let encoder: Box<dyn Encoder> = match args.encoder {
        EncoderSelection::Simple => Box::new(SimpleEncoder::new(symbols, args.proactive)),
        EncoderSelection::BigSwitch => Box::new(BigSwitchEncoder::new(symbols, args.proactive)),
    };
    let encoded = encoder.encode(&info);

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, encoded)?;
            info!("Written to {}", output.display());
        }
        None => println!("{}", encoded),
    }

    info!("Done!");
    Ok(())
}

/// Build a software-defined network from a TopologyZoo topology, let its controllers stage a
/// reconfiguration, and encode the result as DyNetKAT terms.
#[derive(Parser, Debug)]
#[clap(name = "topo2dynetkat", author = "The Topo2DyNetKAT Authors")]
struct CommandLineArguments {
    /// GML file of the topology
    gml_file: PathBuf,
    /// File to write the encoding to. If omitted, the encoding is printed to stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Seed for the random number generator
    #[clap(short, long, default_value_t = SEED)]
    seed: u64,
    /// How the staged flow tables are created
    #[clap(short, long, value_enum, default_value = "patch")]
    mode: Mode,
    /// Symbols used in the encoding
    #[clap(long, value_enum, default_value = "ascii")]
    symbols: Symbols,
    /// Encoding of the switches
    #[clap(short, long, value_enum, default_value = "simple")]
    encoder: EncoderSelection,
    /// Switches ask their controller for the update on the help channel
    #[clap(short, long)]
    proactive: bool,
    /// Reconfiguration scenario
    #[clap(subcommand)]
    behavior: BehaviorSelection,
}

#[derive(Subcommand, Debug)]
enum BehaviorSelection {
    /// New hosts join the network and are connected to all existing hosts
    #[clap(name = "outside-host-conn")]
    OutsideHostConn {
        /// Number of hosts connected before the new hosts join
        #[clap(long, default_value_t = HOSTS_NR)]
        hosts: usize,
        /// Number of controllers
        #[clap(short, long, default_value_t = CONTROLLERS_NR)]
        controllers: usize,
        /// Number of new hosts
        #[clap(long, default_value_t = OUTSIDE_HOSTS_NR)]
        outside_hosts: usize,
    },
    /// The link costs change, and the paths between all hosts are recomputed
    #[clap(name = "link-cost-changing")]
    LinkCostChanging {
        /// Number of hosts
        #[clap(long, default_value_t = HOSTS_NR)]
        hosts: usize,
        /// Number of controllers
        #[clap(short, long, default_value_t = CONTROLLERS_NR)]
        controllers: usize,
        /// Number of times new link costs are drawn before giving up
        #[clap(short, long, default_value_t = CHANGING_COSTS_ATTEMPTS)]
        attempts: usize,
        /// Smallest link cost
        #[clap(long, default_value_t = MIN_LINK_COST)]
        min_cost: u32,
        /// Largest link cost
        #[clap(long, default_value_t = MAX_LINK_COST)]
        max_cost: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Copy the live table and add the new rules
    Patch,
    /// Start from an empty table
    Replace,
}

impl From<Mode> for FlowTableUpdate {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Patch => FlowTableUpdate::Patch,
            Mode::Replace => FlowTableUpdate::Replace,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Symbols {
    /// Plain text
    Ascii,
    /// LaTeX math mode
    Latex,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EncoderSelection {
    /// One term per switch, links are part of the switch terms
    Simple,
    /// All switches form a single term, links are encoded separately
    BigSwitch,
}
