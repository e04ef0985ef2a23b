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

#![deny(missing_docs, missing_debug_implementations)]

//! # SDN Network Model
//!
//! This module models a software-defined network, built from a weighted topology graph:
//!
//! - [`Switch`]: placed at every node of the topology. It owns its live [`FlowTable`] and all
//!   [`Link`]s connected to it. Every link end has its own port number.
//! - [`Host`]: attached to a single switch on a single port.
//! - [`Controller`]: manages a subset of the switches, and stages new flow tables for them.
//! - [`Network`]: the aggregate of all of the above. It computes the shortest paths between all
//!   switches, places hosts and controllers at random, and derives the [`FlowRule`]s for the
//!   traffic between hosts.
//!
//! ## Example usage
//!
//! ```rust
//! use topo2dynetkat::sdn::{Network, Topology, DEFAULT_LINK_WEIGHT};
//! use rand::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut t = Topology::new();
//!     let a = t.add_node("a");
//!     let b = t.add_node("b");
//!     t.add_link(a, b, DEFAULT_LINK_WEIGHT)?;
//!
//!     let mut rng = StdRng::seed_from_u64(3);
//!     let mut net = Network::new(t)?;
//!     net.add_and_connect_hosts(2, &mut rng)?;
//!     net.add_controllers(1, &mut rng)?;
//!
//!     println!("{}", net);
//!     Ok(())
//! }
//! ```

mod controller;
mod flow_table;
mod host;
mod link;
mod netkat;
mod network;
pub mod printer;
mod switch;
mod topology;
mod types;

pub use controller::{Controller, FlowTableUpdate};
pub use flow_table::{FlowRule, FlowTable};
pub use host::Host;
pub use link::Link;
pub use netkat::{NetKatPolicy, DST_FIELD, PORT_FIELD};
pub use network::Network;
pub use switch::Switch;
pub use topology::Topology;
pub use types::*;
