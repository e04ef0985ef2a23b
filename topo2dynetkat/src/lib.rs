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

#![deny(missing_docs)]

//! # Topo2DyNetKAT: Encoding SDN Topologies as DyNetKAT Terms
//! This is a library for building a software-defined network from a topology graph, and for
//! describing a reconfiguration of that network as a set of DyNetKAT terms.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`SDN`](sdn)**: The network model. See the main structure [`Network`](sdn::Network), which
//!   owns all [`Switches`](sdn::Switch), [`Hosts`](sdn::Host) and
//!   [`Controllers`](sdn::Controller). Forwarding state is stored in
//!   [`FlowTables`](sdn::FlowTable), which are derived from the shortest paths between hosts.
//!
//! - **[`Behaviors`](behavior)**: Collection of different ways to mutate a freshly built network,
//!   such that the controllers stage a reconfiguration. See the trait
//!   [`Behavior`](behavior::Behavior).
//!
//! - **[`Encoding`](encode)**: Extracts the used switches and controllers from a network
//!   ([`EncodingInfo`](encode::EncodingInfo)), and renders them as DyNetKAT terms.
//!
//! - **[`TopologyZoo`](topology_zoo)**: Functions to load a topology downloaded from
//!   [TopologyZoo](http://www.topology-zoo.org/dataset.html) (as `GML` files).
//!
//! ## Usage
//!
//! ```
//! use topo2dynetkat::behavior::{network_with_behavior, OutsideHostConn};
//! use topo2dynetkat::encode::{Encoder, EncodingInfo, SimpleEncoder};
//! use topo2dynetkat::sdn::{Topology, DEFAULT_LINK_WEIGHT};
//! use topo2dynetkat::Error;
//! use rand::prelude::*;
//!
//! fn main() -> Result<(), Error> {
//!     // prepare the topology
//!     let mut t = Topology::new();
//!     let nodes: Vec<_> = (0..4).map(|i| t.add_node(format!("s{}", i))).collect();
//!     for i in 0..4 {
//!         t.add_link(nodes[i], nodes[(i + 1) % 4], DEFAULT_LINK_WEIGHT)?;
//!     }
//!
//!     // build the network and apply the behavior
//!     let mut rng = StdRng::seed_from_u64(3);
//!     let net = network_with_behavior(t, &OutsideHostConn::default(), &mut rng)?;
//!
//!     // encode the network
//!     let info = EncodingInfo::new(&net)?;
//!     println!("{}", SimpleEncoder::default().encode(&info));
//!
//!     Ok(())
//! }
//! ```

// test modules
mod test;

pub mod behavior;
pub mod encode;
mod error;
pub mod sdn;
pub mod topology_zoo;
pub mod utils;

pub use error::Error;
