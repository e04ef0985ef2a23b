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

//! Topologies and networks shared by multiple tests.

use crate::sdn::{Host, HostId, Network, NodeId, Topology};
use lazy_static::lazy_static;
use rand::prelude::*;

lazy_static! {
    pub static ref A: NodeId = 0.into();
    pub static ref B: NodeId = 1.into();
    pub static ref C: NodeId = 2.into();
    pub static ref D: NodeId = 3.into();
    pub static ref X: HostId = HostId(0);
    pub static ref Y: HostId = HostId(1);
}

/// Build a topology with `n` nodes, named `s0`, `s1`, ... and the given links.
pub fn topology(n: usize, links: &[(usize, usize, f32)]) -> Topology {
    let mut t = Topology::new();
    for i in 0..n {
        t.add_node(format!("s{}", i));
    }
    for (a, b, w) in links {
        t.add_link(NodeId::new(*a), NodeId::new(*b), *w).unwrap();
    }
    t
}

/// Line topology with `n` nodes: `s0 -- s1 -- ... -- s(n-1)`
pub fn line(n: usize) -> Topology {
    let links: Vec<(usize, usize, f32)> = (1..n).map(|i| (i - 1, i, 1.0)).collect();
    topology(n, &links)
}

/// Complete topology with `n` nodes
pub fn complete(n: usize) -> Topology {
    let mut links = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            links.push((a, b, 1.0));
        }
    }
    topology(n, &links)
}

/// # Square network
///
/// ```text
///       0   1
///    A ------- B
///  7 |         | 2
///    |         |
///  6 |         | 3
///    D ------- C
///       5   4
/// ```
///
/// The links `A -- B` and `B -- C` have cost 1, and the links `C -- D` and `D -- A` have cost 5.
/// Host `X` is attached to `A` on port 8, and host `Y` to `C` on port 9. Both hosts are connected
/// to each other, and a single controller manages all switches.
pub fn square_net() -> Network {
    let t = topology(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 5.0), (3, 0, 5.0)]);
    let mut net = Network::new(t).unwrap();
    assert_eq!(net.port_nr(), 8);
    net.add_hosts(vec![Host::new(*X, 8, *A), Host::new(*Y, 9, *C)]);
    net.connect_all_hosts().unwrap();
    net.add_controllers(1, &mut StdRng::seed_from_u64(0)).unwrap();
    net
}
