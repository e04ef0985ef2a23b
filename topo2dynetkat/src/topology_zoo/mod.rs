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

//! # Topology Zoo
//!
//! This module loads network topologies from
//! [TopologyZoo](http://www.topology-zoo.org/dataset.html) GML files. Every node of the file
//! becomes a switch, and every edge becomes a link with weight
//! [`DEFAULT_LINK_WEIGHT`](crate::sdn::DEFAULT_LINK_WEIGHT).

mod error;
mod gml_parser;

pub use error::ZooTopologyError;
pub use gml_parser::{parse_gml_str, parse_gml_topology, GmlError};

use crate::sdn::Topology;

use log::*;
use std::fs::read_dir;
use std::path::Path;

/// Load a single GML file, and check that the resulting topology is not empty and connected.
pub fn load_topology(filename: impl AsRef<Path>) -> Result<Topology, ZooTopologyError> {
    let t = parse_gml_topology(filename)?;
    t.validate()?;
    Ok(t)
}

/// Parse all `.gml` files in the directory, sorted by file name. Files which cannot be parsed are
/// skipped with a warning.
pub fn load_topologies(dir: impl AsRef<Path>) -> Result<Vec<(String, Topology)>, ZooTopologyError> {
    let mut files: Vec<_> = read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("gml"))
        .collect();
    files.sort();

    let mut result = Vec::with_capacity(files.len());
    for path in files {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        match parse_gml_topology(&path) {
            Ok(t) => result.push((name, t)),
            Err(e) => warn!("Skipping {}: {}", name, e),
        }
    }
    Ok(result)
}

/// Keep only the topologies that are valid (not empty and connected). Every invalid topology is
/// logged and removed.
pub fn validate_topologies(topologies: Vec<(String, Topology)>) -> Vec<(String, Topology)> {
    topologies
        .into_iter()
        .filter(|(name, t)| match t.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Invalid topology {}: {}", name, e);
                false
            }
        })
        .collect()
}
