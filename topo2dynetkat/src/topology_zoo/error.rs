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

//! Module that contains definitios for the error class

use thiserror::Error;

use super::gml_parser::GmlError;
use crate::sdn::TopologyError;

/// Error for ZooTopology
#[derive(Debug, Error)]
pub enum ZooTopologyError {
    /// Gml Parse Error
    #[error("Cannot parse GML file: {0}")]
    GmlParseError(#[from] GmlError),
    /// The parsed topology is invalid
    #[error("Invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    /// Io Error while listing a directory
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}
