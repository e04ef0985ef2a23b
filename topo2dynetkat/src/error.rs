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

//! Module containing all error types

use crate::encode::EncodingError;
use crate::sdn::{DeviceError, NetworkError, TopologyError};
use crate::topology_zoo::ZooTopologyError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from `sdn`
    #[error("Network Error: {0}")]
    NetworkError(#[from] NetworkError),
    /// Topology Zoo Error
    #[error("Topology Zoo Error: {0}")]
    ZooTopologyError(#[from] ZooTopologyError),
    /// Error while preparing the encoding
    #[error("Encoding Error: {0}")]
    EncodingError(#[from] EncodingError),
    /// Changing the link costs did not change any forwarding decision
    #[error("Reached the maximum number of attempts ({0}) to change the link costs!")]
    MaxCostChangingAttemptsReached(usize),
}

impl From<TopologyError> for Error {
    fn from(cause: TopologyError) -> Self {
        Self::NetworkError(NetworkError::TopologyError(cause))
    }
}

impl From<DeviceError> for Error {
    fn from(cause: DeviceError) -> Self {
        Self::NetworkError(NetworkError::DeviceError(cause))
    }
}
