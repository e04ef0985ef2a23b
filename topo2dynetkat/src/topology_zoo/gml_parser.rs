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

//! Parses GML files from Topology Zoo

use crate::sdn::{NodeId, Topology, DEFAULT_LINK_WEIGHT};

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

/// Parses a GML file and returns the resulting topology. Every link gets the weight
/// [`DEFAULT_LINK_WEIGHT`].
///
/// The names will remain the same, except the same name occurs twice. In this case, we will append
/// a _N to the end, where N is a number starting from 1 (_1 is appended to the second occurence,
/// and _2 is appended to the third occurence, etc...). Duplicate links and links from a node to
/// itself are ignored.
pub fn parse_gml_topology(filename: impl AsRef<Path>) -> Result<Topology, GmlError> {
    let gml_str = read_to_string(filename.as_ref())?;
    parse_gml_str(&gml_str)
}

/// Parses the content of a GML file. See [`parse_gml_topology`].
pub fn parse_gml_str(gml_str: &str) -> Result<Topology, GmlError> {
    let mut t = Topology::new();

    let mut current_state = CurrentState::NotStarted;

    let mut used_labels: HashMap<String, usize> = HashMap::new();
    let mut node_lookup: HashMap<usize, NodeId> = HashMap::new();

    for (i, line) in gml_str.lines().enumerate() {
        let line = line.trim();
        current_state = match current_state {
            CurrentState::NotStarted => {
                if line == "graph [" {
                    CurrentState::None
                } else if line.is_empty() {
                    CurrentState::NotStarted
                } else {
                    return Err(GmlError::UnexpectedToken { line: i, content: String::from(line) });
                }
            }
            CurrentState::None => {
                if line == "node [" {
                    CurrentState::Node { id: None, name: None }
                } else if line == "edge [" {
                    CurrentState::Edge { source: None, target: None }
                } else {
                    CurrentState::None
                }
            }
            CurrentState::Node { id, name } => {
                if let Some(number) = line.strip_prefix("id ") {
                    let id: Option<usize> = Some(number.trim().parse()?);
                    CurrentState::Node { id, name }
                } else if let Some(label) = line.strip_prefix("label ") {
                    let mut name: String = label.trim().trim_matches('"').replace(" ", "_");
                    // increment the num_used in the hashmap
                    let num_used = *used_labels.get(&name).unwrap_or(&0);
                    used_labels.insert(name.clone(), num_used + 1);
                    if num_used > 0 {
                        name.push_str(&format!("_{}", num_used));
                    }
                    CurrentState::Node { id, name: Some(name) }
                } else if line == "]" {
                    let id = id.ok_or(GmlError::NodeMissingId(i))?;
                    let name = name.ok_or(GmlError::NodeMissingLabel(i))?;
                    if node_lookup.contains_key(&id) {
                        return Err(GmlError::NodeIdNotUnique(i));
                    }
                    node_lookup.insert(id, t.add_node(name));
                    CurrentState::None
                } else {
                    CurrentState::Node { id, name }
                }
            }
            CurrentState::Edge { source, target } => {
                if let Some(number) = line.strip_prefix("source ") {
                    let source: Option<usize> = Some(number.trim().parse()?);
                    CurrentState::Edge { source, target }
                } else if let Some(number) = line.strip_prefix("target ") {
                    let target: Option<usize> = Some(number.trim().parse()?);
                    CurrentState::Edge { source, target }
                } else if line == "]" {
                    let source = source.ok_or(GmlError::EdgeMissingSource(i))?;
                    let source_idx =
                        *node_lookup.get(&source).ok_or(GmlError::UnknownNodeId(source))?;
                    let target = target.ok_or(GmlError::EdgeMissingTarget(i))?;
                    let target_idx =
                        *node_lookup.get(&target).ok_or(GmlError::UnknownNodeId(target))?;
                    // ignore self loops and duplicate links
                    if source_idx != target_idx && t.weight(source_idx, target_idx).is_none() {
                        t.add_link(source_idx, target_idx, DEFAULT_LINK_WEIGHT)?;
                    }
                    CurrentState::None
                } else {
                    CurrentState::Edge { source, target }
                }
            }
        };
    }

    Ok(t)
}

enum CurrentState {
    NotStarted,
    None,
    Node { id: Option<usize>, name: Option<String> },
    Edge { source: Option<usize>, target: Option<usize> },
}

/// Error while parsing a GML file
#[derive(Debug, Error)]
pub enum GmlError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Unexpected Token
    #[error("Unexpected Token on line {line}: {content}")]
    UnexpectedToken {
        /// Line number
        line: usize,
        /// Content of the line
        content: String,
    },
    /// ParseIntError
    #[error("Cannot parse an integer! {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    /// Unknown Node Id
    #[error("Unknown node id: {0}")]
    UnknownNodeId(usize),
    /// Node is missing an ID field
    #[error("Node is missing an ID field before line {0}!")]
    NodeMissingId(usize),
    /// Node is missing an label field
    #[error("Node is missing an label field before line {0}!")]
    NodeMissingLabel(usize),
    /// Duplicate Node Id
    #[error("Node ID is not unique on line {0}!")]
    NodeIdNotUnique(usize),
    /// Edge is missing the source field
    #[error("Edge is missing the source field before line {0}!")]
    EdgeMissingSource(usize),
    /// Edge is missing the target field
    #[error("Edge is missing the target field before line {0}!")]
    EdgeMissingTarget(usize),
    /// The link cannot be added to the topology
    #[error("Invalid link: {0}")]
    TopologyError(#[from] crate::sdn::TopologyError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_with_ring_gml() {
        let filename = format!("{}/test_files/ring.gml", env!("CARGO_MANIFEST_DIR"));
        let t = parse_gml_topology(filename).unwrap();

        // check all indices and node names
        assert_eq!(t.num_nodes(), 5);
        assert_eq!(t.node_name(0.into()), Some("Enschede"));
        assert_eq!(t.node_name(1.into()), Some("Hengelo"));
        assert_eq!(t.node_name(2.into()), Some("Almelo"));
        assert_eq!(t.node_name(3.into()), Some("Deventer"));
        assert_eq!(t.node_name(4.into()), Some("Hengelo_1"));

        // duplicate link and self loop are ignored
        let edges: Vec<(NodeId, NodeId)> = t.edges().iter().map(|e| (e.from, e.to)).collect();
        let expected: Vec<(NodeId, NodeId)> = vec![
            (0.into(), 1.into()),
            (1.into(), 2.into()),
            (2.into(), 3.into()),
            (3.into(), 0.into()),
            (4.into(), 1.into()),
        ];
        assert_eq!(edges, expected);
        assert!(t.edges().iter().all(|e| e.weight == DEFAULT_LINK_WEIGHT));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse_gml_str("node ["), Err(GmlError::UnexpectedToken { line: 0, .. })));
        assert!(matches!(
            parse_gml_str("graph [\nnode [\nlabel \"A\"\n]\n]"),
            Err(GmlError::NodeMissingId(3))
        ));
        assert!(matches!(
            parse_gml_str("graph [\nnode [\nid 0\n]\n]"),
            Err(GmlError::NodeMissingLabel(3))
        ));
        assert!(matches!(
            parse_gml_str(
                "graph [\nnode [\nid 0\nlabel \"A\"\n]\nedge [\nsource 0\ntarget 7\n]\n]"
            ),
            Err(GmlError::UnknownNodeId(7))
        ));
        assert!(matches!(
            parse_gml_str("graph [\nnode [\nid x\n]\n]"),
            Err(GmlError::ParseIntError(_))
        ));
        assert!(matches!(
            parse_gml_topology("/this/file/does/not/exist.gml"),
            Err(GmlError::IoError(_))
        ));
    }

    #[test]
    fn empty_graph() {
        let t = parse_gml_str("graph [\n]\n").unwrap();
        assert_eq!(t.num_nodes(), 0);
    }
}
