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

//! # Flow Rules and Flow Tables
//!
//! A [`FlowRule`] is a single forwarding instruction of a switch, and a [`FlowTable`] maps each
//! destination host to the set of rules a switch applies to packets for that destination.

use crate::sdn::netkat::{NetKatPolicy, DST_FIELD, PORT_FIELD};
use crate::sdn::{HostId, PortNr};

use indexmap::IndexMap;

/// Single forwarding instruction: packets received on `in_port` are sent to `out_port`. If
/// `is_link` is set, the rule models the traversal of a physical link between two switches.
/// Otherwise, it models the processing inside of the switch (or the delivery to a host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowRule {
    /// Port on which the packet is received
    pub in_port: PortNr,
    /// Port to which the packet is sent
    pub out_port: PortNr,
    /// Whether the rule represents a link between two switches
    pub is_link: bool,
}

impl FlowRule {
    /// Create a new flow rule
    pub fn new(in_port: PortNr, out_port: PortNr, is_link: bool) -> Self {
        Self { in_port, out_port, is_link }
    }
}

/// # Flow Table
///
/// Maps destination hosts to an ordered list of [`FlowRule`]s. The list of a destination never
/// contains the same rule twice. Destinations are kept in insertion order, such that the generated
/// NetKAT policies are deterministic.
///
/// Equality of two flow tables is set-based: Two tables are equal if they contain the same
/// destinations, and for each destination, the same rules, regardless of the order.
#[derive(Debug, Clone, Default)]
pub struct FlowTable {
    entries: IndexMap<HostId, Vec<FlowRule>>,
}

impl FlowTable {
    /// Create an empty flow table
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to all entries
    pub fn entries(&self) -> &IndexMap<HostId, Vec<FlowRule>> {
        &self.entries
    }

    /// Returns the rules for a given destination, or `None` if the destination is not present.
    pub fn get(&self, dest: HostId) -> Option<&[FlowRule]> {
        self.entries.get(&dest).map(|rules| rules.as_slice())
    }

    /// Returns true if the table contains no destinations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of rules in the table.
    pub fn num_rules(&self) -> usize {
        self.entries.values().map(|rules| rules.len()).sum()
    }

    /// Returns true if the table already contains `rule` for `dest`.
    pub fn contains(&self, dest: HostId, rule: &FlowRule) -> bool {
        self.entries.get(&dest).map(|rules| rules.contains(rule)).unwrap_or(false)
    }

    /// Add a rule for the destination `dest`. If the exact same rule already exists for this
    /// destination, nothing happens. Returns `true` if the table was changed.
    pub fn add_entry(&mut self, dest: HostId, rule: FlowRule) -> bool {
        let rules = self.entries.entry(dest).or_insert_with(Vec::new);
        if rules.contains(&rule) {
            false
        } else {
            rules.push(rule);
            true
        }
    }

    /// Add all rules for the destination `dest`. Returns `true` if at least one rule was added.
    pub fn add_entries<'a, I>(&mut self, dest: HostId, rules: I) -> bool
    where
        I: IntoIterator<Item = &'a FlowRule>,
    {
        rules.into_iter().fold(false, |changed, rule| self.add_entry(dest, *rule) || changed)
    }

    /// Returns true if adding `rules` for `dest` would change the table.
    pub fn has_new_rules(&self, dest: HostId, rules: &[FlowRule]) -> bool {
        rules.iter().any(|rule| !self.contains(dest, rule))
    }

    /// Returns a new table which contains only the rules for which `predicate` is true.
    /// Destinations without any matching rule are not present in the result.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&FlowRule) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter_map(|(dest, rules)| {
                let rules: Vec<FlowRule> = rules.iter().filter(|r| predicate(r)).copied().collect();
                if rules.is_empty() {
                    None
                } else {
                    Some((*dest, rules))
                }
            })
            .collect();
        Self { entries }
    }

    /// Merge all entries of `other` into `self`, skipping rules that already exist. Returns `true`
    /// if the table was changed.
    pub fn extend(&mut self, other: &FlowTable) -> bool {
        other.entries.iter().fold(false, |changed, (dest, rules)| {
            self.add_entries(*dest, rules.iter()) || changed
        })
    }

    /// Set-based equality check. Both tables must have the same destinations, and for each
    /// destination, the rule lists must be permutations of each other.
    pub fn is_equal(&self, other: &FlowTable) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(dest, rules)| match other.entries.get(dest) {
                Some(other_rules) => {
                    rules.len() == other_rules.len()
                        && rules.iter().all(|r| other_rules.contains(r))
                }
                None => false,
            })
    }

    /// Generate one NetKAT policy for each rule in the table. Each policy tests the destination
    /// and the incoming port, and assigns the outgoing port. The policies are ordered by the
    /// insertion order of the destination, and then by the order of the rules.
    pub fn to_netkat_policies(&self) -> Vec<NetKatPolicy> {
        self.entries
            .iter()
            .flat_map(|(dest, rules)| {
                rules.iter().map(move |rule| {
                    let mut policy = NetKatPolicy::new();
                    policy.add_test(DST_FIELD, dest);
                    policy.add_test(PORT_FIELD, rule.in_port);
                    policy.add_assignment(PORT_FIELD, rule.out_port);
                    policy
                })
            })
            .collect()
    }
}

impl PartialEq for FlowTable {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for FlowTable {}
