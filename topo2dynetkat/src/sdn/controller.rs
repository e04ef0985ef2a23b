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

//! # SDN Controller
//!
//! A controller manages a set of switches, and stages new flow tables for them. Staged flow tables
//! are kept separate from the live flow tables of the switches. They represent the reconfiguration
//! that the controller announces to its switches.

use crate::sdn::{ControllerId, DeviceError, FlowRule, FlowTable, HostId, NodeId, Switch};

use indexmap::IndexMap;
use log::*;

/// Describes how a staged flow table is created from the live flow table of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTableUpdate {
    /// The staged table starts as a copy of the live table, and new rules are added to it. No
    /// table is staged if the new rules are already part of the live table.
    Patch,
    /// The staged table starts empty, and describes the entire new behavior of the switch.
    Replace,
}

impl Default for FlowTableUpdate {
    fn default() -> Self {
        Self::Patch
    }
}

/// SDN Controller
#[derive(Debug, Clone)]
pub struct Controller {
    id: ControllerId,
    switches: Vec<NodeId>,
    new_flow_tables: IndexMap<NodeId, FlowTable>,
}

impl Controller {
    /// Create a new controller, managing the given switches.
    pub fn new(id: ControllerId, switches: Vec<NodeId>) -> Self {
        Self { id, switches, new_flow_tables: IndexMap::new() }
    }

    /// Returns the id of the controller
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Returns the switches managed by the controller
    pub fn switches(&self) -> &[NodeId] {
        &self.switches
    }

    /// Returns true if the controller manages the switch at `node`.
    pub fn owns(&self, node: NodeId) -> bool {
        self.switches.contains(&node)
    }

    /// Returns all staged flow tables, ordered by the time they were first staged.
    pub fn new_flow_tables(&self) -> &IndexMap<NodeId, FlowTable> {
        &self.new_flow_tables
    }

    /// Returns the staged flow table for a switch, if there is one.
    pub fn new_flow_table(&self, node: NodeId) -> Option<&FlowTable> {
        self.new_flow_tables.get(&node)
    }

    /// Stage `rules` for destination `dest` on `switch`. If no table is staged yet for the switch,
    /// it is created according to `mode`. Returns `true` if any rule was added to the staged table.
    ///
    /// Fails if the controller does not manage `switch`. In that case, nothing is modified.
    pub fn add_new_flow_rules(
        &mut self,
        switch: &Switch,
        dest: HostId,
        rules: &[FlowRule],
        mode: FlowTableUpdate,
    ) -> Result<bool, DeviceError> {
        let node = switch.node_id();
        if !self.owns(node) {
            return Err(DeviceError::NoSwitchWithNodeId(node));
        }

        if !self.new_flow_tables.contains_key(&node) {
            let table = match mode {
                FlowTableUpdate::Patch => {
                    if !switch.flow_table().has_new_rules(dest, rules) {
                        return Ok(false);
                    }
                    switch.flow_table().clone()
                }
                FlowTableUpdate::Replace => FlowTable::new(),
            };
            debug!("Controller {} stages a new flow table for switch {:?}", self.id, node);
            self.new_flow_tables.insert(node, table);
        }

        match self.new_flow_tables.get_mut(&node) {
            Some(table) => Ok(table.add_entries(dest, rules.iter())),
            None => Err(DeviceError::NoSwitchWithNodeId(node)),
        }
    }

    /// Discard every staged table that is equal to the live table of its switch. `live` returns
    /// the live flow table of a switch. Returns the number of discarded tables.
    pub fn remove_duplicate_flow_tables<'a, F>(&mut self, live: F) -> usize
    where
        F: Fn(NodeId) -> Option<&'a FlowTable>,
    {
        let before = self.new_flow_tables.len();
        let id = self.id;
        self.new_flow_tables.retain(|node, table| match live(*node) {
            Some(current) if current.is_equal(table) => {
                debug!("Controller {} discards the unchanged flow table of switch {:?}", id, node);
                false
            }
            _ => true,
        });
        before - self.new_flow_tables.len()
    }

    /// Remove a switch from the controller, together with its staged flow table.
    pub(crate) fn remove_switch(&mut self, node: NodeId) {
        self.switches.retain(|n| *n != node);
        self.new_flow_tables.shift_remove(&node);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn switch(node: usize) -> Switch {
        Switch::new(NodeId::new(node), vec![]).unwrap()
    }

    fn rules() -> Vec<FlowRule> {
        vec![FlowRule::new(0, 2, false), FlowRule::new(2, 3, true)]
    }

    #[test]
    fn unknown_switch() {
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0)]);
        let sw = switch(1);
        assert_eq!(
            c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Patch),
            Err(DeviceError::NoSwitchWithNodeId(NodeId::new(1)))
        );
        assert_eq!(
            c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Replace),
            Err(DeviceError::NoSwitchWithNodeId(NodeId::new(1)))
        );
        assert!(c.new_flow_tables().is_empty());
    }

    #[test]
    fn unknown_switch_keeps_staged_tables() {
        let mut own = switch(0);
        own.flow_table_mut().add_entry(HostId(1), FlowRule::new(7, 8, false));
        let mut foreign = switch(1);
        foreign.flow_table_mut().add_entry(HostId(1), FlowRule::new(4, 5, false));
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0)]);
        c.add_new_flow_rules(&own, HostId(0), &rules(), FlowTableUpdate::Patch).unwrap();
        let staged = c.new_flow_tables().clone();
        assert_eq!(staged.len(), 1);

        for mode in vec![FlowTableUpdate::Patch, FlowTableUpdate::Replace] {
            assert_eq!(
                c.add_new_flow_rules(&foreign, HostId(0), &rules(), mode),
                Err(DeviceError::NoSwitchWithNodeId(NodeId::new(1)))
            );
            assert_eq!(c.new_flow_tables(), &staged);
        }
        assert_eq!(c.switches(), &[NodeId::new(0)]);
    }

    #[test]
    fn patch_copies_live_table() {
        let mut sw = switch(0);
        sw.flow_table_mut().add_entry(HostId(1), FlowRule::new(7, 8, false));
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0)]);

        let added = c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Patch);
        assert_eq!(added, Ok(true));
        let staged = c.new_flow_table(NodeId::new(0)).unwrap();
        assert_eq!(staged.num_rules(), 3);
        assert_eq!(staged.get(HostId(1)), Some(&[FlowRule::new(7, 8, false)][..]));
        // the live table is not touched
        assert_eq!(sw.flow_table().num_rules(), 1);

        // adding the same rules again does not change anything
        let added = c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Patch);
        assert_eq!(added, Ok(false));
    }

    #[test]
    fn patch_skips_noop_update() {
        let mut sw = switch(0);
        sw.flow_table_mut().add_entries(HostId(0), rules().iter());
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0)]);

        let added = c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Patch);
        assert_eq!(added, Ok(false));
        assert!(c.new_flow_tables().is_empty());
    }

    #[test]
    fn replace_starts_empty() {
        let mut sw = switch(0);
        sw.flow_table_mut().add_entries(HostId(0), rules().iter());
        sw.flow_table_mut().add_entry(HostId(1), FlowRule::new(7, 8, false));
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0)]);

        let added = c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Replace);
        assert_eq!(added, Ok(true));
        let staged = c.new_flow_table(NodeId::new(0)).unwrap();
        assert_eq!(staged.num_rules(), 2);
        assert!(staged.get(HostId(1)).is_none());
    }

    #[test]
    fn remove_duplicates() {
        let mut sw0 = switch(0);
        sw0.flow_table_mut().add_entries(HostId(0), rules().iter());
        let sw1 = switch(1);
        let mut c = Controller::new(ControllerId(0), vec![NodeId::new(0), NodeId::new(1)]);

        // same rules in a different order
        let reversed: Vec<FlowRule> = rules().into_iter().rev().collect();
        c.add_new_flow_rules(&sw0, HostId(0), &reversed, FlowTableUpdate::Replace).unwrap();
        c.add_new_flow_rules(&sw1, HostId(0), &rules(), FlowTableUpdate::Replace).unwrap();
        assert_eq!(c.new_flow_tables().len(), 2);

        let removed = c.remove_duplicate_flow_tables(|n| {
            if n == sw0.node_id() {
                Some(sw0.flow_table())
            } else {
                Some(sw1.flow_table())
            }
        });
        assert_eq!(removed, 1);
        assert!(c.new_flow_table(NodeId::new(0)).is_none());
        assert!(c.new_flow_table(NodeId::new(1)).is_some());
    }

    #[test]
    fn switch_membership() {
        let mut c = Controller::new(ControllerId(3), vec![NodeId::new(0), NodeId::new(1)]);
        assert!(c.owns(NodeId::new(1)));

        let sw = switch(1);
        c.add_new_flow_rules(&sw, HostId(0), &rules(), FlowTableUpdate::Replace).unwrap();
        c.remove_switch(NodeId::new(1));
        assert_eq!(c.switches(), &[NodeId::new(0)]);
        assert!(c.new_flow_tables().is_empty());
    }
}
