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

//! Module containing the big-switch DyNetKAT encoder. All switches are combined into a single term,
//! and the links between them are described by one network-wide link term.

use super::{
    controller_name, switch_name, Encoder, EncodingInfo, SymbolEncoding, BIG_SWITCH_VAR_NAME,
    HELP_CHANNEL_NAME, LINK_TERM_NAME, PACKET_IN_CHANNEL_NAME, PACKET_OUT_CHANNEL_NAME, SDN_NAME,
    UP_CHANNEL_NAME,
};
use crate::sdn::FlowTable;

/// # Big-Switch Encoder
///
/// The term `L` is the union of all link rules, taken from the live tables of the used switches
/// and from every staged table. Each used switch `i` is a NetKAT policy `SW<i>` containing only its
/// non-link rules, and `SW<i>'` is the policy after the update (only if an update is staged).
///
/// The switches are parameters of one recursive term `SDN_{X0, ..., Xn}`. It either processes
/// packets with `((X0 + ... + Xn) . L)*`, receives the new policy `SW<i>'` on channel `Up<i>` and
/// replaces `Xi` with it, or performs a packet-in / packet-out exchange with the controllers. A
/// controller `C<j>` sends the new policies of its switches, and answers packet-in requests.
///
/// If `proactive_switch` is set, the big switch asks for update `i` on channel `Help<i>` first.
#[derive(Debug, Clone)]
pub struct BigSwitchEncoder {
    sym: SymbolEncoding,
    proactive_switch: bool,
}

impl BigSwitchEncoder {
    /// Create a new encoder
    pub fn new(sym: SymbolEncoding, proactive_switch: bool) -> Self {
        Self { sym, proactive_switch }
    }

    fn definition(&self, name: &str, body: &str) -> String {
        format!("{} {} {}", name, self.sym.def, body)
    }

    /// Union of all policies in `table`, or `0` if the table is empty.
    fn union(&self, table: &FlowTable) -> String {
        let policies: Vec<String> = table
            .to_netkat_policies()
            .iter()
            .map(|p| {
                format!("({})", p.to_string_with(self.sym.and, self.sym.eq, self.sym.assign))
            })
            .collect();
        if policies.is_empty() {
            self.sym.zero.to_string()
        } else {
            policies.join(self.sym.or)
        }
    }

    fn big_switch_name(&self, args: &[String]) -> String {
        format!("{}_{{{}}}", SDN_NAME, args.join(", "))
    }

    fn variables(&self, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", BIG_SWITCH_VAR_NAME, i)).collect()
    }

    /// Link term built from all link rules of the live tables of the used switches, and of all
    /// staged tables.
    fn link_table(&self, info: &EncodingInfo<'_>) -> FlowTable {
        let mut links = FlowTable::new();
        for table in info.used_switches().values() {
            links.extend(&table.filter(|r| r.is_link));
        }
        for tables in info.used_controllers() {
            for table in tables.values() {
                links.extend(&table.filter(|r| r.is_link));
            }
        }
        links
    }

    fn encode_switch(
        &self,
        index: usize,
        table: &FlowTable,
        new_table: Option<&FlowTable>,
    ) -> Vec<String> {
        let body = self.union(&table.filter(|r| !r.is_link));
        let mut lines = vec![self.definition(&switch_name(index, false), &body)];
        if let Some(new_table) = new_table {
            let new_body = self.union(&new_table.filter(|r| !r.is_link));
            lines.push(self.definition(&switch_name(index, true), &new_body));
        }
        lines
    }

    /// Prefix `comm` with the help request on channel `index` in proactive mode.
    fn proactive(&self, comm: String, index: usize, from_switch: bool) -> String {
        if self.proactive_switch {
            let dir = if from_switch { self.sym.send } else { self.sym.recv };
            format!("{}{}{}{}{}{}", HELP_CHANNEL_NAME, index, dir, self.sym.one, self.sym.seq, comm)
        } else {
            comm
        }
    }

    /// Alternatives of the big switch term, with `updates` the indices of all switches which will
    /// receive a new policy.
    fn big_switch_alternatives(&self, n: usize, updates: &[usize]) -> Vec<String> {
        let vars = self.variables(n);
        let name = self.big_switch_name(&vars);

        let mut alternatives = vec![format!(
            "(({}){}{}){}{}{}",
            vars.join(self.sym.or),
            self.sym.and,
            LINK_TERM_NAME,
            self.sym.star,
            self.sym.seq,
            name
        )];

        for i in updates.iter().copied() {
            let new_name = switch_name(i, true);
            let mut args = vars.clone();
            if let Some(arg) = args.get_mut(i) {
                *arg = new_name.clone();
            }
            let comm = format!(
                "{}{}{}{}{}{}",
                UP_CHANNEL_NAME,
                i,
                self.sym.recv,
                new_name,
                self.sym.seq,
                self.big_switch_name(&args)
            );
            alternatives.push(self.proactive(comm, i, true));
        }

        alternatives.push(format!(
            "{}{}{}{}{}{}{}{}{}",
            PACKET_IN_CHANNEL_NAME,
            self.sym.send,
            self.sym.one,
            self.sym.seq,
            PACKET_OUT_CHANNEL_NAME,
            self.sym.recv,
            self.sym.one,
            self.sym.seq,
            name
        ));
        alternatives
    }

    fn controller_alternatives(&self, name: &str, updates: &[usize]) -> Vec<String> {
        let mut alternatives: Vec<String> = updates
            .iter()
            .map(|i| {
                let comm = format!(
                    "{}{}{}{}{}{}",
                    UP_CHANNEL_NAME,
                    i,
                    self.sym.send,
                    switch_name(*i, true),
                    self.sym.seq,
                    name
                );
                self.proactive(comm, *i, false)
            })
            .collect();
        alternatives.push(format!(
            "{}{}{}{}{}{}{}{}{}",
            PACKET_IN_CHANNEL_NAME,
            self.sym.recv,
            self.sym.one,
            self.sym.seq,
            PACKET_OUT_CHANNEL_NAME,
            self.sym.send,
            self.sym.one,
            self.sym.seq,
            name
        ));
        alternatives
    }
}

impl Default for BigSwitchEncoder {
    fn default() -> Self {
        Self::new(SymbolEncoding::ascii(), false)
    }
}

impl Encoder for BigSwitchEncoder {
    fn symbols(&self) -> &SymbolEncoding {
        &self.sym
    }

    fn proactive_switch(&self) -> bool {
        self.proactive_switch
    }

    fn encode(&self, info: &EncodingInfo<'_>) -> String {
        let mut lines = vec![self.definition(LINK_TERM_NAME, &self.union(&self.link_table(info)))];

        let mut switches: Vec<String> = Vec::new();
        let mut updates: Vec<usize> = Vec::new();
        for (i, (node, table)) in info.used_switches().iter().enumerate() {
            let new_table = info.find_new_flow_table(*node);
            if new_table.is_some() {
                updates.push(i);
            }
            lines.extend(self.encode_switch(i, table, new_table));
            switches.push(switch_name(i, false));
        }

        let n = switches.len();
        lines.push(self.definition(
            &self.big_switch_name(&self.variables(n)),
            &self.big_switch_alternatives(n, &updates).join(self.sym.nondet),
        ));

        let mut terms = vec![self.big_switch_name(&switches)];
        for (j, tables) in info.used_controllers().iter().enumerate() {
            let name = controller_name(j);
            let indices: Vec<usize> = tables.keys().filter_map(|node| info.index(*node)).collect();
            lines.push(self.definition(
                &name,
                &self.controller_alternatives(&name, &indices).join(self.sym.nondet),
            ));
            terms.push(name);
        }

        lines.push(self.definition(SDN_NAME, &terms.join(self.sym.par)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sdn::{FlowRule, HostId};

    fn table(rules: &[(u32, FlowRule)]) -> FlowTable {
        let mut t = FlowTable::new();
        for (dest, rule) in rules {
            t.add_entry(HostId(*dest), *rule);
        }
        t
    }

    #[test]
    fn switch_terms_skip_links() {
        let e = BigSwitchEncoder::default();
        let live = table(&[(1, FlowRule::new(0, 2, false)), (1, FlowRule::new(2, 3, true))]);

        assert_eq!(
            e.encode_switch(0, &live, None),
            vec!["SW0 := ((dst = 1) . (port = 0) . (port <- 2))"]
        );
        assert_eq!(
            e.encode_switch(1, &FlowTable::new(), Some(&live)),
            vec!["SW1 := 0", "SW1' := ((dst = 1) . (port = 0) . (port <- 2))"]
        );
    }

    #[test]
    fn big_switch_term() {
        let e = BigSwitchEncoder::default();
        assert_eq!(
            e.big_switch_alternatives(2, &[1]),
            vec![
                "((X0 + X1) . L)* ; SDN_{X0, X1}",
                "Up1 ? SW1' ; SDN_{X0, SW1'}",
                "pi ! 1 ; po ? 1 ; SDN_{X0, X1}",
            ]
        );
        assert_eq!(
            e.controller_alternatives("C0", &[1]),
            vec!["Up1 ! SW1' ; C0", "pi ? 1 ; po ! 1 ; C0"]
        );
    }

    #[test]
    fn proactive_big_switch() {
        let e = BigSwitchEncoder::new(SymbolEncoding::ascii(), true);
        assert!(e.proactive_switch());
        assert_eq!(e.big_switch_alternatives(1, &[0])[1], "Help0 ! 1 ; Up0 ? SW0' ; SDN_{SW0'}");
        assert_eq!(e.controller_alternatives("C1", &[0])[0], "Help0 ? 1 ; Up0 ! SW0' ; C1");
    }
}
