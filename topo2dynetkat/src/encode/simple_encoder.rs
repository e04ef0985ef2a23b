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

//! Module containing the simple DyNetKAT encoder, which defines one term per switch and controller.

use super::{
    controller_name, switch_name, EncodingInfo, Encoder, SymbolEncoding, HELP_CHANNEL_NAME,
    SDN_NAME, UP_CHANNEL_NAME,
};
use crate::sdn::{FlowTable, NetKatPolicy};

/// # Simple Encoder
///
/// Every used switch `i` is encoded as a term `SW<i>`, which non-deterministically applies one of
/// its flow rules and recurses, or receives an update on channel `Up<i>` and continues as
/// `SW<i>'`. The term `SW<i>'` describes the switch after the update (`bot` if the staged table is
/// empty). Every used controller `j` is a term `C<j>` which sends the updates for its switches.
/// Finally, the term `SDN` is the parallel composition of all switches and controllers.
///
/// If `proactive_switch` is set, a switch first asks for its update on channel `Help<i>`.
///
/// Each definition is written on its own line.
#[derive(Debug, Clone)]
pub struct SimpleEncoder {
    sym: SymbolEncoding,
    proactive_switch: bool,
}

impl SimpleEncoder {
    /// Create a new encoder
    pub fn new(sym: SymbolEncoding, proactive_switch: bool) -> Self {
        Self { sym, proactive_switch }
    }

    fn definition(&self, name: &str, alternatives: &[String]) -> String {
        format!("{} {} {}", name, self.sym.def, alternatives.join(self.sym.nondet))
    }

    fn policies(&self, policies: &[NetKatPolicy], term: &str) -> Vec<String> {
        policies
            .iter()
            .map(|p| {
                format!(
                    "({}){}{}",
                    p.to_string_with(self.sym.and, self.sym.eq, self.sym.assign),
                    self.sym.seq,
                    term
                )
            })
            .collect()
    }

    /// Communication on channel `index`, continuing as `term`. The switch receives on the update
    /// channel and sends on the help channel, and the controller does the opposite.
    fn communication(&self, term: &str, index: usize, from_switch: bool) -> String {
        let (up, help) = if from_switch {
            (self.sym.recv, self.sym.send)
        } else {
            (self.sym.send, self.sym.recv)
        };
        let comm = format!(
            "{}{}{}{}{}{}",
            UP_CHANNEL_NAME, index, up, self.sym.one, self.sym.seq, term
        );
        if self.proactive_switch {
            format!(
                "{}{}{}{}{}{}",
                HELP_CHANNEL_NAME, index, help, self.sym.one, self.sym.seq, comm
            )
        } else {
            comm
        }
    }

    fn encode_switch(
        &self,
        index: usize,
        table: &FlowTable,
        new_table: Option<&FlowTable>,
    ) -> Vec<String> {
        let name = switch_name(index, false);
        let new_name = switch_name(index, true);

        let mut alternatives = self.policies(&table.to_netkat_policies(), &name);
        if alternatives.is_empty() {
            alternatives.push(format!("{}{}{}", self.sym.zero, self.sym.seq, name));
        }

        let mut lines = Vec::new();
        match new_table {
            Some(new_table) => {
                alternatives.push(self.communication(&new_name, index, true));
                lines.push(self.definition(&name, &alternatives));

                let mut new_alternatives =
                    self.policies(&new_table.to_netkat_policies(), &new_name);
                if new_alternatives.is_empty() {
                    new_alternatives.push(self.sym.bot.to_string());
                }
                lines.push(self.definition(&new_name, &new_alternatives));
            }
            None => lines.push(self.definition(&name, &alternatives)),
        }
        lines
    }
}

impl Default for SimpleEncoder {
    fn default() -> Self {
        Self::new(SymbolEncoding::ascii(), false)
    }
}

impl Encoder for SimpleEncoder {
    fn symbols(&self) -> &SymbolEncoding {
        &self.sym
    }

    fn proactive_switch(&self) -> bool {
        self.proactive_switch
    }

    fn encode(&self, info: &EncodingInfo<'_>) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut terms: Vec<String> = Vec::new();

        for (i, (node, table)) in info.used_switches().iter().enumerate() {
            lines.extend(self.encode_switch(i, table, info.find_new_flow_table(*node)));
            terms.push(switch_name(i, false));
        }

        for (j, tables) in info.used_controllers().iter().enumerate() {
            let name = controller_name(j);
            let alternatives: Vec<String> = tables
                .keys()
                .filter_map(|node| info.index(*node))
                .map(|i| self.communication(&name, i, false))
                .collect();
            lines.push(self.definition(&name, &alternatives));
            terms.push(name);
        }

        lines.push(format!("{} {} {}", SDN_NAME, self.sym.def, terms.join(self.sym.par)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sdn::{FlowRule, HostId};

    #[test]
    fn communication() {
        let e = SimpleEncoder::default();
        assert_eq!(e.communication("SW1'", 1, true), "Up1 ? 1 ; SW1'");
        assert_eq!(e.communication("C0", 1, false), "Up1 ! 1 ; C0");

        let e = SimpleEncoder::new(SymbolEncoding::ascii(), true);
        assert!(e.proactive_switch());
        assert_eq!(e.communication("SW1'", 1, true), "Help1 ! 1 ; Up1 ? 1 ; SW1'");
        assert_eq!(e.communication("C0", 1, false), "Help1 ? 1 ; Up1 ! 1 ; C0");
    }

    #[test]
    fn switch_terms() {
        let e = SimpleEncoder::default();
        let mut live = FlowTable::new();
        live.add_entry(HostId(1), FlowRule::new(0, 2, false));

        assert_eq!(
            e.encode_switch(0, &live, None),
            vec!["SW0 := ((dst = 1) . (port = 0) . (port <- 2)) ; SW0"]
        );
        assert_eq!(
            e.encode_switch(2, &live, Some(&FlowTable::new())),
            vec![
                "SW2 := ((dst = 1) . (port = 0) . (port <- 2)) ; SW2 o+ Up2 ? 1 ; SW2'",
                "SW2' := bot",
            ]
        );
        assert_eq!(
            e.encode_switch(1, &FlowTable::new(), Some(&live)),
            vec![
                "SW1 := 0 ; SW1 o+ Up1 ? 1 ; SW1'",
                "SW1' := ((dst = 1) . (port = 0) . (port <- 2)) ; SW1'",
            ]
        );
    }

    #[test]
    fn latex_symbols() {
        let e = SimpleEncoder::new(SymbolEncoding::latex(), false);
        assert_eq!(e.symbols().def, "\\triangleq");
        assert_eq!(e.communication("C0", 3, false), "Up3\\, !\\, 1\\, ;\\, C0");
    }
}
