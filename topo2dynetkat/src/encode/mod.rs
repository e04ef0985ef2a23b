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

//! # Encoding of the network as DyNetKAT terms
//!
//! The [`EncodingInfo`] collects everything an encoder needs from a
//! [`Network`](crate::sdn::Network): the switches which are used (which have a live flow table, or
//! will receive a new one), and the staged flow tables of every controller. An [`Encoder`] then
//! renders this information with a given [`SymbolEncoding`]. The [`SimpleEncoder`] defines one
//! term per switch, while the [`BigSwitchEncoder`] combines all switches into a single term and
//! describes the links separately.

use thiserror::Error;

mod big_switch_encoder;
mod encoding_info;
mod simple_encoder;

pub use big_switch_encoder::BigSwitchEncoder;
pub use encoding_info::EncodingInfo;
pub use simple_encoder::SimpleEncoder;

/// Base name of switch terms
pub const SW_BASE_NAME: &str = "SW";
/// Base name of controller terms
pub const CONTROLLER_BASE_NAME: &str = "C";
/// Name of the term composing the entire network
pub const SDN_NAME: &str = "SDN";
/// Base name of the channels on which controllers send updates
pub const UP_CHANNEL_NAME: &str = "Up";
/// Base name of the channels on which switches ask for updates
pub const HELP_CHANNEL_NAME: &str = "Help";
/// Name of the term containing all links of the network (big-switch encoding)
pub const LINK_TERM_NAME: &str = "L";
/// Base name of the switch variables of the big-switch term
pub const BIG_SWITCH_VAR_NAME: &str = "X";
/// Channel on which the big switch sends packets to the controllers
pub const PACKET_IN_CHANNEL_NAME: &str = "pi";
/// Channel on which the controllers answer packet-in requests
pub const PACKET_OUT_CHANNEL_NAME: &str = "po";

/// Name of the switch term with the given index, with a trailing `'` for the updated switch.
pub(crate) fn switch_name(index: usize, is_new: bool) -> String {
    if is_new {
        format!("{}{}'", SW_BASE_NAME, index)
    } else {
        format!("{}{}", SW_BASE_NAME, index)
    }
}

pub(crate) fn controller_name(index: usize) -> String {
    format!("{}{}", CONTROLLER_BASE_NAME, index)
}

/// Encoding Errors
#[derive(Error, Debug, PartialEq)]
pub enum EncodingError {
    /// Nothing to encode
    #[error("No switches or controllers are used in the network!")]
    NoSwitchesOrControllersUsed,
}

/// Symbols used to render NetKAT and DyNetKAT terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEncoding {
    /// Identity (pass the packet)
    pub one: &'static str,
    /// Drop the packet
    pub zero: &'static str,
    /// Field test
    pub eq: &'static str,
    /// Union
    pub or: &'static str,
    /// Conjunction and sequential composition of NetKAT policies
    pub and: &'static str,
    /// Negation
    pub neg: &'static str,
    /// Kleene star
    pub star: &'static str,
    /// Field assignment
    pub assign: &'static str,
    /// Process doing nothing
    pub bot: &'static str,
    /// Sequential composition of a policy and a process
    pub seq: &'static str,
    /// Receive on a channel
    pub recv: &'static str,
    /// Send on a channel
    pub send: &'static str,
    /// Parallel composition
    pub par: &'static str,
    /// Definition of a term
    pub def: &'static str,
    /// Non-deterministic choice
    pub nondet: &'static str,
}

impl SymbolEncoding {
    /// Plain text symbols
    pub fn ascii() -> Self {
        Self {
            one: "1",
            zero: "0",
            eq: " = ",
            or: " + ",
            and: " . ",
            neg: "~",
            star: "*",
            assign: " <- ",
            bot: "bot",
            seq: " ; ",
            recv: " ? ",
            send: " ! ",
            par: " || ",
            def: ":=",
            nondet: " o+ ",
        }
    }

    /// LaTeX symbols (math mode)
    pub fn latex() -> Self {
        Self {
            one: "1",
            zero: "0",
            eq: "=",
            or: "+",
            and: "\\cdot",
            neg: "\\neg",
            star: "*",
            assign: "\\leftarrow",
            bot: "\\bot",
            seq: "\\, ;\\, ",
            recv: "\\, ?\\, ",
            send: "\\, !\\, ",
            par: "\\, \\|\\, ",
            def: "\\triangleq",
            nondet: "\\, \\oplus\\, ",
        }
    }
}

impl Default for SymbolEncoding {
    fn default() -> Self {
        Self::ascii()
    }
}

/// Trait of a network encoder
pub trait Encoder {
    /// Returns the symbols used by the encoder
    fn symbols(&self) -> &SymbolEncoding;

    /// Returns true if switches ask for their updates on the help channel
    fn proactive_switch(&self) -> bool;

    /// Render the network described by `info`.
    fn encode(&self, info: &EncodingInfo<'_>) -> String;
}
