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

//! # NetKAT Policies
//!
//! A simple NetKAT policy consists of a complete test and a complete assignment. The test is a
//! sequence of `(field, value)` pairs which a packet must match, and the assignment is the sequence
//! of `(field, value)` pairs written into the packet afterwards.

use std::fmt;

/// Name of the destination field of a packet
pub const DST_FIELD: &str = "dst";
/// Name of the port field of a packet
pub const PORT_FIELD: &str = "port";

/// Simple NetKAT policy: a conjunction of tests followed by a sequence of assignments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetKatPolicy {
    tests: Vec<(String, String)>,
    assignments: Vec<(String, String)>,
}

impl NetKatPolicy {
    /// Create an empty policy, without any tests or assignments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test `field = value`. Duplicate tests are kept.
    pub fn add_test(&mut self, field: impl Into<String>, value: impl ToString) {
        self.tests.push((field.into(), value.to_string()));
    }

    /// Append an assignment `field <- value`. Duplicate assignments are kept.
    pub fn add_assignment(&mut self, field: impl Into<String>, value: impl ToString) {
        self.assignments.push((field.into(), value.to_string()));
    }

    /// Returns all tests in insertion order
    pub fn tests(&self) -> &[(String, String)] {
        &self.tests
    }

    /// Returns all assignments in insertion order
    pub fn assignments(&self) -> &[(String, String)] {
        &self.assignments
    }

    /// Render the policy with the given symbols. Every test and every assignment is wrapped in
    /// parentheses, and consecutive terms are separated by `and_sym`. An empty policy renders as
    /// the empty string.
    pub fn to_string_with(&self, and_sym: &str, eq_sym: &str, assign_sym: &str) -> String {
        let tests = self.tests.iter().map(|(f, v)| format!("({}{}{})", f, eq_sym, v));
        let assignments =
            self.assignments.iter().map(|(f, v)| format!("({}{}{})", f, assign_sym, v));
        tests.chain(assignments).collect::<Vec<_>>().join(and_sym)
    }
}

impl fmt::Display for NetKatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(" . ", " = ", " <- "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_policy() {
        let p = NetKatPolicy::new();
        assert!(p.tests().is_empty());
        assert!(p.assignments().is_empty());
        assert_eq!(p.to_string_with("+", "=", "<-"), "");
    }

    #[test]
    fn duplicates_are_kept() {
        let mut p = NetKatPolicy::new();
        p.add_test("fieldTest", "valueTest");
        p.add_test("fieldTest", "valueTest");
        p.add_assignment("fieldAssign", "valueAssign");
        assert_eq!(p.tests().len(), 2);
        assert_eq!(p.assignments().len(), 1);
    }

    #[test]
    fn render() {
        let mut p = NetKatPolicy::new();
        p.add_test("a", 1);
        assert_eq!(p.to_string_with("+", "=", "<-"), "(a=1)");

        let mut p = NetKatPolicy::new();
        p.add_assignment("b", 2);
        assert_eq!(p.to_string_with("+", "=", "<-"), "(b<-2)");

        let mut p = NetKatPolicy::new();
        p.add_test("t1", "v1");
        p.add_test("t2", "v2");
        p.add_assignment("a1", "w1");
        p.add_assignment("a2", "w2");
        assert_eq!(p.to_string_with("+", "=", "<-"), "(t1=v1)+(t2=v2)+(a1<-w1)+(a2<-w2)");
    }

    #[test]
    fn display() {
        let mut p = NetKatPolicy::new();
        p.add_test(DST_FIELD, 3);
        p.add_test(PORT_FIELD, 15);
        p.add_assignment(PORT_FIELD, 16);
        assert_eq!(p.to_string(), "(dst = 3) . (port = 15) . (port <- 16)");
    }
}
