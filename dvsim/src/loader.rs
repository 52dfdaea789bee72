// Dvsim: Simulating Distance-Vector Route Convergence
// Copyright (C) 2021  Tibor Schneider
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

//! Parses the line-oriented scenario format into a topology and a batch of pending updates.
//!
//! The input has three sections. Router names come first, one per line, terminated by a line
//! containing exactly `START`. Initial links follow as `SRC DEST COST` lines, terminated by
//! `UPDATE`; a cost of `-1` means "no link" and the line is skipped. Update records follow in
//! the same three-token format, terminated by `END`; there a cost of `-1` removes the link.
//! Blank lines are skipped in every section, and anything after `END` is ignored.

use crate::topology::Topology;
use crate::types::{LinkUpdate, LinkWeight, RouterId};
use log::*;
use std::io::BufRead;
use thiserror::Error;

/// Parses the scenario and returns the resulting topology together with the queued update
/// records, both with all router names resolved. Malformed input fails fast with a
/// [`ParseError`] identifying the offending line, so the simulation core never sees it.
pub fn parse_scenario<R: BufRead>(reader: R) -> Result<(Topology, Vec<LinkUpdate>), ParseError> {
    let mut topology = Topology::new();
    let mut updates: Vec<LinkUpdate> = Vec::new();

    let mut current_state = CurrentState::Routers;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        current_state = match current_state {
            CurrentState::Routers => {
                if line == "START" {
                    CurrentState::Links
                } else {
                    if topology.router(line).is_some() {
                        return Err(ParseError::DuplicateRouter {
                            line: i + 1,
                            name: String::from(line),
                        });
                    }
                    topology.add_router(line);
                    CurrentState::Routers
                }
            }
            CurrentState::Links => {
                if line == "UPDATE" {
                    CurrentState::Updates
                } else {
                    let (source, target, cost) = link_line(&topology, line, i + 1)?;
                    // -1 in the initial topology means "no link", it is skipped, not stored
                    if cost != -1 {
                        topology.set_link(source, target, cost as LinkWeight);
                    }
                    CurrentState::Links
                }
            }
            CurrentState::Updates => {
                if line == "END" {
                    CurrentState::Done
                } else {
                    let (source, target, cost) = link_line(&topology, line, i + 1)?;
                    updates.push(match cost {
                        -1 => LinkUpdate::Remove { source, target },
                        cost => LinkUpdate::Set {
                            source,
                            target,
                            weight: cost as LinkWeight,
                        },
                    });
                    CurrentState::Updates
                }
            }
            CurrentState::Done => CurrentState::Done,
        };
        if let CurrentState::Done = current_state {
            break;
        }
    }

    match current_state {
        CurrentState::Routers => Err(ParseError::MissingSentinel("START")),
        CurrentState::Links => Err(ParseError::MissingSentinel("UPDATE")),
        CurrentState::Updates => Err(ParseError::MissingSentinel("END")),
        CurrentState::Done => {
            debug!(
                "Parsed {} router(s), {} initial link(s) and {} pending update(s)",
                topology.router_count(),
                topology.link_count(),
                updates.len()
            );
            Ok((topology, updates))
        }
    }
}

/// Split a `SRC DEST COST` line, resolving both router names. The cost is returned raw, since
/// `-1` has a section-dependent meaning.
fn link_line(
    topology: &Topology,
    line: &str,
    line_number: usize,
) -> Result<(RouterId, RouterId, i64), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ParseError::MalformedLink {
            line: line_number,
            content: String::from(line),
        });
    }
    let source = lookup(topology, tokens[0], line_number)?;
    let target = lookup(topology, tokens[1], line_number)?;
    if source == target {
        return Err(ParseError::SelfLoop { line: line_number });
    }
    let cost: i64 = tokens[2].parse()?;
    if cost < -1 {
        return Err(ParseError::InvalidCost { line: line_number, cost });
    }
    Ok((source, target, cost))
}

fn lookup(topology: &Topology, name: &str, line_number: usize) -> Result<RouterId, ParseError> {
    topology
        .router(name)
        .ok_or_else(|| ParseError::UnknownRouter { line: line_number, name: String::from(name) })
}

enum CurrentState {
    Routers,
    Links,
    Updates,
    Done,
}

/// Scenario parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Cannot parse an integer
    #[error("Cannot parse an integer! {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    /// A link or update line does not consist of the three tokens `SRC DEST COST`
    #[error("Malformed link on line {line}: {content}")]
    MalformedLink {
        /// 1-based line number of the offending line
        line: usize,
        /// The offending line
        content: String,
    },
    /// The same router name was declared twice
    #[error("Router declared twice on line {line}: {name}")]
    DuplicateRouter {
        /// 1-based line number of the offending line
        line: usize,
        /// The duplicated name
        name: String,
    },
    /// A link or update line references a router which was never declared
    #[error("Unknown router on line {line}: {name}")]
    UnknownRouter {
        /// 1-based line number of the offending line
        line: usize,
        /// The unknown name
        name: String,
    },
    /// A link connecting a router to itself
    #[error("Link from a router to itself on line {line}")]
    SelfLoop {
        /// 1-based line number of the offending line
        line: usize,
    },
    /// A negative cost other than the `-1` removal marker
    #[error("Invalid cost {cost} on line {line}")]
    InvalidCost {
        /// 1-based line number of the offending line
        line: usize,
        /// The rejected cost value
        cost: i64,
    },
    /// The input ended before the expected sentinel line
    #[error("Input ended before the {0} line")]
    MissingSentinel(&'static str),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_scenario() {
        let input = "A\nB\nC\n\nSTART\nA B 2\nB C 3\nA C -1\nUPDATE\nA C 1\nB C -1\nEND\nignored\n";
        let (topology, updates) = parse_scenario(input.as_bytes()).unwrap();
        let a = topology.router("A").unwrap();
        let b = topology.router("B").unwrap();
        let c = topology.router("C").unwrap();
        assert_eq!(topology.router_count(), 3);
        // the -1 line must be skipped, not stored
        assert_eq!(topology.link_count(), 2);
        assert_eq!(topology.link_weight(a, b), Some(2));
        assert_eq!(topology.link_weight(b, c), Some(3));
        assert_eq!(topology.link_weight(a, c), None);
        assert_eq!(
            updates,
            vec![
                LinkUpdate::Set { source: a, target: c, weight: 1 },
                LinkUpdate::Remove { source: b, target: c },
            ]
        );
    }

    #[test]
    fn test_empty_sections() {
        let (topology, updates) = parse_scenario("START\nUPDATE\nEND\n".as_bytes()).unwrap();
        assert_eq!(topology.router_count(), 0);
        assert_eq!(topology.link_count(), 0);
        assert!(updates.is_empty());
    }

    #[test]
    fn test_missing_sentinels() {
        assert!(matches!(
            parse_scenario("A\nB\n".as_bytes()),
            Err(ParseError::MissingSentinel("START"))
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA B 1\n".as_bytes()),
            Err(ParseError::MissingSentinel("UPDATE"))
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA B 1\nUPDATE\n".as_bytes()),
            Err(ParseError::MissingSentinel("END"))
        ));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA B\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::MalformedLink { line: 4, .. })
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA B x\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::ParseIntError(_))
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA B -2\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::InvalidCost { line: 4, cost: -2 })
        ));
    }

    #[test]
    fn test_name_errors() {
        assert!(matches!(
            parse_scenario("A\nB\nA\nSTART\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::DuplicateRouter { line: 3, .. })
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA D 1\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::UnknownRouter { line: 4, .. })
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nUPDATE\nD B -1\nEND\n".as_bytes()),
            Err(ParseError::UnknownRouter { line: 5, .. })
        ));
        assert!(matches!(
            parse_scenario("A\nB\nSTART\nA A 1\nUPDATE\nEND\n".as_bytes()),
            Err(ParseError::SelfLoop { line: 4 })
        ));
    }
}
