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

#![deny(missing_docs)]

//! # Dvsim: Simulating Distance-Vector Route Convergence
//!
//! This is a library for simulating the Distance Vector routing algorithm (the Bellman-Ford
//! relaxation used by RIP-style protocols) over a static, symmetric topology. The simulation is
//! synchronous and centralized: in every round, each router recomputes its table from the frozen
//! snapshot of all tables of the previous round, until a full round produces no change. After
//! the initial convergence, a batch of link updates can be applied, after which all tables are
//! re-initialized from the changed topology and the simulation converges a second time, with the
//! round counter continuing where the first phase left off.
//!
//! ## Structure
//!
//! - **[`Topology`](topology::Topology)**: the symmetric cost graph, owned by the simulation
//!   driver and mutated only between convergence phases.
//! - **[`Simulation`](engine::Simulation)**: the convergence engine, driving the synchronous
//!   round loop and the update application.
//! - **[`Router`](router::Router)**: one simulated router with its table, exposing the distance
//!   view ([`Router::distance_to`](router::Router::distance_to)) and the routing view
//!   ([`Router::next_hop`](router::Router::next_hop)).
//! - **[`loader`]**: parses the line-oriented scenario text into a topology and a batch of
//!   pending updates.
//! - **[`printer`]**: renders distance and routing tables in the fixed text layout.
//!
//! ## Example usage
//!
//! The following example runs a three-router scenario. `A` initially reaches `C` through `B`
//! with cost 2; after the update installs a direct link of cost 1, it reaches `C` directly.
//!
//! ```rust
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let scenario = "\
//! A
//! B
//! C
//! START
//! A B 1
//! B C 1
//! UPDATE
//! A C 1
//! END
//! ";
//!     let mut output = Vec::new();
//!     dvsim::run(scenario.as_bytes(), &mut output)?;
//!     let text = String::from_utf8(output)?;
//!     assert!(text.contains("Distance Table of router A at t=0:"));
//!     assert!(text.contains("Routing Table of router A:"));
//!     assert!(text.contains("C,C,1"));
//!     Ok(())
//! }
//! ```
//!
//! Scenarios can also be built programmatically:
//!
//! ```rust
//! use dvsim::{Simulation, Topology};
//!
//! let mut topology = Topology::new();
//! let a = topology.add_router("A");
//! let b = topology.add_router("B");
//! let c = topology.add_router("C");
//! topology.set_link(a, b, 1);
//! topology.set_link(b, c, 1);
//!
//! let mut sim = Simulation::new(topology);
//! while sim.run_round() {}
//!
//! assert_eq!(sim.router(a).unwrap().distance_to(c), Some(2));
//! assert_eq!(sim.router(a).unwrap().next_hop(c), Some(b));
//! ```

mod error;
pub mod engine;
pub mod loader;
pub mod printer;
pub mod router;
pub mod topology;
pub mod types;

// test modules
mod test;

pub use engine::Simulation;
pub use error::Error;
pub use topology::Topology;
pub use types::{LinkUpdate, LinkWeight, RouteTable, RouterId};

use log::*;
use std::io::{BufRead, Write};

/// Run a complete simulation: parse the scenario from `input`, converge on the initial topology
/// while writing the distance tables of every round to `output`, apply the queued updates (if
/// any), re-converge, and finally write the routing tables.
///
/// A scenario without routers or without initial links is nothing to simulate: the function
/// returns without producing any output.
pub fn run<R, W>(input: R, output: &mut W) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
{
    let (topology, updates) = loader::parse_scenario(input)?;
    if topology.router_count() == 0 || topology.link_count() == 0 {
        debug!("Empty scenario, nothing to simulate");
        return Ok(());
    }

    let mut sim = Simulation::new(topology);
    printer::write_distance_tables(output, &sim)?;
    let rounds = sim.converge(|s| printer::write_distance_tables(output, s))?;
    debug!("Initial topology converged after {} round(s)", rounds);

    if !updates.is_empty() {
        sim.apply_updates(&updates)?;
        printer::write_distance_tables(output, &sim)?;
        let rounds = sim.converge(|s| printer::write_distance_tables(output, s))?;
        debug!("Updated topology converged after {} round(s)", rounds);
    }

    printer::write_routing_tables(output, &sim)?;
    Ok(())
}
