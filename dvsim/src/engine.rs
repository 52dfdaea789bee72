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

//! # Convergence Engine
//!
//! Module containing the simulation driver: the synchronous round loop which recomputes every
//! router's table from the previous round until a full round produces no change, and the update
//! application between the two convergence phases.

use crate::printer;
use crate::router::Router;
use crate::topology::Topology;
use crate::types::{LinkUpdate, RouteTable, RouterId};
use crate::Error;
use log::*;
use std::collections::HashMap;

/// # Distance-Vector Simulation
///
/// Owns the [`Topology`] and all [`Router`]s, and drives the synchronous Bellman-Ford iteration.
/// Every round recomputes the table of every router from an immutable snapshot of all tables of
/// the previous round, never from partially updated state within the same round. The round
/// counter keeps increasing across the pre-update and the post-update convergence phase.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// The cost graph. Read during rounds, mutated only by [`Simulation::apply_updates`].
    topology: Topology,
    /// All simulated routers with their current tables
    routers: HashMap<RouterId, Router>,
    /// Round counter, for reporting only
    step: usize,
}

impl Simulation {
    /// Create a simulation over the given topology, with all tables in their round-0 state.
    pub fn new(topology: Topology) -> Self {
        let routers = topology
            .routers()
            .into_iter()
            .map(|router_id| (router_id, Router::new(router_id)))
            .collect();
        let mut sim = Self { topology, routers, step: 0 };
        sim.initialize_tables();
        sim
    }

    /// Return the topology the simulation runs on
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The current round counter
    pub fn step(&self) -> usize {
        self.step
    }

    /// All router ids, sorted by router name
    pub fn routers(&self) -> Vec<RouterId> {
        self.topology.routers()
    }

    /// Get a single router by its ID
    pub fn router(&self, router_id: RouterId) -> Option<&Router> {
        self.routers.get(&router_id)
    }

    /// Reset all tables to the state derived directly from the one-hop topology.
    fn initialize_tables(&mut self) {
        let topology = &self.topology;
        for router in self.routers.values_mut() {
            router.initialize_table(topology);
        }
    }

    /// Perform one synchronous round: recompute the table of every router from the snapshot of
    /// all tables at the start of the round, then install the results and increment the round
    /// counter. Returns true if any entry of any router changed, where a changed next hop counts
    /// even when the cost stayed the same.
    pub fn run_round(&mut self) -> bool {
        let snapshot: HashMap<RouterId, RouteTable> =
            self.routers.iter().map(|(id, r)| (*id, r.table().clone())).collect();
        let topology = &self.topology;
        let mut changed = 0;
        for router in self.routers.values_mut() {
            let table = router.compute_table(topology, &snapshot);
            if router.install_table(table) {
                changed += 1;
            }
        }
        self.step += 1;
        debug!("Round {}: {} router(s) changed their table", self.step, changed);
        changed > 0
    }

    /// Run rounds until one full round produces no change. Every recomputed round is reported to
    /// the callback, including the final round which detects convergence. Returns the number of
    /// rounds executed.
    pub fn converge<F, E>(&mut self, mut on_round: F) -> Result<usize, E>
    where
        F: FnMut(&Self) -> Result<(), E>,
    {
        let mut rounds = 0;
        loop {
            let changed = self.run_round();
            rounds += 1;
            on_round(self)?;
            if !changed {
                debug!("Converged after {} round(s)", rounds);
                return Ok(rounds);
            }
        }
    }

    /// Apply a whole batch of update records to the topology, then re-initialize every table
    /// from the changed topology, discarding the converged state. The round counter advances by
    /// one so that the reset state occupies its own reported round; it is not reset to zero.
    pub fn apply_updates(&mut self, updates: &[LinkUpdate]) -> Result<(), Error> {
        for update in updates {
            // formatting resolves both router names, rejecting foreign ids before any mutation
            let formatted = printer::link_update(&self.topology, update)?;
            debug!("Applying update: {}", formatted);
            self.topology.apply_update(update);
        }
        self.initialize_tables();
        self.step += 1;
        Ok(())
    }
}
