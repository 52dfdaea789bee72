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

//! Module defining a single simulated router, its table initialization and the per-round
//! distance-vector recomputation.

use crate::topology::Topology;
use crate::types::{LinkWeight, RouteTable, RouterId};
use std::collections::HashMap;

/// # Distance-Vector Router
///
/// A router holds one [`RouteTable`], mapping every other router to the selected next hop and
/// total cost, or to `None` if no path is known. The table never contains an entry for the
/// router itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Router {
    /// ID of the router
    router_id: RouterId,
    /// Table mapping every other router to the selected route
    table: RouteTable,
}

impl Router {
    pub(crate) fn new(router_id: RouterId) -> Router {
        Router { router_id, table: RouteTable::new() }
    }

    /// Return the ID of the router
    pub fn router_id(&self) -> RouterId {
        self.router_id
    }

    /// Return the full table of the router
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The selected route towards the destination as a pair `(next_hop, cost)`, or `None` if the
    /// destination is unreachable (or the router itself).
    pub fn route_to(&self, dest: RouterId) -> Option<(RouterId, LinkWeight)> {
        self.table.get(&dest).copied().flatten()
    }

    /// Distance-table view: the cost towards the destination, `None` meaning unreachable.
    pub fn distance_to(&self, dest: RouterId) -> Option<LinkWeight> {
        self.route_to(dest).map(|(_, cost)| cost)
    }

    /// Routing-table view: the next hop towards the destination, `None` meaning no known path.
    pub fn next_hop(&self, dest: RouterId) -> Option<RouterId> {
        self.route_to(dest).map(|(next_hop, _)| next_hop)
    }

    /// Derive the table directly from the one-hop topology: the direct link cost where a link
    /// exists (with the destination itself as next hop), `None` everywhere else. This is the
    /// round-0 state, and also the reset state after a batch of updates was applied. Every other
    /// router ends up with an entry, so a neighbor queried for any destination always has a
    /// known (possibly unreachable) answer.
    pub(crate) fn initialize_table(&mut self, topology: &Topology) {
        self.table.clear();
        for dest in topology.routers() {
            if dest == self.router_id {
                continue;
            }
            self.table
                .insert(dest, topology.link_weight(self.router_id, dest).map(|w| (dest, w)));
        }
    }

    /// Compute the next-round table of this router from the frozen snapshot of all tables of the
    /// previous round. The candidates for each destination are scanned in a fixed order: the
    /// direct link first, then every neighbor sorted by name, adding the link cost to the
    /// neighbor's previous-round distance. Comparison is strictly-less-than, so the first
    /// candidate reaching the minimum keeps the tie.
    pub(crate) fn compute_table(
        &self,
        topology: &Topology,
        previous: &HashMap<RouterId, RouteTable>,
    ) -> RouteTable {
        let neighbors = topology.neighbors(self.router_id);
        let mut table = RouteTable::new();
        for dest in topology.routers() {
            if dest == self.router_id {
                continue;
            }
            let mut best: Option<(RouterId, LinkWeight)> =
                topology.link_weight(self.router_id, dest).map(|w| (dest, w));
            for &(neighbor, link_cost) in neighbors.iter() {
                let via = match previous.get(&neighbor).and_then(|t| t.get(&dest)) {
                    Some(Some((_, cost))) => link_cost.saturating_add(*cost),
                    // the neighbor has no entry for the destination (its own entry), or knows
                    // no route at all. Neither yields a usable candidate.
                    _ => continue,
                };
                if best.map_or(true, |(_, cost)| via < cost) {
                    best = Some((neighbor, via));
                }
            }
            table.insert(dest, best);
        }
        table
    }

    /// Replace the table with a newly computed one. Returns true if any entry changed, where a
    /// change in the next hop counts even when the cost stays the same.
    pub(crate) fn install_table(&mut self, table: RouteTable) -> bool {
        if self.table == table {
            false
        } else {
            self.table = table;
            true
        }
    }
}
