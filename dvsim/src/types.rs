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

//! Module containing all type definitions

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::collections::HashMap;

type IndexType = u32;
/// Router Identification (and index into the graph)
pub type RouterId = NodeIndex<IndexType>;
/// Link cost in the topology graph. Costs are non-negative integers.
pub type LinkWeight = u64;
/// Topology graph. Node weights are the router names, edge weights are the symmetric link costs.
pub type TopologyGraph = StableGraph<String, LinkWeight, Undirected, IndexType>;

/// Per-router table, mapping every other router to the selected route, or to `None` if the
/// destination is unreachable. A route is the pair `(next_hop, cost)`. Keeping both in a single
/// entry guarantees that a next hop exists exactly when the distance is finite, and that
/// "unreachable" is a tagged state rather than a numeric sentinel.
pub type RouteTable = HashMap<RouterId, Option<(RouterId, LinkWeight)>>;

/// A single topology change, applied in a batch after the initial convergence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkUpdate {
    /// Install the link between the two routers, or replace its cost if it already exists.
    Set {
        /// One endpoint of the link
        source: RouterId,
        /// The other endpoint of the link
        target: RouterId,
        /// New cost of the link, in both directions
        weight: LinkWeight,
    },
    /// Tear the link between the two routers down. Removing a link which does not exist is a
    /// silent no-op.
    Remove {
        /// One endpoint of the link
        source: RouterId,
        /// The other endpoint of the link
        target: RouterId,
    },
}
