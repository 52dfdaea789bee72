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

//! Module containing the topology store, the symmetric cost graph shared by the loader and the
//! convergence engine.

use crate::types::{LinkUpdate, LinkWeight, RouterId, TopologyGraph};
use crate::Error;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// # Topology Store
///
/// Holds the undirected cost graph over all routers. A single undirected edge represents the
/// symmetric link, so the cost is identical in both directions by construction. Absence of an
/// edge means "no direct link". Self-loops are never represented.
///
/// The topology is owned by the simulation driver. The convergence engine only reads it, and it
/// is mutated only between convergence phases, never during a round.
///
/// All iteration orders exposed by this structure (routers, neighbors) are sorted by router name,
/// so that tie-breaking in the convergence engine is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// The cost graph. Node weights are the router names.
    graph: TopologyGraph,
    /// Lookup from router name to its id
    ids: HashMap<String, RouterId>,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self { graph: TopologyGraph::default(), ids: HashMap::new() }
    }

    /// Add a new router to the topology. This function returns the ID of the router, which can be
    /// used to reference it while building links and updates. Names are expected to be unique;
    /// the loader rejects duplicates before they reach this point.
    pub fn add_router<S: Into<String>>(&mut self, name: S) -> RouterId {
        let name = name.into();
        let router_id = self.graph.add_node(name.clone());
        self.ids.insert(name, router_id);
        router_id
    }

    /// Get the ID of a router by its name.
    pub fn router(&self, name: &str) -> Option<RouterId> {
        self.ids.get(name).copied()
    }

    /// Get the name of a router by its ID.
    pub fn router_name(&self, router_id: RouterId) -> Result<&str, Error> {
        self.graph
            .node_weight(router_id)
            .map(|name| name.as_str())
            .ok_or(Error::UnknownRouter(router_id))
    }

    /// All routers of the topology, sorted by name.
    pub fn routers(&self) -> Vec<RouterId> {
        let mut routers: Vec<RouterId> = self.graph.node_indices().collect();
        routers.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        routers
    }

    /// Number of routers in the topology
    pub fn router_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links in the topology
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Install the symmetric link between the two routers, or replace its cost if the link
    /// already exists.
    pub fn set_link(&mut self, a: RouterId, b: RouterId, weight: LinkWeight) {
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] = weight,
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
    }

    /// Remove the link between the two routers. Removing a link which does not exist is a silent
    /// no-op, not an error.
    pub fn remove_link(&mut self, a: RouterId, b: RouterId) {
        if let Some(edge) = self.graph.find_edge(a, b) {
            self.graph.remove_edge(edge);
        }
    }

    /// Cost of the direct link between the two routers, or `None` if they are not connected.
    pub fn link_weight(&self, a: RouterId, b: RouterId) -> Option<LinkWeight> {
        self.graph.find_edge(a, b).and_then(|edge| self.graph.edge_weight(edge)).copied()
    }

    /// All direct neighbors of a router with the cost of the connecting link, sorted by neighbor
    /// name.
    pub fn neighbors(&self, router_id: RouterId) -> Vec<(RouterId, LinkWeight)> {
        let mut neighbors: Vec<(RouterId, LinkWeight)> = self
            .graph
            .edges(router_id)
            .map(|edge| {
                let other =
                    if edge.source() == router_id { edge.target() } else { edge.source() };
                (other, *edge.weight())
            })
            .collect();
        neighbors.sort_by(|a, b| self.graph[a.0].cmp(&self.graph[b.0]));
        neighbors
    }

    /// Apply a single update record to the topology.
    pub fn apply_update(&mut self, update: &LinkUpdate) {
        match update {
            LinkUpdate::Set { source, target, weight } => {
                self.set_link(*source, *target, *weight)
            }
            LinkUpdate::Remove { source, target } => self.remove_link(*source, *target),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symmetric_links() {
        let mut topology = Topology::new();
        let a = topology.add_router("A");
        let b = topology.add_router("B");
        topology.set_link(a, b, 5);
        assert_eq!(topology.link_weight(a, b), Some(5));
        assert_eq!(topology.link_weight(b, a), Some(5));
        // replacing the cost must not create a second edge
        topology.set_link(b, a, 3);
        assert_eq!(topology.link_count(), 1);
        assert_eq!(topology.link_weight(a, b), Some(3));
    }

    #[test]
    fn test_remove_link_is_noop_when_absent() {
        let mut topology = Topology::new();
        let a = topology.add_router("A");
        let b = topology.add_router("B");
        let c = topology.add_router("C");
        topology.set_link(a, b, 1);
        topology.remove_link(a, c);
        assert_eq!(topology.link_count(), 1);
        topology.remove_link(b, a);
        assert_eq!(topology.link_count(), 0);
    }

    #[test]
    fn test_sorted_iteration_order() {
        let mut topology = Topology::new();
        let c = topology.add_router("C");
        let a = topology.add_router("A");
        let b = topology.add_router("B");
        topology.set_link(b, c, 2);
        topology.set_link(b, a, 1);
        assert_eq!(topology.routers(), vec![a, b, c]);
        assert_eq!(topology.neighbors(b), vec![(a, 1), (c, 2)]);
        assert_eq!(topology.neighbors(a), vec![(b, 1)]);
    }

    #[test]
    fn test_router_lookup() {
        let mut topology = Topology::new();
        let a = topology.add_router("A");
        assert_eq!(topology.router("A"), Some(a));
        assert_eq!(topology.router("B"), None);
        assert_eq!(topology.router_name(a).unwrap(), "A");
        assert!(topology.router_name(17.into()).is_err());
    }
}
