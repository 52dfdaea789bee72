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

//! # Helper (printer) functions for the simulation
//! Module containing helper functions to get formatted strings and write the distance and
//! routing tables of the simulation. The formatter is a consumer of the tables the engine
//! computes; it carries no algorithmic meaning.

use crate::engine::Simulation;
use crate::topology::Topology;
use crate::types::{LinkUpdate, RouterId};
use crate::Error;
use itertools::Itertools;
use std::io::Write;

/// Get a vector of strings which represent the distance table of one router at the current
/// round. The first line is the header, the second line lists all other routers as columns, and
/// every following line is one destination row. Each row is keyed to a single destination, so
/// only the cell where row and column name the same destination carries the real value; every
/// other cell is rendered as `INF`, as are unreachable destinations.
pub fn distance_table(sim: &Simulation, router: RouterId) -> Result<Vec<String>, Error> {
    let topology = sim.topology();
    let table = sim.router(router).ok_or(Error::UnknownRouter(router))?;
    let destinations: Vec<RouterId> =
        topology.routers().into_iter().filter(|d| *d != router).collect();
    let mut names: Vec<&str> = Vec::with_capacity(destinations.len());
    for dest in destinations.iter() {
        names.push(topology.router_name(*dest)?);
    }

    let mut result: Vec<String> = Vec::with_capacity(destinations.len() + 2);
    result.push(format!(
        "Distance Table of router {} at t={}:",
        topology.router_name(router)?,
        sim.step()
    ));
    result.push(format!("     {}", names.iter().join("    ")));
    for (row, row_name) in destinations.iter().zip(names.iter()) {
        let cells = destinations
            .iter()
            .map(|col| {
                if col == row {
                    match table.distance_to(*row) {
                        Some(cost) => cost.to_string(),
                        None => String::from("INF"),
                    }
                } else {
                    String::from("INF")
                }
            })
            .join("    ");
        result.push(format!("{}    {}", row_name, cells));
    }
    Ok(result)
}

/// Get a vector of strings which represent the routing table of one router. The first line is
/// the header, followed by one `DEST,NEXT_HOP,COST` line per reachable destination in name
/// order. Unreachable destinations are omitted entirely.
pub fn routing_table(sim: &Simulation, router: RouterId) -> Result<Vec<String>, Error> {
    let topology = sim.topology();
    let table = sim.router(router).ok_or(Error::UnknownRouter(router))?;
    let mut result: Vec<String> =
        vec![format!("Routing Table of router {}:", topology.router_name(router)?)];
    for dest in topology.routers() {
        if dest == router {
            continue;
        }
        if let Some((next_hop, cost)) = table.route_to(dest) {
            result.push(format!(
                "{},{},{}",
                topology.router_name(dest)?,
                topology.router_name(next_hop)?,
                cost
            ));
        }
    }
    Ok(result)
}

/// Write the distance tables of every router in name order, each preceded by a blank line.
pub fn write_distance_tables<W: Write>(out: &mut W, sim: &Simulation) -> Result<(), Error> {
    for router in sim.routers() {
        writeln!(out)?;
        for line in distance_table(sim, router)? {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Write the routing tables of every router in name order, each preceded by a blank line.
pub fn write_routing_tables<W: Write>(out: &mut W, sim: &Simulation) -> Result<(), Error> {
    for router in sim.routers() {
        writeln!(out)?;
        for line in routing_table(sim, router)? {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Returns a formatted string for a given update record, where the router names are inserted.
pub fn link_update(topology: &Topology, update: &LinkUpdate) -> Result<String, Error> {
    Ok(match update {
        LinkUpdate::Set { source, target, weight } => format!(
            "SET {} -- {}: {}",
            topology.router_name(*source)?,
            topology.router_name(*target)?,
            weight
        ),
        LinkUpdate::Remove { source, target } => format!(
            "REMOVE {} -- {}",
            topology.router_name(*source)?,
            topology.router_name(*target)?
        ),
    })
}
