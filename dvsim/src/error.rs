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

//! Module containing all error types

use crate::loader::ParseError;
use crate::types::RouterId;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error while parsing the scenario input
    #[error("Parse Error: {0}")]
    ParseError(#[from] ParseError),
    /// Router was not found in the topology
    #[error("Router was not found in topology: {0:?}")]
    UnknownRouter(RouterId),
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}
