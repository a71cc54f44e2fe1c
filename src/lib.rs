// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Digital asset dashboard core.
//!
//! Assets are seeded from a [`provider`], held in an in-session
//! [`logic::AssetCollection`], and viewed through a [`logic::Query`] with a
//! [`logic::SelectionSet`] layered on top. [`mvu`] ties these into a session
//! model driven by messages; [`app`] is the command-line front end.

pub mod app;
pub mod config;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod provider;
pub mod utils;
pub mod worker;
