//! Biblio Application Library
//!
//! This library provides the catalog resource modules served by biblio.

pub mod modules;
