//! ndc scaffolds cloud-deployable .NET service projects.
//! It renders a bundled template tree against a project configuration,
//! substituting names, ports, sizing and feature toggles into file names and
//! file bodies.

/// The fixed catalog of template roots and their defaults
pub mod catalog;

/// Command-line interface module for the ndc application
pub mod cli;

/// Project options, validation and the immutable project configuration
pub mod config;

/// Common constants used throughout the application
pub mod constants;

/// Rendering context construction
pub mod context;

/// Lowering of the double-brace action dialect to MiniJinja
pub mod dialect;

/// Error types and handling for the ndc application
pub mod error;

/// Validation, context building and materialization in one call
pub mod generator;

/// Logger setup
pub mod logger;

/// Template tree walking and name rendering
pub mod processor;

/// Template body rendering
pub mod renderer;

/// Template asset stores (bundled and on-disk)
pub mod store;
