//! Core entry point for the deploy-report crate.
//!
//! The crate assembles a fixed deployment report (cover page, executive
//! summary, requirements, implementation notes, verification screenshots,
//! conclusion) as a sequence of [`model::Flowable`] values and renders the
//! sequence to a single PDF file through [`genpdf`].

pub mod builder;
pub mod config;
pub mod content;
pub mod elements;
pub mod fonts;
pub mod metadata;
pub mod model;
pub mod render;
pub mod report;
pub mod screenshots;
pub mod styles;
