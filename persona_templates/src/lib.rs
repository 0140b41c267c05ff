//! # Persona Templates
//!
//! The template library - a fixed catalog of behavior templates that a
//! lorebook is generated from. Each template is addressable by a stable id
//! and by a user-facing tag, and carries an emotion -> response table that is
//! only rendered once a live emotion signal is known.
//!
//! This crate holds data and lookup rules only; selection and ranking live
//! in `lorebook_core`.

pub mod catalog;
pub mod error;
pub mod template;

pub use catalog::*;
pub use error::*;
pub use template::*;
