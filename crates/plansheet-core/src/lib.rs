//! Plan Sheet Core Types and Definitions
//!
//! This crate provides the foundational types shared by the plan sheet
//! layout crates. It includes:
//!
//! - **Geometry**: Points and bounding boxes tagged with their coordinate
//!   space ([`geometry`] module)
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Units**: Metre, centimetre and degree conversions ([`units`] module)
//! - **Model**: The sheet snapshot of diagrams, lines and labels ([`model`] module)

pub mod geometry;
pub mod identifier;
pub mod model;
pub mod units;
