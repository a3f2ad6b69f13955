//! Sequin Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! Sequin sequence-diagram pipeline. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric value types ([`geometry`] module)
//! - **Draw**: The graphic-context capability consumed by the renderer ([`draw`] module)
//! - **Semantic**: The sequence diagram model built by the parser ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
