//! Semantic sequence diagram model.
//!
//! This module contains the diagram model produced by applying parsed
//! statements. It is the hand-off point between the compiler front end and the
//! layout engine.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ lexer
//! Tokens
//!     ↓ parser
//! Statements (with spans)
//!     ↓ apply to model builder
//! Semantic Model (these types)
//!     ↓ layout
//! Sequence Layout (geometry)
//!     ↓ render
//! Graphic-context draw calls
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root aggregate: [`SequenceDiagram`]
//! - [`element`] - Content: [`Participant`], [`SignalElement`], [`InteractionOperand`],
//!   [`CombinedFragment`], [`ActivationElement`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
