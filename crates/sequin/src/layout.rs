//! Layout engine for sequence diagrams.
//!
//! This module turns a [`SequenceDiagram`](sequin_core::semantic::SequenceDiagram)
//! into positioned geometry, independent of how it will be drawn. Text is
//! sized through a [`MeasureText`](sequin_core::draw::MeasureText)
//! capability, so the same layout code serves every backend.
//!
//! # Pipeline Position
//!
//! ```text
//! Semantic Model (SequenceDiagram)
//!     ↓ layout (this module)
//! SequenceLayout
//!     ↓ render
//! Draw calls on a GraphicContext
//! ```
//!
//! # Submodules
//!
//! - [`sequence`] - Participants, signals, fragments and activation bars

pub mod sequence;

pub use sequence::{
    ActivationBox, FragmentLayout, OperandLayout, ParticipantLayout, SequenceLayout, SignalLayout,
    TextBox,
};
