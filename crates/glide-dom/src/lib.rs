//! Glide DOM
//!
//! Arena-backed document tree used by the soft-navigation engine.
//! Nodes live in a `Vec` owned by [`Document`] and are addressed by
//! [`NodeId`]; detached nodes keep their slot for the document's lifetime.

mod document;
mod node;
pub mod serialize;

pub use document::Document;
pub use node::{ElementData, Node, NodeData, NodeId};
