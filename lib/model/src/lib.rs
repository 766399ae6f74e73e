//! Data model of harvested training resources.
//!
//! A [`TrainingResource`] is the canonical record produced from one or more RDF descriptions of the
//! same course. Nested entities ([`Person`], [`Organization`], [`Place`]) are always inlined into
//! the owning record and never indexed on their own.

mod entity;
mod literal;
mod report;
mod resource;
mod table;
pub mod vocab;

pub use entity::*;
pub use literal::*;
pub use report::*;
pub use resource::*;
pub use table::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, IriParseError, Literal, LiteralRef, NamedNode,
    NamedNodeRef, Quad, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
pub use time::OffsetDateTime;
