//! Template processing engine
//!
//! This module contains the core template processing components:
//! - `line`: scanning of text for delimited expressions
//! - `operation`: operations to be performed on template files
//! - `processor`: the per-file decision between copy, write, skip and conflict
//! - `materializer`: execution of the operations against the output tree

pub mod line;
pub mod materializer;
pub mod operation;
pub mod processor;

pub use materializer::{BuildSummary, Materializer};
pub use operation::TemplateOperation;
pub use processor::TemplateProcessor;
