//! Core operations over the Notion seam.
//!
//! Three concerns, one module each: [`reader`] flattens a page's block tree
//! into text, [`resolver`] turns a title query into a selected page, and
//! [`writer`] converts text into paragraph blocks and pushes them upstream.
//! Handlers compose these; none of them touch HTTP types.

pub mod reader;
pub mod resolver;
pub mod writer;
