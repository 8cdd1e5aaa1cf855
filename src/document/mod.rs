// src/document/mod.rs
// =============================================================================
// This module builds the output document.
//
// Submodules:
// - assemble: DocumentAssembler, collects entries and renders the XML
// - escape: XML escaping for paths and file contents
//
// Output shape:
//   <documents>
//   <document index="1">
//   <source>src/main.rs</source>
//   <document_content>...escaped file text...</document_content>
//   </document>
//   </documents>
// =============================================================================

mod assemble;
mod escape;

pub use assemble::{DocumentAssembler, DocumentEntry, DocumentOutput};
pub use escape::{escape_xml, forbidden_chars, REPLACEMENT_CHAR};
