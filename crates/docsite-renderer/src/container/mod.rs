//! Line-oriented container preprocessing.
//!
//! Container syntax is resolved before the Markdown parser runs: a
//! [`processor::ContainerProcessor`] walks the source line by line, replaces
//! block fences (`:::name` ... `:::`) and inline spans (`::name payload::`)
//! with the HTML their registered handlers produce, and passes everything
//! else through untouched. Code fences are respected, so container syntax
//! inside a code block stays literal.

mod fence;
mod parser;
pub(crate) mod processor;
