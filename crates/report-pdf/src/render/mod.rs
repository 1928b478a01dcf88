//! Document assembly
//!
//! Turns shaped pages into printpdf ops and the final document bytes. The
//! split mirrors the layers above: `shapes` and `text` emit primitives,
//! `xobject` handles photo registration and placement, `page` assembles
//! whole pages and owns the save.

mod page;
mod shapes;
mod text;
mod xobject;

pub(crate) use page::render_document;
