//! Element tree of `project.xml` and its indented rendering.

mod printer;
mod tree;

pub use printer::{print_tree, render_tree};
pub use tree::{Document, Element};
