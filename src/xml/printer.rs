use std::fmt;
use std::io::{self, Write};

use super::tree::Element;

const INDENT: &str = "  ";

/// Write `node` and its element descendants, one line each, indented two
/// spaces per level below `node`.
pub fn print_tree<W: Write + ?Sized>(node: &Element, out: &mut W) -> io::Result<()> {
    write!(out, "{}", Tree(node))
}

/// [`print_tree`] into a `String`.
pub fn render_tree(node: &Element) -> String {
    Tree(node).to_string()
}

struct Tree<'a>(&'a Element);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_at(self.0, 0, f)
    }
}

fn write_at(node: &Element, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}{}", INDENT.repeat(depth), tag_line(node))?;
    for child in &node.children {
        write_at(child, depth + 1, f)?;
    }
    Ok(())
}

fn tag_line(node: &Element) -> String {
    if node.attributes.is_empty() {
        return format!("<{}>", node.name);
    }
    let attrs: Vec<String> = node
        .attributes
        .iter()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect();
    format!("<{} {}>", node.name, attrs.join(" "))
}
