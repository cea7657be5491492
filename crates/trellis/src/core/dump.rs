use std::io::Write;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::core::{
    error::{Error, Result},
    id::NodeId,
    world::Core,
};

/// Build a table describing the subtree under `root`: one row per node with
/// its name, state flags and geometry.
pub fn dump_table(core: &Core, root: NodeId) -> Result<Table> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["node", "enabled", "layout", "repaint", "ideal", "rect"]);
    core.node(root)?;
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = core.node(id)?;
        let name = Cell::new(format!("{}{}", "  ".repeat(depth), node.name()));
        let name = if node.enabled() {
            name.fg(Color::Green)
        } else {
            name.fg(Color::DarkGrey)
        };
        let ideal = node.ideal();
        let rect = node
            .rect()
            .map(|r| format!("{},{} {}x{}", r.tl.x, r.tl.y, r.w, r.h))
            .unwrap_or_else(|| "-".into());
        table.add_row(vec![
            name,
            Cell::new(node.enabled()),
            Cell::new(node.needs_layout()),
            Cell::new(node.needs_repaint()),
            Cell::new(format!("{:.1}x{:.1}", ideal.width, ideal.height)),
            Cell::new(rect),
        ]);
        stack.extend(node.children().iter().rev().map(|c| (*c, depth + 1)));
    }
    Ok(table)
}

/// Write the subtree table to `w`.
pub fn dump(w: &mut dyn Write, core: &Core, root: NodeId) -> Result<()> {
    let table = dump_table(core, root)?;
    writeln!(w, "{table}").map_err(|e| Error::Internal(e.to_string()))
}
