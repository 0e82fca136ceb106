//! Groups command: list the built-in unions.

use anyhow::Result;

use fluxrec_region::UnionTable;

/// Print every built-in union and its member codes.
pub fn run() -> Result<()> {
    let table = UnionTable::builtin();
    let width = table.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, codes) in table.iter() {
        println!("{name:<width$}  {}", codes.join(" "));
    }
    Ok(())
}
