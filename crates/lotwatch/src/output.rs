//! Output helpers shared by the list commands.

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows as a sharp-cornered table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}
