//! Terminal output helpers for the command layer.

pub mod table;

pub use table::render_table;

/// Print a table, or a short notice when there is nothing to list.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("No records found.");
        return;
    }
    println!("{}", render_table(headers, rows));
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
