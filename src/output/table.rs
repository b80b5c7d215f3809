//! Aligned plain-text tables for listings.

/// Column gap between cells.
const GAP: &str = "  ";

/// Render `rows` under `headers` as a left-aligned table.
///
/// Widths are measured in chars so accented names line up. Missing cells
/// render as `-`; numeric cells are right-aligned.
///
/// ```text
/// id  name   active
/// -----------------
///  1  Alpha  yes
/// ```
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let header_line = header_line.trim_end().to_string();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.clone());
    lines.push("-".repeat(header_line.chars().count()));

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map(String::as_str).unwrap_or("-");
                pad(cell, *width, looks_numeric(cell))
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn looks_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
