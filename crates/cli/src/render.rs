// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aligned-column output for list commands.

/// Column-aligned table. Widths are computed from the widest cell per
/// column; the final column is printed unpadded.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self { headers: headers.to_vec(), rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }
        widths
    }

    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(format_row(&self.headers.iter().map(|h| (*h).to_owned()).collect::<Vec<_>>(), &widths));
        for row in &self.rows {
            lines.push(format_row(row, &widths));
        }
        lines
    }

    pub fn print(&self) {
        for line in self.render() {
            println!("{line}");
        }
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i + 1 == cells.len() {
            line.push_str(cell);
        } else {
            let width = widths.get(i).copied().unwrap_or(0);
            line.push_str(&format!("{cell:<width$}  "));
        }
    }
    line.trim_end().to_owned()
}

/// Two-decimal money rendering.
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Render an optional cell, with an em dash for absent values.
pub fn opt(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => "\u{2014}".to_owned(),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
