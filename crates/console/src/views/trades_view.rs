use std::fmt::Write;

use client_core::LedgerState;

const HEADER: [&str; 6] = ["#", "Symbol", "Side", "Qty", "Price", "Status"];

pub fn render(state: &LedgerState) -> String {
    let mut out = String::from("── Trades ──");
    if state.loading {
        out.push_str("\nLoading…");
    }
    if let Some(error) = &state.error {
        let _ = write!(out, "\n! {}", error);
    }
    if state.trades.is_empty() {
        out.push_str("\n(no trades)");
        return out;
    }

    let rows: Vec<[String; 6]> = state
        .trades
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                t.symbol.clone(),
                capitalize(&t.side.to_string()),
                t.quantity.to_string(),
                t.price.to_string(),
                capitalize(t.status.as_str()),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    out.push('\n');
    out.push_str(&line(HEADER.iter().copied(), &widths));
    for row in &rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
