use client_core::CatalogState;

pub fn render(state: &CatalogState, limit: usize) -> String {
    match state {
        CatalogState::Unloaded | CatalogState::Loading => "Supported symbols: …loading".to_string(),
        CatalogState::Failed(reason) => format!("Supported symbols unavailable: {}", reason),
        CatalogState::Ready(catalog) => {
            let (shown, truncated) = catalog.preview(limit);
            let mut out = format!("Supported symbols: {}", shown.join(" "));
            if truncated {
                out.push_str(" …");
            }
            out
        }
    }
}

/// Full listing for `/symbols`, with each symbol's mapping.
pub fn render_full(state: &CatalogState) -> String {
    let Some(catalog) = state.catalog() else {
        return render(state, 0);
    };

    let mut out = String::from("── Symbols ──");
    for symbol in &catalog.supported {
        match catalog.describe(symbol) {
            Some(mapping) => out.push_str(&format!("\n{:<8} {}", symbol, mapping)),
            None => out.push_str(&format!("\n{}", symbol)),
        }
    }
    out
}
