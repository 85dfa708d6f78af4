use std::sync::Mutex;

use client_core::TradingDesk;

pub mod chat_view;
pub mod symbols_view;
pub mod trades_view;

/// Hooks the passive views up to the desk's stores. Views only render what
/// they are handed.
pub fn attach(desk: &TradingDesk, symbol_preview: usize) {
    chat_view::attach(desk.session());

    let last_ledger = Mutex::new(String::new());
    desk.ledger().listen(move |state| {
        print_if_changed(&last_ledger, trades_view::render(state));
    });

    let last_catalog = Mutex::new(String::new());
    desk.catalog().listen(move |state| {
        print_if_changed(&last_catalog, symbols_view::render(state, symbol_preview));
    });
}

fn print_if_changed(last: &Mutex<String>, frame: String) {
    let Ok(mut last) = last.lock() else {
        return;
    };
    if *last != frame {
        println!("{}", frame);
        *last = frame;
    }
}
