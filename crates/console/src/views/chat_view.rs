use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use client_core::{SessionManager, SessionState};
use common::models::{Message, Role};

use crate::commands::EXAMPLE_PROMPTS;

pub fn attach(session: &SessionManager) {
    let printed = AtomicUsize::new(0);
    let was_pending = AtomicBool::new(false);

    session.listen(move |state: &SessionState| {
        let from = printed.swap(state.messages.len(), Ordering::SeqCst);
        for message in state.messages.iter().skip(from) {
            println!("{}", render_message(message));
        }

        if state.pending && !was_pending.load(Ordering::SeqCst) {
            println!("  …");
        }
        was_pending.store(state.pending, Ordering::SeqCst);
    });
}

pub fn render_message(message: &Message) -> String {
    match message.role {
        Role::User => format!("you > {}", message.text),
        Role::Assistant => format!("bot < {}", message.text),
    }
}

pub fn render_examples() -> String {
    let mut out = String::from("Try one of these (/ex <n>):");
    for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, prompt));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_marked_by_role() {
        assert_eq!(render_message(&Message::user("price of DAX")), "you > price of DAX");
        assert_eq!(
            render_message(&Message::assistant("Error: timeout")),
            "bot < Error: timeout"
        );
    }

    #[test]
    fn examples_are_numbered() {
        let text = render_examples();
        assert!(text.contains("  1. what is the market value of SX5E?"));
        assert!(text.contains("  7. cancel trade 2"));
    }
}
