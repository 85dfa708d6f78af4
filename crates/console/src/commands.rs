use common::models::{NewTrade, Side, TradeId};

pub const EXAMPLE_PROMPTS: &[&str] = &[
    "what is the market value of SX5E?",
    "price of DAX",
    "buy 10 SX5E @ 4200",
    "sell 5 DAX @ 17650",
    "list trades",
    "mark trade 1 executed",
    "cancel trade 2",
];

pub const HELP: &str = "\
Type anything to ask the assistant, or:
  /ex <n>                          send example prompt n
  /refresh                         reload the trade ledger
  /exec <id>                       mark a trade executed
  /rm <id>                         remove a trade
  /buy <qty> <symbol> @ <price>    create a buy order
  /sell <qty> <symbol> @ <price>   create a sell order
  /trades                          show the ledger
  /symbols                         show supported symbols
  /help                            this text
  /quit                            leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask(String),
    Refresh,
    Execute(TradeId),
    Remove(TradeId),
    Create(NewTrade),
    Trades,
    Symbols,
    Help,
    Quit,
    Invalid(String),
}

/// Lines not starting with `/` go to the assistant untouched.
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("refresh", []) => Command::Refresh,
        ("trades", []) => Command::Trades,
        ("symbols", []) => Command::Symbols,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        ("exec", [id]) => parse_id(id).map_or_else(Command::Invalid, Command::Execute),
        ("rm", [id]) => parse_id(id).map_or_else(Command::Invalid, Command::Remove),
        ("ex", [n]) => example(n),
        ("buy", args) => order(Side::Buy, args),
        ("sell", args) => order(Side::Sell, args),
        _ => Command::Invalid(format!("Unknown command '/{}', try /help", rest)),
    }
}

fn parse_id(raw: &str) -> Result<TradeId, String> {
    raw.trim_start_matches('#')
        .parse::<TradeId>()
        .map_err(|_| format!("'{}' is not a trade id", raw))
}

fn example(raw: &str) -> Command {
    match raw.parse::<usize>() {
        Ok(n) if (1..=EXAMPLE_PROMPTS.len()).contains(&n) => {
            Command::Ask(EXAMPLE_PROMPTS[n - 1].to_string())
        }
        _ => Command::Invalid(format!(
            "Pick an example between 1 and {}",
            EXAMPLE_PROMPTS.len()
        )),
    }
}

fn order(side: Side, args: &[&str]) -> Command {
    let [qty, symbol, "@", price] = args else {
        return Command::Invalid(format!("Usage: /{} <qty> <symbol> @ <price>", side));
    };

    match (qty.parse::<f64>(), price.parse::<f64>()) {
        (Ok(quantity), Ok(price)) => Command::Create(NewTrade::new(*symbol, side, quantity, price)),
        _ => Command::Invalid(format!("Could not read '{} @ {}' as numbers", qty, price)),
    }
}
