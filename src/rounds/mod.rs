mod parse;
mod record;

#[cfg(test)]
mod tests;

pub use parse::parse_round_log;
pub use record::{Group, ItemId, Round, RoundStore, EXCLUDED_GROUP_PREFIX};
