pub mod card;
pub mod order_steps;
pub mod snippet;
pub mod time_ago;
