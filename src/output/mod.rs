// Terminal rendering of users, posts, predictions, and topics.

pub mod terminal;
