//! Input module - key decoding and held-key repeat timing

pub mod keys;
pub mod repeat;

pub use keys::{decode_key, is_left_key, is_right_key, is_soft_drop_key, should_quit};
pub use repeat::{MoveRepeat, RepeatDir};
