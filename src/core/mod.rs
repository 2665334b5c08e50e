//! Core module - fundamental types and utilities

pub mod config;
pub mod entity;
pub mod ordering;
pub mod slug;

pub use config::{Backend, Config, ConfigError};
pub use entity::ContentRecord;
pub use ordering::{
    fetch_sorted, move_and_persist, persist_order, sort_by_order, swap_and_renumber, Direction,
    MoveOutcome, OrderChange, Orderable, ORDER_FIELD, ORDER_SENTINEL,
};
pub use slug::slugify;
