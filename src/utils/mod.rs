// Utils compartidos

pub mod constants;
pub mod storage;
pub mod validation;
pub mod format;

pub use constants::*;
pub use storage::{KeyValueStore, MemoryStorage, WebStorage, load_json, save_json};
pub use format::{format_price, price_label, seats_label};
