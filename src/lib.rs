// Базовые модули
pub mod consts;
pub mod error;
pub mod config;
pub mod metrics;

// Данные и хранилище
pub mod item;
pub mod store;
pub mod persist;

// Утилиты валидации (trim/blank/strict int)
pub mod util;

// Интерактивный цикл и CLI
pub mod session;
pub mod cli;

// Удобные реэкспорты
pub use config::RabbitConfig;
pub use error::{RabbitError, Result};
pub use item::Item;
pub use persist::{load_items, save_items, LoadReport};
pub use session::{Choice, Session, State};
pub use store::Store;
