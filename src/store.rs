//! store — ограниченная упорядоченная коллекция Item в памяти.
//!
//! - Порядок вставки сохраняется (append-only).
//! - Ёмкость задаётся при создании (по умолчанию MAX_ITEMS); add() сверх неё
//!   возвращает RabbitError::Capacity и не меняет состояние.
//! - Имя валидируется (не пустое) и обрезается до NAME_MAX_BYTES прямо в add(),
//!   поэтому каждый элемент в Store удовлетворяет инвариантам Item.
//! - list() отдаёт ленивый итератор (index, &Item) с индексами от 1.

use log::{debug, warn};

use crate::consts::{FIELD_SEP, MAX_ITEMS};
use crate::error::{RabbitError, Result};
use crate::item::Item;
use crate::metrics::{record_add_rejected, record_item_added};
use crate::util::{is_blank, truncate_name};

#[derive(Debug, Clone)]
pub struct Store {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_capacity(MAX_ITEMS)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        // Vec растёт по мере добавления; граница проверяется явно в add().
        Self {
            items: Vec::with_capacity(capacity.min(MAX_ITEMS)),
            capacity,
        }
    }

    /// Append a record. Fails without touching the store when it is full
    /// or the name is blank; over-long names are truncated.
    pub fn add(&mut self, name: impl Into<String>, value: i32) -> Result<()> {
        if self.is_full() {
            record_add_rejected();
            debug!("store: add rejected, {} of {} used", self.items.len(), self.capacity);
            return Err(RabbitError::Capacity {
                capacity: self.capacity,
            });
        }
        let mut name = name.into();
        if is_blank(&name) {
            record_add_rejected();
            return Err(RabbitError::Validation {
                reason: "name is blank",
            });
        }
        let keep = truncate_name(&name).len();
        name.truncate(keep);
        if name.contains(FIELD_SEP) {
            warn!("store: name {:?} contains '{}', it will not survive a reload intact", name, FIELD_SEP);
        }
        self.items.push(Item { name, value });
        record_item_added();
        Ok(())
    }

    /// Drop everything past the first `len` items (rollback of a failed load).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Entries as (1-based index, item) in insertion order.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
        self.items.iter().enumerate().map(|(i, it)| (i + 1, it))
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
