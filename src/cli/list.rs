use anyhow::{Context, Result};
use log::warn;
use std::io::Write;

use crate::config::RabbitConfig;
use crate::persist::load_items;
use crate::session::render_items;
use crate::store::Store;

/// list: загрузить файл данных и напечатать элементы (plain или JSON).
/// Отсутствующий файл = пустой список, как и в интерактивном режиме.
pub fn exec<W: Write>(cfg: &RabbitConfig, json: bool, out: &mut W) -> Result<()> {
    let mut store = Store::with_capacity(cfg.max_items);
    match load_items(&cfg.data_file, &mut store) {
        Ok(rep) if rep.capacity_reached => warn!(
            "list: item limit {} reached, rest of {} not shown",
            cfg.max_items,
            cfg.data_file.display()
        ),
        Ok(_) => {}
        Err(e) => warn!("list: {}; showing an empty list", e),
    }

    if json {
        let s = serde_json::to_string(store.items()).context("serialize items")?;
        writeln!(out, "{}", s)?;
    } else {
        render_items(out, &store)?;
    }
    out.flush()?;
    Ok(())
}
