use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;

use rabbit::cli::{list, Cli, Cmd};
use rabbit::{Item, RabbitConfig};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("rabbittest-cli-{prefix}-{pid}-{t}-{id}"))
}

#[test]
fn list_json_outputs_items() -> Result<()> {
    let root = unique_root("json");
    fs::create_dir_all(&root)?;
    let path = root.join("items.csv");
    fs::write(&path, "Widget,10\nGizmo,-3\nbadline\n")?;

    let cfg = RabbitConfig::default().with_data_file(&path);
    let mut out = Vec::new();
    list::exec(&cfg, true, &mut out)?;

    let items: Vec<Item> = serde_json::from_slice(&out)?;
    assert_eq!(items, vec![Item::new("Widget", 10), Item::new("Gizmo", -3)]);
    Ok(())
}

#[test]
fn list_plain_matches_view_format() -> Result<()> {
    let root = unique_root("plain");
    fs::create_dir_all(&root)?;
    let path = root.join("items.csv");
    fs::write(&path, "Widget,10\n")?;

    let cfg = RabbitConfig::default().with_data_file(&path);
    let mut out = Vec::new();
    list::exec(&cfg, false, &mut out)?;
    assert_eq!(String::from_utf8(out)?, "\nItem List\nItem 1: Name: Widget, Value: 10\n");
    Ok(())
}

#[test]
fn list_missing_file_is_empty_not_error() -> Result<()> {
    let root = unique_root("missing");
    fs::create_dir_all(&root)?;
    let cfg = RabbitConfig::default().with_data_file(root.join("none.csv"));

    let mut out = Vec::new();
    list::exec(&cfg, false, &mut out)?;
    assert_eq!(String::from_utf8(out)?, "No items to display.\n");

    let mut out = Vec::new();
    list::exec(&cfg, true, &mut out)?;
    assert_eq!(String::from_utf8(out)?.trim(), "[]");
    Ok(())
}

#[test]
fn flags_override_defaults() {
    let cli = Cli::parse_from(["rabbit", "--file", "other.csv", "--max-items", "5", "list", "--json"]);
    let cfg = cli.config();
    assert_eq!(cfg.data_file, PathBuf::from("other.csv"));
    assert_eq!(cfg.max_items, 5);
    assert!(matches!(cli.cmd, Some(Cmd::List { json: true })));

    let bare = Cli::parse_from(["rabbit"]);
    assert!(bare.cmd.is_none());
}
