use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pennydash_core::source::parse_source;
use pennydash_core::{FixedClock, Transaction};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("pennydash-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_fixture(dir: &Path, file_name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn write_fixture_json(dir: &Path, file_name: &str, value: &Value) -> std::io::Result<PathBuf> {
    let body = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    write_fixture(dir, file_name, &body)
}

pub fn write_config(home: &Path, value: &Value) -> std::io::Result<PathBuf> {
    write_fixture_json(home, "config.json", value)
}

pub fn transaction(id: i64, kind: &str, amount: f64, date: &str, category: Option<&str>) -> Value {
    json!({
        "id": id,
        "type": kind,
        "amount": amount,
        "date": date,
        "category": category,
    })
}

pub fn parse_rows(rows: &[Value]) -> Vec<Transaction> {
    let body = Value::Array(rows.to_vec()).to_string();
    let parsed = parse_source(&body);
    assert!(parsed.is_ok());
    match parsed {
        Ok(snapshot) => snapshot.transactions,
        Err(_) => Vec::new(),
    }
}

pub fn clock_at(year: i32, month: u32, day: u32) -> Option<FixedClock> {
    NaiveDate::from_ymd_opt(year, month, day).map(FixedClock::at_date)
}

/// Small deterministic generator so property checks stay reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound.max(1)
    }
}

/// A mixed list with both signs, several categories, repeated dates and
/// the occasional undated row.
pub fn synthetic_rows(rng: &mut Lcg, count: usize, allow_undated: bool) -> Vec<Value> {
    const KINDS: [&str; 5] = ["Income", "Expense", "Надходження", "Витрата", "Transfer"];
    const CATEGORIES: [Option<&str>; 5] = [Some("Food"), Some("Rent"), Some("Cafe"), Some(" "), None];

    (0..count)
        .map(|index| {
            let kind = KINDS[rng.below(KINDS.len() as u32) as usize];
            let cents = i64::from(rng.below(500_000)) - 100_000;
            let amount = cents as f64 / 100.0;
            let category = CATEGORIES[rng.below(CATEGORIES.len() as u32) as usize];
            let date = if allow_undated && rng.below(10) == 0 {
                "not-a-date".to_string()
            } else {
                format!("2024-{:02}-{:02}", rng.below(12) + 1, rng.below(28) + 1)
            };
            transaction(index as i64 + 1, kind, amount, &date, category)
        })
        .collect()
}
