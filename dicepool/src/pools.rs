//! Named dice pools read from JSON or YAML files.
//!
//! A pool file maps names to specs. Each entry is either notation
//! (`"4d6L1"`) or an object with `count`, `sides` and optional `drop_low` /
//! `drop_high`:
//!
//! ```yaml
//! stats: 4d6L1
//! attack:
//!   count: 2
//!   sides: 20
//!   drop_low: 1
//! ```

use std::{fmt, fs, path::Path};

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

use crate::spec::DiceSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolFormat {
    Json,
    Yaml,
}

impl PoolFormat {
    /// `.yaml` / `.yml` means YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                PoolFormat::Yaml
            }
            _ => PoolFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PoolEntry {
    Notation(String),
    Fields(DiceSpec),
}

/// Pool entries in file order. A name may appear only once.
struct PoolEntries(IndexMap<String, PoolEntry>);

impl<'de> Deserialize<'de> for PoolEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = PoolEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of pool names to dice specs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(name) = map.next_key::<String>()? {
                    if entries.contains_key(&name) {
                        return Err(de::Error::custom(format!("duplicate pool '{}'", name)));
                    }
                    let entry = map.next_value::<PoolEntry>()?;
                    entries.insert(name, entry);
                }
                Ok(PoolEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

pub fn load_pools(path: impl AsRef<Path>) -> Result<IndexMap<String, DiceSpec>> {
    let path = path.as_ref();
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read pool file: {}", path.display()))?;
    parse_pools(&text, PoolFormat::from_path(path))
        .with_context(|| format!("failed to load pool file: {}", path.display()))
}

/// Parse pool text and validate every entry, keeping file order.
pub fn parse_pools(text: &str, format: PoolFormat) -> Result<IndexMap<String, DiceSpec>> {
    let PoolEntries(entries) = match format {
        PoolFormat::Json => serde_json::from_str(text).context("invalid pool JSON")?,
        PoolFormat::Yaml => serde_yaml::from_str(text).context("invalid pool YAML")?,
    };

    let mut pools = IndexMap::with_capacity(entries.len());
    for (name, entry) in entries {
        let spec = match entry {
            PoolEntry::Notation(s) => s
                .parse::<DiceSpec>()
                .with_context(|| format!("pool '{}'", name))?,
            PoolEntry::Fields(spec) => {
                spec.validate().with_context(|| format!("pool '{}'", name))?;
                spec
            }
        };
        debug!(pool = %name, %spec, "loaded pool");
        pools.insert(name, spec);
    }
    Ok(pools)
}

/// Read a text file, honouring a UTF-8/UTF-16 byte-order mark if present.
/// Malformed bytes are an error in every encoding.
fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, had_errors) = enc.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            bail!("malformed {} text", enc.name());
        }
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
