//! Turns loosely typed spreadsheet rows into strict [`RateEntry`] records.
//!
//! Field names are resolved through an ordered alias table (English header,
//! spaced variant, Chinese header) and numeric cells are coerced through a
//! parse-or-default helper, so normalization is total: any row, however
//! malformed, yields a usable entry.

use serde_json::Value;

use super::entities::{RateEntry, DEFAULT_METHOD};

/// One loosely typed row as produced by spreadsheet parsing: column header to
/// raw cell value.
pub type RawRow = serde_json::Map<String, Value>;

/// Alias priority lists per canonical field, first non-empty cell wins.
struct FieldAliases {
    aliases: &'static [&'static str],
}

const COUNTRY: FieldAliases = FieldAliases {
    aliases: &["Country", "country", "国家"],
};
const METHOD: FieldAliases = FieldAliases {
    aliases: &["Method", "method", "方式"],
};
const START_WEIGHT: FieldAliases = FieldAliases {
    aliases: &["Start_weight", "Start weight", "开始重量"],
};
const END_WEIGHT: FieldAliases = FieldAliases {
    aliases: &["End_weight", "End weight", "结束重量"],
};
const BASE_WEIGHT: FieldAliases = FieldAliases {
    aliases: &["Base_weight", "Base weight", "首重"],
};
const BASE_FEE: FieldAliases = FieldAliases {
    aliases: &["Base_fee", "Base fee", "首重费用"],
};
const ADD_UNIT_WEIGHT: FieldAliases = FieldAliases {
    aliases: &["Add_unit_weight", "Add unit weight", "续重单位重量"],
};
const ADD_UNIT_PRICE: FieldAliases = FieldAliases {
    aliases: &["Add_unit_price", "Add unit price", "单价"],
};
const REGISTER_FEE: FieldAliases = FieldAliases {
    aliases: &["Register_fee", "Register fee", "挂号费"],
};

/// Builds one entry per row, independently, duplicates included.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<RateEntry> {
    rows.iter().map(normalize_row).collect()
}

/// Converts one raw row into a [`RateEntry`]. Never fails: unresolvable or
/// unparseable cells fall back to the field defaults.
pub fn normalize_row(row: &RawRow) -> RateEntry {
    RateEntry {
        country: text_or(row, &COUNTRY, ""),
        method: text_or(row, &METHOD, DEFAULT_METHOD),
        start_weight: number_or(row, &START_WEIGHT, 0.0),
        end_weight: number_or(row, &END_WEIGHT, 30_000.0),
        base_weight: number_or(row, &BASE_WEIGHT, 1.0),
        base_fee: number_or(row, &BASE_FEE, 0.0),
        add_unit_weight: number_or(row, &ADD_UNIT_WEIGHT, 1.0),
        add_unit_price: number_or(row, &ADD_UNIT_PRICE, 0.0),
        register_fee: number_or(row, &REGISTER_FEE, 0.0),
    }
}

/// First cell present under any alias that is not null and not blank text.
fn resolve<'a>(row: &'a RawRow, field: &FieldAliases) -> Option<&'a Value> {
    field
        .aliases
        .iter()
        .filter_map(|key| row.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn text_or(row: &RawRow, field: &FieldAliases, default: &str) -> String {
    match resolve(row, field) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn number_or(row: &RawRow, field: &FieldAliases, default: f64) -> f64 {
    parse_or_default(resolve(row, field), default)
}

/// Numeric coercion with a defined fallback: JSON numbers pass through,
/// strings are trimmed and parsed, everything else (and any non-finite or
/// negative result) becomes the default.
fn parse_or_default(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        _ => default,
    }
}
