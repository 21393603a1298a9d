//! List filtering from query parameters: `field=pattern`, all parameters ANDed.
//!
//! Pattern grammar: `*text*` substring, `text*` prefix, `*text` suffix,
//! `<n` `>n` `<=n` `>=n` numeric comparison, anything else equality.

use crate::store::Record;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    Compare(Comparison, f64),
    Equals(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub predicate: Predicate,
}

fn relational_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(<=|>=|<|>)\s*(-?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)$")
            .expect("relational filter pattern is valid")
    })
}

impl Predicate {
    pub fn parse(pattern: &str) -> Predicate {
        if let Some(caps) = relational_pattern().captures(pattern) {
            let op = match &caps[1] {
                "<=" => Comparison::Le,
                ">=" => Comparison::Ge,
                "<" => Comparison::Lt,
                _ => Comparison::Gt,
            };
            if let Ok(n) = caps[2].parse::<f64>() {
                return Predicate::Compare(op, n);
            }
        }
        let starts = pattern.starts_with('*');
        let ends = pattern.len() > 1 && pattern.ends_with('*');
        match (starts, ends) {
            (true, true) => Predicate::Contains(pattern[1..pattern.len() - 1].to_string()),
            (true, false) if pattern.len() > 1 => Predicate::EndsWith(pattern[1..].to_string()),
            (false, true) => Predicate::StartsWith(pattern[..pattern.len() - 1].to_string()),
            _ => Predicate::Equals(pattern.to_string()),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Predicate::Contains(s) => as_text(value).contains(s.as_str()),
            Predicate::StartsWith(s) => as_text(value).starts_with(s.as_str()),
            Predicate::EndsWith(s) => as_text(value).ends_with(s.as_str()),
            Predicate::Compare(op, rhs) => as_number(value).map(|lhs| op.holds(lhs, *rhs)).unwrap_or(false),
            Predicate::Equals(s) => match value {
                Value::Number(n) => match (n.as_f64(), s.trim().parse::<f64>()) {
                    (Some(lhs), Ok(rhs)) => lhs == rhs,
                    _ => false,
                },
                other => as_text(other) == *s,
            },
        }
    }
}

/// Strings verbatim, everything else as JSON text.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, pattern: &str) -> Self {
        FieldFilter {
            field: field.into(),
            predicate: Predicate::parse(pattern),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(&self.field)
            .map(|v| self.predicate.matches(&v))
            .unwrap_or(false)
    }
}

pub fn parse_filters(params: &[(String, String)]) -> Vec<FieldFilter> {
    params.iter().map(|(k, v)| FieldFilter::new(k.as_str(), v)).collect()
}

pub fn matches_all(filters: &[FieldFilter], record: &Record) -> bool {
    filters.iter().all(|f| f.matches(record))
}
