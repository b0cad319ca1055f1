// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selectors used to filter objects read from files.
//!
//! Cluster listings forward the raw selector to the API server, which does its
//! own matching; the parsed form is only evaluated locally.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    DoesNotExist(String),
    In(String, Vec<String>),
    NotIn(String, Vec<String>),
}

impl Requirement {
    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Requirement::Equals(key, value) => labels.get(key) == Some(value),
            Requirement::NotEquals(key, value) => labels.get(key) != Some(value),
            Requirement::Exists(key) => labels.contains_key(key),
            Requirement::DoesNotExist(key) => !labels.contains_key(key),
            Requirement::In(key, values) => labels.get(key).is_some_and(|v| values.contains(v)),
            Requirement::NotIn(key, values) => labels.get(key).map_or(true, |v| !values.contains(v)),
        }
    }
}

/// A parsed label selector; every requirement must hold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    raw: String,
    requirements: Vec<Requirement>,
}

impl Selector {
    /// The selector as given, suitable for the `labelSelector` query parameter
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn matches(&self, labels: Option<&BTreeMap<String, String>>) -> bool {
        let empty = BTreeMap::new();
        let labels = labels.unwrap_or(&empty);
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let requirements = split_terms(raw)
            .into_iter()
            .map(parse_requirement)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("couldn't parse the selector string {:?}: {}", raw, e))?;

        Ok(Selector {
            raw: raw.to_string(),
            requirements,
        })
    }
}

/// Split on commas that are not inside a `( ... )` value set
fn split_terms(raw: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                terms.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(&raw[start..]);
    terms
}

fn parse_requirement(term: &str) -> Result<Requirement, String> {
    let term = term.trim();
    if term.is_empty() {
        return Err("found empty requirement".to_string());
    }

    if let Some(key) = term.strip_prefix('!') {
        return Ok(Requirement::DoesNotExist(key_of(key)?));
    }
    if let Some((key, value)) = term.split_once("!=") {
        return Ok(Requirement::NotEquals(key_of(key)?, value_of(value)?));
    }
    if let Some((key, value)) = term.split_once("==") {
        return Ok(Requirement::Equals(key_of(key)?, value_of(value)?));
    }
    if let Some((key, value)) = term.split_once('=') {
        return Ok(Requirement::Equals(key_of(key)?, value_of(value)?));
    }
    if let Some(open) = term.find('(') {
        return parse_set(term, open);
    }

    Ok(Requirement::Exists(key_of(term)?))
}

fn parse_set(term: &str, open: usize) -> Result<Requirement, String> {
    let Some(inner) = term[open + 1..].strip_suffix(')') else {
        return Err(format!("unterminated value set in {:?}", term));
    };
    let mut head = term[..open].split_whitespace();
    let (Some(key), Some(operator), None) = (head.next(), head.next(), head.next()) else {
        return Err(format!("expected '<key> in (...)' or '<key> notin (...)', found {:?}", term));
    };
    let values = inner
        .split(',')
        .map(value_of)
        .collect::<Result<Vec<_>, _>>()?;
    if values.iter().any(String::is_empty) {
        return Err(format!("empty value in set {:?}", term));
    }

    match operator {
        "in" => Ok(Requirement::In(key_of(key)?, values)),
        "notin" => Ok(Requirement::NotIn(key_of(key)?, values)),
        other => Err(format!("unknown operator {:?}", other)),
    }
}

fn key_of(key: &str) -> Result<String, String> {
    let key = key.trim();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'));
    if valid {
        Ok(key.to_string())
    } else {
        Err(format!("invalid label key {:?}", key))
    }
}

fn value_of(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        Ok(value.to_string())
    } else {
        Err(format!("invalid label value {:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_equality_forms() {
        let selector: Selector = "app=hello,tier==web,env!=prod".parse().unwrap();

        assert_eq!(
            selector.requirements(),
            &[
                Requirement::Equals("app".into(), "hello".into()),
                Requirement::Equals("tier".into(), "web".into()),
                Requirement::NotEquals("env".into(), "prod".into()),
            ]
        );
        assert_eq!(selector.as_str(), "app=hello,tier==web,env!=prod");
    }

    #[test]
    fn test_parse_existence_and_sets() {
        let selector: Selector = "team, !legacy, env in (dev, qa), zone notin (b)"
            .parse()
            .unwrap();

        assert_eq!(
            selector.requirements(),
            &[
                Requirement::Exists("team".into()),
                Requirement::DoesNotExist("legacy".into()),
                Requirement::In("env".into(), vec!["dev".into(), "qa".into()]),
                Requirement::NotIn("zone".into(), vec!["b".into()]),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["app=hello,", "=hello", "app=he llo", "env in (dev", "env within (a)", "a b"] {
            assert!(raw.parse::<Selector>().is_err(), "{} should not parse", raw);
        }
    }

    #[test]
    fn test_matches_equality() {
        let selector: Selector = "app=hello".parse().unwrap();

        assert!(selector.matches(Some(&labels(&[("app", "hello"), ("x", "y")]))));
        assert!(!selector.matches(Some(&labels(&[("app", "bye")]))));
        assert!(!selector.matches(None));
    }

    #[test]
    fn test_matches_negative_requirements_on_missing_labels() {
        let selector: Selector = "env!=prod,zone notin (a),!legacy".parse().unwrap();

        assert!(selector.matches(None));
        assert!(!selector.matches(Some(&labels(&[("env", "prod")]))));
        assert!(!selector.matches(Some(&labels(&[("legacy", "")]))));
    }

    #[test]
    fn test_matches_sets() {
        let selector: Selector = "env in (dev,qa)".parse().unwrap();

        assert!(selector.matches(Some(&labels(&[("env", "qa")]))));
        assert!(!selector.matches(Some(&labels(&[("env", "prod")]))));
        assert!(!selector.matches(None));
    }
}
