// stagehand/src/core/params.rs

//! Parameter storage carried by each element instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
  IntList(Vec<i64>),
}

impl ParamValue {
  pub fn is_null(&self) -> bool {
    matches!(self, ParamValue::Null)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      ParamValue::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      ParamValue::Int(i) => Some(*i),
      _ => None,
    }
  }

  /// Ints widen to floats.
  pub fn as_float(&self) -> Option<f64> {
    match self {
      ParamValue::Float(f) => Some(*f),
      ParamValue::Int(i) => Some(*i as f64),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      ParamValue::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_int_list(&self) -> Option<&[i64]> {
    match self {
      ParamValue::IntList(v) => Some(v),
      _ => None,
    }
  }
}

impl From<bool> for ParamValue {
  fn from(v: bool) -> Self {
    ParamValue::Bool(v)
  }
}

impl From<i32> for ParamValue {
  fn from(v: i32) -> Self {
    ParamValue::Int(v.into())
  }
}

impl From<i64> for ParamValue {
  fn from(v: i64) -> Self {
    ParamValue::Int(v)
  }
}

impl From<f64> for ParamValue {
  fn from(v: f64) -> Self {
    ParamValue::Float(v)
  }
}

impl From<&str> for ParamValue {
  fn from(v: &str) -> Self {
    ParamValue::Text(v.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(v: String) -> Self {
    ParamValue::Text(v)
  }
}

impl From<Vec<i64>> for ParamValue {
  fn from(v: Vec<i64>) -> Self {
    ParamValue::IntList(v)
  }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
  fn from(v: Option<T>) -> Self {
    v.map_or(ParamValue::Null, Into::into)
  }
}

/// Named parameters of an element, keyed and iterated by name.
///
/// `Clone` is a deep copy; instances added to a pipeline never share
/// parameter storage with their template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert.
  pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, name: K, value: V) -> Self {
    self.set(name, value);
    self
  }

  /// Sets a parameter, returning the previous value if any.
  pub fn set<K: Into<String>, V: Into<ParamValue>>(&mut self, name: K, value: V) -> Option<ParamValue> {
    self.0.insert(name.into(), value.into())
  }

  pub fn get(&self, name: &str) -> Option<&ParamValue> {
    self.0.get(name)
  }

  pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
    self.0.remove(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Params(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
