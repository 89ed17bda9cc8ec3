use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Backend identifier, either numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => ItemId::Number(n),
            Err(_) => ItemId::Text(trimmed.to_string()),
        })
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// A numeric field as forms and the backend hand it over: `4`, `4.0`, `"4"` or `""`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Integer value, truncating fractions. Blank or non-numeric text yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Numeric::Int(n) => Some(*n),
            Numeric::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Int(n) => Some(*n as f64),
            Numeric::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Numeric::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{}", n),
            Numeric::Float(x) => write!(f, "{}", x),
            Numeric::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::Int(n)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_decodes_both_shapes() {
        let ids: Vec<ItemId> = serde_json::from_str(r#"[1, "emp-7"]"#).unwrap();
        assert_eq!(ids[0], ItemId::Number(1));
        assert_eq!(ids[1], ItemId::Text("emp-7".to_string()));
        assert_ne!(ItemId::Number(1), ItemId::Text("1".to_string()));
    }

    #[test]
    fn test_item_id_from_str_prefers_numbers() {
        assert_eq!("42".parse::<ItemId>().unwrap(), ItemId::Number(42));
        assert_eq!(" abc ".parse::<ItemId>().unwrap(), ItemId::from("abc"));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Numeric::from("4").as_i64(), Some(4));
        assert_eq!(Numeric::from(" 3 ").as_i64(), Some(3));
        assert_eq!(Numeric::Float(2.9).as_i64(), Some(2));
        assert_eq!(Numeric::from("").as_i64(), None);
        assert_eq!(Numeric::from("high").as_i64(), None);
    }
}
