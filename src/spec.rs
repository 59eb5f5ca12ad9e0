use serde::Deserialize;

use crate::error::{Result, SheetError};

/// Caller-supplied request for `count` copies of one barcode.
///
/// Specs are immutable once submitted; validation happens up front in
/// [`expand`] before anything is rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct BarcodeSpec {
    /// Payload to encode (numeric id or alphanumeric string).
    pub number: String,
    /// How many physical copies to place.
    pub count: u32,
    /// Optional caption printed above each copy.
    #[serde(default)]
    pub title: Option<String>,
}

impl BarcodeSpec {
    pub fn new(number: impl Into<String>, count: u32) -> Self {
        Self {
            number: number.into(),
            count,
            title: None,
        }
    }

    pub fn with_title(number: impl Into<String>, count: u32, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            count,
            title: Some(title.into()),
        }
    }
}

/// One flattened unit to place on a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeInstance {
    pub number: String,
    pub title: Option<String>,
}

/// Flattens specs into the ordered sequence of units to place.
///
/// Each spec contributes `count` consecutive instances; spec order and
/// replication order are both preserved.
pub fn expand(specs: &[BarcodeSpec]) -> Result<Vec<BarcodeInstance>> {
    if specs.is_empty() {
        return Err(SheetError::EmptySpecs);
    }
    for (index, spec) in specs.iter().enumerate() {
        if spec.count == 0 {
            return Err(SheetError::InvalidCount {
                index,
                number: spec.number.clone(),
            });
        }
    }

    let total: usize = specs.iter().map(|s| s.count as usize).sum();
    let mut instances = Vec::with_capacity(total);
    for spec in specs {
        for _ in 0..spec.count {
            instances.push(BarcodeInstance {
                number: spec.number.clone(),
                title: spec.title.clone(),
            });
        }
    }
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_totals_match_counts() {
        let specs = vec![
            BarcodeSpec::new("12345", 25),
            BarcodeSpec::new("45678", 25),
            BarcodeSpec::new("7885526", 36),
        ];
        let instances = expand(&specs).unwrap();
        assert_eq!(instances.len(), 86);
    }

    #[test]
    fn expand_preserves_grouped_order() {
        let specs = vec![
            BarcodeSpec::new("12345", 2),
            BarcodeSpec::with_title("45678", 3, "Product B"),
        ];
        let instances = expand(&specs).unwrap();
        let numbers: Vec<&str> = instances.iter().map(|i| i.number.as_str()).collect();
        assert_eq!(numbers, ["12345", "12345", "45678", "45678", "45678"]);
        assert_eq!(instances[0].title, None);
        assert_eq!(instances[2].title.as_deref(), Some("Product B"));
    }

    #[test]
    fn expand_rejects_empty_list() {
        assert!(matches!(expand(&[]), Err(SheetError::EmptySpecs)));
    }

    #[test]
    fn expand_rejects_zero_count() {
        let specs = vec![BarcodeSpec::new("12345", 1), BarcodeSpec::new("45678", 0)];
        match expand(&specs) {
            Err(SheetError::InvalidCount { index, number }) => {
                assert_eq!(index, 1);
                assert_eq!(number, "45678");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn spec_deserializes_with_optional_title() {
        let json = r#"[{"number": "12345", "count": 25},
                       {"number": "45678", "count": 30, "title": "Product B"}]"#;
        let specs: Vec<BarcodeSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].title, None);
        assert_eq!(specs[1].title.as_deref(), Some("Product B"));
    }
}
