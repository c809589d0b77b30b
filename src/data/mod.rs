//! Hierarchical input data.
//!
//! A `Node` mirrors the JSON shape `{ name, children?, value? }`. The chart
//! ships with a single embedded dataset, a year split into four seasons of
//! three months each.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

const YEAR_JSON: &str = include_str!("year.json");

/// One named node of the input tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Node {
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            children: None,
            value: Some(value),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
            value: None,
        }
    }

    /// Children in input order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// A node is a leaf when it has no children, including `children: []`.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Weight a leaf contributes to its ancestors. Internal nodes contribute
    /// only through their leaves; an empty `children` list counts as a leaf
    /// with value 0 unless it carries its own value.
    pub fn leaf_value(&self) -> f64 {
        if self.is_leaf() {
            self.value.unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Check every leaf and return the total weight of the tree.
    pub fn validate(&self) -> Result<f64> {
        let total = validate_node(self, &self.name)?;
        if total <= 0.0 {
            return Err(ChartError::EmptyHierarchy);
        }
        Ok(total)
    }
}

fn validate_node(node: &Node, path: &str) -> Result<f64> {
    match node.children.as_deref() {
        Some(children) if !children.is_empty() => {
            let mut sum = 0.0;
            for child in children {
                let child_path = format!("{}/{}", path, child.name);
                sum += validate_node(child, &child_path)?;
            }
            Ok(sum)
        }
        Some(_) => check_value(node.value.unwrap_or(0.0), path),
        None => match node.value {
            Some(v) => check_value(v, path),
            None => Err(ChartError::MissingValue {
                path: path.to_string(),
            }),
        },
    }
}

fn check_value(value: f64, path: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ChartError::InvalidValue {
            path: path.to_string(),
            value,
        })
    }
}

/// Parse a dataset from JSON without validating it.
pub fn parse(json: &str) -> Result<Node> {
    Ok(serde_json::from_str(json)?)
}

/// The embedded year → season → month dataset.
pub fn year() -> Result<Node> {
    parse(YEAR_JSON)
}
