use crate::foundation::core::fmt_number;
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use serde::{Deserialize, Serialize};

/// One node of the input tree, as published by the data source.
///
/// Containers carry `children`; leaves carry `category` and `value`. Nothing stops a node from
/// carrying both `value` and `children`, in which case both count towards its aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DataNode>>,
}

/// Leaf weight exactly as it appeared in the document.
///
/// The movie dataset ships its revenues as JSON strings, so both encodings are accepted and the
/// raw form is kept for the inspectable attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(serde_json::Number),
    Text(String),
}

impl DataValue {
    /// Numeric weight, or `None` when the raw value is not a finite number.
    pub fn weight(&self) -> Option<f64> {
        let w = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().ok()?
                }
            }
        };
        w.is_finite().then_some(w)
    }

    /// Attribute text: strings verbatim, numbers in their shortest decimal form.
    pub fn raw(&self) -> String {
        match self {
            Self::Number(n) => match n.as_f64() {
                Some(f) => fmt_number(f),
                None => n.to_string(),
            },
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(fmt_number(v)))
    }
}

impl From<u64> for DataValue {
    fn from(v: u64) -> Self {
        Self::Number(v.into())
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl DataNode {
    pub fn leaf(
        name: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<DataValue>,
    ) -> Self {
        Self {
            name: name.into(),
            category: Some(category.into()),
            value: Some(value.into()),
            children: None,
        }
    }

    pub fn container(name: impl Into<String>, children: Vec<DataNode>) -> Self {
        Self {
            name: name.into(),
            category: None,
            value: None,
            children: Some(children),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> BoxofficeResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| BoxofficeError::parse(format!("parse dataset JSON: {e}")))
    }

    pub fn children(&self) -> &[DataNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// An empty `children` list makes a node a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Own weight; missing or non-numeric values count as zero.
    pub fn own_weight(&self) -> f64 {
        self.value.as_ref().and_then(DataValue::weight).unwrap_or(0.0)
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children().iter().map(DataNode::leaf_count).sum()
        }
    }

    /// Category domain of the chart: the names of the top-level containers, in input order.
    pub fn category_names(&self) -> Vec<String> {
        self.children().iter().map(|c| c.name.clone()).collect()
    }

    /// Reject negative weights and aggregates that overflow `f64`; unparseable weights are
    /// tolerated and counted as zero.
    pub fn validate(&self) -> BoxofficeResult<()> {
        let mut path = Vec::new();
        validate_node(self, &mut path).map(|_| ())
    }
}

/// Returns the node's aggregate, summed in the same order as the layout hierarchy.
fn validate_node<'a>(node: &'a DataNode, path: &mut Vec<&'a str>) -> BoxofficeResult<f64> {
    path.push(node.name.as_str());
    let mut sum = 0.0;
    if let Some(value) = &node.value {
        match value.weight() {
            Some(w) if w < 0.0 => {
                return Err(BoxofficeError::validation(format!(
                    "node '{}' has negative value {}",
                    path.join("/"),
                    value.raw()
                )));
            }
            Some(w) => sum = w,
            None => tracing::warn!(
                node = %path.join("/"),
                value = %value.raw(),
                "non-numeric value counted as zero"
            ),
        }
    }
    let mut child_sums = Vec::with_capacity(node.children().len());
    for child in node.children() {
        child_sums.push(validate_node(child, path)?);
    }
    for c in child_sums.iter().rev() {
        sum += c;
    }
    if !sum.is_finite() {
        return Err(BoxofficeError::validation(format!(
            "total value under '{}' overflows",
            path.join("/")
        )));
    }
    path.pop();
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_string_and_number_values() {
        let node: DataNode = serde_json::from_value(json!({
            "name": "Movies",
            "children": [
                {"name": "Action", "children": [
                    {"name": "Avatar ", "category": "Action", "value": "760505847"},
                    {"name": "Jaws", "category": "Action", "value": 260000000}
                ]}
            ]
        }))
        .unwrap();

        let action = &node.children()[0];
        assert_eq!(action.children()[0].own_weight(), 760_505_847.0);
        assert_eq!(action.children()[0].value.as_ref().unwrap().raw(), "760505847");
        assert_eq!(action.children()[1].value.as_ref().unwrap().raw(), "260000000");
        assert_eq!(node.leaf_count(), 2);
        assert_eq!(node.category_names(), vec!["Action".to_owned()]);
    }

    #[test]
    fn empty_children_is_a_leaf() {
        let node: DataNode =
            serde_json::from_value(json!({"name": "x", "children": [], "value": 3})).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn weight_coercion() {
        assert_eq!(DataValue::from(" 12.5 ").weight(), Some(12.5));
        assert_eq!(DataValue::from("").weight(), Some(0.0));
        assert_eq!(DataValue::from("n/a").weight(), None);
        assert_eq!(DataValue::from("inf").weight(), None);
        assert_eq!(DataValue::from(1.5).raw(), "1.5");
        assert_eq!(DataValue::from(100.0).raw(), "100");
    }

    #[test]
    fn validate_rejects_negative_values() {
        let tree = DataNode::container(
            "Data",
            vec![DataNode::container(
                "Cat",
                vec![DataNode::leaf("Bad", "Cat", "-5")],
            )],
        );
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("Data/Cat/Bad"));

        let ok = DataNode::container("Data", vec![DataNode::leaf("Odd", "Cat", "n/a")]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn validate_rejects_overflowing_totals() {
        let tree = DataNode::container(
            "Data",
            vec![DataNode::container(
                "Cat",
                vec![
                    DataNode::leaf("A", "Cat", "1e308"),
                    DataNode::leaf("B", "Cat", "1e308"),
                ],
            )],
        );
        let err = tree.validate().unwrap_err();
        assert!(matches!(err, BoxofficeError::Validation(_)));
        assert!(err.to_string().contains("Data/Cat"));

        let big = DataNode::container("Data", vec![DataNode::leaf("A", "Cat", "1e308")]);
        assert!(big.validate().is_ok());
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = DataNode::from_json("{\"name\": ").unwrap_err();
        assert!(matches!(err, BoxofficeError::Parse(_)));
        let err = DataNode::from_json("{\"value\": 1}").unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
