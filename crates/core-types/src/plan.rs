//! Planning document types received from the planning collaborator.
//!
//! The shape is schema-checked upstream; this crate only gives it a typed
//! home so downstream code never touches raw JSON.

use serde::{Deserialize, Serialize};

/// One named dimension the plan pins down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub purpose: String,
}

/// One feature the plan calls for (hole, fillet, boss, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub purpose: String,
}

/// Design-intent document produced by the planning collaborator before
/// actions are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningDocument {
    pub design_intent: String,
    pub overall_form: String,
    pub key_dimensions: Vec<Dimension>,
    pub major_features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<String>,
}

impl PlanningDocument {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_from_json() {
        let value = json!({
            "designIntent": "simple mounting plate",
            "overallForm": "rectangular prism",
            "keyDimensions": [
                { "name": "plate_length", "value": 100.0, "unit": "mm", "purpose": "overall length" }
            ],
            "majorFeatures": [
                { "type": "hole", "quantity": 4, "purpose": "mounting" }
            ]
        });
        let plan = PlanningDocument::from_json(&value).unwrap();
        assert_eq!(plan.key_dimensions.len(), 1);
        assert_eq!(plan.major_features[0].feature_type, "hole");
        assert_eq!(plan.major_features[0].quantity, Some(4));
        assert!(plan.materials.is_none());
    }
}
