use crate::logic::eval_constants::{
    CORNER_STABILITY_BONUS, CORNER_VALUE, C_SQUARE_PENALTY, EDGE_STABILITY_BONUS,
    WEIGHT_CORNER, WEIGHT_EDGE, WEIGHT_MATERIAL, WEIGHT_MOBILITY, WEIGHT_POSITION,
    WEIGHT_RISK, WEIGHT_STABILITY, X_SQUARE_PENALTY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation term weights
    pub weight_material: i32,
    pub weight_position: i32,
    pub weight_corner: i32,
    pub weight_edge: i32,
    pub weight_mobility: i32,
    pub weight_stability: i32,
    pub weight_risk: i32,

    // Per-cell scores inside the terms
    pub corner_value: i32,
    pub corner_stability_bonus: i32,
    pub edge_stability_bonus: i32,
    pub x_square_penalty: i32,
    pub c_square_penalty: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weight_material: WEIGHT_MATERIAL,
            weight_position: WEIGHT_POSITION,
            weight_corner: WEIGHT_CORNER,
            weight_edge: WEIGHT_EDGE,
            weight_mobility: WEIGHT_MOBILITY,
            weight_stability: WEIGHT_STABILITY,
            weight_risk: WEIGHT_RISK,

            corner_value: CORNER_VALUE,
            corner_stability_bonus: CORNER_STABILITY_BONUS,
            edge_stability_bonus: EDGE_STABILITY_BONUS,
            x_square_penalty: X_SQUARE_PENALTY,
            c_square_penalty: C_SQUARE_PENALTY,
        }
    }
}

/// Tuning overlay: each field is a multiplicative scale over the default.
#[derive(Deserialize)]
struct EngineConfigJson {
    weight_material: Option<f32>,
    weight_position: Option<f32>,
    weight_corner: Option<f32>,
    weight_edge: Option<f32>,
    weight_mobility: Option<f32>,
    weight_stability: Option<f32>,
    weight_risk: Option<f32>,

    corner_value: Option<f32>,
    corner_stability_bonus: Option<f32>,
    edge_stability_bonus: Option<f32>,
    x_square_penalty: Option<f32>,
    c_square_penalty: Option<f32>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            weight_material: apply_scale(default.weight_material, json_config.weight_material),
            weight_position: apply_scale(default.weight_position, json_config.weight_position),
            weight_corner: apply_scale(default.weight_corner, json_config.weight_corner),
            weight_edge: apply_scale(default.weight_edge, json_config.weight_edge),
            weight_mobility: apply_scale(default.weight_mobility, json_config.weight_mobility),
            weight_stability: apply_scale(default.weight_stability, json_config.weight_stability),
            weight_risk: apply_scale(default.weight_risk, json_config.weight_risk),

            corner_value: apply_scale(default.corner_value, json_config.corner_value),
            corner_stability_bonus: apply_scale(
                default.corner_stability_bonus,
                json_config.corner_stability_bonus,
            ),
            edge_stability_bonus: apply_scale(
                default.edge_stability_bonus,
                json_config.edge_stability_bonus,
            ),
            x_square_penalty: apply_scale(default.x_square_penalty, json_config.x_square_penalty),
            c_square_penalty: apply_scale(default.c_square_penalty, json_config.c_square_penalty),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
