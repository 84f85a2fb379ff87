use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub food_name: String,
    pub quantity_g: f64,
    pub date: String,
    pub meal_type: String,
}
