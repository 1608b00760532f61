//! Wire payloads for every endpoint, shaped like the service's responses.

use serde_json::{Value, json};
use smartinvo_types::RecommendationForm;

/// The canonical form used across tests
pub fn spinach_form() -> RecommendationForm {
    RecommendationForm::new("Spinach", "vegetable", "Singapore", "2024-03-01")
}

/// A sparse recommendation: text, risk score and days in stock only
pub fn discount_soon() -> Value {
    json!({
        "recommendation": "Discount soon",
        "risk_score": 72.5,
        "days_in_stock": 4
    })
}

/// A recommendation carrying every optional field
pub fn full_recommendation() -> Value {
    json!({
        "recommendation": "Sell within 2 days",
        "loss_percentage": 18.4,
        "risk_score": 64.0,
        "days_in_stock": 3,
        "avg_shelf_life": 7,
        "adjusted_shelf_life": 5,
        "weather_explanation": "High humidity shortens shelf life"
    })
}

pub fn shelf_life_milk() -> Value {
    json!({"item": "Milk", "avg_shelf_life": 7})
}

pub fn global_waste() -> Value {
    json!([
        {"commodity": "Tomatoes", "country": "India", "loss_percentage": 31.2},
        {"commodity": "Milk", "country": "Kenya", "loss_percentage": 12.4},
        {"commodity": "Rice", "country": "Vietnam", "loss_percentage": 6.5}
    ])
}

pub fn store_stats_singapore() -> Value {
    json!([
        {"item": "Spinach", "loss_percentage": 22.0},
        {"item": "Milk", "loss_percentage": 8.5}
    ])
}

pub fn store_stats_lagos() -> Value {
    json!([
        {"item": "Yam", "loss_percentage": 14.0}
    ])
}

/// Three-stage aggregation trace: rows on the first two, a top list on the last
pub fn transformation_steps() -> Value {
    json!([
        {"step": "load_data", "description": "Loaded waste records", "rows": 1200},
        {"step": "filter_valid", "description": "Dropped incomplete rows", "rows": 950},
        {"step": "top_waste_items", "description": "Ranked commodities",
         "top": [
            {"commodity": "Tomatoes", "loss_percentage": 31.2},
            {"commodity": "Milk", "loss_percentage": 12.4}
         ]}
    ])
}

pub fn model_info() -> Value {
    json!({
        "model": "RandomForestRegressor",
        "accuracy": 0.87,
        "details": "Trained on 12k store-day records",
        "conclusion": "Reliable for perishables"
    })
}

pub fn weather_singapore() -> Value {
    json!({
        "location": "Singapore",
        "country": "Singapore",
        "forecast": [
            {"date": "2024-03-01", "avg_temp_c": 28.4, "max_temp_c": 31.0,
             "min_temp_c": 25.9, "chance_of_rain": 80, "condition": "Patchy rain",
             "avg_humidity": 84},
            {"date": "2024-03-02", "avg_temp_c": 27.9}
        ]
    })
}

pub fn health() -> Value {
    json!({"message": "SmartInvo API is running"})
}
