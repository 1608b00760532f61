use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, Result, ValidationError};

/// Raw recommendation form input, exactly as typed by the user.
///
/// Every field may be blank; [`RecommendationForm::validate`] is the only way
/// to obtain a [`RecommendationRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationForm {
    pub item: String,
    pub category: String,
    pub city: String,
    pub arrival_date: String,
}

impl RecommendationForm {
    pub fn new(
        item: impl Into<String>,
        category: impl Into<String>,
        city: impl Into<String>,
        arrival_date: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            category: category.into(),
            city: city.into(),
            arrival_date: arrival_date.into(),
        }
    }

    /// Check that all four fields are present and well-formed.
    ///
    /// Fields are checked in form order so the first blank field is reported.
    pub fn validate(&self) -> Result<RecommendationRequest> {
        let item = required("item", &self.item)?;
        let category = required("category", &self.category)?;
        let city = required("city", &self.city)?;
        let arrival_date = required("arrival_date", &self.arrival_date)?;

        let category = category.parse::<Category>()?;
        let arrival_date = NaiveDate::parse_from_str(arrival_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidArrivalDate(arrival_date.to_string()))?;

        Ok(RecommendationRequest {
            item: item.to_string(),
            category,
            city: city.to_string(),
            arrival_date,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

/// Validated body of `POST /inventory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationRequest {
    item: String,
    category: Category,
    city: String,
    arrival_date: NaiveDate,
}

impl RecommendationRequest {
    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }
}

/// Recommendation returned by the prediction service.
///
/// Every analytic field is independently optional. Absent fields stay `None`
/// and are never defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(rename = "recommendation")]
    pub recommendation_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_in_stock: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_shelf_life: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_shelf_life: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_explanation: Option<String>,
}

impl RecommendationResult {
    pub fn new(recommendation_text: impl Into<String>) -> Self {
        Self {
            recommendation_text: recommendation_text.into(),
            loss_percentage: None,
            risk_score: None,
            days_in_stock: None,
            avg_shelf_life: None,
            adjusted_shelf_life: None,
            weather_explanation: None,
        }
    }

    /// Shelf-life shift caused by the weather adjustment, when both figures are known
    pub fn shelf_life_delta(&self) -> Option<i64> {
        match (self.avg_shelf_life, self.adjusted_shelf_life) {
            (Some(avg), Some(adjusted)) => Some(i64::from(adjusted) - i64::from(avg)),
            _ => None,
        }
    }
}

/// Response of `GET /shelf_life`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfLifeResult {
    pub item: String,
    pub avg_shelf_life: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spinach() -> RecommendationForm {
        RecommendationForm::new("Spinach", "vegetable", "Singapore", "2024-03-01")
    }

    #[test]
    fn test_validate_complete_form() {
        let request = spinach().validate().unwrap();
        assert_eq!(request.item(), "Spinach");
        assert_eq!(request.category(), Category::Vegetable);
        assert_eq!(request.city(), "Singapore");
        assert_eq!(
            request.arrival_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_validate_reports_each_blank_field() {
        let cases = [
            ("item", RecommendationForm { item: "  ".into(), ..spinach() }),
            ("category", RecommendationForm { category: String::new(), ..spinach() }),
            ("city", RecommendationForm { city: "\t".into(), ..spinach() }),
            ("arrival_date", RecommendationForm { arrival_date: String::new(), ..spinach() }),
        ];

        for (field, form) in cases {
            let err = form.validate().unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_validate_rejects_malformed_date() {
        let form = RecommendationForm {
            arrival_date: "03/01/2024".into(),
            ..spinach()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::InvalidArrivalDate("03/01/2024".into())
        );
    }

    #[test]
    fn test_request_wire_format() {
        let request = spinach().validate().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "item": "Spinach",
                "category": "vegetable",
                "city": "Singapore",
                "arrival_date": "2024-03-01"
            })
        );
    }

    #[test]
    fn test_result_keeps_absent_fields_absent() {
        let result: RecommendationResult = serde_json::from_value(serde_json::json!({
            "recommendation": "Discount soon",
            "risk_score": 72.5,
            "days_in_stock": 4
        }))
        .unwrap();

        assert_eq!(result.recommendation_text, "Discount soon");
        assert_eq!(result.risk_score, Some(72.5));
        assert_eq!(result.days_in_stock, Some(4));
        assert_eq!(result.loss_percentage, None);
        assert_eq!(result.avg_shelf_life, None);
        assert_eq!(result.weather_explanation, None);

        let echoed = serde_json::to_value(&result).unwrap();
        assert!(echoed.get("loss_percentage").is_none());
    }

    #[test]
    fn test_result_null_fields_are_absent() {
        let result: RecommendationResult = serde_json::from_value(serde_json::json!({
            "recommendation": "Restock",
            "loss_percentage": null,
            "avg_shelf_life": 7,
            "adjusted_shelf_life": 5
        }))
        .unwrap();

        assert_eq!(result.loss_percentage, None);
        assert_eq!(result.shelf_life_delta(), Some(-2));
    }
}
