//! Boarding packages and meals.

use serde::{Deserialize, Serialize};

use super::{Resource, Rules, Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub meal_ids: Vec<String>,
}

impl Validate for BoardingPackage {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .positive("price", self.price)
            .range("durationDays", self.duration_days, 1, 366)
            .not_empty("mealIds", &self.meal_ids)
            .check(
                "mealIds",
                self.meal_ids.iter().all(|id| !id.trim().is_empty()),
                "Meal references must not be blank",
            );
        rules.finish()
    }
}

impl Resource for BoardingPackage {
    const COLLECTION: &'static str = "boarding/packages";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub meal_type: MealType,
    pub price: f64,
}

impl Validate for Meal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .non_negative("price", self.price);
        rules.finish()
    }
}

impl Resource for Meal {
    const COLLECTION: &'static str = "boarding/meals";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn package_needs_meals() {
        let package = BoardingPackage {
            id: None,
            name: "Full board".into(),
            price: 4500.0,
            duration_days: 30,
            meal_ids: vec![],
        };
        let errors = package.validate().unwrap_err();
        assert_eq!(errors.field("mealIds"), ["Select at least one meal"]);
    }

    #[test]
    fn package_rejects_blank_meal_reference() {
        let package = BoardingPackage {
            id: None,
            name: "Full board".into(),
            price: 4500.0,
            duration_days: 30,
            meal_ids: vec!["m1".into(), " ".into()],
        };
        let errors = package.validate().unwrap_err();
        assert_eq!(errors.field("mealIds"), ["Meal references must not be blank"]);
    }

    #[test]
    fn free_meal_is_allowed() {
        let meal: Meal = serde_json::from_value(json!({
            "name": "Evening tea",
            "mealType": "snack",
            "price": 0
        }))
        .unwrap();
        assert_eq!(meal.meal_type, MealType::Snack);
        assert!(meal.validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let meal = Meal {
            id: None,
            name: "Lunch".into(),
            meal_type: MealType::Lunch,
            price: -1.0,
        };
        let errors = meal.validate().unwrap_err();
        assert_eq!(errors.field("price"), ["Price must not be negative"]);
    }
}
