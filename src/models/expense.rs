use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Largest magnitude a DECIMAL(10,2) column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i64,
    pub payment_method: Option<String>,
    pub is_recurring: bool,
    pub is_anomaly: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i64,
    pub payment_method: Option<String>,
    pub is_recurring: bool,
    pub is_anomaly: bool,
}

impl NewExpense {
    pub fn new(user_id: i64, title: String, amount: Decimal, date: NaiveDate, category_id: i64) -> Self {
        Self {
            user_id,
            title,
            description: None,
            amount,
            date,
            category_id,
            payment_method: None,
            is_recurring: false,
            is_anomaly: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if self.title.chars().count() > 255 {
            return Err("Title too long".to_string());
        }
        if let Some(method) = &self.payment_method {
            if method.chars().count() > 255 {
                return Err("Payment method too long".to_string());
            }
        }
        if self.amount.normalize().scale() > 2 {
            return Err(format!("Amount {} has more than 2 decimal places", self.amount));
        }
        if self.amount.abs() > MAX_AMOUNT {
            return Err(format!("Amount {} out of range", self.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn new_expense(amount: &str) -> NewExpense {
        NewExpense::new(
            1,
            "Groceries".to_string(),
            Decimal::from_str(amount).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            1,
        )
    }

    #[test]
    fn test_new_defaults_flags_to_false() {
        let expense = new_expense("10.00");
        assert!(!expense.is_recurring);
        assert!(!expense.is_anomaly);
        assert!(expense.description.is_none());
    }

    #[test]
    fn test_validate_amount_bounds() {
        assert!(new_expense("99999999.99").validate().is_ok());
        assert!(new_expense("-99999999.99").validate().is_ok());
        assert!(new_expense("10000000.00").validate().is_ok());
        assert!(new_expense("-50000000.50").validate().is_ok());
        assert!(new_expense("100000000.00").validate().is_err());
        assert!(new_expense("-100000000.00").validate().is_err());
    }

    #[test]
    fn test_validate_amount_precision() {
        assert!(new_expense("1.50").validate().is_ok());
        assert!(new_expense("1.500").validate().is_ok());
        let result = new_expense("1.505").validate();
        assert!(result.unwrap_err().contains("decimal places"));
    }

    #[test]
    fn test_validate_empty_title() {
        let mut expense = new_expense("5");
        expense.title = "".to_string();
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_max_amount_value() {
        assert_eq!(MAX_AMOUNT, Decimal::from_str("99999999.99").unwrap());
    }
}
