//! Stipend rate rules and amount calculation.

use serde::{Deserialize, Serialize};

use crate::domain::status::normalize_token;

/// Daily stipend rate for a provider role/category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateRule {
    pub role: String,
    pub rate: f64,
    pub currency: String,
}

/// Amount computed for one prestataire.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ComputedAmount {
    pub amount: f64,
    pub currency: String,
}

/// Finds the rate rule matching a provider category.
///
/// Matching is accent- and case-insensitive: an exact normalized match wins,
/// otherwise the first rule whose role is a substring of the category (or the
/// reverse) is used.
pub fn match_rule<'a>(rules: &'a [RateRule], category: &str) -> Option<&'a RateRule> {
    let needle = normalize_token(category);
    if needle.is_empty() {
        return None;
    }

    if let Some(rule) = rules
        .iter()
        .find(|r| normalize_token(&r.role) == needle)
    {
        return Some(rule);
    }

    rules.iter().find(|r| {
        let role = normalize_token(&r.role);
        !role.is_empty() && (needle.contains(&role) || role.contains(&needle))
    })
}

/// `amount = presence_days × rate`, in the rule's currency.
pub fn compute_amount(rule: &RateRule, presence_days: i32) -> ComputedAmount {
    ComputedAmount {
        amount: f64::from(presence_days.max(0)) * rule.rate,
        currency: rule.currency.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<RateRule> {
        vec![
            RateRule {
                role: "Infirmier Titulaire".into(),
                rate: 5.0,
                currency: "USD".into(),
            },
            RateRule {
                role: "Relais Communautaire".into(),
                rate: 2.5,
                currency: "CDF".into(),
            },
        ]
    }

    #[test]
    fn exact_match_ignores_case_and_accents() {
        let rules = rules();
        let rule = match_rule(&rules, "infirmier titulaire").unwrap();
        assert_eq!(rule.currency, "USD");
        let rule = match_rule(&rules, "INFIRMIER TITULAIRE ").unwrap();
        assert_eq!(rule.rate, 5.0);
    }

    #[test]
    fn substring_match_is_fallback() {
        let rules = rules();
        let rule = match_rule(&rules, "Relais").unwrap();
        assert_eq!(rule.currency, "CDF");
    }

    #[test]
    fn no_match_for_unknown_role() {
        assert!(match_rule(&rules(), "Chauffeur").is_none());
        assert!(match_rule(&rules(), "").is_none());
    }

    #[test]
    fn amount_is_days_times_rate() {
        let rules = rules();
        let rule = match_rule(&rules, "Infirmier Titulaire").unwrap();
        let computed = compute_amount(rule, 10);
        assert_eq!(computed.amount, 50.0);
        assert_eq!(computed.currency, "USD");
    }

    #[test]
    fn negative_presence_days_yield_zero() {
        let rules = rules();
        let computed = compute_amount(&rules[0], -4);
        assert_eq!(computed.amount, 0.0);
    }
}
