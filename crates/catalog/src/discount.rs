//! Category-keyword discount policy.
//!
//! Discounts are derived on demand from a product's category; they are never
//! stored on a [`Product`](crate::Product), so changing the rule table re-prices
//! the whole catalog without a re-fetch.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

use crate::product::{Category, Price};

/// One `(keyword, rate)` entry of the discount table.
///
/// The keyword is stored lower-cased and matched as a substring of the
/// lower-cased category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscountRule")]
pub struct DiscountRule {
    keyword: String,
    rate: f64,
}

#[derive(Deserialize)]
struct RawDiscountRule {
    keyword: String,
    rate: f64,
}

impl TryFrom<RawDiscountRule> for DiscountRule {
    type Error = DomainError;

    fn try_from(raw: RawDiscountRule) -> Result<Self, Self::Error> {
        DiscountRule::new(raw.keyword, raw.rate)
    }
}

impl DiscountRule {
    pub fn new(keyword: impl Into<String>, rate: f64) -> DomainResult<Self> {
        let keyword = keyword.into().trim().to_lowercase();
        if keyword.is_empty() {
            return Err(DomainError::validation("discount keyword cannot be empty"));
        }
        if !(0.0..1.0).contains(&rate) {
            return Err(DomainError::validation(format!(
                "discount rate for '{keyword}' must be in [0, 1) (got {rate})"
            )));
        }
        Ok(Self {
            keyword,
            rate: rate + 0.0,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn matches(&self, lowered_category: &str) -> bool {
        lowered_category.contains(self.keyword.as_str())
    }
}

impl ValueObject for DiscountRule {}

/// Serializable, versioned form of the rule table (e.g. a JSON config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTable {
    pub version: u32,
    pub rules: Vec<DiscountRule>,
}

impl DiscountTable {
    /// Version 1 of the storefront's rules: jewellery 10%, then anything "men" 30%.
    pub fn builtin() -> Self {
        Self {
            version: 1,
            rules: vec![
                DiscountRule {
                    keyword: "jewel".to_string(),
                    rate: 0.1,
                },
                DiscountRule {
                    keyword: "men".to_string(),
                    rate: 0.3,
                },
            ],
        }
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Ordered keyword → rate policy. First matching keyword wins; no match is 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    version: u32,
    rules: Vec<DiscountRule>,
}

impl DiscountPolicy {
    pub fn new(version: u32, rules: Vec<DiscountRule>) -> Self {
        Self { version, rules }
    }

    pub fn from_table(table: DiscountTable) -> Self {
        Self::new(table.version, table.rules)
    }

    /// A policy that never discounts anything.
    pub fn none() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn to_table(&self) -> DiscountTable {
        DiscountTable {
            version: self.version,
            rules: self.rules.clone(),
        }
    }

    /// Discount rate in `[0, 1)` for a category label. Total; never fails.
    pub fn discount_rate(&self, category: &Category) -> f64 {
        let lowered = category.as_str().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(0.0, DiscountRule::rate)
    }

    /// Display price after discount, rounded half away from zero to cents.
    ///
    /// Never exceeds the list price, even when rounding a sub-cent price would
    /// push it up.
    pub fn discounted_price(&self, price: Price, category: &Category) -> Price {
        let raw = price.get() * (1.0 - self.discount_rate(category));
        Price::from_checked(round_to_cents(raw).min(price.get()))
    }

    /// Unrounded discount amount; used for ordering only, never displayed.
    pub fn discount_amount(&self, price: Price, category: &Category) -> f64 {
        price.get() * self.discount_rate(category)
    }

    /// Whole-percent badge value (`30` for "30% OFF"), or `None` without a discount.
    pub fn badge_percent(&self, category: &Category) -> Option<u32> {
        let rate = self.discount_rate(category);
        (rate > 0.0).then(|| (rate * 100.0).round() as u32)
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::from_table(DiscountTable::builtin())
    }
}

/// Rounds the exact stored value of a non-negative `value` to cents, half away
/// from zero.
///
/// `value * 100.0` is itself rounded (0.59499.. becomes 59.5), so the cent and
/// half-cent boundaries are tested with `mul_add`, whose single rounding keeps
/// the sign of `value * 100 - boundary`.
fn round_to_cents(value: f64) -> f64 {
    const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

    let scaled = value * 100.0;
    if !scaled.is_finite() || scaled >= EXACT_INTEGER_LIMIT {
        return value;
    }

    let mut cents = scaled.floor();
    // The product may have rounded up onto the next whole cent.
    if value.mul_add(100.0, -cents) < 0.0 {
        cents -= 1.0;
    }
    if value.mul_add(100.0, -(cents + 0.5)) >= 0.0 {
        cents += 1.0;
    }
    cents / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        Price::new(v).unwrap()
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.discount_rate(&Category::from("MENSWEAR")), 0.3);
        assert_eq!(policy.discount_rate(&Category::from("Men's clothing")), 0.3);
        assert_eq!(policy.discount_rate(&Category::from("women's clothing")), 0.3);
        assert_eq!(policy.discount_rate(&Category::from("Jewelery")), 0.1);
        assert_eq!(policy.discount_rate(&Category::from("electronics")), 0.0);
        assert_eq!(policy.discount_rate(&Category::from("")), 0.0);
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = DiscountPolicy::default();
        // Contains both "jewel" and "men"; "jewel" is listed first.
        assert_eq!(policy.discount_rate(&Category::from("Men's Jewellery")), 0.1);

        let reordered = DiscountPolicy::new(
            2,
            vec![
                DiscountRule::new("men", 0.3).unwrap(),
                DiscountRule::new("jewel", 0.1).unwrap(),
            ],
        );
        assert_eq!(reordered.discount_rate(&Category::from("Men's Jewellery")), 0.3);
    }

    #[test]
    fn discounted_price_rounds_to_cents() {
        let policy = DiscountPolicy::default();
        let men = Category::from("men's clothing");
        assert_eq!(policy.discounted_price(price(100.0), &men).get(), 70.0);
        assert_eq!(policy.discounted_price(price(22.3), &men).get(), 15.61);
        assert_eq!(policy.discounted_price(price(50.0), &Category::from("jewelery")).get(), 45.0);
        assert_eq!(policy.discounted_price(price(80.0), &Category::from("electronics")).get(), 80.0);
    }

    #[test]
    fn half_cents_round_on_the_exact_stored_value() {
        let policy = DiscountPolicy::default();
        let men = Category::from("men's clothing");
        let jewelery = Category::from("jewelery");

        // Raw 0.105, 0.175, 0.595 and 0.855 are all stored just below the half cent.
        assert_eq!(policy.discounted_price(price(0.15), &men).get(), 0.10);
        assert_eq!(policy.discounted_price(price(0.25), &men).get(), 0.17);
        assert_eq!(policy.discounted_price(price(0.85), &men).get(), 0.59);
        assert_eq!(policy.discounted_price(price(0.95), &jewelery).get(), 0.85);

        // An exactly representable half cent rounds away from zero.
        let half = DiscountPolicy::new(9, vec![DiscountRule::new("sale", 0.5).unwrap()]);
        assert_eq!(half.discounted_price(price(0.25), &Category::from("sale")).get(), 0.13);
    }

    #[test]
    fn cent_prices_round_like_exact_decimal_expansion() {
        // Formatting with enough digits prints the stored double exactly; the
        // third fractional digit then decides the half-away-from-zero rounding.
        fn reference(raw: f64) -> f64 {
            let text = format!("{raw:.80}");
            let (whole, frac) = text.split_once('.').unwrap();
            let cents: u64 = format!("{whole}{}", &frac[..2]).parse().unwrap();
            let bump = u64::from(frac.as_bytes()[2] >= b'5');
            (cents + bump) as f64 / 100.0
        }

        let policy = DiscountPolicy::default();
        let categories = [Category::from("men's clothing"), Category::from("jewelery")];
        let mut mismatches = Vec::new();
        for cents in 1..=100_000u32 {
            let list = price(f64::from(cents) / 100.0);
            for category in &categories {
                let raw = list.get() * (1.0 - policy.discount_rate(category));
                let got = policy.discounted_price(list, category).get();
                if got != reference(raw) {
                    mismatches.push((list.get(), raw, got));
                }
            }
        }
        assert!(mismatches.is_empty(), "first mismatches: {:?}", &mismatches[..mismatches.len().min(5)]);
    }

    #[test]
    fn discounted_price_never_exceeds_list_price() {
        let policy = DiscountPolicy::none();
        let p = price(0.005);
        assert!(policy.discounted_price(p, &Category::from("anything")).get() <= p.get());
    }

    #[test]
    fn discount_amount_is_unrounded() {
        let policy = DiscountPolicy::default();
        let amount = policy.discount_amount(price(22.3), &Category::from("men's clothing"));
        assert!((amount - 6.69).abs() < 1e-9);
        assert_eq!(policy.discount_amount(price(50.0), &Category::from("Jewelery")), 5.0);
    }

    #[test]
    fn badge_percent_only_for_discounted_categories() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.badge_percent(&Category::from("men's clothing")), Some(30));
        assert_eq!(policy.badge_percent(&Category::from("jewelery")), Some(10));
        assert_eq!(policy.badge_percent(&Category::from("electronics")), None);
    }

    #[test]
    fn rule_validation() {
        assert!(matches!(DiscountRule::new("  ", 0.1), Err(DomainError::Validation(_))));
        assert!(matches!(DiscountRule::new("sale", 1.0), Err(DomainError::Validation(_))));
        assert!(matches!(DiscountRule::new("sale", -0.1), Err(DomainError::Validation(_))));
        assert!(matches!(DiscountRule::new("sale", f64::NAN), Err(DomainError::Validation(_))));

        let rule = DiscountRule::new(" Sale ", 0.25).unwrap();
        assert_eq!(rule.keyword(), "sale");
        assert_eq!(rule.rate(), 0.25);
    }

    #[test]
    fn table_round_trips_through_json_and_validates() {
        let json = r#"{"version": 3, "rules": [{"keyword": "Kids", "rate": 0.2}]}"#;
        let table: DiscountTable = serde_json::from_str(json).unwrap();
        let policy = DiscountPolicy::from_table(table);
        assert_eq!(policy.version(), 3);
        assert_eq!(policy.discount_rate(&Category::from("kids' shoes")), 0.2);

        let bad = r#"{"version": 4, "rules": [{"keyword": "kids", "rate": 1.5}]}"#;
        assert!(serde_json::from_str::<DiscountTable>(bad).is_err());
    }

    #[test]
    fn builtin_table_is_version_one() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.version(), 1);
        assert_eq!(policy.to_table(), DiscountTable::builtin());
        assert_eq!(policy.rules()[0].keyword(), "jewel");
    }
}
