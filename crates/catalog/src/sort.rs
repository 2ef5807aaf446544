//! Ordering of projected products.

use core::cmp::Ordering;

use crate::discount::DiscountPolicy;
use crate::filter::{CategorySelection, SortMode};
use crate::product::Product;

/// Three-way comparator for one sort mode in one view.
///
/// Discount ordering only exists in the aggregate view; elsewhere it compares
/// every pair as equal, so a stable sort leaves the filtered order untouched.
#[derive(Debug, Clone, Copy)]
pub struct SortComparator<'a> {
    mode: SortMode,
    selection: &'a CategorySelection,
    policy: &'a DiscountPolicy,
}

impl<'a> SortComparator<'a> {
    pub fn new(mode: SortMode, selection: &'a CategorySelection, policy: &'a DiscountPolicy) -> Self {
        Self {
            mode,
            selection,
            policy,
        }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.mode {
            SortMode::PriceAscending => a.price.get().total_cmp(&b.price.get()),
            SortMode::PriceDescending => b.price.get().total_cmp(&a.price.get()),
            SortMode::Discount if self.mode.is_applicable(self.selection) => {
                let amount_a = self.policy.discount_amount(a.price, &a.category);
                let amount_b = self.policy.discount_amount(b.price, &b.category);
                amount_b.total_cmp(&amount_a)
            }
            SortMode::Discount => Ordering::Equal,
        }
    }

    /// Stable in-place sort; ties keep their incoming relative order.
    pub fn sort(&self, products: &mut [&Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Price;

    fn product(id: u64, price: f64, category: &str) -> Product {
        Product::new(id, format!("product {id}"), Price::new(price).unwrap(), category)
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn price_modes_order_by_list_price() {
        let policy = DiscountPolicy::default();
        let all = CategorySelection::All;
        let a = product(1, 10.0, "x");
        let b = product(2, 20.0, "x");

        let asc = SortComparator::new(SortMode::PriceAscending, &all, &policy);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(asc.compare(&b, &a), Ordering::Greater);
        assert_eq!(asc.compare(&a, &a), Ordering::Equal);

        let desc = SortComparator::new(SortMode::PriceDescending, &all, &policy);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn discount_mode_puts_largest_discount_first() {
        let policy = DiscountPolicy::default();
        let all = CategorySelection::All;
        let electronics = product(3, 80.0, "Electronics");
        let men = product(1, 100.0, "Men's clothing");
        let jewelery = product(2, 50.0, "Jewelery");

        let mut list = vec![&electronics, &jewelery, &men];
        SortComparator::new(SortMode::Discount, &all, &policy).sort(&mut list);
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn discount_mode_is_a_no_op_outside_aggregate_view() {
        let policy = DiscountPolicy::default();
        let only = CategorySelection::only("Men's clothing");
        let cheap = product(1, 10.0, "Men's clothing");
        let pricey = product(2, 90.0, "Men's clothing");

        let comparator = SortComparator::new(SortMode::Discount, &only, &policy);
        assert_eq!(comparator.compare(&cheap, &pricey), Ordering::Equal);

        let mut list = vec![&cheap, &pricey];
        comparator.sort(&mut list);
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let policy = DiscountPolicy::default();
        let all = CategorySelection::All;
        let first = product(7, 15.0, "a");
        let second = product(3, 15.0, "b");
        let third = product(5, 15.0, "c");

        let mut list = vec![&first, &second, &third];
        SortComparator::new(SortMode::PriceDescending, &all, &policy).sort(&mut list);
        assert_eq!(ids(&list), vec![7, 3, 5]);
    }
}
