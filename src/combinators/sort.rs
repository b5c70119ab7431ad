//! Eager, stable sorting
//!
//! Sorting needs every item before the first one can be emitted, so each
//! cursor of a sorted sequence buffers the whole upstream. Never use these
//! on an infinite sequence.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::seq::{Item, Seq, SliceCursor};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Exact numeric view of an item
///
/// Integers keep their full width, so values past 2^53 never collapse into
/// each other. The order is total: NaN sorts after every other number and
/// `-0.0` equals `0.0`.
#[derive(Debug, Clone, Copy)]
pub enum NumericKey {
    /// Any signed integer
    Int(i128),
    /// Any unsigned integer
    UInt(u128),
    /// Any float
    Float(f64),
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use NumericKey::{Float, Int, UInt};
        match (*self, *other) {
            (Int(a), Int(b)) => a.cmp(&b),
            (UInt(a), UInt(b)) => a.cmp(&b),
            (Float(a), Float(b)) => float_cmp(a, b),
            (Int(a), UInt(b)) => int_vs_uint(a, b),
            (UInt(a), Int(b)) => int_vs_uint(b, a).reverse(),
            (Float(a), Int(b)) => float_vs_int(a, b),
            (Int(a), Float(b)) => float_vs_int(b, a).reverse(),
            (Float(a), UInt(b)) => float_vs_uint(a, b),
            (UInt(a), Float(b)) => float_vs_uint(b, a).reverse(),
        }
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NumericKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericKey {}

fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn int_vs_uint(a: i128, b: u128) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u128).cmp(&b)
    }
}

/// Sign of the fractional part, for ties on the integral part
fn fraction_cmp(a: f64, whole: f64) -> Ordering {
    (a - whole).partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

fn float_vs_int(a: f64, b: i128) -> Ordering {
    if a.is_nan() {
        return Ordering::Greater;
    }
    let whole = a.trunc();
    // i128::MIN and i128::MAX + 1 are exact in f64
    if whole >= i128::MAX as f64 {
        return Ordering::Greater;
    }
    if whole < i128::MIN as f64 {
        return Ordering::Less;
    }
    (whole as i128)
        .cmp(&b)
        .then_with(|| fraction_cmp(a, whole))
}

fn float_vs_uint(a: f64, b: u128) -> Ordering {
    if a.is_nan() {
        return Ordering::Greater;
    }
    if a < 0.0 {
        return Ordering::Less;
    }
    let whole = a.trunc();
    if whole >= u128::MAX as f64 {
        return Ordering::Greater;
    }
    (whole as u128)
        .cmp(&b)
        .then_with(|| fraction_cmp(a, whole))
}

/// Keys used by [`Seq::sorted_auto`]
///
/// If the first buffered item has a numeric key the sequence is compared
/// numerically; otherwise every item is compared by its text key.
pub trait AutoSortKey {
    /// Numeric view of the item, if it has one
    fn numeric_key(&self) -> Option<NumericKey> {
        None
    }

    /// Text fallback
    fn text_key(&self) -> String;
}

macro_rules! numeric_sort_key {
    ($variant:ident as $wide:ty: $($ty:ty),* $(,)?) => {
        $(
            impl AutoSortKey for $ty {
                fn numeric_key(&self) -> Option<NumericKey> {
                    Some(NumericKey::$variant(*self as $wide))
                }

                fn text_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_sort_key!(Int as i128: i8, i16, i32, i64, i128, isize);
numeric_sort_key!(UInt as u128: u8, u16, u32, u64, u128, usize);
numeric_sort_key!(Float as f64: f32, f64);

impl AutoSortKey for String {
    fn text_key(&self) -> String {
        self.clone()
    }
}

impl AutoSortKey for &str {
    fn text_key(&self) -> String {
        (*self).to_string()
    }
}

impl AutoSortKey for char {
    fn text_key(&self) -> String {
        self.to_string()
    }
}

impl AutoSortKey for bool {
    fn text_key(&self) -> String {
        self.to_string()
    }
}

impl<T: AutoSortKey> AutoSortKey for Option<T> {
    fn numeric_key(&self) -> Option<NumericKey> {
        self.as_ref().and_then(AutoSortKey::numeric_key)
    }

    fn text_key(&self) -> String {
        self.as_ref().map(AutoSortKey::text_key).unwrap_or_default()
    }
}

/// Numeric comparison; `order` applies among numbers only
fn numeric_cmp<T: AutoSortKey>(a: &T, b: &T, order: SortOrder) -> Ordering {
    match (a.numeric_key(), b.numeric_key()) {
        (Some(x), Some(y)) => order.apply(x.cmp(&y)),
        // Items without a number sort after the numbers in either direction
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => order.apply(a.text_key().cmp(&b.text_key())),
    }
}

impl<T: Item> Seq<T> {
    /// Stable sort with an explicit comparator
    pub fn sorted_by<C>(&self, compare: C) -> Seq<T>
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let compare = Arc::new(compare);
        Seq::lazy(move || {
            let mut buffer = upstream.to_vec();
            buffer.sort_by(|a, b| compare(a, b));
            Box::new(SliceCursor::new(buffer.into()))
        })
    }

    /// Stable sort by natural order
    pub fn sorted(&self, order: SortOrder) -> Seq<T>
    where
        T: Ord,
    {
        self.sorted_by(move |a, b| order.apply(a.cmp(b)))
    }

    /// Stable sort by an extracted key
    pub fn sorted_by_key<K, F>(&self, key: F, order: SortOrder) -> Seq<T>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.sorted_by(move |a, b| order.apply(key(a).cmp(&key(b))))
    }

    /// Stable sort with the comparator picked from the first item
    ///
    /// Numeric if the first item has a numeric key, text otherwise.
    pub fn sorted_auto(&self, order: SortOrder) -> Seq<T>
    where
        T: AutoSortKey,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        Seq::lazy(move || {
            let mut buffer = upstream.to_vec();
            let numeric = buffer
                .first()
                .and_then(AutoSortKey::numeric_key)
                .is_some();
            if numeric {
                buffer.sort_by(|a, b| numeric_cmp(a, b, order));
            } else {
                let mut keyed: Vec<(String, T)> = buffer
                    .into_iter()
                    .map(|item| (item.text_key(), item))
                    .collect();
                keyed.sort_by(|a, b| order.apply(a.0.cmp(&b.0)));
                buffer = keyed.into_iter().map(|(_, item)| item).collect();
            }
            Box::new(SliceCursor::new(buffer.into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_natural() {
        let seq = Seq::from_vec(vec![3, 1, 2]);
        assert_eq!(seq.sorted(SortOrder::Ascending).to_vec(), vec![1, 2, 3]);
        assert_eq!(seq.sorted(SortOrder::Descending).to_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn test_sorted_by_key_is_stable() {
        let seq = Seq::from_vec(vec![("b", 1), ("a", 2), ("c", 1), ("d", 2)]);
        let by_count = seq.sorted_by_key(|pair| pair.1, SortOrder::Ascending);
        assert_eq!(
            by_count.to_vec(),
            vec![("b", 1), ("c", 1), ("a", 2), ("d", 2)]
        );

        let desc = seq.sorted_by_key(|pair| pair.1, SortOrder::Descending);
        assert_eq!(desc.to_vec(), vec![("a", 2), ("d", 2), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_sorted_auto_numeric() {
        // Text order would put 10 before 9
        let seq = Seq::from_vec(vec![10, 9, 100, 1]);
        assert_eq!(seq.sorted_auto(SortOrder::Ascending).to_vec(), vec![1, 9, 10, 100]);

        let floats = Seq::from_vec(vec![2.5, -1.0, 0.25]);
        assert_eq!(
            floats.sorted_auto(SortOrder::Descending).to_vec(),
            vec![2.5, 0.25, -1.0]
        );
    }

    #[test]
    fn test_sorted_auto_text_fallback() {
        let seq = Seq::from_vec(vec!["pear", "Apple", "fig"]);
        assert_eq!(
            seq.sorted_auto(SortOrder::Ascending).to_vec(),
            vec!["Apple", "fig", "pear"]
        );
        assert_eq!(
            seq.sorted_auto(SortOrder::Descending).to_vec(),
            vec!["pear", "fig", "Apple"]
        );
    }

    #[test]
    fn test_sorted_auto_mixed_options() {
        let seq = Seq::from_vec(vec![Some(3), None, Some(1)]);
        assert_eq!(
            seq.sorted_auto(SortOrder::Ascending).to_vec(),
            vec![Some(1), Some(3), None]
        );
    }

    #[test]
    fn test_sorted_auto_descending_keeps_missing_last() {
        let seq = Seq::from_vec(vec![Some(3), None, Some(1), Some(7)]);
        assert_eq!(
            seq.sorted_auto(SortOrder::Descending).to_vec(),
            vec![Some(7), Some(3), Some(1), None]
        );
    }

    #[test]
    fn test_sorted_auto_floats_with_nan() {
        let values: Vec<f64> = (0..64)
            .map(|i| if i % 5 == 0 { f64::NAN } else { f64::from(64 - i) })
            .collect();
        let sorted = Seq::from_vec(values).sorted_auto(SortOrder::Ascending).to_vec();

        let numbers: Vec<f64> = sorted.iter().copied().filter(|x| !x.is_nan()).collect();
        assert!(numbers.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(numbers.len(), 51);
        assert!(sorted[51..].iter().all(|x| x.is_nan()));

        let desc = Seq::from_vec(vec![1.5, f64::NAN, -2.0]).sorted_auto(SortOrder::Descending);
        let desc = desc.to_vec();
        assert!(desc[0].is_nan());
        assert_eq!(&desc[1..], &[1.5, -2.0]);
    }

    #[test]
    fn test_sorted_auto_wide_integers_stay_exact() {
        let big = 1u64 << 60;
        let seq = Seq::from_vec(vec![big + 1, big, big + 2]);
        assert_eq!(
            seq.sorted_auto(SortOrder::Ascending).to_vec(),
            vec![big, big + 1, big + 2]
        );

        let signed = Seq::from_vec(vec![i64::MAX, i64::MAX - 1, i64::MIN]);
        assert_eq!(
            signed.sorted_auto(SortOrder::Ascending).to_vec(),
            vec![i64::MIN, i64::MAX - 1, i64::MAX]
        );
    }

    #[test]
    fn test_numeric_key_mixed_variants() {
        use NumericKey::{Float, Int, UInt};
        assert_eq!(Int(-1).cmp(&UInt(0)), Ordering::Less);
        assert_eq!(UInt(u128::MAX).cmp(&Int(i128::MAX)), Ordering::Greater);
        assert_eq!(Float(2.5).cmp(&Int(2)), Ordering::Greater);
        assert_eq!(Float(-0.5).cmp(&Int(0)), Ordering::Less);
        assert_eq!(Float(3.0), UInt(3));
        assert_eq!(Float(-0.0), Float(0.0));
        assert_eq!(Float(f64::NAN).cmp(&UInt(u128::MAX)), Ordering::Greater);
        assert_eq!(Float(-1.0).cmp(&UInt(0)), Ordering::Less);
    }

    #[test]
    fn test_sort_is_deferred() {
        let seq = Seq::from_fn(|| 0u32..).sorted(SortOrder::Ascending);
        // Building is fine; only a cursor would hang
        assert!(!seq.is_materialized());
    }
}
