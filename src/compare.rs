use core::cmp::Ordering;
use ordered_float::{FloatCore, OrderedFloat};

/// Total order used by a tree to arrange its keys.
///
/// Implemented for [`Natural`] (the key's own `Ord`), [`FloatOrder`] and any
/// closure `Fn(&K, &K) -> Ordering`.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders floating point keys totally, with NaN above positive infinity.
///
/// Uses `OrderedFloat` so that `f32` and `f64` keys can be stored without a
/// wrapper type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl<T: FloatCore> Comparator<T> for FloatOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        OrderedFloat(*a).cmp(&OrderedFloat(*b))
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_float_order_handles_nan_and_infinity() {
        assert_eq!(FloatOrder.compare(&f64::NAN, &f64::INFINITY), Ordering::Greater);
        assert_eq!(FloatOrder.compare(&f64::NEG_INFINITY, &-1e300), Ordering::Less);
        assert_eq!(FloatOrder.compare(&f64::NAN, &f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_closure_comparator() {
        let descending = |a: &u32, b: &u32| b.cmp(a);
        assert_eq!(descending.compare(&3, &2), Ordering::Less);
    }
}
