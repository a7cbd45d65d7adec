//! First-class total orders.
//!
//! Attribute types carry no intrinsic order as far as relations are concerned:
//! every set, map, and relation is built from an explicit `Order<T>` value
//! that it keeps for its whole lifetime. The same type may be ordered in
//! several ways (e.g. natural and reversed) side by side.
//!
//! Each order carries a `label`. Labels are the caller-declared identity of an
//! ordering; two orders with equal labels are treated as compatible by the
//! checked relation operations. Comparators themselves are never compared.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type CmpFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// A cloneable, thread-safe comparator plus its label.
pub struct Order<T: ?Sized> {
    cmp: Arc<CmpFn<T>>,
    label: Arc<str>,
}

impl<T: ?Sized> Clone for Order<T> {
    fn clone(&self) -> Self {
        Self {
            cmp: Arc::clone(&self.cmp),
            label: Arc::clone(&self.label),
        }
    }
}

impl<T: ?Sized> Order<T> {
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }

    /// Equality as induced by this order.
    pub fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both orders declare the same identity.
    pub fn same_label(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cmp, &other.cmp) || self.label == other.label
    }
}

impl<T: ?Sized + 'static> Order<T> {
    /// Build an order from an arbitrary comparator.
    ///
    /// The comparator must be a total order; relations rely on it for both
    /// deduplication and index keys.
    pub fn by<F>(label: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            cmp: Arc::new(f),
            label: label.into(),
        }
    }

    /// Order values by a derived key with a natural order.
    pub fn by_key<K, F>(label: impl Into<Arc<str>>, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::by(label, move |a: &T, b: &T| key(a).cmp(&key(b)))
    }

    /// The dual of this order.
    pub fn reverse(&self) -> Self {
        let inner = self.clone();
        Self::by(format!("rev({})", self.label), move |a: &T, b: &T| {
            inner.compare(b, a)
        })
    }
}

impl<T: Ord + ?Sized + 'static> Order<T> {
    /// The type's own `Ord`, labelled by type name.
    pub fn natural() -> Self {
        Self::by(
            format!("natural<{}>", std::any::type_name::<T>()),
            |a: &T, b: &T| a.cmp(b),
        )
    }
}

impl<A: 'static, B: 'static> Order<(A, B)> {
    /// Lexicographic combination of two attribute orders.
    pub fn pair(oa: &Order<A>, ob: &Order<B>) -> Self {
        let (a, b) = (oa.clone(), ob.clone());
        Self::by(
            format!("({},{})", oa.label(), ob.label()),
            move |x: &(A, B), y: &(A, B)| {
                a.compare(&x.0, &y.0).then_with(|| b.compare(&x.1, &y.1))
            },
        )
    }
}

impl<A: 'static, B: 'static, C: 'static> Order<(A, B, C)> {
    /// Lexicographic combination of three attribute orders.
    pub fn triple(oa: &Order<A>, ob: &Order<B>, oc: &Order<C>) -> Self {
        let (a, b, c) = (oa.clone(), ob.clone(), oc.clone());
        Self::by(
            format!("({},{},{})", oa.label(), ob.label(), oc.label()),
            move |x: &(A, B, C), y: &(A, B, C)| {
                a.compare(&x.0, &y.0)
                    .then_with(|| b.compare(&x.1, &y.1))
                    .then_with(|| c.compare(&x.2, &y.2))
            },
        )
    }
}

impl<T: ?Sized> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Order").field(&&*self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse() {
        let o = Order::<i32>::natural();
        assert_eq!(o.compare(&1, &2), Ordering::Less);
        let r = o.reverse();
        assert_eq!(r.compare(&1, &2), Ordering::Greater);
        assert_eq!(r.label(), format!("rev({})", o.label()));
        assert!(o.equal(&3, &3));
    }

    #[test]
    fn by_key_orders_by_derived_key() {
        let by_len = Order::<String>::by_key("len", |s: &String| s.len());
        assert_eq!(by_len.compare(&"ccc".into(), &"a".into()), Ordering::Greater);
        assert!(by_len.equal(&"ab".into(), &"cd".into()));
    }

    #[test]
    fn pair_is_lexicographic() {
        let o = Order::pair(&Order::<i32>::natural(), &Order::<&'static str>::natural());
        assert_eq!(o.compare(&(1, "z"), &(2, "a")), Ordering::Less);
        assert_eq!(o.compare(&(1, "b"), &(1, "a")), Ordering::Greater);
        assert!(o.label().starts_with("(natural<i32>,"));
    }

    #[test]
    fn triple_uses_each_position() {
        let o = Order::triple(
            &Order::<i32>::natural(),
            &Order::<i32>::natural().reverse(),
            &Order::<bool>::natural(),
        );
        assert_eq!(o.compare(&(1, 5, false), &(1, 4, false)), Ordering::Less);
        assert_eq!(o.compare(&(1, 4, true), &(1, 4, false)), Ordering::Greater);
        assert_eq!(o.compare(&(1, 4, true), &(1, 4, true)), Ordering::Equal);
    }

    #[test]
    fn labels_decide_compatibility() {
        let a = Order::<i32>::natural();
        let b = Order::<i32>::natural();
        let c = Order::<i32>::by("custom", |x: &i32, y: &i32| x.cmp(y));
        assert!(a.same_label(&b));
        assert!(!a.same_label(&c));
        assert!(c.same_label(&c.clone()));
    }
}
