//! Capability traits that gate which assertions a value type may use.
//!
//! Every assertion in [`UnitTest`](crate::UnitTest) is bounded by one of the
//! traits below, so asking for an assertion a type cannot support is a
//! compile error rather than a runtime surprise.
//!
//! Comparing a type that has no `PartialEq`:
//!
//! ```compile_fail
//! use unitcheck::UnitTest;
//!
//! struct Opaque;
//!
//! let t = UnitTest::<Opaque>::new();
//! t.assert_equal(&Opaque, &Opaque);
//! ```
//!
//! Asking whether a `String` is true:
//!
//! ```compile_fail
//! use unitcheck::UnitTest;
//!
//! let t = UnitTest::<String>::new();
//! t.assert_true(&"yes".to_string());
//! ```
//!
//! Membership in something that cannot be iterated:
//!
//! ```compile_fail
//! use unitcheck::UnitTest;
//!
//! let t = UnitTest::<i32>::new();
//! t.assert_in(&3, &42_i32);
//! ```

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::BuildHasher;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// Types that support `==` with themselves.
pub trait EqualityCapable: PartialEq {}

impl<T: PartialEq + ?Sized> EqualityCapable for T {}

/// Types that support `!=` with themselves.
///
/// `PartialEq` provides both operators, so this has the same implementors
/// as [`EqualityCapable`]; it exists so bounds read like the assertion.
pub trait InequalityCapable: PartialEq {}

impl<T: PartialEq + ?Sized> InequalityCapable for T {}

/// Explicit conversion to `bool`.
///
/// Numbers are true when nonzero, `Option` is true when `Some`.
///
/// ```
/// use unitcheck::BooleanConvertible;
///
/// struct Level(u8);
///
/// impl BooleanConvertible for Level {
///     fn to_bool(&self) -> bool {
///         self.0 != 0
///     }
/// }
///
/// assert!(Level(3).to_bool());
/// assert!(!Level(0).to_bool());
/// ```
pub trait BooleanConvertible {
    /// Converts the value to its truth value.
    fn to_bool(&self) -> bool;
}

impl BooleanConvertible for bool {
    fn to_bool(&self) -> bool {
        *self
    }
}

macro_rules! impl_boolean_convertible_numeric {
    ($zero:expr => $($ty:ty),+) => {
        $(
            impl BooleanConvertible for $ty {
                fn to_bool(&self) -> bool {
                    *self != $zero
                }
            }
        )+
    };
}

impl_boolean_convertible_numeric!(
    0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
impl_boolean_convertible_numeric!(0.0 => f32, f64);

impl<U> BooleanConvertible for Option<U> {
    fn to_bool(&self) -> bool {
        self.is_some()
    }
}

impl<U: BooleanConvertible + ?Sized> BooleanConvertible for &U {
    fn to_bool(&self) -> bool {
        (**self).to_bool()
    }
}

impl<U: BooleanConvertible + ?Sized> BooleanConvertible for Box<U> {
    fn to_bool(&self) -> bool {
        (**self).to_bool()
    }
}

/// The value a type treats as "null" for the null-value assertions.
///
/// A value is null when it compares equal to [`NullSentinel::null`].
pub trait NullSentinel {
    /// Returns the null value of the type.
    fn null() -> Self;
}

macro_rules! impl_null_sentinel {
    ($($ty:ty => $null:expr),+ $(,)?) => {
        $(
            impl NullSentinel for $ty {
                fn null() -> Self {
                    $null
                }
            }
        )+
    };
}

impl_null_sentinel!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
    bool => false,
    char => '\0',
    String => String::new(),
);

impl<U> NullSentinel for Vec<U> {
    fn null() -> Self {
        Vec::new()
    }
}

impl<U> NullSentinel for Option<U> {
    fn null() -> Self {
        None
    }
}

/// Read-only iteration over the elements of a container.
///
/// Used for the container argument of membership assertions.
pub trait IterableContainer {
    /// Element type yielded by the container.
    type Element;

    /// Iterates the elements in the container's own order.
    fn elements(&self) -> impl Iterator<Item = &Self::Element>;
}

impl<E> IterableContainer for [E] {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E, const N: usize> IterableContainer for [E; N] {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> IterableContainer for Vec<E> {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> IterableContainer for VecDeque<E> {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> IterableContainer for LinkedList<E> {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E, S: BuildHasher> IterableContainer for HashSet<E, S> {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> IterableContainer for BTreeSet<E> {
    type Element = E;

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<C: IterableContainer + ?Sized> IterableContainer for &C {
    type Element = C::Element;

    fn elements(&self) -> impl Iterator<Item = &C::Element> {
        (**self).elements()
    }
}

/// Shared-ownership handles whose identity is the address they point to.
pub trait SharedHandle<T: ?Sized>: Deref<Target = T> {
    /// Address of the shared allocation.
    fn target(&self) -> *const T;
}

impl<T: ?Sized> SharedHandle<T> for Rc<T> {
    fn target(&self) -> *const T {
        Rc::as_ptr(self)
    }
}

impl<T: ?Sized> SharedHandle<T> for Arc<T> {
    fn target(&self) -> *const T {
        Arc::as_ptr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count<C: IterableContainer + ?Sized>(c: &C) -> usize {
        c.elements().count()
    }

    #[test]
    fn numeric_truthiness_is_nonzero() {
        assert!(10_i32.to_bool());
        assert!(!0_u8.to_bool());
        assert!((-0.5_f64).to_bool());
        assert!(!0.0_f32.to_bool());
    }

    #[test]
    fn option_truthiness_is_some() {
        assert!(Some(0).to_bool());
        assert!(!None::<i32>.to_bool());
    }

    #[test]
    fn references_forward_truthiness() {
        let v = 7_i64;
        let r = &v;
        assert!(r.to_bool());
        assert!(!Box::new(false).to_bool());
    }

    #[test]
    fn null_sentinels_are_empty_values() {
        assert_eq!(i32::null(), 0);
        assert_eq!(String::null(), "");
        assert!(Vec::<u8>::null().is_empty());
        assert_eq!(Option::<u8>::null(), None);
        assert!(!bool::null());
    }

    #[test]
    fn containers_iterate_all_elements() {
        let v = vec![1, 2, 3];
        let arr = [1, 2, 3, 4];
        let dq: VecDeque<i32> = (0..5).collect();
        let set: HashSet<i32> = [1, 2].into_iter().collect();
        let tree: BTreeSet<i32> = [9].into_iter().collect();
        let list: LinkedList<i32> = LinkedList::new();

        assert_eq!(count(&v), 3);
        assert_eq!(count(&arr), 4);
        assert_eq!(count(&v[..1]), 1);
        assert_eq!(count(&dq), 5);
        assert_eq!(count(&set), 2);
        assert_eq!(count(&tree), 1);
        assert_eq!(count(&list), 0);
        assert_eq!(count(&&v), 3);
    }

    #[test]
    fn btree_set_iterates_in_order() {
        let tree: BTreeSet<i32> = [3, 1, 2].into_iter().collect();
        let seen: Vec<i32> = tree.elements().copied().collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn shared_handles_expose_allocation_address() {
        let a = Arc::new(5);
        let b = Arc::clone(&a);
        let c = Arc::new(5);
        assert_eq!(a.target(), b.target());
        assert_ne!(a.target(), c.target());

        let r = Rc::new(String::from("x"));
        let r2 = Rc::clone(&r);
        assert_eq!(r.target(), r2.target());
    }
}
