use std::any::{type_name, Any};
use std::ptr;

use crate::capability::{
    BooleanConvertible, EqualityCapable, InequalityCapable, IterableContainer, NullSentinel,
    SharedHandle,
};
use crate::report::Detail;

use super::UnitTest;

const fn eq_symbol(equal: bool) -> &'static str {
    if equal {
        "=="
    } else {
        "!="
    }
}

const fn equal_sentence(equal: bool) -> &'static str {
    if equal {
        "Objects are equal."
    } else {
        "Objects are not equal."
    }
}

const fn is_symbol(same: bool) -> &'static str {
    if same {
        "is"
    } else {
        "is not"
    }
}

impl<T> UnitTest<T> {
    /// Passes when `a == b`.
    pub fn assert_equal(&self, a: &T, b: &T) -> bool
    where
        T: EqualityCapable,
    {
        let verdict = a == b;
        let detail = self.pair_detail(a, eq_symbol(verdict), b, equal_sentence(verdict));
        self.conclude(verdict, "assert_equal", detail)
    }

    /// Passes when some element of `list` equals `a`.
    ///
    /// The report shows the first matching element, or `T::default()` when
    /// nothing matched.
    pub fn assert_equal_in(&self, a: &T, list: &[T]) -> bool
    where
        T: EqualityCapable + Default,
    {
        match list.iter().find(|item| a == *item) {
            Some(matched) => {
                let detail = self.pair_detail(a, "==", matched, equal_sentence(true));
                self.conclude(true, "assert_equal_in", detail)
            }
            None => {
                let detail = self.pair_detail(a, "!=", &T::default(), equal_sentence(false));
                self.conclude(false, "assert_equal_in", detail)
            }
        }
    }

    /// Passes when `a != b`.
    pub fn assert_not_equal(&self, a: &T, b: &T) -> bool
    where
        T: InequalityCapable,
    {
        let verdict = a != b;
        let detail = self.pair_detail(a, eq_symbol(!verdict), b, equal_sentence(!verdict));
        self.conclude(verdict, "assert_not_equal", detail)
    }

    /// Passes when no element of `list` equals `a`.
    ///
    /// Elements are compared with `==`.
    pub fn assert_not_equal_in(&self, a: &T, list: &[T]) -> bool
    where
        T: EqualityCapable + Default,
    {
        match list.iter().find(|item| a == *item) {
            Some(matched) => {
                let detail = self.pair_detail(a, "==", matched, equal_sentence(true));
                self.conclude(false, "assert_not_equal_in", detail)
            }
            None => {
                let detail = self.pair_detail(a, "!=", &T::default(), equal_sentence(false));
                self.conclude(true, "assert_not_equal_in", detail)
            }
        }
    }

    fn truth_detail(&self, a: &T, truth: bool) -> Detail {
        match self.render(a) {
            Some(rendered) => Detail::compared(rendered, "is", truth.to_string()),
            None if truth => Detail::message("Value is true."),
            None => Detail::message("Value is false."),
        }
    }

    /// Passes when `a` converts to `true`.
    pub fn assert_true(&self, a: &T) -> bool
    where
        T: BooleanConvertible,
    {
        let truth = a.to_bool();
        let detail = self.truth_detail(a, truth);
        self.conclude(truth, "assert_true", detail)
    }

    /// Passes when `a` converts to `false`.
    pub fn assert_false(&self, a: &T) -> bool
    where
        T: BooleanConvertible,
    {
        let truth = a.to_bool();
        let detail = self.truth_detail(a, truth);
        self.conclude(!truth, "assert_false", detail)
    }

    fn identity_detail(&self, a: &T, b: &T, same: bool) -> Detail {
        match (self.render(a), self.render(b)) {
            (Some(l), Some(r)) => Detail::compared(
                format!("{l} @ {a:p}"),
                is_symbol(same),
                format!("{r} @ {b:p}"),
            ),
            _ if same => Detail::message("Objects are the same object."),
            _ => Detail::message("Objects are different objects."),
        }
    }

    /// Passes when `a` and `b` are the same object in memory.
    ///
    /// This is identity, not equality: two equal values stored in different
    /// places fail. Zero-sized types have no distinct addresses, so the
    /// check is meaningless for them.
    pub fn assert_is(&self, a: &T, b: &T) -> bool {
        let same = ptr::eq(a, b);
        let detail = self.identity_detail(a, b, same);
        self.conclude(same, "assert_is", detail)
    }

    /// Passes when `a` and `b` are different objects in memory.
    pub fn assert_is_not(&self, a: &T, b: &T) -> bool {
        let same = ptr::eq(a, b);
        let detail = self.identity_detail(a, b, same);
        self.conclude(!same, "assert_is_not", detail)
    }

    /// Passes when both handles point at the same allocation.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use unitcheck::UnitTest;
    ///
    /// let t = UnitTest::<String>::new();
    /// let a = Arc::new("x".to_string());
    /// let b = Arc::clone(&a);
    /// assert!(t.assert_same_handle(&a, &b));
    /// assert!(!t.assert_same_handle(&a, &Arc::new("x".to_string())));
    /// ```
    pub fn assert_same_handle<H>(&self, a: &H, b: &H) -> bool
    where
        H: SharedHandle<T>,
    {
        let same = ptr::eq(a.target(), b.target());
        let detail = self.identity_detail(a, b, same);
        self.conclude(same, "assert_same_handle", detail)
    }

    /// Passes when the handles point at different allocations.
    pub fn assert_not_same_handle<H>(&self, a: &H, b: &H) -> bool
    where
        H: SharedHandle<T>,
    {
        let same = ptr::eq(a.target(), b.target());
        let detail = self.identity_detail(a, b, same);
        self.conclude(!same, "assert_not_same_handle", detail)
    }

    fn null_detail(&self, a: &T, null: &T, is_null: bool) -> Detail {
        match (self.render(a), self.render(null)) {
            (Some(l), Some(r)) => Detail::compared(l, eq_symbol(is_null), r),
            _ if is_null => Detail::message("Value is null."),
            _ => Detail::message("Value is not null."),
        }
    }

    /// Passes when `a` equals the type's null value.
    pub fn assert_null(&self, a: &T) -> bool
    where
        T: NullSentinel + EqualityCapable,
    {
        let null = T::null();
        let is_null = *a == null;
        let detail = self.null_detail(a, &null, is_null);
        self.conclude(is_null, "assert_null", detail)
    }

    /// Passes when `a` differs from the type's null value.
    pub fn assert_not_null(&self, a: &T) -> bool
    where
        T: NullSentinel + EqualityCapable,
    {
        let null = T::null();
        let is_null = *a == null;
        let detail = self.null_detail(a, &null, is_null);
        self.conclude(!is_null, "assert_not_null", detail)
    }

    fn pointer_detail(pointer: *const T, is_null: bool) -> Detail {
        Detail::compared(format!("{pointer:p}"), eq_symbol(is_null), "null")
    }

    /// Passes when `pointer` is null.
    pub fn assert_null_ptr(&self, pointer: *const T) -> bool {
        let is_null = pointer.is_null();
        self.conclude(is_null, "assert_null_ptr", Self::pointer_detail(pointer, is_null))
    }

    /// Passes when `pointer` is not null.
    pub fn assert_not_null_ptr(&self, pointer: *const T) -> bool {
        let is_null = pointer.is_null();
        self.conclude(!is_null, "assert_not_null_ptr", Self::pointer_detail(pointer, is_null))
    }

    fn membership_detail<C: ?Sized>(&self, a: &T, found: bool) -> Detail {
        let symbol = if found { "in" } else { "not in" };
        match self.render(a) {
            Some(rendered) => Detail::compared(rendered, symbol, type_name::<C>()),
            None if found => Detail::message("Value is in the container."),
            None => Detail::message("Value is not in the container."),
        }
    }

    /// Passes when some element of `container` equals `a`.
    ///
    /// Stops at the first match in the container's iteration order.
    pub fn assert_in<C>(&self, a: &T, container: &C) -> bool
    where
        C: IterableContainer + ?Sized,
        C::Element: PartialEq<T>,
    {
        let found = container.elements().any(|item| item == a);
        let detail = self.membership_detail::<C>(a, found);
        self.conclude(found, "assert_in", detail)
    }

    /// Passes when no element of `container` equals `a`.
    pub fn assert_not_in<C>(&self, a: &T, container: &C) -> bool
    where
        C: IterableContainer + ?Sized,
        C::Element: PartialEq<T>,
    {
        let found = container.elements().any(|item| item == a);
        let detail = self.membership_detail::<C>(a, found);
        self.conclude(!found, "assert_not_in", detail)
    }

    fn instance_detail<U>(&self, value: &dyn Any, holds: bool) -> Detail
    where
        T: 'static,
    {
        let symbol = if holds { "is instance of" } else { "is not instance of" };
        let subject = value
            .downcast_ref::<T>()
            .and_then(|v| self.render(v))
            .unwrap_or_else(|| "value".to_string());
        Detail::compared(subject, symbol, type_name::<U>())
    }

    /// Passes when the concrete runtime type of `value` is `U`.
    ///
    /// Pass the value itself, not a box around it: `&*boxed`, since a
    /// `&Box<dyn Any>` is itself an `Any` of type `Box<dyn Any>`.
    ///
    /// ```
    /// use std::any::Any;
    /// use unitcheck::UnitTest;
    ///
    /// struct Circle;
    /// struct Square;
    ///
    /// let t = UnitTest::<Circle>::new();
    /// let shape: Box<dyn Any> = Box::new(Circle);
    /// assert!(t.assert_is_instance::<Circle>(&*shape));
    /// assert!(t.assert_is_not_instance::<Square>(&*shape));
    /// ```
    pub fn assert_is_instance<U: Any>(&self, value: &dyn Any) -> bool
    where
        T: 'static,
    {
        let holds = value.is::<U>();
        let detail = self.instance_detail::<U>(value, holds);
        self.conclude(holds, "assert_is_instance", detail)
    }

    /// Passes when the concrete runtime type of `value` is not `U`.
    pub fn assert_is_not_instance<U: Any>(&self, value: &dyn Any) -> bool
    where
        T: 'static,
    {
        let holds = value.is::<U>();
        let detail = self.instance_detail::<U>(value, holds);
        self.conclude(!holds, "assert_is_not_instance", detail)
    }
}
