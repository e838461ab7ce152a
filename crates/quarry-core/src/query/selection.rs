//! Conversions accepted by `select`, `group_by` and `order_by`.

use crate::expr::{Expr, Expression};
use crate::schema::Column;

/// A single selectable or orderable item.
pub trait SelectionItem {
    /// Converts the item into an untyped expression.
    fn into_selection_expr(self) -> Expr;
}

impl<T> SelectionItem for Expression<T> {
    fn into_selection_expr(self) -> Expr {
        self.into_expr()
    }
}

impl<T> SelectionItem for &Column<T> {
    fn into_selection_expr(self) -> Expr {
        Expr::from(self)
    }
}

impl SelectionItem for Expr {
    fn into_selection_expr(self) -> Expr {
        self
    }
}

/// One or more selectable items: a single item, a tuple of items or a list
/// of untyped expressions.
pub trait IntoSelection {
    /// Converts into the ordered selection list.
    fn into_selection(self) -> Vec<Expr>;
}

impl<T> IntoSelection for Expression<T> {
    fn into_selection(self) -> Vec<Expr> {
        vec![self.into_expr()]
    }
}

impl<T> IntoSelection for &Column<T> {
    fn into_selection(self) -> Vec<Expr> {
        vec![Expr::from(self)]
    }
}

impl IntoSelection for Expr {
    fn into_selection(self) -> Vec<Expr> {
        vec![self]
    }
}

impl IntoSelection for Vec<Expr> {
    fn into_selection(self) -> Vec<Expr> {
        self
    }
}

// Tuples of selection items (up to 12)
macro_rules! impl_selection_tuple {
    ($($idx:tt: $item:ident),+) => {
        impl<$($item: SelectionItem),+> IntoSelection for ($($item,)+) {
            fn into_selection(self) -> Vec<Expr> {
                vec![$(self.$idx.into_selection_expr()),+]
            }
        }
    };
}

impl_selection_tuple!(0: C0);
impl_selection_tuple!(0: C0, 1: C1);
impl_selection_tuple!(0: C0, 1: C1, 2: C2);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10);
impl_selection_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11);
