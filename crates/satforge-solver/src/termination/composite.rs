//! Combining budgets.
//!
//! Both combinators wrap a tuple of up to five terminations. They are
//! evaluated left to right and short-circuit.

use super::Termination;
use crate::scope::SearchScope;

/// Fires as soon as one member fires.
///
/// ```
/// use satforge_solver::termination::{
///     BranchCountTermination, OrTermination, TimeTermination,
/// };
///
/// // 30 seconds or 1000 branches, whichever runs out first.
/// let budget = OrTermination::new((
///     TimeTermination::seconds(30),
///     BranchCountTermination::new(1000),
/// ));
/// # let _ = budget;
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

/// Fires only once every member fires.
#[derive(Debug, Clone)]
pub struct AndTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(members: T) -> Self {
        Self(members)
    }
}

impl<T> AndTermination<T> {
    pub fn new(members: T) -> Self {
        Self(members)
    }
}

macro_rules! tuple_terminations {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T: Termination),+> Termination for OrTermination<($($T,)+)> {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                false $(|| self.0.$idx.is_terminated(scope))+
            }
        }

        impl<$($T: Termination),+> Termination for AndTermination<($($T,)+)> {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                true $(&& self.0.$idx.is_terminated(scope))+
            }
        }
    };
}

tuple_terminations!(0: A);
tuple_terminations!(0: A, 1: B);
tuple_terminations!(0: A, 1: B, 2: C);
tuple_terminations!(0: A, 1: B, 2: C, 3: D);
tuple_terminations!(0: A, 1: B, 2: C, 3: D, 4: E);
