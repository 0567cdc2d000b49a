use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use crate::quantity::proportion::Proportion;

quantity!(Cost, "R$");

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

impl Mul<Proportion> for Cost {
    type Output = Self;

    fn mul(self, rhs: Proportion) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
