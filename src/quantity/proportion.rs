use std::fmt::{Display, Formatter};

quantity!(
    /// Part of a whole, `1.0` being everything.
    Proportion,
    ""
);

impl Display for Proportion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Proportion(0.8141).to_string(), "81.41%");
        assert_eq!(Proportion(1.0).to_string(), "100.00%");
    }
}
