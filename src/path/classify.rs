use serde::{Deserialize, Serialize};

use super::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointClass {
    Primary,
    Secondary,
}

impl PointClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Primary iff `x % 3 + y % 3 + z % 3 == 0`.
///
/// Remainders truncate toward zero, so negative coordinates contribute
/// negative terms: `(-1, 1, 0)` sums to zero and is primary.
pub fn classify(point: Point) -> PointClass {
    if (point.x % 3) + (point.y % 3) + (point.z % 3) == 0 {
        PointClass::Primary
    } else {
        PointClass::Secondary
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Point::new(0, 0, 0), PointClass::Primary)]
    #[case(Point::new(3, 3, 0), PointClass::Primary)]
    #[case(Point::new(1, 1, 1), PointClass::Secondary)]
    #[case(Point::new(3, 0, 1), PointClass::Secondary)]
    #[case(Point::new(-3, 6, -9), PointClass::Primary)]
    #[case(Point::new(-1, 1, 0), PointClass::Primary)]
    #[case(Point::new(-2, -1, 0), PointClass::Secondary)]
    #[case(Point::new(2, 2, -4), PointClass::Secondary)]
    fn classifies_points(#[case] point: Point, #[case] expected: PointClass) {
        assert_eq!(classify(point), expected);
    }

    proptest! {
        #[test]
        fn classify_is_pure(x in any::<i32>(), y in any::<i32>(), z in any::<i32>()) {
            let point = Point::new(x, y, z);
            prop_assert_eq!(classify(point), classify(point));
        }

        #[test]
        fn multiples_of_three_are_primary(x in -1000i32..1000, y in -1000i32..1000, z in -1000i32..1000) {
            prop_assert_eq!(classify(Point::new(x * 3, y * 3, z * 3)), PointClass::Primary);
        }
    }
}
