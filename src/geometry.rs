//! Points on the drawing plane, and the two small pieces of arithmetic
//! the chaos game is built from: picking an anchor from a die roll,
//! and measuring the jump toward it.

/// Every jump covers the displacement to the anchor divided by this.
pub const LENGTH_STEP: f64 = 2.0;

/// A position on the drawing plane, in pixels.  Positions are never
/// edited; the simulation replaces its running point on every step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// Distance from the left edge.
    pub x: f64,
    /// Distance from the top edge.
    pub y: f64,
}

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The point reached by jumping from here toward `target`, covering
    /// `1 / LENGTH_STEP` of the distance with each axis rounded to a
    /// whole pixel.
    pub fn toward(&self, target: &Point) -> Point {
        let (x_len, y_len) = lengths(target, self);
        Point::new(self.x + x_len, self.y + y_len)
    }
}

// Halves round toward positive infinity, so -1.5 becomes -1, not -2.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// The displacement from `two` to `one`, divided by `LENGTH_STEP` and
/// rounded on each axis independently.  Adding the result to `two`
/// moves it toward `one`.
pub fn lengths(one: &Point, two: &Point) -> (f64, f64) {
    (
        round_half_up((one.x - two.x) / LENGTH_STEP),
        round_half_up((one.y - two.y) / LENGTH_STEP),
    )
}

/// Maps a die roll to the index of the anchor to jump toward.  Two
/// consecutive rolls share an anchor, so with rolls drawn from
/// `1..=2N` each of `N` anchors is equally likely:
///
/// | Roll | Anchor |
/// |------|--------|
/// | 1, 2 | 0      |
/// | 3, 4 | 1      |
/// | 5, 6 | 2      |
///
/// Rolls start at 1; a roll of 0 panics.
pub fn side_index(roll: usize) -> usize {
    assert!(roll >= 1, "die rolls start at 1");
    let next = roll + 1;
    (next + 1) / 2 - next % 2 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_index_matches_die_table() {
        let sides: Vec<usize> = (1..=6).map(side_index).collect();
        assert_eq!(sides, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn side_index_pairs_rolls_for_any_anchor_count() {
        for anchors in 1..=12 {
            for k in 1..=anchors {
                assert_eq!(side_index(2 * k - 1), side_index(2 * k));
                assert_eq!(side_index(2 * k), k - 1);
            }
            for roll in 1..=2 * anchors {
                assert!(side_index(roll) < anchors);
            }
        }
    }

    #[test]
    #[should_panic]
    fn side_index_rejects_zero() {
        side_index(0);
    }

    #[test]
    fn lengths_halves_and_rounds() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(4.0, 2.0);
        assert_eq!(lengths(&a, &b), (3.0, 4.0));
        assert_eq!(lengths(&b, &a), (-3.0, -4.0));
    }

    #[test]
    fn lengths_rounds_halves_upward() {
        let a = Point::new(3.0, -3.0);
        let origin = Point::new(0.0, 0.0);
        assert_eq!(lengths(&a, &origin), (2.0, -1.0));
    }

    #[test]
    fn toward_moves_closer_to_the_target() {
        let start = Point::new(50.0, 50.0);
        for target in &[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 100.0),
        ] {
            let next = start.toward(target);
            assert_eq!(
                next,
                Point::new((start.x + target.x) / 2.0, (start.y + target.y) / 2.0)
            );
        }
    }

    #[test]
    fn toward_settles_within_a_pixel_of_the_target() {
        // Rounding halves upward stalls one pixel short when approaching
        // from the positive side.
        let target = Point::new(7.0, 13.0);
        let mut p = Point::new(500.0, -300.0);
        for _ in 0..20 {
            p = p.toward(&target);
        }
        assert_eq!(p, Point::new(8.0, 13.0));
    }
}
