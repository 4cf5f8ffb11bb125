use tilepath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x.abs() + d.y.abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x.abs().max(d.y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, -1);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(manhattan(a, a), 0);
    }
}
