use glam::IVec2;

/// A straight line between two grid cells.
///
/// The cells visited are decided on the line ordered along its major axis, so
/// `Line::new(a, b)` and `Line::new(b, a)` visit exactly the same cells, only
/// emitted in the opposite order. The minor axis position is truncated, never
/// rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub from: IVec2,
    pub to: IVec2,
}

impl Line {
    pub const fn new(from: IVec2, to: IVec2) -> Self {
        Self { from, to }
    }

    /// Iterate the cells from `from` to `to`. Can be called any number of times.
    pub fn points(&self) -> LinePoints {
        let delta = self.to - self.from;
        let x_major = delta.x.abs() >= delta.y.abs();
        let (major, minor): (fn(IVec2) -> i32, fn(IVec2) -> i32) = if x_major {
            (|v: IVec2| v.x, |v: IVec2| v.y)
        } else {
            (|v: IVec2| v.y, |v: IVec2| v.x)
        };

        // Decide on the line walking up the major axis, emit in the order asked for
        let reversed = major(self.from) > major(self.to);
        let (start, end) = if reversed {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        };

        LinePoints {
            x_major,
            major_start: major(start),
            minor_start: minor(start) as i64,
            minor_delta: (minor(end) - minor(start)) as i64,
            major_delta: (major(end) - major(start)) as i64,
            reversed,
            front: 0,
            back: major(end) - major(start),
        }
    }
}

impl IntoIterator for Line {
    type Item = IVec2;
    type IntoIter = LinePoints;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Convenience for `Line::new(from, to).points()`
pub fn line(from: IVec2, to: IVec2) -> LinePoints {
    Line::new(from, to).points()
}

/// Cells along a `Line`. The minor coordinate is computed exactly with
/// integer arithmetic so the far endpoint is always hit.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x_major: bool,
    major_start: i32,
    minor_start: i64,
    minor_delta: i64,
    major_delta: i64,
    reversed: bool,
    /// Next step from the start of the ordered line
    front: i32,
    /// Last step not yet emitted, inclusive
    back: i32,
}

impl LinePoints {
    fn point_at(&self, step: i32) -> IVec2 {
        let major = self.major_start + step;
        let minor = if self.major_delta == 0 {
            self.minor_start
        } else {
            // Truncates towards zero, same as casting the real value
            (self.minor_start * self.major_delta + step as i64 * self.minor_delta)
                / self.major_delta
        } as i32;

        if self.x_major {
            IVec2::new(major, minor)
        } else {
            IVec2::new(minor, major)
        }
    }
}

impl Iterator for LinePoints {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        let step = if self.reversed {
            let s = self.back;
            self.back -= 1;
            s
        } else {
            let s = self.front;
            self.front += 1;
            s
        };
        Some(self.point_at(step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.back - self.front + 1).max(0) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for LinePoints {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::IVec2;

    use super::{Line, line};

    fn points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
        line(IVec2::new(x1, y1), IVec2::new(x2, y2))
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn single_point() {
        assert_eq!(points(10, 42, 10, 42), vec![(10, 42)]);
    }

    #[test]
    fn diagonal() {
        assert_eq!(points(42, 43, 44, 45), vec![(42, 43), (43, 44), (44, 45)]);
        assert_eq!(
            points(10, 10, 14, 14),
            vec![(10, 10), (11, 11), (12, 12), (13, 13), (14, 14)]
        );
    }

    #[test]
    fn horizontal_and_vertical() {
        assert_eq!(points(10, 42, 11, 42), vec![(10, 42), (11, 42)]);
        assert_eq!(points(10, 42, 19, 42).len(), 10);
        assert_eq!(
            points(10, 42, 10, 38),
            vec![(10, 42), (10, 41), (10, 40), (10, 39), (10, 38)]
        );
    }

    #[test]
    fn minor_axis_truncates() {
        // ratio of 1/3, every third step moves up
        assert_eq!(
            points(0, 0, 6, 2),
            vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 1), (5, 1), (6, 2)]
        );
        // descending lines truncate the real value, so they sit on the floor
        assert_eq!(points(0, 2, 3, 0), vec![(0, 2), (1, 1), (2, 0), (3, 0)]);
    }

    #[test]
    fn endpoints_in_given_order() {
        let cases = [
            (0, 0, 7, 3),
            (7, 3, 0, 0),
            (5, 1, 2, 9),
            (2, 9, 5, 1),
            (3, 3, 3, -4),
            (-6, 2, 4, 2),
            (13, 0, 0, 13),
        ];
        for (x1, y1, x2, y2) in cases {
            let pts = points(x1, y1, x2, y2);
            assert!(!pts.is_empty());
            assert_eq!(pts.first(), Some(&(x1, y1)));
            assert_eq!(pts.last(), Some(&(x2, y2)));
            let expected = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
            assert_eq!(pts.len(), expected);
        }
    }

    #[test]
    fn reversed_is_same_set() {
        let cases = [(0, 0, 7, 3), (5, 1, 2, 9), (1, 8, 9, 2), (0, 0, 3, 3), (4, 7, 4, 0)];
        for (x1, y1, x2, y2) in cases {
            let forward: HashSet<(i32, i32)> = points(x1, y1, x2, y2).into_iter().collect();
            let backward: HashSet<(i32, i32)> = points(x2, y2, x1, y1).into_iter().collect();
            assert_eq!(forward, backward);

            let mut rev = points(x2, y2, x1, y1);
            rev.reverse();
            assert_eq!(points(x1, y1, x2, y2), rev);
        }
    }

    #[test]
    fn restartable() {
        let l = Line::new(IVec2::new(0, 0), IVec2::new(5, 2));
        let first: Vec<IVec2> = l.points().collect();
        let second: Vec<IVec2> = l.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(l.points().len(), 6);
    }
}
