//! Polyline slicing used when assembling route geometry.

use geo::{Coord, Distance, Euclidean, LineString, Point};

/// Extracts the portion of `line` between two fractions of its total
/// length, both measured from the first coordinate.
///
/// The primitive is directional-only: `start` must not exceed `end`, and
/// callers traversing a shape backwards reverse the returned points
/// themselves. Fractions are clamped to `[0, 1]`. A degenerate request
/// (`start == end`, or a shape with no extent) yields an empty line.
///
/// Slices taken at fraction 0 or 1 reproduce the shape's endpoint
/// coordinates exactly, so adjacent slices of consecutive edges share
/// their joint coordinate bit-for-bit.
pub fn line_substring(line: &LineString<f64>, start: f64, end: f64) -> LineString<f64> {
    let start = start.clamp(0.0, 1.0);
    let end = end.clamp(0.0, 1.0);
    debug_assert!(start <= end, "line_substring is directional-only");

    let coords = &line.0;
    if coords.len() < 2 || start >= end {
        return LineString::new(Vec::new());
    }

    let lengths: Vec<f64> = coords
        .windows(2)
        .map(|pair| Euclidean.distance(Point::from(pair[0]), Point::from(pair[1])))
        .collect();
    let total: f64 = lengths.iter().sum();
    if total == 0.0 {
        return LineString::new(Vec::new());
    }

    let start_len = start * total;
    let end_len = end * total;

    let mut out: Vec<Coord<f64>> = Vec::new();
    let mut walked = 0.0;
    for (i, segment_len) in lengths.iter().copied().enumerate() {
        let segment_start = walked;
        let segment_end = walked + segment_len;
        walked = segment_end;

        if segment_end <= start_len {
            continue;
        }
        if segment_start >= end_len {
            break;
        }

        let a = coords[i];
        let b = coords[i + 1];

        if out.is_empty() {
            if start_len <= segment_start || segment_len == 0.0 {
                out.push(a);
            } else {
                out.push(interpolate(a, b, (start_len - segment_start) / segment_len));
            }
        }

        if segment_end <= end_len {
            push_coord(&mut out, b);
        } else {
            let t = (end_len - segment_start) / segment_len;
            push_coord(&mut out, interpolate(a, b, t));
            break;
        }
    }

    LineString::new(out)
}

fn interpolate(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

// Zero-length interior segments would otherwise emit duplicate points
fn push_coord(out: &mut Vec<Coord<f64>>, coord: Coord<f64>) {
    if out.last() != Some(&coord) {
        out.push(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Length, line_string};
    use proptest::prelude::*;

    fn bent_line() -> LineString<f64> {
        line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 30.0, y: 10.0),
        ]
    }

    #[test]
    fn forward_substring_of_straight_line() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let part = line_substring(&line, 0.2, 0.7);
        assert_eq!(part.0, vec![Coord { x: 2.0, y: 0.0 }, Coord { x: 7.0, y: 0.0 }]);
    }

    #[test]
    fn full_range_returns_the_whole_shape() {
        let line = bent_line();
        let part = line_substring(&line, 0.0, 1.0);
        assert_eq!(part, line);
    }

    #[test]
    fn fractions_are_clamped() {
        let line = bent_line();
        assert_eq!(line_substring(&line, -3.0, 4.0), line);
    }

    #[test]
    fn equal_fractions_yield_an_empty_line() {
        let line = bent_line();
        assert!(line_substring(&line, 0.4, 0.4).0.is_empty());
    }

    #[test]
    fn substring_crosses_interior_vertices() {
        // Total length 40: fractions 0.125 and 0.75 land on the first
        // and last segments respectively.
        let part = line_substring(&bent_line(), 0.125, 0.75);
        assert_eq!(
            part.0,
            vec![
                Coord { x: 5.0, y: 0.0 },
                Coord { x: 10.0, y: 0.0 },
                Coord { x: 10.0, y: 10.0 },
                Coord { x: 20.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn boundary_slices_share_exact_joint_coordinates() {
        let line = bent_line();
        let head = line_substring(&line, 0.0, 0.25);
        let tail = line_substring(&line, 0.25, 1.0);
        assert_eq!(head.0.first(), line.0.first());
        assert_eq!(tail.0.last(), line.0.last());
        assert_eq!(head.0.last(), tail.0.first());
    }

    proptest! {
        #[test]
        fn substring_length_is_proportional(a in 0.0..1.0f64, b in 0.0..1.0f64) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let line = bent_line();
            let part = line_substring(&line, start, end);
            let expected = (end - start) * Euclidean.length(&line);
            prop_assert!((Euclidean.length(&part) - expected).abs() < 1e-9);
        }
    }
}
