//! Planar footprint helpers backing the overlap filter.

use ccg_core::AttributeValues;

/// A point in `(lateral, longitudinal)` coordinates.
pub type Point = (f64, f64);

/// Intersection areas at or below this value count as touching, not overlapping.
pub const AREA_EPSILON: f64 = 1e-9;

/// Corners of the entity footprint in counter-clockwise order.
///
/// The rectangle is `width` across and `length` along the heading, centred at the
/// entity offsets and rotated clockwise by the orientation bearing.
pub fn footprint(values: &AttributeValues) -> [Point; 4] {
    let (hx, hy) = values.orientation.heading();
    // right-hand perpendicular of the heading
    let (rx, ry) = (hy, -hx);
    let (cx, cy) = (values.lateral_offset, values.longitudinal_offset);
    let half_w = values.width / 2.0;
    let half_l = values.length / 2.0;
    let corner = |x: f64, y: f64| (cx + x * rx + y * hx, cy + x * ry + y * hy);
    [
        corner(-half_w, -half_l),
        corner(half_w, -half_l),
        corner(half_w, half_l),
        corner(-half_w, half_l),
    ]
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn line_intersection(p: Point, q: Point, a: Point, b: Point) -> Point {
    let d1 = cross(a, b, p);
    let d2 = cross(a, b, q);
    let t = d1 / (d1 - d2);
    (p.0 + t * (q.0 - p.0), p.1 + t * (q.1 - p.1))
}

/// Clips `subject` against the convex counter-clockwise polygon `clip`.
pub fn clip_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let mut output = subject.to_vec();
    for (idx, &a) in clip.iter().enumerate() {
        if output.is_empty() {
            break;
        }
        let b = clip[(idx + 1) % clip.len()];
        let input = std::mem::take(&mut output);
        for (k, &current) in input.iter().enumerate() {
            let previous = input[(k + input.len() - 1) % input.len()];
            let current_in = cross(a, b, current) >= 0.0;
            let previous_in = cross(a, b, previous) >= 0.0;
            if current_in {
                if !previous_in {
                    output.push(line_intersection(previous, current, a, b));
                }
                output.push(current);
            } else if previous_in {
                output.push(line_intersection(previous, current, a, b));
            }
        }
    }
    output
}

/// Unsigned shoelace area of a simple polygon.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| p.0 * q.1 - q.0 * p.1)
        .sum();
    twice.abs() / 2.0
}

/// Area shared by two convex counter-clockwise polygons.
pub fn intersection_area(a: &[Point], b: &[Point]) -> f64 {
    polygon_area(&clip_convex(a, b))
}

/// Whether two entity footprints share a positive area.
pub fn footprints_overlap(a: &AttributeValues, b: &AttributeValues) -> bool {
    intersection_area(&footprint(a), &footprint(b)) > AREA_EPSILON
}
