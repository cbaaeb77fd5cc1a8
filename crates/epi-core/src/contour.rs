//! Moore-neighbour boundary tracing over a [`Mask`].

use std::collections::HashSet;

use crate::mask::Mask;
use crate::point::Point;

/// Contours with fewer vertices than this are treated as noise.
pub const MIN_CONTOUR_VERTICES: usize = 10;

/// The eight neighbours, clockwise on screen (y down), starting west.
const DIRS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

const WEST: usize = 0;

fn dir_index(dx: i64, dy: i64) -> usize {
    DIRS.iter()
        .position(|&d| d == (dx, dy))
        .unwrap_or(WEST)
}

/// Follow one boundary clockwise from `start`, whose west neighbour is background.
///
/// Stops on Jacob's criterion (re-entering `start` from the same side) or
/// after a step limit proportional to the raster size.
fn trace_from(mask: &Mask, start: (i64, i64)) -> Vec<(i64, i64)> {
    let mut contour = vec![start];
    let mut current = start;
    let mut back = WEST;
    let max_steps = 4 * mask.width() * mask.height() + 8;

    for _ in 0..max_steps {
        let mut found = None;
        for i in 1..=8 {
            let d = (back + i) % 8;
            let n = (current.0 + DIRS[d].0, current.1 + DIRS[d].1);
            if mask.get(n.0, n.1) {
                found = Some((n, d));
                break;
            }
        }

        // isolated pixel
        let Some((next, d)) = found else { break };

        // the last background cell checked becomes the new backtrack
        let prev_dir = DIRS[(d + 7) % 8];
        let prev = (current.0 + prev_dir.0, current.1 + prev_dir.1);
        let new_back = dir_index(prev.0 - next.0, prev.1 - next.1);

        if next == start && new_back == WEST {
            break;
        }

        current = next;
        back = new_back;
        contour.push(current);
    }

    contour
}

/// Every closed boundary in raster-scan order, noise contours removed.
pub fn trace_all_contours(mask: &Mask) -> Vec<Vec<Point>> {
    let mut visited: HashSet<(i64, i64)> = HashSet::new();
    let mut contours = Vec::new();

    for y in 0..mask.height() as i64 {
        for x in 0..mask.width() as i64 {
            if !mask.get(x, y) || mask.get(x - 1, y) || visited.contains(&(x, y)) {
                continue;
            }

            let pixels = trace_from(mask, (x, y));
            visited.extend(pixels.iter().copied());

            if pixels.len() >= MIN_CONTOUR_VERTICES {
                contours.push(
                    pixels
                        .into_iter()
                        .map(|(px, py)| Point::new(px as f64, py as f64))
                        .collect(),
                );
            }
        }
    }

    contours
}

/// The single longest closed contour in the mask (first found wins ties).
///
/// A blank mask, or one holding only noise, yields an empty contour.
pub fn trace_contour(mask: &Mask) -> Vec<Point> {
    let mut best: Vec<Point> = Vec::new();
    for contour in trace_all_contours(mask) {
        if contour.len() > best.len() {
            best = contour;
        }
    }
    best
}
