//! Stratified sample-point generation.

use ember_math::sampling::gen_f32;
use ember_math::Vec2;
use rand::RngCore;

/// Generate `cols * rows` multi-jittered sample points in [0, 1)^2.
///
/// Starts from the canonical multi-jitter arrangement (each point
/// jittered within its own subcell) and then shuffles x coordinates
/// within each column and y coordinates within each row. The result is
/// stratified on the full grid and on both 1D projections at once.
pub fn multi_jitter(cols: usize, rows: usize, rng: &mut dyn RngCore) -> Vec<Vec2> {
    let subcell_width = 1.0 / (cols * rows) as f32;

    // Canonical arrangement
    let mut points = vec![Vec2::ZERO; cols * rows];
    for j in 0..rows {
        for i in 0..cols {
            let p = &mut points[j * cols + i];
            p.x = i as f32 * rows as f32 * subcell_width + j as f32 * subcell_width
                + gen_f32(rng) * subcell_width;
            p.y = j as f32 * cols as f32 * subcell_width + i as f32 * subcell_width
                + gen_f32(rng) * subcell_width;
        }
    }

    // Shuffle x coordinates within each column of cells
    for j in 0..rows {
        for i in 0..cols {
            let k = j + (gen_f32(rng) * (rows - j) as f32) as usize;
            let k = k.min(rows - 1);
            let a = j * cols + i;
            let b = k * cols + i;
            let tmp = points[a].x;
            points[a].x = points[b].x;
            points[b].x = tmp;
        }
    }

    // Shuffle y coordinates within each row of cells
    for i in 0..cols {
        for j in 0..rows {
            let k = i + (gen_f32(rng) * (cols - i) as f32) as usize;
            let k = k.min(cols - 1);
            let a = j * cols + i;
            let b = j * cols + k;
            let tmp = points[a].y;
            points[a].y = points[b].y;
            points[b].y = tmp;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_point_count_and_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = multi_jitter(4, 4, &mut rng);

        assert_eq!(points.len(), 16);
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 1.0);
            assert!(p.y >= 0.0 && p.y < 1.0);
        }
    }

    #[test]
    fn test_single_sample() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = multi_jitter(1, 1, &mut rng);

        assert_eq!(points.len(), 1);
        assert!(points[0].x >= 0.0 && points[0].x < 1.0);
        assert!(points[0].y >= 0.0 && points[0].y < 1.0);
    }

    #[test]
    fn test_grid_stratification() {
        // Exactly one point per cell of the coarse cols x rows grid
        let (cols, rows) = (4, 3);
        let mut rng = StdRng::seed_from_u64(42);
        let points = multi_jitter(cols, rows, &mut rng);

        let mut cells = vec![0usize; cols * rows];
        for p in &points {
            let i = ((p.x * cols as f32) as usize).min(cols - 1);
            let j = ((p.y * rows as f32) as usize).min(rows - 1);
            cells[j * cols + i] += 1;
        }
        assert!(cells.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_projection_stratification() {
        // Exactly one point per 1D strip in each axis: the n-rooks
        // property the shuffles preserve
        let (cols, rows) = (4, 4);
        let n = cols * rows;
        let mut rng = StdRng::seed_from_u64(42);
        let points = multi_jitter(cols, rows, &mut rng);

        let mut x_strips = vec![0usize; n];
        let mut y_strips = vec![0usize; n];
        for p in &points {
            x_strips[((p.x * n as f32) as usize).min(n - 1)] += 1;
            y_strips[((p.y * n as f32) as usize).min(n - 1)] += 1;
        }
        assert!(x_strips.iter().all(|&count| count == 1));
        assert!(y_strips.iter().all(|&count| count == 1));
    }
}
