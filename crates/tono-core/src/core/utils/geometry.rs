use nalgebra::{Point3, Vector3};

/// Vector from `from` to `to` together with its Euclidean length.
#[inline]
pub fn offset(from: &Point3<f32>, to: &Point3<f32>) -> (Vector3<f32>, f32) {
    let v = to - from;
    let length = v.norm();
    (v, length)
}

/// Unit vector from `from` to `to`, or `None` when the points coincide.
#[inline]
pub fn direction(from: &Point3<f32>, to: &Point3<f32>) -> Option<Vector3<f32>> {
    let (v, length) = offset(from, to);
    (length > 0.0).then(|| v / length)
}

/// Moves `a` by `-half_shift` and `b` by `+half_shift` along `unit`. With
/// `unit` pointing from `a` to `b`, their separation grows by `2 * half_shift`.
#[inline]
pub fn split_shift(
    a: &mut Point3<f32>,
    b: &mut Point3<f32>,
    unit: &Vector3<f32>,
    half_shift: f32,
) {
    *a -= unit * half_shift;
    *b += unit * half_shift;
}

/// Largest adjacent-pair distance minus `limit`, clamped at zero.
pub fn max_excess<'a>(points: impl Iterator<Item = &'a Point3<f32>>, limit: f32) -> f32 {
    let points: Vec<_> = points.collect();
    points
        .windows(2)
        .map(|pair| nalgebra::distance(pair[0], pair[1]) - limit)
        .fold(0.0, f32::max)
}
