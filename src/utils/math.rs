/// Calculate percentage change between two values.
///
/// A zero or non-finite base has no meaningful change, so any non-finite result is reported as `0.0`.
pub fn percentage_change(old_value: f64, new_value: f64) -> f64 {
    let change = (new_value - old_value) / old_value * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}
