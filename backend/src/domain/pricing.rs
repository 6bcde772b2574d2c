/// Price per square metre, rounded to a whole amount. Needs a positive
/// price and a positive area.
pub fn price_per_sqm(price: Option<f64>, total_area: Option<f64>) -> Option<f64> {
    match (price, total_area) {
        (Some(price), Some(area)) if price > 0.0 && area > 0.0 => Some((price / area).round()),
        _ => None,
    }
}
