const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinate pairs in kilometers, rounded
/// to two decimal places. Inputs are degrees; out-of-range values are not
/// validated.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    round2(EARTH_RADIUS_KM * c)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(28.6129, 77.2295, 28.6129, 77.2295), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine_km(28.6129, 77.2295, 28.5244, 77.1855);
        let backward = haversine_km(28.5244, 77.1855, 28.6129, 77.2295);
        assert_eq!(forward, backward);
    }

    #[test]
    fn india_gate_to_red_fort_is_about_five_km() {
        let distance = haversine_km(28.6129, 77.2295, 28.6562, 77.2410);
        assert!((distance - 5.15).abs() < 0.1, "got {distance}");
    }
}
