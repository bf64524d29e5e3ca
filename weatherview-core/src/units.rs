pub mod temperature {
    const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

    /// Kelvin to Celsius, rounded to two decimals.
    ///
    /// A missing or zero reading is reported as absent. The provider never
    /// sends 0 K for a real observation, so a zero means the field was empty.
    pub fn kelvin_to_celsius(kelvin: Option<f64>) -> Option<f64> {
        let kelvin = kelvin.filter(|k| *k != 0.0 && !k.is_nan())?;
        Some(round2(kelvin - ZERO_CELSIUS_IN_KELVIN))
    }

    /// Rounds through the decimal text, so a value stored just below a
    /// halfway point (8.345 is 8.34499...) rounds down like a printed
    /// two-decimal reading would. Exact binary ties round to even.
    fn round2(value: f64) -> f64 {
        format!("{value:.2}").parse().unwrap_or(value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn converts_and_rounds() {
            assert_eq!(kelvin_to_celsius(Some(273.15)), Some(0.0));
            assert_eq!(kelvin_to_celsius(Some(300.0)), Some(26.85));
            assert_eq!(kelvin_to_celsius(Some(287.156)), Some(14.01));
            assert_eq!(kelvin_to_celsius(Some(253.15)), Some(-20.0));
        }

        #[test]
        fn rounding_follows_the_stored_value() {
            assert_eq!(round2(8.345), 8.34);
            assert_eq!(round2(1.005), 1.0);
            assert_eq!(round2(2.675), 2.67);
            assert_eq!(round2(-0.004), 0.0);
        }

        #[test]
        fn zero_and_missing_are_absent() {
            assert_eq!(kelvin_to_celsius(Some(0.0)), None);
            assert_eq!(kelvin_to_celsius(None), None);
        }

        #[test]
        fn matches_two_decimal_rounding_for_positive_input() {
            for k in [0.01, 1.0, 100.5, 273.149, 310.987, 5000.0] {
                let expected: f64 = format!("{:.2}", k - 273.15).parse().unwrap();
                assert_eq!(kelvin_to_celsius(Some(k)), Some(expected), "k = {k}");
            }
        }
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = deg.rem_euclid(360.0);
        let idx = ((deg / 22.5) + 0.5) as usize % COMPASS.len();
        COMPASS[idx]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn cardinal_points() {
            assert_eq!(degree_to_compass(0.0), "N");
            assert_eq!(degree_to_compass(90.0), "E");
            assert_eq!(degree_to_compass(180.0), "S");
            assert_eq!(degree_to_compass(230.0), "SW");
            assert_eq!(degree_to_compass(270.0), "W");
            assert_eq!(degree_to_compass(360.0), "N");
            assert_eq!(degree_to_compass(-45.0), "NW");
        }
    }
}
