use chloris_core::units::{format_temp, to_celsius, to_fahrenheit};

#[test]
fn temperature_conversions() {
    assert_eq!(to_fahrenheit(0.0), 32.0);
    assert_eq!(to_fahrenheit(100.0), 212.0);
    assert_eq!(to_celsius(212.0), 100.0);
    assert_eq!(to_fahrenheit(-40.0), -40.0);

    for c in [-12.5, 0.0, 18.3, 26.0, 41.7] {
        assert!((to_celsius(to_fahrenheit(c)) - c).abs() < 1e-9);
    }
}

#[test]
fn formatted_temperatures() {
    assert_eq!(format_temp(26.0, false), "26.0°C");
    assert_eq!(format_temp(26.0, true), "78.8°F");
    assert_eq!(format_temp(-3.26, false), "-3.3°C");
}
