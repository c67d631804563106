pub const SQFT_TO_M2: f64 = 0.092903;
pub const GRAMS_PER_POUND: f64 = 453.592;
pub const POUNDS_PER_KG: f64 = 2.20462;

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Render a Celsius temperature with one decimal, converting when `imperial` is set.
pub fn format_temp(celsius: f64, imperial: bool) -> String {
    if imperial {
        format!("{:.1}°F", to_fahrenheit(celsius))
    } else {
        format!("{celsius:.1}°C")
    }
}
