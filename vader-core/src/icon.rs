//! Weather condition code to display symbol.
//!
//! See <https://openweathermap.org/weather-conditions> for the code groups.

pub const THUNDERSTORM: &str = "⚡️⚡️";
pub const RAIN: &str = "🌧️";
pub const SNOW: &str = "🌨️";
pub const FOG: &str = "🌁";
pub const CLEAR: &str = "🌞";
pub const CLOUDY: &str = "🌤️";

const CLEAR_SKY: u16 = 800;

/// Symbol for a condition code, keyed on its leading digit. Unknown groups
/// resolve to an empty string.
pub fn resolve(code: u16) -> &'static str {
    match leading_digit(code) {
        2 => THUNDERSTORM,
        3 | 5 => RAIN,
        6 => SNOW,
        7 => FOG,
        8 if code == CLEAR_SKY => CLEAR,
        8 => CLOUDY,
        _ => "",
    }
}

fn leading_digit(mut code: u16) -> u16 {
    while code >= 10 {
        code /= 10;
    }
    code
}
