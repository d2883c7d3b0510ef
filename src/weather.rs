// ABOUTME: Static WMO weather-code lookup table mapping codes to labels and icon keys
// ABOUTME: Day/night icon variants chosen from the workout's creation hour
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weather condition rendering table.
//!
//! Pure lookup, external to the sync state machine: a WMO current-weather
//! code plus a day/night flag yields a display label and an icon key. An
//! absent or unrecognized code maps to the defined unknown-condition glyph.

/// Display label and icon key for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherGlyph {
    /// Human-readable condition label.
    pub label: &'static str,
    /// Icon asset key, already day/night resolved.
    pub icon_key: &'static str,
}

/// Glyph substituted when the weather lookup failed or the code is unknown.
pub const UNKNOWN_CONDITIONS: WeatherGlyph = WeatherGlyph {
    label: "Couldn't-fetch-Weather-Condition",
    icon_key: "not-available",
};

/// Resolve a weather code to its glyph. `night` selects the night variant
/// of icons that have one.
#[must_use]
pub fn glyph_for(code: Option<u8>, night: bool) -> WeatherGlyph {
    let dn = |day: &'static str, night_key: &'static str| if night { night_key } else { day };

    let Some(code) = code else {
        return UNKNOWN_CONDITIONS;
    };

    let (label, icon_key) = match code {
        0 => ("Clear-Sky", dn("clear-day", "clear-night")),
        1 => ("Mainly-Clear", dn("cloudy-day-1", "cloudy-night-1")),
        2 => ("Partly-Cloudy", dn("cloudy-day-2", "cloudy-night-2")),
        3 => ("Overcast", dn("overcast-day", "overcast-night")),
        45 => ("Fog", dn("haze-day", "haze-night")),
        48 => ("Depositing-Rime-Fog", dn("fog-day", "fog-night")),
        51 => ("Drizzle:Light", "drizzle"),
        53 => ("Drizzle:Moderate", "rainy-7"),
        55 => ("Drizzle:Dense-Intensity", "rainy-4"),
        56 => ("Freezing-Drizzle:Light", "rainy-7"),
        57 => ("Freezing-Drizzle:Dense-Intensity", "rainy-4"),
        61 => ("Rain:Slight", "rainy-5"),
        63 => ("Rain:Moderate", "rain"),
        65 => ("Rain:Heavy-Intensity", "rainy-6"),
        66 => ("Freezing-Rain:Light", "rainy-5"),
        67 => ("Freezing-Rain:Heavy-Intensity", "rainy-6"),
        71 => ("Snow-Fall:Slight", "snowy-4"),
        73 => ("Snow-Fall:Moderate", "snowy-5"),
        75 => ("Snow-Fall:Violent", "snowy-6"),
        77 => ("Snow-Grains", "snow"),
        80 => ("Rain-Showers:Slight", "rainy-5"),
        81 => ("Rain-Showers:Moderate", "rain"),
        82 => (
            "Rain-Showers:Violent",
            dn("thunderstorms-day-rain", "thunderstorms-night-rain"),
        ),
        85 => ("Snow-Showers:Slight", "snowy-4"),
        86 => ("Snow-Showers:Heavy", "snowy-6"),
        95 => (
            "Thunderstorm:Slight/Moderate",
            dn("thunderstorms-day", "thunderstorms-night"),
        ),
        96 => ("Thunderstorm:Slight-Hail", "thunder"),
        99 => ("Thunderstorm:Heavy-Hail", "thunder"),
        _ => return UNKNOWN_CONDITIONS,
    };

    WeatherGlyph { label, icon_key }
}
