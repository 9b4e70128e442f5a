//! RGB565 colours and the per-frame colour scheme.

use embedded_graphics::pixelcolor::Rgb565;

/// Build an [`Rgb565`] from its packed 16-bit form.
pub const fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::new(
        ((raw >> 11) & 0x1F) as u8,
        ((raw >> 5) & 0x3F) as u8,
        (raw & 0x1F) as u8,
    )
}

pub const BLACK: Rgb565 = from_raw(0x0000);
pub const RED: Rgb565 = from_raw(0xF800);
pub const YELLOW: Rgb565 = from_raw(0xFFE0);
pub const GREEN: Rgb565 = from_raw(0x07E0);
pub const BLUE: Rgb565 = from_raw(0x001F);
pub const GRAY: Rgb565 = from_raw(0x8410);
pub const WHITE: Rgb565 = from_raw(0xFFFF);
pub const MAGENTA: Rgb565 = from_raw(0xF81F);
pub const ORANGERED: Rgb565 = from_raw(0xFA20);
pub const LIME: Rgb565 = from_raw(0x07E0);
pub const MIDNIGHTBLUE: Rgb565 = from_raw(0x18CE);
pub const DARKBLUE: Rgb565 = from_raw(0x6C5D);
pub const ALIZARIN_CRIMSON: Rgb565 = from_raw(0xE006);
pub const OUTRAGEOUS_ORANGE: Rgb565 = from_raw(0xFB67);

// Analog clock
pub const ANALOG_FRAME_EDGE: Rgb565 = RED;
pub const ANALOG_FRAME_BG: Rgb565 = GRAY;
pub const ANALOG_DIAL_BG: Rgb565 = WHITE;
pub const ANALOG_TZ: Rgb565 = YELLOW;
pub const ANALOG_DIAL_EDGE: Rgb565 = BLACK;
pub const ANALOG_AM_NUMERALS: Rgb565 = BLACK;
pub const ANALOG_PM_NUMERALS: Rgb565 = RED;
pub const ANALOG_DIAL_TICKS: Rgb565 = BLACK;
pub const ANALOG_SEC_HAND: Rgb565 = ORANGERED;
pub const ANALOG_MIN_HAND: Rgb565 = BLUE;
pub const ANALOG_HOUR_HAND: Rgb565 = GREEN;
pub const ANALOG_HUB: Rgb565 = BLACK;
pub const ANALOG_INDOOR: Rgb565 = RED;

// Digital clock
pub const DIGITAL_FRAME_EDGE: Rgb565 = WHITE;
pub const DIGITAL_BG: Rgb565 = BLACK;
pub const DIGITAL_UTC: Rgb565 = ORANGERED;
pub const DIGITAL_LOCAL: Rgb565 = LIME;
pub const DIGITAL_INDOOR: Rgb565 = YELLOW;

// Weather frames
pub const WX_TOP_BG: Rgb565 = YELLOW;
pub const WX_TOP_TEXT: Rgb565 = BLUE;
pub const WX_BOTTOM_BG: Rgb565 = BLUE;
pub const WX_BOTTOM_TEXT: Rgb565 = YELLOW;

// Almanac frame
pub const ALM_TOP_BG: Rgb565 = MIDNIGHTBLUE;
pub const ALM_TOP_TEXT: Rgb565 = YELLOW;
pub const ALM_BOTTOM_BG: Rgb565 = YELLOW;
pub const ALM_BOTTOM_TEXT: Rgb565 = BLUE;
pub const ALM_MOON_BG: Rgb565 = DARKBLUE;
pub const ALM_MOON_FACE: Rgb565 = WHITE;

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{raw::RawU16, RgbColor};
    use embedded_graphics::prelude::RawData;

    #[test]
    fn raw_values_round_trip_through_rgb565() {
        for raw in [0x0000u16, 0xF800, 0x07E0, 0x001F, 0xFA20, 0x18CE, 0x6C5D, 0xFFFF] {
            let color = from_raw(raw);
            assert_eq!(RawU16::from(color).into_inner(), raw);
        }
    }

    #[test]
    fn primaries_match_library_constants() {
        assert_eq!(BLACK, Rgb565::BLACK);
        assert_eq!(WHITE, Rgb565::WHITE);
        assert_eq!(RED, Rgb565::RED);
        assert_eq!(BLUE, Rgb565::BLUE);
    }
}
