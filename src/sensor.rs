//! # Indoor Temperature/Humidity Sensor
//!
//! Clock frames optionally show an indoor reading. The sensor is an AHT10 on the
//! Raspberry Pi I2C bus; boards without one use [`NoSensor`].
//!
//! ## AHT10 protocol
//! - **Init**: `E1 08 00`, then 10 ms
//! - **Measure**: `AC 33 00`, wait 80 ms, read 6 bytes
//! - **Decode**: byte 0 is status (bit 7 = busy); humidity is the next 20 bits,
//!   temperature the 20 bits after that, both scaled over 2^20

/// One indoor reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndoorReading {
    pub temp_c: f32,
    pub humidity: f32,
}

/// Source of indoor readings.
pub trait IndoorSensor {
    /// Take a reading. `None` when no sensor is fitted or the read failed.
    fn read(&mut self) -> Option<IndoorReading>;
}

/// Placeholder for boards without an indoor sensor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSensor;

impl IndoorSensor for NoSensor {
    fn read(&mut self) -> Option<IndoorReading> {
        None
    }
}

/// Sensor returning a fixed reading; handy for the development mode.
#[derive(Clone, Copy, Debug)]
pub struct FixedSensor(pub IndoorReading);

impl IndoorSensor for FixedSensor {
    fn read(&mut self) -> Option<IndoorReading> {
        Some(self.0)
    }
}

pub const AHT10_ADDRESS: u8 = 0x38;
#[cfg(feature = "hardware")]
const AHT10_INIT: [u8; 3] = [0xE1, 0x08, 0x00];
#[cfg(feature = "hardware")]
const AHT10_MEASURE: [u8; 3] = [0xAC, 0x33, 0x00];
const AHT10_BUSY: u8 = 0x80;

/// Decode a raw AHT10 measurement frame. `None` while the sensor reports busy.
pub fn decode_aht10(raw: &[u8; 6]) -> Option<IndoorReading> {
    if raw[0] & AHT10_BUSY != 0 {
        return None;
    }
    let humidity_raw = ((raw[1] as u32) << 12) | ((raw[2] as u32) << 4) | ((raw[3] as u32) >> 4);
    let temp_raw = (((raw[3] & 0x0F) as u32) << 16) | ((raw[4] as u32) << 8) | raw[5] as u32;
    let scale = (1u32 << 20) as f32;
    Some(IndoorReading {
        humidity: humidity_raw as f32 * 100.0 / scale,
        temp_c: temp_raw as f32 * 200.0 / scale - 50.0,
    })
}

#[cfg(feature = "hardware")]
pub use self::hw::Aht10;

#[cfg(feature = "hardware")]
mod hw {
    use super::*;
    use embedded_hal::{delay::DelayNs, i2c::I2c};

    /// AHT10 driver over any embedded-hal 1.0 I2C bus.
    pub struct Aht10<I2C, D> {
        i2c: I2C,
        delay: D,
    }

    impl<I2C, D> Aht10<I2C, D>
    where
        I2C: I2c,
        D: DelayNs,
    {
        /// Calibrate the sensor; an error means no sensor answered.
        pub fn new(mut i2c: I2C, mut delay: D) -> Result<Self, I2C::Error> {
            i2c.write(AHT10_ADDRESS, &AHT10_INIT)?;
            delay.delay_ms(10);
            Ok(Self { i2c, delay })
        }

        fn measure(&mut self) -> Result<[u8; 6], I2C::Error> {
            self.i2c.write(AHT10_ADDRESS, &AHT10_MEASURE)?;
            self.delay.delay_ms(80);
            let mut raw = [0u8; 6];
            self.i2c.read(AHT10_ADDRESS, &mut raw)?;
            Ok(raw)
        }
    }

    impl<I2C, D> IndoorSensor for Aht10<I2C, D>
    where
        I2C: I2c,
        D: DelayNs,
    {
        fn read(&mut self) -> Option<IndoorReading> {
            match self.measure() {
                Ok(raw) => decode_aht10(&raw),
                Err(e) => {
                    log::warn!("AHT10 read failed: {:?}", e);
                    None
                }
            }
        }
    }
}
