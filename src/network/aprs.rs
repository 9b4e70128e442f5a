//! # APRS-IS Uplink
//!
//! Formats weather reports and bulletins as APRS packets and posts them to an
//! APRS-IS tier 2 server.
//!
//! ## Session
//! 1. Connect and read the server banner. A "port full" banner gets one retry
//!    after 500 ms
//! 2. Log in with `user CALL pass CODE vers IoT-Kits VERSION`
//! 3. Wait up to 2 s for a line saying `verified` (and not `unverified`)
//! 4. Send the packet and disconnect
//!
//! ## Weather report (APRS101 p. 65, position without timestamp)
//! `CALL>APRS,TCPIP*:!DDmm.mmN/DDDmm.mmW_ddd/sssgGGGtTTTLlllrRRRPppphHHbBBBBB`
//! followed by the device URL. Units are the APRS ones: mph, °F, hundredths
//! of an inch, tenths of a millibar.

use crate::units::{c_to_f, km_to_miles, mm_to_in};
use crate::WeatherSnapshot;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};

/// Appended to every weather report.
pub const DEVICE_URL: &str = "https://w4krl.com/iot-kits/";
/// Software name sent at login.
const SOFTWARE_NAME: &str = "IoT-Kits";
const LOGIN_TIMEOUT: Duration = Duration::from_secs(2);
const FULL_RETRY_DELAY: Duration = Duration::from_millis(500);
/// Longest bulletin text APRS allows.
pub const MAX_BULLETIN_LEN: usize = 67;

#[derive(Error, Debug)]
pub enum AprsError {
    #[error("APRS-IS connection: {0}")]
    Io(#[from] std::io::Error),

    #[error("APRS-IS port full")]
    PortFull,

    #[error("APRS-IS login not verified for {0}")]
    Unverified(String),
}

/// Decimal degrees to `DDmm.mmN/DDDmm.mmW`.
pub fn format_location(lat: f32, lon: f32) -> String {
    let lat = lat.clamp(-90.0, 90.0);
    let lon = lon.clamp(-180.0, 180.0);
    let lat_id = if lat < 0.0 { 'S' } else { 'N' };
    let lon_id = if lon < 0.0 { 'W' } else { 'E' };
    let (lat, lon) = (lat.abs(), lon.abs());
    let lat_deg = lat.trunc();
    let lon_deg = lon.trunc();
    format!(
        "{:02}{:05.2}{}/{:03}{:05.2}{}",
        lat_deg as u32,
        60.0 * (lat - lat_deg),
        lat_id,
        lon_deg as u32,
        60.0 * (lon - lon_deg),
        lon_id
    )
}

/// Round and zero-pad to `width` digits.
pub fn padder(value: f32, width: usize) -> String {
    format!("{:0width$}", value.round() as i32, width = width)
}

/// Luminosity field: `L` below 1000 W/m², `l` with the excess above.
fn luminosity(solar_radiation: f32) -> String {
    let watts = solar_radiation.round();
    if watts >= 1000.0 {
        format!("l{}", padder(watts - 1000.0, 3))
    } else {
        format!("L{}", padder(watts, 3))
    }
}

pub fn format_weather(callsign: &str, wx: &WeatherSnapshot) -> String {
    // 00 means 100% on the wire
    let humidity = if wx.obs_humidity.round() >= 100.0 {
        0.0
    } else {
        wx.obs_humidity
    };
    format!(
        "{}>APRS,TCPIP*:!{}_{}/{}g{}t{}{}r{}P{}h{}b{}{}",
        callsign,
        format_location(wx.obs_lat, wx.obs_lon),
        padder(wx.obs_wind_dir, 3),
        padder(km_to_miles(wx.obs_wind_speed), 3),
        padder(km_to_miles(wx.obs_wind_gust), 3),
        padder(c_to_f(wx.obs_temp), 3),
        luminosity(wx.obs_solar_radiation),
        padder(100.0 * mm_to_in(wx.obs_precip_rate), 3),
        padder(100.0 * mm_to_in(wx.obs_precip_total), 3),
        padder(humidity, 2),
        padder(10.0 * wx.obs_pressure, 5),
        DEVICE_URL
    )
}

/// Bulletin packet. `id` is a digit (bulletin) or capital letter (announcement).
pub fn format_bulletin(callsign: &str, message: &str, id: &str) -> String {
    let text: String = message
        .chars()
        .filter(|c| !matches!(c, '|' | '~' | '`'))
        .take(MAX_BULLETIN_LEN)
        .collect();
    format!("{}>APRS,TCPIP*::BLN{}     :{}", callsign, id, text)
}

pub fn login_line(callsign: &str, passcode: &str) -> String {
    format!(
        "user {} pass {} vers {} {}",
        callsign,
        passcode,
        SOFTWARE_NAME,
        env!("CARGO_PKG_VERSION")
    )
}

/// A login reply line that confirms the passcode.
fn is_verified(line: &str) -> bool {
    line.contains("verified") && !line.contains("unverified")
}

async fn connect(server: &str, port: u16) -> Result<BufReader<TcpStream>, AprsError> {
    let mut reader = BufReader::new(TcpStream::connect((server, port)).await?);
    let mut banner = String::new();
    reader.read_line(&mut banner).await?;
    log::debug!("APRS-IS banner: {}", banner.trim_end());
    if banner.contains("full") {
        return Err(AprsError::PortFull);
    }
    Ok(reader)
}

/// Log in to APRS-IS and send one packet.
pub async fn post(
    server: &str,
    port: u16,
    callsign: &str,
    passcode: &str,
    packet: &str,
) -> Result<(), AprsError> {
    let mut reader = match connect(server, port).await {
        Err(AprsError::PortFull) => {
            log::warn!("APRS-IS port full, retrying");
            sleep(FULL_RETRY_DELAY).await;
            connect(server, port).await?
        }
        other => other?,
    };

    let login = login_line(callsign, passcode);
    log::debug!("APRS-IS logon: {}", login);
    reader.get_mut().write_all(format!("{}\r\n", login).as_bytes()).await?;

    let deadline = Instant::now() + LOGIN_TIMEOUT;
    let mut verified = false;
    while !verified {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        let mut line = String::new();
        match timeout(remaining, reader.read_line(&mut line)).await {
            Ok(Ok(0)) | Err(_) => break,
            Ok(Ok(_)) => {
                log::debug!("APRS-IS rcvd: {}", line.trim_end());
                if line.contains("unverified") {
                    break;
                }
                verified = is_verified(&line);
            }
            // Nothing has been sent yet; a dropped connection means no login
            Ok(Err(e)) => {
                log::debug!("APRS-IS read after logon failed: {}", e);
                break;
            }
        }
    }
    if !verified {
        return Err(AprsError::Unverified(callsign.to_string()));
    }

    log::info!("APRS-IS send: {}", packet);
    let stream = reader.get_mut();
    stream.write_all(format!("{}\r\n", packet).as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}
