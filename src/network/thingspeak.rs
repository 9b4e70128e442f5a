//! ThingSpeak channel updates.
//!
//! The observation goes out as fields 1-8 of a form-encoded POST to
//! `/update`, authenticated with the channel write key header.

use crate::WeatherSnapshot;
use reqwest::Client;
use thiserror::Error;

pub const UPDATE_URL: &str = "http://api.thingspeak.com/update";
const API_KEY_HEADER: &str = "X-THINGSPEAKAPIKEY";

#[derive(Error, Debug)]
pub enum ThingSpeakError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel updates are rejected without a write key
    #[error("no write key configured")]
    MissingKey,
}

/// Form fields for one update, in channel field order.
pub fn update_fields(wx: &WeatherSnapshot, status: &str) -> Vec<(String, String)> {
    let values = [
        wx.obs_temp,
        wx.obs_humidity,
        wx.obs_pressure,
        wx.obs_wind_speed,
        wx.obs_wind_dir,
        wx.obs_solar_radiation,
        wx.obs_precip_total,
        wx.obs_precip_rate,
    ];
    let mut fields: Vec<(String, String)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("field{}", i + 1), format!("{:.2}", value)))
        .collect();
    if !status.is_empty() {
        fields.push(("status".to_string(), status.to_string()));
    }
    fields
}

pub async fn post_update(
    client: &Client,
    url: &str,
    write_key: &str,
    wx: &WeatherSnapshot,
    status: &str,
) -> Result<(), ThingSpeakError> {
    if write_key.is_empty() {
        return Err(ThingSpeakError::MissingKey);
    }
    let fields = update_fields(wx, status);
    log::debug!("ThingSpeak update: {:?}", fields);
    client
        .post(url)
        .header(API_KEY_HEADER, write_key)
        .form(&fields)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_in_channel_order() {
        let wx = WeatherSnapshot {
            obs_temp: 21.5,
            obs_humidity: 48.0,
            obs_pressure: 1013.25,
            obs_wind_speed: 12.0,
            obs_wind_dir: 270.0,
            obs_solar_radiation: 300.0,
            obs_precip_total: 1.5,
            obs_precip_rate: 0.25,
            ..Default::default()
        };
        let fields = update_fields(&wx, "Online");
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], ("field1".to_string(), "21.50".to_string()));
        assert_eq!(fields[2], ("field3".to_string(), "1013.25".to_string()));
        assert_eq!(fields[7], ("field8".to_string(), "0.25".to_string()));
        assert_eq!(fields[8], ("status".to_string(), "Online".to_string()));
    }

    #[tokio::test]
    async fn missing_write_key_is_refused_before_sending() {
        let client = Client::new();
        let result = post_update(&client, UPDATE_URL, "", &WeatherSnapshot::default(), "").await;
        assert!(matches!(result, Err(ThingSpeakError::MissingKey)));
    }

    #[test]
    fn empty_status_is_left_out() {
        let fields = update_fields(&WeatherSnapshot::default(), "");
        assert_eq!(fields.len(), 8);
        assert!(fields.iter().all(|(name, _)| name.starts_with("field")));
    }
}
