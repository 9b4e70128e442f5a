//! # Weather Service Client
//!
//! Fetches the personal-weather-station observation and the daily forecast
//! from the weather.com v2/v3 APIs. Both endpoints are always queried in
//! metric units; conversion happens at display time.
//!
//! ## Endpoints
//! - **Current**: `v2/pws/observations/current?stationId=..` returns one
//!   observation under `observations[0]`, including the station's lat/lon
//! - **Forecast**: `v3/wx/forecast/daily/5day?geocode=lat,lon` returns
//!   parallel arrays, one entry per day (or day part). Later in the day the
//!   first entry is `null`, so the first present of entries 0 and 1 is used
//!
//! The forecast needs the station position, so the current observation must
//! be fetched first.

use crate::WeatherSnapshot;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const WX_HOST: &str = "https://api.weather.com";
const WX_CURRENT: &str = "v2/pws/observations/current";
const WX_FORECAST: &str = "v3/wx/forecast/daily/5day";

#[derive(Error, Debug)]
pub enum WeatherError {
    /// HTTP request failed (network, server, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered but had nothing for us
    #[error("no data: {0}")]
    NoData(&'static str),
}

/// Current observation fields the display and uplinks use. Metric units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation {
    pub lat: f32,
    pub lon: f32,
    pub neighborhood: String,
    pub solar_radiation: f32,
    pub uv: f32,
    pub wind_dir: f32,
    pub humidity: f32,
    pub temp: f32,
    pub heat_index: f32,
    pub dew_point: f32,
    pub wind_chill: f32,
    pub wind_speed: f32,
    pub wind_gust: f32,
    pub pressure: f32,
    pub precip_rate: f32,
    pub precip_total: f32,
}

impl Observation {
    pub fn apply_to(&self, wx: &mut WeatherSnapshot) {
        wx.obs_lat = self.lat;
        wx.obs_lon = self.lon;
        wx.obs_neighborhood = self.neighborhood.clone();
        wx.obs_solar_radiation = self.solar_radiation;
        wx.obs_uv = self.uv;
        wx.obs_wind_dir = self.wind_dir;
        wx.obs_humidity = self.humidity;
        wx.obs_temp = self.temp;
        wx.obs_heat_index = self.heat_index;
        wx.obs_dew_point = self.dew_point;
        wx.obs_wind_chill = self.wind_chill;
        wx.obs_wind_speed = self.wind_speed;
        wx.obs_wind_gust = self.wind_gust;
        wx.obs_pressure = self.pressure;
        wx.obs_precip_rate = self.precip_rate;
        wx.obs_precip_total = self.precip_total;
    }
}

/// Today's forecast, or tomorrow's once today's entries have gone null.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Forecast {
    pub phrase_long: String,
    pub phrase_short: String,
    pub temp_max: f32,
    pub temp_min: f32,
    pub cloud: i32,
    pub sunrise: i64,
    pub sunset: i64,
}

impl Forecast {
    pub fn apply_to(&self, wx: &mut WeatherSnapshot) {
        wx.for_phrase_long = self.phrase_long.clone();
        wx.for_phrase_short = self.phrase_short.clone();
        wx.for_temp_max = self.temp_max;
        wx.for_temp_min = self.temp_min;
        wx.for_cloud = self.cloud;
        wx.for_sunrise = self.sunrise;
        wx.for_sunset = self.sunset;
    }
}

// -- Wire format --

#[derive(Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    observations: Vec<ObservationJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationJson {
    lat: Option<f32>,
    lon: Option<f32>,
    neighborhood: Option<String>,
    solar_radiation: Option<f32>,
    uv: Option<f32>,
    winddir: Option<f32>,
    humidity: Option<f32>,
    #[serde(default)]
    metric: MetricJson,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricJson {
    temp: Option<f32>,
    heat_index: Option<f32>,
    dewpt: Option<f32>,
    wind_chill: Option<f32>,
    wind_speed: Option<f32>,
    wind_gust: Option<f32>,
    pressure: Option<f32>,
    precip_rate: Option<f32>,
    precip_total: Option<f32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    #[serde(default)]
    calendar_day_temperature_max: Vec<Option<f32>>,
    #[serde(default)]
    calendar_day_temperature_min: Vec<Option<f32>>,
    #[serde(default)]
    sunrise_time_utc: Vec<Option<i64>>,
    #[serde(default)]
    sunset_time_utc: Vec<Option<i64>>,
    #[serde(default)]
    daypart: Vec<DaypartJson>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DaypartJson {
    #[serde(default)]
    cloud_cover: Vec<Option<i32>>,
    #[serde(default)]
    wx_phrase_long: Vec<Option<String>>,
    #[serde(default)]
    wx_phrase_short: Vec<Option<String>>,
}

/// First non-null of entries 0 and 1.
fn first_present<T: Clone>(values: &[Option<T>]) -> Option<T> {
    values.iter().take(2).flatten().next().cloned()
}

pub fn current_url(station_id: &str, api_key: &str) -> String {
    format!(
        "{}/{}?stationId={}&format=json&units=m&numericPrecision=decimal&apiKey={}",
        WX_HOST, WX_CURRENT, station_id, api_key
    )
}

pub fn forecast_url(lat: f32, lon: f32, api_key: &str) -> String {
    format!(
        "{}/{}?geocode={},{}&format=json&units=m&language=en-US&apiKey={}",
        WX_HOST, WX_FORECAST, lat, lon, api_key
    )
}

/// Parse a current-observation response.
///
/// A missing observation, or one at latitude 0, means the station is not
/// reporting; that is an error so the previous snapshot stays on screen.
pub fn parse_current(body: &str) -> Result<Observation, WeatherError> {
    if body.trim().is_empty() {
        return Err(WeatherError::NoData("empty observation response"));
    }
    let response: CurrentResponse = serde_json::from_str(body)?;
    let obs = response
        .observations
        .into_iter()
        .next()
        .ok_or(WeatherError::NoData("no observations"))?;
    let lat = obs.lat.unwrap_or(0.0);
    if lat == 0.0 {
        return Err(WeatherError::NoData("station reported no position"));
    }
    let m = obs.metric;
    Ok(Observation {
        lat,
        lon: obs.lon.unwrap_or(0.0),
        neighborhood: obs.neighborhood.unwrap_or_default(),
        solar_radiation: obs.solar_radiation.unwrap_or(0.0),
        uv: obs.uv.unwrap_or(0.0),
        wind_dir: obs.winddir.unwrap_or(0.0),
        humidity: obs.humidity.unwrap_or(0.0),
        temp: m.temp.unwrap_or(0.0),
        heat_index: m.heat_index.unwrap_or(0.0),
        dew_point: m.dewpt.unwrap_or(0.0),
        wind_chill: m.wind_chill.unwrap_or(0.0),
        wind_speed: m.wind_speed.unwrap_or(0.0),
        wind_gust: m.wind_gust.unwrap_or(0.0),
        pressure: m.pressure.unwrap_or(0.0),
        precip_rate: m.precip_rate.unwrap_or(0.0),
        precip_total: m.precip_total.unwrap_or(0.0),
    })
}

pub fn parse_forecast(body: &str) -> Result<Forecast, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let daypart = response.daypart.into_iter().next().unwrap_or_default();
    let sunrise = first_present(&response.sunrise_time_utc)
        .ok_or(WeatherError::NoData("forecast has no sunrise"))?;
    Ok(Forecast {
        phrase_long: first_present(&daypart.wx_phrase_long).unwrap_or_default(),
        phrase_short: first_present(&daypart.wx_phrase_short).unwrap_or_default(),
        temp_max: first_present(&response.calendar_day_temperature_max).unwrap_or(0.0),
        temp_min: first_present(&response.calendar_day_temperature_min).unwrap_or(0.0),
        cloud: first_present(&daypart.cloud_cover).unwrap_or(0),
        sunrise,
        sunset: first_present(&response.sunset_time_utc).unwrap_or(0),
    })
}

async fn get_body(client: &Client, url: &str) -> Result<String, WeatherError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

pub async fn fetch_current(
    client: &Client,
    station_id: &str,
    api_key: &str,
) -> Result<Observation, WeatherError> {
    log::debug!("Fetching current observation for {}", station_id);
    let body = get_body(client, &current_url(station_id, api_key)).await?;
    parse_current(&body)
}

pub async fn fetch_forecast(
    client: &Client,
    lat: f32,
    lon: f32,
    api_key: &str,
) -> Result<Forecast, WeatherError> {
    log::debug!("Fetching forecast for {:.2},{:.2}", lat, lon);
    let body = get_body(client, &forecast_url(lat, lon, api_key)).await?;
    parse_forecast(&body)
}
