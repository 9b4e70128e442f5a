//! # WX Frame Display Entry Point
//!
//! Wires the station loop to its surroundings: configuration, weather source,
//! telemetry uplinks, indoor sensor and display. It supports production mode
//! (ST7735 TFT over SPI) and development mode (`--stdout`, ASCII frames).

#[cfg(test)]
mod tests;

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wx_frame_lib::{
    config::{Config, DEFAULT_CONFIG_PATH},
    fallback::{LogTelemetry, OfflineWeather},
    framebuffer::{FrameBuffer, TFT_HEIGHT, TFT_WIDTH},
    network::Network,
    sensor::{IndoorSensor, NoSensor},
    station::{Station, Telemetry, WeatherSource},
    surface::{Canvas, Surface},
    time::parse_zone,
};

/// Pause between loop passes.
const LOOP_PAUSE: Duration = Duration::from_millis(20);
/// How long the settings screen stays up before the frames start.
const DATA_SCREEN_HOLD: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(version, about = "Weather, almanac and clock frames on a 128x128 TFT")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Render frames as ASCII art on stdout instead of the TFT
    #[arg(long)]
    stdout: bool,

    /// Use the built-in weather model and log packets instead of posting them
    #[arg(long)]
    offline: bool,

    /// Stop after this many frame advances (runs forever when absent)
    #[arg(long)]
    cycles: Option<u64>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    debug: bool,
}

/// Pick live or offline network services.
fn services(args: &Args, config: &Config) -> (Box<dyn WeatherSource>, Box<dyn Telemetry>) {
    if !args.offline {
        match (Network::new(config), Network::new(config)) {
            (Ok(source), Ok(uplink)) => return (Box::new(source), Box::new(uplink)),
            (Err(e), _) | (_, Err(e)) => log::error!("Network unavailable: {:#}", e),
        }
        log::warn!("Falling back to offline weather model");
    }
    let zone = parse_zone(&config.station.timezone);
    (
        Box::new(OfflineWeather::new(zone)),
        Box::new(LogTelemetry::new(config)),
    )
}

/// Run the station loop until `cycles` frame advances have been shown.
fn run<S: Surface>(
    mut station: Station<S>,
    cycles: Option<u64>,
    mut on_frame: impl FnMut(&Station<S>),
) -> anyhow::Result<()> {
    station.setup(chrono::Utc::now());
    on_frame(&station);
    std::thread::sleep(DATA_SCREEN_HOLD);
    station.start(Instant::now());

    let mut shown = 0u64;
    loop {
        let report = station.service(Instant::now(), chrono::Utc::now);
        if let Some(frame) = report.frame.advanced_to {
            log::debug!("Showing {}", frame.name());
            on_frame(&station);
            shown += 1;
            if cycles.is_some_and(|limit| shown >= limit) {
                return Ok(());
            }
        }
        std::thread::sleep(LOOP_PAUSE);
    }
}

#[cfg(all(target_os = "linux", feature = "hardware"))]
fn indoor_sensor() -> Box<dyn IndoorSensor> {
    use linux_embedded_hal::{Delay, I2cdev};
    use wx_frame_lib::sensor::Aht10;

    let sensor = I2cdev::new("/dev/i2c-1")
        .map_err(|e| anyhow::anyhow!("open /dev/i2c-1: {}", e))
        .and_then(|i2c| Aht10::new(i2c, Delay).map_err(|e| anyhow::anyhow!("AHT10: {:?}", e)));
    match sensor {
        Ok(sensor) => {
            log::info!("AHT10 indoor sensor ready");
            Box::new(sensor)
        }
        Err(e) => {
            log::info!("No indoor sensor ({:#})", e);
            Box::new(NoSensor)
        }
    }
}

#[cfg(not(all(target_os = "linux", feature = "hardware")))]
fn indoor_sensor() -> Box<dyn IndoorSensor> {
    Box::new(NoSensor)
}

/// ST7735 128x128 on the Pi SPI bus. DC on GPIO 25, RST on GPIO 27.
#[cfg(all(target_os = "linux", feature = "hardware"))]
fn run_tft(args: &Args, config: Config) -> anyhow::Result<()> {
    use linux_embedded_hal::{
        gpio_cdev::{Chip, LineRequestFlags},
        spidev::{SpiModeFlags, SpidevOptions},
        CdevPin, Delay, SpidevDevice,
    };
    use anyhow::Context;
    use st7735_lcd::{Orientation, ST7735};

    let mut spi = SpidevDevice::open("/dev/spidev0.0").context("opening SPI device")?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(4_000_000)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.configure(&options).context("configuring SPI")?;

    let mut chip = Chip::new("/dev/gpiochip0").context("opening GPIO chip")?;
    let dc_handle = chip
        .get_line(25)
        .context("getting DC line")?
        .request(LineRequestFlags::OUTPUT, 0, "wx-frame-dc")
        .context("requesting DC line")?;
    let dc = CdevPin::new(dc_handle).context("creating DC pin")?;
    let rst_handle = chip
        .get_line(27)
        .context("getting RST line")?
        .request(LineRequestFlags::OUTPUT, 0, "wx-frame-rst")
        .context("requesting RST line")?;
    let rst = CdevPin::new(rst_handle).context("creating RST pin")?;

    let mut lcd = ST7735::new(spi, dc, rst, true, false, TFT_WIDTH, TFT_HEIGHT);
    let mut delay = Delay {};
    lcd.init(&mut delay)
        .map_err(|_| anyhow::anyhow!("LCD init failed"))?;
    lcd.set_orientation(&Orientation::Portrait)
        .map_err(|_| anyhow::anyhow!("LCD orientation failed"))?;

    let (source, telemetry) = services(args, &config);
    let station = Station::new(Canvas::new(lcd), config, source, telemetry, indoor_sensor());
    run(station, args.cycles, |_| {})
}

fn run_stdout(args: &Args, config: Config) -> anyhow::Result<()> {
    let (source, telemetry) = services(args, &config);
    let canvas = Canvas::new(FrameBuffer::new(TFT_WIDTH, TFT_HEIGHT));
    let station = Station::new(canvas, config, source, telemetry, indoor_sensor());
    run(station, args.cycles, |station| {
        println!("{}", station.surface().target().to_ascii());
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load_from_path(&args.config);
    log::info!(
        "Station {} in {}",
        config.station.station_id,
        config.station.timezone
    );

    if args.init_config {
        return config.save_to_path(&args.config);
    }

    if args.stdout {
        return run_stdout(&args, config);
    }

    #[cfg(all(target_os = "linux", feature = "hardware"))]
    {
        match run_tft(&args, config.clone()) {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::error!("TFT display failed: {:#}", e);
                log::warn!("Falling back to ASCII output");
                return run_stdout(&args, config);
            }
        }
    }

    #[cfg(not(all(target_os = "linux", feature = "hardware")))]
    {
        log::warn!("TFT support not enabled. Rebuild with --features hardware; showing ASCII output");
        run_stdout(&args, config)
    }
}
