mod config;
mod controller;
mod error;
mod geolocate;
mod location;
mod presenter;
mod surface;
mod weather;

use crate::{
    config::Config, controller::Controller, surface::TermSurface, weather::WeatherClient,
};
use log::LevelFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::load()?;
    let client = WeatherClient::new(config.api_key.clone(), config.language.clone());
    let mut controller = Controller::new(client, config.default_city, TermSurface::new());

    controller.startup(geolocate::current_position().await).await;

    // Each stdin line is the search field: type a city and press enter to
    // look it up, or submit an empty line to clear the field and fall back
    // to the geolocated (or default) weather. EOF ends the session.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            controller.clear_pressed().await;
        } else {
            controller.input_changed(&line).await;
            controller.search_submitted().await;
        }
    }
    Ok(())
}
