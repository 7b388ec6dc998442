use crate::{error::WeatherError, location::Coordinates};
use log::info;
use reqwest::{Client, Response};
use serde::Deserialize;

/// Client for the provider's current-weather endpoint. Queries go out by
/// coordinates or by city name; both land on the same endpoint and parse
/// into the same [CurrentWeather] shape.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl WeatherClient {
    const API_HOST: &'static str = "https://api.openweathermap.org";
    const ICON_HOST: &'static str = "https://openweathermap.org/img/wn";

    pub fn new(api_key: String, language: String) -> Self {
        Self::with_base_url(Self::API_HOST.to_owned(), api_key, language)
    }

    /// Point the client at a different host. Tests aim this at a local mock
    /// server.
    pub fn with_base_url(base_url: String, api_key: String, language: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            language,
        }
    }

    /// Fetch current conditions for a device position. A non-success status
    /// here has no user-correctable cause, so it maps to the generic
    /// service failure.
    pub async fn current_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentWeather, WeatherError> {
        info!(
            "Fetching weather for position ({:.4}, {:.4})",
            coordinates.latitude, coordinates.longitude
        );
        let response = self
            .request()
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(WeatherError::Network)?;
        if !response.status().is_success() {
            return Err(WeatherError::Service);
        }
        Self::parse(response).await
    }

    /// Fetch current conditions for a city name. The query encoder handles
    /// URL-escaping of the name. A non-success status means the provider
    /// doesn't know the city.
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        info!("Fetching weather for city {city:?}");
        let response = self
            .request()
            .query(&[("q", city)])
            .send()
            .await
            .map_err(WeatherError::Network)?;
        if !response.status().is_success() {
            return Err(WeatherError::CityNotFound);
        }
        Self::parse(response).await
    }

    fn request(&self) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.language.as_str()),
            ])
    }

    async fn parse(response: Response) -> Result<CurrentWeather, WeatherError> {
        let weather: CurrentWeather = response
            .json()
            .await
            .map_err(|err| WeatherError::Parse(err.to_string()))?;
        // The conditions list is normally a single entry; an empty one would
        // make the result unrenderable, so treat it as malformed too
        if weather.conditions.is_empty() {
            return Err(WeatherError::Parse("empty weather list".into()));
        }
        Ok(weather)
    }
}

/// One parsed current-weather response
/// https://openweathermap.org/current
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentWeather {
    /// Display name of the resolved location
    pub name: String,
    main: Measurements,
    #[serde(rename = "weather")]
    conditions: Vec<Condition>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Measurements {
    /// Celsius, since every request asks for metric units
    temp: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

impl CurrentWeather {
    pub fn temperature(&self) -> f64 {
        self.main.temp
    }

    /// The primary condition. [WeatherClient] rejects payloads with none.
    pub fn condition(&self) -> &Condition {
        &self.conditions[0]
    }

    /// Image URL for the condition icon
    pub fn icon_url(&self) -> String {
        format!("{}/{}@2x.png", WeatherClient::ICON_HOST, self.condition().icon)
    }

    #[cfg(test)]
    pub fn sample(name: &str, temp: f64, description: &str, icon: &str) -> Self {
        Self {
            name: name.to_owned(),
            main: Measurements { temp },
            conditions: vec![Condition {
                description: description.to_owned(),
                icon: icon.to_owned(),
            }],
        }
    }
}
