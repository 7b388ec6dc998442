use crate::{
    location::{self, Coordinates, LocationQuery},
    presenter::Presenter,
    surface::Surface,
    weather::WeatherClient,
};
use log::warn;

/// The weather lookup controller. Owns the session's geolocated position,
/// the API client and the presenter, and handles the three UI triggers:
/// search submitted, input changed, clear pressed.
pub struct Controller<S> {
    client: WeatherClient,
    presenter: Presenter<S>,
    default_city: String,
    /// Position reported by the startup geolocation attempt. Never cleared
    /// during the session.
    position: Option<Coordinates>,
    /// Current contents of the search field
    input: String,
}

impl<S: Surface> Controller<S> {
    pub fn new(client: WeatherClient, default_city: String, surface: S) -> Self {
        Self {
            client,
            presenter: Presenter::new(surface),
            default_city,
            position: None,
            input: String::new(),
        }
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &Presenter<S> {
        &self.presenter
    }

    #[cfg(test)]
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// One-shot startup sequencing: remember the geolocated position (if
    /// any), then fetch by it, falling back to the default city.
    pub async fn startup(&mut self, position: Option<Coordinates>) {
        self.position = position;
        self.fetch_fallback().await;
    }

    /// Search trigger. Empty input falls back to the geolocated position or
    /// the default city; anything else is validated as a city name first,
    /// and rejected input never reaches the network or the loading state.
    pub async fn search_submitted(&mut self) {
        match location::resolve_query(&self.input, self.position, &self.default_city) {
            Ok(query) => self.fetch(query).await,
            Err(err) => {
                warn!("Rejected city input {:?}", self.input);
                self.presenter.show_error(&err.to_string());
            }
        }
    }

    /// Input-change trigger: tracks the field, toggles the clear button,
    /// and re-fetches as soon as the field becomes empty. Emptying the
    /// field is itself a trigger, not just a visual reset.
    pub async fn input_changed(&mut self, value: &str) {
        self.input = value.to_owned();
        self.presenter.set_clear_button_visible(!self.input.is_empty());
        if self.input.is_empty() {
            self.fetch_fallback().await;
        }
    }

    /// Clear trigger: empties the field and goes back to the
    /// geolocation-or-default weather
    pub async fn clear_pressed(&mut self) {
        self.input.clear();
        self.presenter.set_clear_button_visible(false);
        self.presenter.clear_error();
        self.fetch_fallback().await;
    }

    async fn fetch_fallback(&mut self) {
        let query = match self.position {
            Some(coordinates) => LocationQuery::Coordinates(coordinates),
            None => LocationQuery::City(self.default_city.clone()),
        };
        self.fetch(query).await;
    }

    /// Run one fetch with the bookkeeping that wraps every request: loading
    /// on and error cleared before the call, loading off after it settles,
    /// whatever the outcome.
    async fn fetch(&mut self, query: LocationQuery) {
        self.presenter.show_loading();
        self.presenter.clear_error();
        let result = match &query {
            LocationQuery::Coordinates(coordinates) => {
                self.client.current_by_coordinates(*coordinates).await
            }
            LocationQuery::City(city) => self.client.current_by_city(city).await,
        };
        match result {
            Ok(weather) => self.presenter.show_weather(weather),
            Err(err) => {
                warn!("Weather fetch for {query:?} failed: {err:?}");
                self.presenter.show_error(&err.to_string());
            }
        }
        self.presenter.hide_loading();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        presenter::DisplayState,
        surface::{mock::MockSurface, Panel, TextRegion},
    };
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const BRUSSELS: Coordinates = Coordinates {
        latitude: 50.85,
        longitude: 4.35,
    };

    fn controller(server: &MockServer) -> Controller<MockSurface> {
        let client = WeatherClient::with_base_url(server.uri(), "test-key".into(), "fr".into());
        Controller::new(client, "Bruxelles".into(), MockSurface::default())
    }

    fn weather_body(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "main": {"temp": 17.6},
            "weather": [{"description": "ciel dégagé", "icon": "01d"}]
        })
    }

    async fn mount_city(server: &MockServer, city: &str, name: &str) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(name)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_startup_with_position_fetches_by_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "50.85"))
            .and(query_param("lon", "4.35"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Bruxelles")))
            .expect(1)
            .mount(&server)
            .await;

        let mut controller = controller(&server);
        controller.startup(Some(BRUSSELS)).await;

        assert_eq!(controller.position(), Some(BRUSSELS));
        assert!(matches!(
            controller.presenter().state(),
            DisplayState::Weather(_)
        ));
    }

    #[tokio::test]
    async fn test_startup_without_position_fetches_default_city() {
        let server = MockServer::start().await;
        mount_city(&server, "Bruxelles", "Bruxelles").await;

        let mut controller = controller(&server);
        controller.startup(None).await;

        assert_eq!(controller.position(), None);
        let surface = controller.presenter().surface();
        assert_eq!(surface.text(TextRegion::LocationName), "Bruxelles");
        assert!(surface.is_visible(Panel::Weather));
    }

    #[tokio::test]
    async fn test_search_fetches_typed_city() {
        let server = MockServer::start().await;
        mount_city(&server, "Lyon", "Lyon").await;

        let mut controller = controller(&server);
        controller.input_changed("Lyon").await;
        controller.search_submitted().await;

        let surface = controller.presenter().surface();
        assert_eq!(surface.text(TextRegion::LocationName), "Lyon");
        assert_eq!(surface.text(TextRegion::Temperature), "18");
        assert!(surface.is_visible(Panel::Weather));
        assert!(!surface.is_visible(Panel::Loading));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("X")))
            .expect(0)
            .mount(&server)
            .await;

        let mut controller = controller(&server);
        controller.input_changed("Paris1").await;
        controller.search_submitted().await;

        let surface = controller.presenter().surface();
        assert!(surface.is_visible(Panel::Error));
        assert_eq!(
            surface.text(TextRegion::Error),
            "Nom de ville invalide. Veuillez corriger la saisie."
        );
        // Validation failures skip the loading state entirely
        assert!(!surface.is_visible(Panel::Loading));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_city_not_found_shows_error_and_clears_loading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let mut controller = controller(&server);
        controller.input_changed("Nulleville").await;
        controller.search_submitted().await;

        let surface = controller.presenter().surface();
        assert!(surface.is_visible(Panel::Error));
        assert_eq!(
            surface.text(TextRegion::Error),
            "Ville introuvable, veuillez vérifier le nom."
        );
        assert!(!surface.is_visible(Panel::Loading));
        assert!(!surface.is_visible(Panel::Weather));
    }

    #[tokio::test]
    async fn test_emptying_the_input_refetches() {
        let server = MockServer::start().await;
        mount_city(&server, "Lyon", "Lyon").await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Bruxelles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Bruxelles")))
            .expect(1)
            .mount(&server)
            .await;

        let mut controller = controller(&server);
        controller.input_changed("Lyon").await;
        controller.search_submitted().await;
        assert!(controller
            .presenter()
            .surface()
            .is_visible(Panel::ClearButton));

        // Emptying the field falls back to the default city on its own
        controller.input_changed("").await;

        let surface = controller.presenter().surface();
        assert_eq!(surface.text(TextRegion::LocationName), "Bruxelles");
        assert!(!surface.is_visible(Panel::ClearButton));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_emptying_the_input_refetches_by_position() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "50.85"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Bruxelles")))
            .expect(2)
            .mount(&server)
            .await;
        mount_city(&server, "Lyon", "Lyon").await;

        let mut controller = controller(&server);
        controller.startup(Some(BRUSSELS)).await;
        controller.input_changed("Lyon").await;
        controller.search_submitted().await;
        controller.input_changed("").await;

        // Startup and the cleared field both hit the coordinate path
        server.verify().await;
    }

    #[tokio::test]
    async fn test_clear_pressed_clears_error_and_refetches() {
        let server = MockServer::start().await;
        mount_city(&server, "Bruxelles", "Bruxelles").await;

        let mut controller = controller(&server);
        controller.input_changed("Paris1").await;
        controller.search_submitted().await;
        assert!(controller.presenter().surface().is_visible(Panel::Error));

        controller.clear_pressed().await;

        let surface = controller.presenter().surface();
        assert!(!surface.is_visible(Panel::Error));
        assert_eq!(surface.text(TextRegion::Error), "");
        assert!(!surface.is_visible(Panel::ClearButton));
        assert_eq!(surface.text(TextRegion::LocationName), "Bruxelles");
    }

    #[tokio::test]
    async fn test_loading_clears_after_transport_failure() {
        let client =
            WeatherClient::with_base_url("http://127.0.0.1:9".into(), "k".into(), "fr".into());
        let mut controller =
            Controller::new(client, "Bruxelles".into(), MockSurface::default());
        controller.startup(None).await;

        let surface = controller.presenter().surface();
        assert!(!surface.is_visible(Panel::Loading));
        assert!(surface.is_visible(Panel::Error));
        assert_eq!(
            surface.text(TextRegion::Error),
            "Erreur réseau, veuillez vérifier votre connexion."
        );
    }
}
