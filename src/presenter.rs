use crate::{
    surface::{Panel, Surface, TextRegion},
    weather::CurrentWeather,
};

/// What the widget is showing right now. Weather and error are mutually
/// exclusive, and both stay hidden while a fetch is in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Weather(CurrentWeather),
    Error(String),
}

/// Maps fetch outcomes onto the surface and tracks the display state. All
/// surface mutation goes through here, so the mutual-exclusion rules live
/// in exactly one place.
pub struct Presenter<S> {
    surface: S,
    state: DisplayState,
}

impl<S: Surface> Presenter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: DisplayState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Enter the loading state. Both result panels stay hidden until the
    /// fetch settles.
    pub fn show_loading(&mut self) {
        self.state = DisplayState::Loading;
        self.surface.set_visible(Panel::Loading, true);
        self.surface.set_visible(Panel::Weather, false);
        self.surface.set_visible(Panel::Error, false);
        self.surface.render();
    }

    /// Leave the loading state. Runs after every fetch, success or failure,
    /// so the widget can never stick on the loading indicator.
    pub fn hide_loading(&mut self) {
        if self.state == DisplayState::Loading {
            self.state = DisplayState::Idle;
        }
        self.surface.set_visible(Panel::Loading, false);
        self.surface.render();
    }

    /// Render a fetch result and clear any prior error. Temperature is
    /// rounded to the nearest degree; the description gets its first letter
    /// uppercased, nothing else.
    pub fn show_weather(&mut self, weather: CurrentWeather) {
        self.surface.set_text(TextRegion::LocationName, &weather.name);
        self.surface.set_text(
            TextRegion::Temperature,
            &(weather.temperature().round() as i64).to_string(),
        );
        let description = &weather.condition().description;
        self.surface
            .set_text(TextRegion::Description, &capitalize_first(description));
        self.surface.set_icon(&weather.icon_url(), description);
        self.surface.set_visible(Panel::Weather, true);
        self.surface.set_visible(Panel::Error, false);
        self.surface.set_text(TextRegion::Error, "");
        self.surface.render();
        self.state = DisplayState::Weather(weather);
    }

    /// Surface a user-facing failure message; suppresses the weather panel
    pub fn show_error(&mut self, message: &str) {
        self.state = DisplayState::Error(message.to_owned());
        self.surface.set_text(TextRegion::Error, message);
        self.surface.set_visible(Panel::Error, true);
        self.surface.set_visible(Panel::Weather, false);
        self.surface.render();
    }

    /// Drop any error text without touching the loading or weather panels
    pub fn clear_error(&mut self) {
        if matches!(self.state, DisplayState::Error(_)) {
            self.state = DisplayState::Idle;
        }
        self.surface.set_text(TextRegion::Error, "");
        self.surface.set_visible(Panel::Error, false);
        self.surface.render();
    }

    pub fn set_clear_button_visible(&mut self, visible: bool) {
        self.surface.set_visible(Panel::ClearButton, visible);
        self.surface.render();
    }
}

/// Uppercase the first character only; the rest of the string is unchanged
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
