use chrono::Local;
use log::trace;

/// Text regions of the widget
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TextRegion {
    LocationName,
    Temperature,
    Description,
    Error,
}

/// Show/hide-able panels
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Panel {
    Weather,
    Loading,
    Error,
    ClearButton,
}

/// The host UI seam. Everything the presenter needs from a display is
/// set-text, set-image and show/hide on fixed regions, plus a render call
/// once a batch of updates is complete.
pub trait Surface {
    fn set_text(&mut self, region: TextRegion, text: &str);
    /// Point the condition icon at an image URL
    fn set_icon(&mut self, url: &str, alt: &str);
    fn set_visible(&mut self, panel: Panel, visible: bool);
    /// Flush pending updates to the user. Called after every presenter
    /// operation; implementations that draw eagerly can ignore it.
    fn render(&mut self) {}
}

/// Everything needed to draw the widget once
#[derive(Clone, Debug, Default, PartialEq)]
struct Frame {
    location_name: String,
    temperature: String,
    description: String,
    error: String,
    icon_url: String,
    icon_alt: String,
    weather_visible: bool,
    loading_visible: bool,
    error_visible: bool,
    clear_visible: bool,
}

/// Terminal rendition of the widget. Updates accumulate into a frame which
/// is diffed against the last one drawn, so the block is only reprinted
/// when something actually changed.
#[derive(Debug, Default)]
pub struct TermSurface {
    frame: Frame,
    /// The frame currently on screen. Empty until the first render.
    drawn: Option<Frame>,
}

impl TermSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self) {
        let frame = &self.frame;
        println!();
        println!("── météo ─── {} ───", Local::now().format("%H:%M"));
        if frame.loading_visible {
            println!("   Chargement…");
        }
        if frame.error_visible && !frame.error.is_empty() {
            println!("   ! {}", frame.error);
        }
        if frame.weather_visible {
            println!("   {}  {}°C", frame.location_name, frame.temperature);
            println!("   {}", frame.description);
            println!("   [{}] {}", frame.icon_alt, frame.icon_url);
        }
        if frame.clear_visible {
            println!("   (ligne vide pour effacer la recherche)");
        }
    }
}

impl Surface for TermSurface {
    fn set_text(&mut self, region: TextRegion, text: &str) {
        let slot = match region {
            TextRegion::LocationName => &mut self.frame.location_name,
            TextRegion::Temperature => &mut self.frame.temperature,
            TextRegion::Description => &mut self.frame.description,
            TextRegion::Error => &mut self.frame.error,
        };
        *slot = text.to_owned();
    }

    fn set_icon(&mut self, url: &str, alt: &str) {
        self.frame.icon_url = url.to_owned();
        self.frame.icon_alt = alt.to_owned();
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        let slot = match panel {
            Panel::Weather => &mut self.frame.weather_visible,
            Panel::Loading => &mut self.frame.loading_visible,
            Panel::Error => &mut self.frame.error_visible,
            Panel::ClearButton => &mut self.frame.clear_visible,
        };
        *slot = visible;
    }

    fn render(&mut self) {
        if self.drawn.as_ref() != Some(&self.frame) {
            trace!("Frame changed, redrawing: {:?}", self.frame);
            self.draw();
            self.drawn = Some(self.frame.clone());
        }
    }
}
