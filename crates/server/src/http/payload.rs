//! Presentation collaborators that collect into the JSON the page renders.
//!
//! The browser does the actual drawing and speaking; on this side the
//! display, map and voice collaborators just fill in their part of an
//! [`AdvisoryResponse`].

use signal_advisor_api_types::{AdvisoryResponse, DisplayFields, LatLon, MapPayload, MarkerPayload};
use signal_advisor_core::presentation::{
    DisplaySurface, MapOverlay, MapView, RenderRequest, VoiceAnnouncer, present,
};
use signal_advisor_core::signals::Coordinate;
use signal_advisor_core::{Advisory, Result};

#[derive(Default)]
struct PageDisplay(Option<DisplayFields>);

impl DisplaySurface for PageDisplay {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        self.0 = Some(DisplayFields {
            location: lat_lon(request.coordinate),
            signal: request.signal_name.clone(),
            distance_m: request.distance_m,
            eta_s: request.eta_s,
            phase: request.phase.label().to_string(),
            indicator: request.phase.indicator().to_string(),
            remaining_s: request.remaining_s,
        });
        Ok(())
    }
}

#[derive(Default)]
struct PageMap(Option<MapPayload>);

impl MapOverlay for PageMap {
    fn plot(&mut self, view: &MapView) -> Result<()> {
        self.0 = Some(MapPayload {
            center: lat_lon(view.center),
            zoom: view.zoom,
            markers: view
                .markers
                .iter()
                .map(|marker| MarkerPayload {
                    location: lat_lon(marker.coordinate),
                    label: marker.label.clone(),
                    kind: marker.kind.to_string(),
                    color: marker.kind.color().to_string(),
                })
                .collect(),
            bounds: view.bounds.map(|(sw, ne)| [lat_lon(sw), lat_lon(ne)]),
        });
        Ok(())
    }
}

/// Speech happens in the browser; this only forwards the utterance.
#[derive(Default)]
struct PageVoice(String);

impl VoiceAnnouncer for PageVoice {
    fn announce(&mut self, utterance: &str) -> Result<()> {
        self.0 = utterance.to_string();
        Ok(())
    }
}

pub fn advisory_response(advisory: &Advisory, view: &MapView) -> Result<AdvisoryResponse> {
    let mut display = PageDisplay::default();
    let mut map = PageMap::default();
    let mut voice = PageVoice::default();

    present(advisory, view, &mut display, &mut map, &mut voice)?;

    // Both collaborators always run when `present` succeeds
    let (Some(display), Some(map)) = (display.0, map.0) else {
        return Err(std::io::Error::other("presentation incomplete").into());
    };

    Ok(AdvisoryResponse {
        position: advisory.position,
        display,
        announcement: voice.0,
        map,
    })
}

fn lat_lon(c: Coordinate) -> LatLon {
    [c.lat(), c.lon()]
}
