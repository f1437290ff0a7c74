//! Marker list for the map overlay.

use geo::{BoundingRect, MultiPoint, Point};
use signal_advisor_signals::{Coordinate, SignalProvider};
use strum::{AsRefStr, Display};

use crate::advisory::Advisory;
use crate::session::Session;

/// Zoom level the map opens at, centred on the vehicle.
pub const DEFAULT_ZOOM: u8 = 15;

pub const VEHICLE_LABEL: &str = "🚗 Your Car";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MarkerKind {
    Vehicle,
    Signal,
}

impl MarkerKind {
    /// Pin colour on the map.
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Vehicle => "blue",
            MarkerKind::Signal => "red",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub kind: MarkerKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    /// Vehicle first, then every signal in configuration order.
    pub markers: Vec<Marker>,
    /// South-west and north-east corners enclosing every marker.
    pub bounds: Option<(Coordinate, Coordinate)>,
}

pub fn map_view(session: &Session, advisory: &Advisory) -> MapView {
    let mut markers = vec![Marker {
        coordinate: advisory.coordinate,
        label: VEHICLE_LABEL.to_string(),
        kind: MarkerKind::Vehicle,
    }];

    markers.extend(session.scenario().signals().all_signals().iter().map(|signal| Marker {
        coordinate: signal.location(),
        label: signal.name().to_string(),
        kind: MarkerKind::Signal,
    }));

    MapView {
        center: advisory.coordinate,
        zoom: DEFAULT_ZOOM,
        bounds: bounds(&markers),
        markers,
    }
}

fn bounds(markers: &[Marker]) -> Option<(Coordinate, Coordinate)> {
    let points: MultiPoint = markers.iter().map(|m| Point::from(m.coordinate)).collect();
    let rect = points.bounding_rect()?;

    let south_west = Coordinate::try_from(Point::from(rect.min())).ok()?;
    let north_east = Coordinate::try_from(Point::from(rect.max())).ok()?;
    Some((south_west, north_east))
}
