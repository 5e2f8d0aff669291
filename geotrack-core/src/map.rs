use crate::geo::{MapPoint, Zoom};

pub const DEFAULT_CENTER: MapPoint = MapPoint::new_unchecked(0.0, 0.0);
pub const DEFAULT_ZOOM: Zoom = 7.0;

/// The owner of a marker on the map.
///
/// Every flow of the widget owns exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSlot {
    Ip,
    Place,
    Live,
}

impl MarkerSlot {
    pub const ALL: [Self; 3] = [Self::Ip, Self::Place, Self::Live];

    pub const fn kind(self) -> MarkerKind {
        match self {
            Self::Ip => MarkerKind::Pin { color: "#ef4444" },
            Self::Place => MarkerKind::Pin { color: "#f59e0b" },
            Self::Live => MarkerKind::PulseDot,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Ip => 0,
            Self::Place => 1,
            Self::Live => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A classic pin in the given CSS color.
    Pin { color: &'static str },
    /// A pulsing dot indicating the live device position.
    PulseDot,
}

/// Text content of a marker popup.
///
/// The content is plain text, renderers must not interpret it as markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    /// Show the popup immediately when the marker is placed.
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub slot: MarkerSlot,
    pub kind: MarkerKind,
    pub pos: MapPoint,
    pub popup: Popup,
}

impl Marker {
    pub fn new(slot: MarkerSlot, pos: MapPoint, popup: Popup) -> Self {
        Self {
            slot,
            kind: slot.kind(),
            pos,
            popup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: MapPoint,
    pub zoom: Zoom,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// The shared map: camera and one optional marker per slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapView {
    camera: Camera,
    camera_moves: u64,
    slots: [Option<Marker>; 3],
    revisions: [u64; 3],
}

impl MapView {
    pub const fn camera(&self) -> Camera {
        self.camera
    }

    /// Number of camera moves so far.
    ///
    /// Renderers compare it to detect a new move even if the target
    /// equals the current camera.
    pub const fn camera_moves(&self) -> u64 {
        self.camera_moves
    }

    pub fn fly_to(&mut self, center: MapPoint, zoom: Zoom) {
        self.camera = Camera { center, zoom };
        self.camera_moves += 1;
    }

    /// Puts `marker` into its slot and returns the marker it replaced.
    pub fn set_marker(&mut self, marker: Marker) -> Option<Marker> {
        let index = marker.slot.index();
        self.revisions[index] += 1;
        self.slots[index].replace(marker)
    }

    pub fn clear_marker(&mut self, slot: MarkerSlot) -> Option<Marker> {
        let cleared = self.slots[slot.index()].take();
        if cleared.is_some() {
            self.revisions[slot.index()] += 1;
        }
        cleared
    }

    /// Number of changes of the slot so far.
    ///
    /// Placing a marker equal to the current one still counts as a change.
    pub const fn marker_revision(&self, slot: MarkerSlot) -> u64 {
        self.revisions[slot.index()]
    }

    pub fn marker(&self, slot: MarkerSlot) -> Option<&Marker> {
        self.slots[slot.index()].as_ref()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.slots.iter().flatten()
    }
}
