use std::fmt;

use geotrack_core::{map::Marker, panel::IpDetails, widget::Widget};

/// Plain text rendering of the widget state.
pub struct Report<'a>(pub &'a Widget);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(widget) = self;
        if let Some(details) = widget.panel().result() {
            write_details(f, details)?;
        }
        let map = widget.map();
        if map.camera_moves() > 0 {
            let camera = map.camera();
            writeln!(f, "Map:      {} (zoom {})", camera.center, camera.zoom)?;
        }
        for marker in map.markers() {
            write_marker(f, marker)?;
        }
        Ok(())
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, details: &IpDetails) -> fmt::Result {
    let IpDetails {
        address,
        location,
        timezone,
        network,
    } = details;
    writeln!(f, "Address:  {address}")?;
    writeln!(f, "Location: {location}")?;
    writeln!(f, "Timezone: {timezone}")?;
    writeln!(f, "Network:  {network}")
}

fn write_marker(f: &mut fmt::Formatter<'_>, marker: &Marker) -> fmt::Result {
    write!(f, "Marker:   {}", marker.popup.title)?;
    for line in &marker.popup.lines {
        write!(f, " | {line}")?;
    }
    writeln!(f)
}
