//! # geotrack-core
//!
//! Domain logic of the geotrack widget: the map view with its marker
//! slots, the status panel, the IP lookup and place search use cases
//! and the live tracking state machine.
//!
//! Nothing in here talks to the network or to a browser. The external
//! services are reached through the traits in [`gateways`] and
//! [`tracking::PositionSource`].

pub mod gateways;
pub mod geo;
pub mod map;
pub mod panel;
pub mod tracking;
pub mod usecases;
pub mod widget;

pub mod prelude {
    pub use crate::{
        gateways::*, geo::*, map::*, panel::*, tracking::*, usecases::*, widget::*,
    };
}
