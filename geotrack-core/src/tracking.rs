//! Continuous device positioning.
//!
//! A [`PositionSource`] publishes [`PositionEvent`]s into a channel for as
//! long as its watch is active. The widget owns the [`WatchId`] and drives
//! the idle/tracking transitions (see [`crate::widget::Widget`]).

use std::time::Duration;

use futures::channel::mpsc;
use thiserror::Error;
use time::OffsetDateTime;

use crate::geo::MapPoint;

/// Handle of an active position watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
    /// Maximum time to wait for a single position.
    pub timeout: Duration,
    /// Maximum age of a cached position.
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(8),
            maximum_age: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub pos: MapPoint,
    /// Radius of uncertainty in meters.
    pub accuracy: f64,
    pub timestamp: OffsetDateTime,
}

/// Error codes of the device geolocation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown(u16),
}

impl PositionError {
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            code => Self::Unknown(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    Update(Position),
    Error(PositionError),
}

pub type PositionSender = mpsc::UnboundedSender<PositionEvent>;
pub type PositionReceiver = mpsc::UnboundedReceiver<PositionEvent>;

/// Events of a single watch.
#[derive(Debug)]
pub struct PositionStream {
    pub id: WatchId,
    pub events: PositionReceiver,
}

/// Messages shown to the user as a blocking alert.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackingError {
    #[error("Geolocation not supported in this browser.")]
    Unsupported,
    #[error("Permission denied — please allow location access.")]
    PermissionDenied,
    #[error("Location access failed.")]
    Failed,
}

impl From<PositionError> for TrackingError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::PermissionDenied => Self::PermissionDenied,
            PositionError::PositionUnavailable
            | PositionError::Timeout
            | PositionError::Unknown(_) => Self::Failed,
        }
    }
}

pub trait PositionSource {
    fn is_supported(&self) -> bool;

    /// Starts a watch that publishes into `events` until it is cleared.
    fn watch(&self, options: &WatchOptions, events: PositionSender)
        -> Result<WatchId, TrackingError>;

    fn clear_watch(&self, id: WatchId);
}
