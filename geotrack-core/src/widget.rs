//! The view controller of the widget.
//!
//! [`Widget`] owns the map view, the status panel and the tracking handle.
//! Each flow is split into a `begin_*` step that updates the UI state and
//! hands out a [`Ticket`], the asynchronous use case, and a `finish_*` step
//! that applies the result. Results of requests that have been superseded
//! by a newer request of the same flow are discarded.

use futures::channel::mpsc;

use crate::{geo::*, map::*, panel::*, tracking::*, usecases::*};

const LIVE_ZOOM: Zoom = 16.0;

/// Identifies a request of one flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Widget {
    map: MapView,
    panel: StatusPanel,
    watch: Option<WatchId>,
    last_fix: Option<Position>,
    ip_lookups: u64,
    place_searches: u64,
}

impl Widget {
    pub const fn map(&self) -> &MapView {
        &self.map
    }

    pub const fn panel(&self) -> &StatusPanel {
        &self.panel
    }

    pub const fn watch(&self) -> Option<WatchId> {
        self.watch
    }

    /// The live control shows its "stop" state if and only if this is `true`.
    pub const fn is_tracking(&self) -> bool {
        self.watch.is_some()
    }

    pub const fn last_fix(&self) -> Option<Position> {
        self.last_fix
    }

    // -- IP lookup -- //

    pub fn begin_ip_lookup(&mut self) -> Ticket {
        self.ip_lookups += 1;
        self.panel.begin_loading();
        Ticket(self.ip_lookups)
    }

    /// Returns `false` if the result was discarded.
    pub fn finish_ip_lookup(
        &mut self,
        ticket: Ticket,
        result: Result<IpLocation, LookupError>,
    ) -> bool {
        if ticket != Ticket(self.ip_lookups) {
            log::debug!("Discard outdated IP lookup result");
            return false;
        }
        self.panel.end_loading();
        match result {
            Ok(location) => {
                if let Some(marker) = location.marker() {
                    self.map.fly_to(marker.pos, location.zoom);
                    self.map.set_marker(marker);
                }
                self.panel.show_result(location.details);
            }
            Err(err) => {
                self.panel.show_error(err.to_string());
            }
        }
        true
    }

    // -- place search -- //

    /// Returns `None` without touching any state if `input` is blank.
    pub fn begin_place_search(&mut self, input: &str) -> Option<(Ticket, PlaceQuery)> {
        let query = PlaceQuery::new(input)?;
        self.place_searches += 1;
        self.panel.hide_error();
        Some((Ticket(self.place_searches), query))
    }

    /// Returns `false` if the result was discarded.
    pub fn finish_place_search(
        &mut self,
        ticket: Ticket,
        result: Result<PlaceMatch, SearchError>,
    ) -> bool {
        if ticket != Ticket(self.place_searches) {
            log::debug!("Discard outdated place search result");
            return false;
        }
        match result {
            Ok(place) => {
                self.map.fly_to(place.pos, place.zoom());
                self.map.set_marker(place.marker());
            }
            Err(err) => {
                self.panel.show_error(err.to_string());
            }
        }
        true
    }

    // -- live tracking -- //

    /// Opens a new watch unless one is already active.
    ///
    /// Returns `Ok(None)` if the widget is already tracking.
    pub fn start_tracking<S>(&mut self, source: &S) -> Result<Option<PositionStream>, TrackingError>
    where
        S: PositionSource + ?Sized,
    {
        if let Some(id) = self.watch {
            log::debug!("Already tracking with watch {}", id.0);
            return Ok(None);
        }
        if !source.is_supported() {
            let err = TrackingError::Unsupported;
            self.panel.show_error(err.to_string());
            return Err(err);
        }
        let (tx, events) = mpsc::unbounded();
        let id = source
            .watch(&WatchOptions::default(), tx)
            .inspect_err(|err| self.panel.show_error(err.to_string()))?;
        log::info!("Start live tracking");
        self.watch = Some(id);
        Ok(Some(PositionStream { id, events }))
    }

    /// Cancels the active watch and removes the live marker.
    ///
    /// Returns `false` if there was nothing to stop.
    pub fn stop_tracking<S>(&mut self, source: &S) -> bool
    where
        S: PositionSource + ?Sized,
    {
        let Some(id) = self.watch.take() else {
            return false;
        };
        source.clear_watch(id);
        self.map.clear_marker(MarkerSlot::Live);
        self.last_fix = None;
        log::info!("Stop live tracking");
        true
    }

    /// Applies an event of the watch `id`.
    ///
    /// Events of watches that are no longer active are ignored.
    /// A device error stops tracking and is returned to be alerted.
    pub fn handle_position_event<S>(
        &mut self,
        source: &S,
        id: WatchId,
        event: PositionEvent,
    ) -> Option<TrackingError>
    where
        S: PositionSource + ?Sized,
    {
        if self.watch != Some(id) {
            log::debug!("Ignore event of inactive watch {}", id.0);
            return None;
        }
        match event {
            PositionEvent::Update(position) => {
                self.show_live_position(position);
                None
            }
            PositionEvent::Error(err) => {
                log::warn!("Live tracking failed: {err:?}");
                let err = TrackingError::from(err);
                self.panel.show_error(err.to_string());
                self.stop_tracking(source);
                Some(err)
            }
        }
    }

    fn show_live_position(&mut self, position: Position) {
        let Position { pos, accuracy, .. } = position;
        self.map.fly_to(pos, LIVE_ZOOM);
        let popup = Popup {
            title: "Your Live Location".to_string(),
            lines: vec![
                format!("Lat: {:.6}", pos.lat()),
                format!("Lng: {:.6}", pos.lng()),
                format!("Accuracy: ≈ {} m", accuracy.round()),
            ],
            open: false,
        };
        self.map.set_marker(Marker::new(MarkerSlot::Live, pos, popup));
        self.last_fix = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use time::macros::datetime;

    use geotrack_boundary::{ErrorFlag, Feature, GeocodingResponse, IpLookupResponse};

    use super::*;
    use crate::{
        gateways::FetchError,
        tracking::tests::MockPositionSource,
        usecases::tests::{MockGeocoding, MockIpLookup},
    };

    fn ip_response(lat: Option<f64>, lng: Option<f64>) -> IpLookupResponse {
        IpLookupResponse {
            ip: Some("41.58.1.1".into()),
            city: Some("Abuja".into()),
            country_name: Some("Nigeria".into()),
            latitude: lat.map(Into::into),
            longitude: lng.map(Into::into),
            ..Default::default()
        }
    }

    fn lookup(widget: &mut Widget, gw: &MockIpLookup, input: &str) {
        let ticket = widget.begin_ip_lookup();
        assert!(widget.panel().is_loading());
        let result = block_on(lookup_ip(gw, &IpQuery::from_input(input)));
        assert!(widget.finish_ip_lookup(ticket, result));
    }

    fn search(widget: &mut Widget, gw: &MockGeocoding, input: &str) {
        let (ticket, query) = widget.begin_place_search(input).unwrap();
        let result = block_on(search_place(gw, &query));
        assert!(widget.finish_place_search(ticket, result));
    }

    fn position(lat: f64, lng: f64, accuracy: f64) -> Position {
        Position {
            pos: MapPoint::new_unchecked(lat, lng),
            accuracy,
            timestamp: datetime!(2026-10-18 12:00 UTC),
        }
    }

    #[test]
    fn ip_lookup_places_marker_and_shows_result() {
        let mut widget = Widget::default();
        let gw = MockIpLookup::responding(ip_response(Some(9.06), Some(7.49)));
        lookup(&mut widget, &gw, "");

        let panel = widget.panel();
        assert!(!panel.is_loading());
        assert!(panel.error().is_none());
        assert_eq!(panel.result().unwrap().address, "41.58.1.1");

        let map = widget.map();
        assert_eq!(map.camera_moves(), 1);
        assert_eq!(map.camera().zoom, 13.0);
        assert_eq!(map.camera().center, MapPoint::new_unchecked(9.06, 7.49));
        assert!(map.marker(MarkerSlot::Ip).is_some());
    }

    #[test]
    fn ip_lookup_without_coordinates_shows_result_only() {
        let mut widget = Widget::default();
        let gw = MockIpLookup::responding(ip_response(Some(9.06), None));
        lookup(&mut widget, &gw, "41.58.1.1");

        assert!(widget.panel().result().is_some());
        assert_eq!(widget.map().camera_moves(), 0);
        assert_eq!(widget.map().markers().count(), 0);
    }

    #[test]
    fn ip_lookup_service_error_hides_result() {
        let mut widget = Widget::default();
        let gw = MockIpLookup::responding(IpLookupResponse {
            error: Some(ErrorFlag::Flag(true)),
            reason: Some("Reserved IP Address".into()),
            ..Default::default()
        });
        lookup(&mut widget, &gw, "127.0.0.1");

        let panel = widget.panel();
        assert!(!panel.is_loading());
        assert_eq!(panel.error(), Some("Reserved IP Address"));
        assert!(panel.result().is_none());
    }

    #[test]
    fn ip_lookup_clears_previous_state() {
        let mut widget = Widget::default();
        let failing = MockIpLookup::failing(FetchError::Transport("Failed to fetch".into()));
        lookup(&mut widget, &failing, "");
        assert_eq!(
            widget.panel().error(),
            Some("Cannot reach geolocation service — check internet")
        );

        let ticket = widget.begin_ip_lookup();
        assert!(widget.panel().error().is_none());
        assert!(widget.panel().result().is_none());
        let gw = MockIpLookup::responding(ip_response(None, None));
        let result = block_on(lookup_ip(&gw, &IpQuery::Caller));
        widget.finish_ip_lookup(ticket, result);
        assert!(widget.panel().error().is_none());
        assert!(widget.panel().result().is_some());
    }

    #[test]
    fn repeated_ip_lookups_keep_a_single_marker() {
        let mut widget = Widget::default();
        lookup(
            &mut widget,
            &MockIpLookup::responding(ip_response(Some(1.0), Some(1.0))),
            "",
        );
        lookup(
            &mut widget,
            &MockIpLookup::responding(ip_response(Some(2.0), Some(2.0))),
            "",
        );
        let markers: Vec<_> = widget.map().markers().collect();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].pos, MapPoint::new_unchecked(2.0, 2.0));
    }

    #[test]
    fn discard_superseded_ip_lookup() {
        let mut widget = Widget::default();
        let first = widget.begin_ip_lookup();
        let second = widget.begin_ip_lookup();

        let newer = IpLocation::try_from(ip_response(Some(2.0), Some(2.0)));
        assert!(widget.finish_ip_lookup(second, newer));
        assert!(!widget.panel().is_loading());

        let older = Err(LookupError::Status(500));
        assert!(!widget.finish_ip_lookup(first, older));
        assert!(widget.panel().error().is_none());
        assert!(widget.panel().result().is_some());
        assert_eq!(
            widget.map().marker(MarkerSlot::Ip).unwrap().pos,
            MapPoint::new_unchecked(2.0, 2.0)
        );
    }

    #[test]
    fn blank_place_search_is_a_no_op() {
        let mut widget = Widget::default();
        let failing = MockIpLookup::failing(FetchError::Status(503));
        lookup(&mut widget, &failing, "");
        let panel_before = widget.panel().clone();
        let map_before = widget.map().clone();

        assert!(widget.begin_place_search("   ").is_none());
        assert!(widget.begin_place_search("").is_none());
        assert_eq!(widget.panel(), &panel_before);
        assert_eq!(widget.map(), &map_before);
    }

    #[test]
    fn place_not_found_keeps_map() {
        let mut widget = Widget::default();
        let gw = MockGeocoding::responding(GeocodingResponse::default());
        search(&mut widget, &gw, "Atlantis");
        assert_eq!(widget.panel().error(), Some("Place not found"));
        assert_eq!(widget.map().camera_moves(), 0);
        assert!(widget.map().marker(MarkerSlot::Place).is_none());
    }

    #[test]
    fn place_search_opens_popup() {
        let mut widget = Widget::default();
        let gw = MockGeocoding::responding(GeocodingResponse {
            features: vec![Feature {
                center: [7.49, 9.06],
                place_name: "Abuja, Federal Capital Territory, Nigeria".into(),
            }],
        });
        search(&mut widget, &gw, "Abuja");
        search(&mut widget, &gw, "Abuja");

        let map = widget.map();
        assert_eq!(map.camera().center, MapPoint::new_unchecked(9.06, 7.49));
        assert_eq!(map.camera().zoom, 13.0);
        assert_eq!(map.markers().count(), 1);
        let marker = map.marker(MarkerSlot::Place).unwrap();
        assert!(marker.popup.open);
        assert_eq!(marker.kind, MarkerKind::Pin { color: "#f59e0b" });
        assert_eq!(map.marker_revision(MarkerSlot::Place), 2);
    }

    #[test]
    fn place_search_hides_previous_error() {
        let mut widget = Widget::default();
        search(
            &mut widget,
            &MockGeocoding::failing(FetchError::Status(401)),
            "Kano",
        );
        assert_eq!(widget.panel().error(), Some("Geocoding failed"));
        widget.begin_place_search("Kano").unwrap();
        assert!(widget.panel().error().is_none());
    }

    #[test]
    fn start_tracking_twice_opens_one_watch() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let stream = widget.start_tracking(&source).unwrap().unwrap();
        assert!(widget.is_tracking());
        assert!(widget.start_tracking(&source).unwrap().is_none());
        assert_eq!(source.active_watches(), vec![stream.id]);
        assert_eq!(source.options(stream.id), Some(WatchOptions::default()));
    }

    #[test]
    fn stop_tracking_when_idle_is_a_no_op() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        assert!(!widget.stop_tracking(&source));
        assert!(source.cleared_watches().is_empty());
        assert!(widget.panel().error().is_none());
        assert!(!widget.is_tracking());
    }

    #[test]
    fn tracking_unsupported() {
        let source = MockPositionSource::unsupported();
        let mut widget = Widget::default();
        let err = widget.start_tracking(&source).unwrap_err();
        assert_eq!(err, TrackingError::Unsupported);
        assert!(!widget.is_tracking());
        assert!(source.active_watches().is_empty());
    }

    #[test]
    fn follow_position_updates() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let mut stream = widget.start_tracking(&source).unwrap().unwrap();

        source.emit(PositionEvent::Update(position(6.5244, 3.3792, 12.6)));
        source.emit(PositionEvent::Update(position(6.5250, 3.3800, 8.2)));
        while let Ok(event) = stream.events.try_recv() {
            assert!(widget
                .handle_position_event(&source, stream.id, event)
                .is_none());
        }

        let map = widget.map();
        assert_eq!(map.camera_moves(), 2);
        assert_eq!(map.camera().zoom, 16.0);
        assert_eq!(map.markers().count(), 1);
        let marker = map.marker(MarkerSlot::Live).unwrap();
        assert_eq!(marker.kind, MarkerKind::PulseDot);
        assert_eq!(marker.popup.title, "Your Live Location");
        assert_eq!(
            marker.popup.lines,
            vec!["Lat: 6.525000", "Lng: 3.380000", "Accuracy: ≈ 8 m"]
        );
        assert_eq!(widget.last_fix().unwrap().accuracy, 8.2);
    }

    #[test]
    fn stop_tracking_removes_live_marker() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let stream = widget.start_tracking(&source).unwrap().unwrap();
        widget.handle_position_event(
            &source,
            stream.id,
            PositionEvent::Update(position(1.0, 2.0, 30.0)),
        );
        assert!(widget.map().marker(MarkerSlot::Live).is_some());

        assert!(widget.stop_tracking(&source));
        assert!(!widget.is_tracking());
        assert!(widget.map().marker(MarkerSlot::Live).is_none());
        assert!(widget.last_fix().is_none());
        assert_eq!(source.cleared_watches(), vec![stream.id]);
        assert!(source.active_watches().is_empty());
    }

    #[test]
    fn ignore_events_of_stopped_watch() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let old = widget.start_tracking(&source).unwrap().unwrap();
        widget.stop_tracking(&source);
        let new = widget.start_tracking(&source).unwrap().unwrap();
        assert_ne!(old.id, new.id);

        let event = PositionEvent::Update(position(1.0, 2.0, 5.0));
        assert!(widget
            .handle_position_event(&source, old.id, event)
            .is_none());
        assert!(widget.map().marker(MarkerSlot::Live).is_none());
        assert!(widget.is_tracking());
    }

    #[test]
    fn permission_denied_stops_tracking() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let stream = widget.start_tracking(&source).unwrap().unwrap();
        widget.handle_position_event(
            &source,
            stream.id,
            PositionEvent::Update(position(1.0, 2.0, 5.0)),
        );

        let err = widget.handle_position_event(
            &source,
            stream.id,
            PositionEvent::Error(PositionError::PermissionDenied),
        );
        assert_eq!(err, Some(TrackingError::PermissionDenied));
        assert!(!widget.is_tracking());
        assert!(widget.map().marker(MarkerSlot::Live).is_none());
        assert_eq!(
            widget.panel().error(),
            Some("Permission denied — please allow location access.")
        );
        assert_eq!(source.cleared_watches(), vec![stream.id]);
    }

    #[test]
    fn timeout_stops_tracking_with_generic_message() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        let stream = widget.start_tracking(&source).unwrap().unwrap();
        let err = widget.handle_position_event(
            &source,
            stream.id,
            PositionEvent::Error(PositionError::Timeout),
        );
        assert_eq!(err, Some(TrackingError::Failed));
        assert!(!widget.is_tracking());
    }

    #[test]
    fn flows_own_separate_slots() {
        let source = MockPositionSource::default();
        let mut widget = Widget::default();
        lookup(
            &mut widget,
            &MockIpLookup::responding(ip_response(Some(9.0), Some(7.0))),
            "",
        );
        search(
            &mut widget,
            &MockGeocoding::responding(GeocodingResponse {
                features: vec![Feature {
                    center: [3.3, 6.5],
                    place_name: "Lagos".into(),
                }],
            }),
            "Lagos",
        );
        let stream = widget.start_tracking(&source).unwrap().unwrap();
        widget.handle_position_event(
            &source,
            stream.id,
            PositionEvent::Update(position(6.6, 3.4, 10.0)),
        );
        assert_eq!(widget.map().markers().count(), 3);
        for slot in MarkerSlot::ALL {
            assert_eq!(widget.map().marker(slot).unwrap().kind, slot.kind());
        }

        widget.stop_tracking(&source);
        assert_eq!(widget.map().markers().count(), 2);
    }
}
