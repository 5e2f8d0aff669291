mod ip_lookup;
mod live_tracking;
mod map;
mod place_search;
mod status;

pub use self::{ip_lookup::*, live_tracking::*, map::*, place_search::*, status::*};
