mod error;
mod lookup_ip;
mod search_place;

#[cfg(test)]
pub mod tests;

pub use self::{error::*, lookup_ip::*, search_place::*};

mod prelude {
    pub use super::error::*;
    pub use crate::{gateways::*, geo::*, map::*, panel::*};
}
