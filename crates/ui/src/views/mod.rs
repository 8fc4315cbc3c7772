mod state;
mod tracker;

pub use state::{ViewError, ViewState, view_state_from_resource};
pub use tracker::{TrackerIntent, TrackerView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
