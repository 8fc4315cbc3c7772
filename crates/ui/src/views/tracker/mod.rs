mod components;
mod intent;
mod view;

pub use intent::TrackerIntent;
pub use view::TrackerView;

#[cfg(test)]
pub(crate) use view::TrackerTestHandles;
