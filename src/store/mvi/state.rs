//! Base trait for container state in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Cloneable (snapshots are handed out by value)
/// - Self-contained (all data a view needs)
/// - Comparable (PartialEq for detecting changes)
pub trait StoreState: Clone + PartialEq + Default + Send + 'static {}
