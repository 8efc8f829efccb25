//! Real-time notification push to empresa dashboards

pub mod hub;

pub use hub::NotifyHub;
