pub mod historical_volume_rollup;
pub mod volume_poll;
