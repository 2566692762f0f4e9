pub mod covariance;
pub mod manifold;
pub mod snapshot;

pub use covariance::CovarianceEstimator;
pub use snapshot::SignalSimulator;
