use crate::results_bridge::model::VisualizationModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use doacore::DoaParameters;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Sweep job accepted over the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    pub parameter: String,
    pub values: Vec<f64>,
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge hosting the results HTTP endpoint and processing incoming jobs.
pub struct ResultsBridge {
    state: Arc<RwLock<VisualizationModel>>,
}

impl ResultsBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(VisualizationModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("results")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<VisualizationModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let estimate_route = warp::path("estimate")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |params: DoaParameters,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute_with(&params) {
                        Ok(outcome) => {
                            let mut guard = state.write().unwrap();
                            guard.results = outcome.results.clone();
                            guard.notes = outcome.notes.clone();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "results": outcome.results.len()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("estimate error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let sweep_route = warp::path("sweep")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |request: SweepRequest,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.sweep(&request.parameter, &request.values) {
                        Ok(rows) => {
                            let mut guard = state.write().unwrap();
                            guard.comparison = rows.clone();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "rows": rows.len()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("sweep error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(estimate_route).or(sweep_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &VisualizationModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[bridge] results: {}, comparison rows: {}",
            guard.results.len(),
            guard.comparison.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use std::sync::Arc;

    #[test]
    fn bridge_publishes_the_latest_model() {
        let config = WorkflowConfig::from_args(100, 6, 20.0, vec![20.0, 60.0], 0.5, 3);
        let runner = Arc::new(Runner::new(config, 1));
        let bridge = ResultsBridge::new(runner.clone());

        let outcome = runner.execute().unwrap();
        let model = VisualizationModel {
            results: outcome.results.clone(),
            comparison: Vec::new(),
            notes: outcome.notes.clone(),
        };
        bridge.publish(&model).unwrap();
        assert_eq!(bridge.snapshot().results.len(), outcome.results.len());
    }
}
