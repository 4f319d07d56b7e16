//! Build HTTP state from configuration, choosing real or fixture adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use tokio::task::JoinHandle;
use tracing::info;

use backend::domain::ProgressionService;
use backend::domain::ports::{
    FixtureQuestionRepository, FixtureRankTierRepository, FixtureReferenceRepository,
    FixtureResponseLedger, FixtureUserRepository, ReferenceRepository,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::cache::{DEFAULT_SWEEP_INTERVAL, TtlReferenceCache};
use backend::outbound::persistence::{
    DieselQuestionRepository, DieselRankTierRepository, DieselReferenceRepository,
    DieselResponseLedger, DieselUserRepository,
};

use super::ServerConfig;

fn cached_reference_state<R>(backing: Arc<R>) -> (Arc<TtlReferenceCache<R>>, JoinHandle<()>)
where
    R: ReferenceRepository + 'static,
{
    let cache = Arc::new(TtlReferenceCache::new(backing, Arc::new(DefaultClock)));
    let sweeper = cache.spawn_sweeper(DEFAULT_SWEEP_INTERVAL);
    (cache, sweeper)
}

/// Assemble the HTTP state and start the cache sweeper.
///
/// With a database pool the progression engine and the reference cache run
/// over Diesel adapters; without one, fixture adapters serve empty data so
/// the server still boots for smoke testing.
pub fn build_http_state(config: &ServerConfig) -> (HttpState, JoinHandle<()>) {
    match &config.db_pool {
        Some(pool) => {
            let submissions = ProgressionService::new(
                Arc::new(DieselQuestionRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselRankTierRepository::new(pool.clone())),
                Arc::new(DieselResponseLedger::new(pool.clone())),
                Arc::new(DefaultClock),
            );
            let (cache, sweeper) =
                cached_reference_state(Arc::new(DieselReferenceRepository::new(pool.clone())));
            let state = HttpState::new(Arc::new(submissions), cache.clone(), cache);
            (state, sweeper)
        }
        None => {
            info!("no database pool configured; serving fixture data");
            let submissions = ProgressionService::new(
                Arc::new(FixtureQuestionRepository),
                Arc::new(FixtureUserRepository),
                Arc::new(FixtureRankTierRepository),
                Arc::new(FixtureResponseLedger),
                Arc::new(DefaultClock),
            );
            let (cache, sweeper) = cached_reference_state(Arc::new(FixtureReferenceRepository));
            let state = HttpState::new(Arc::new(submissions), cache.clone(), cache);
            (state, sweeper)
        }
    }
}
