mod support;

use std::sync::Arc;

use intervention_stats::api::{InterventionId, StatisticsFilter, UserId};
use intervention_stats::config::AppConfig;
use intervention_stats::db::services::{
    get_statistics, get_user_dashboard, get_user_statistics, health_check,
};
use intervention_stats::db::{InterventionRepository, RepositoryFactory, ServiceError};
use intervention_stats::services::StatisticsAggregator;

use support::{day, fixture_path};

fn fixture_repository() -> Arc<dyn InterventionRepository> {
    let mut config = AppConfig::default();
    config.repository.data_path = Some(fixture_path());
    RepositoryFactory::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let repo = fixture_repository();
    assert!(health_check(repo.as_ref()).await.unwrap());
}

#[tokio::test]
async fn test_statistics_follow_validation() {
    let repo = fixture_repository();
    let aggregator = StatisticsAggregator::default();
    let all = StatisticsFilter::default();

    let before = get_statistics(repo.as_ref(), &aggregator, &all).await.unwrap();
    assert_eq!(before.overview.validated_interventions, 3);

    repo.validate_intervention(InterventionId::new(2))
        .await
        .unwrap();

    let after = get_statistics(repo.as_ref(), &aggregator, &all).await.unwrap();
    assert_eq!(after.overview.validated_interventions, 4);
    assert_eq!(after.overview.completion_rate, 80.0);
    assert_eq!(after.team("equipe1").map(|t| t.completion_rate), Some(100.0));
}

#[tokio::test]
async fn test_user_statistics() {
    let repo = fixture_repository();
    let stats = get_user_statistics(
        repo.as_ref(),
        &StatisticsAggregator::default(),
        UserId::new(2),
        &StatisticsFilter::default(),
    )
    .await
    .unwrap();

    assert_eq!(stats.overview.total_interventions, 2);
    assert_eq!(stats.overview.total_work_hours, 3.0);
    assert_eq!(stats.by_team.len(), 1);
}

#[tokio::test]
async fn test_user_statistics_with_filter() {
    let repo = fixture_repository();
    let filter = StatisticsFilter::new().maintenance_type("corrective");
    let stats = get_user_statistics(
        repo.as_ref(),
        &StatisticsAggregator::default(),
        UserId::new(1),
        &filter,
    )
    .await
    .unwrap();
    assert_eq!(stats.overview.total_interventions, 1);
    assert_eq!(stats.overview.total_work_hours, 4.0);
}

#[tokio::test]
async fn test_unknown_user_gets_empty_statistics() {
    let repo = fixture_repository();
    let stats = get_user_statistics(
        repo.as_ref(),
        &StatisticsAggregator::default(),
        UserId::new(404),
        &StatisticsFilter::default(),
    )
    .await
    .unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_user_dashboard() {
    let repo = fixture_repository();
    let dashboard = get_user_dashboard(
        repo.as_ref(),
        &StatisticsAggregator::default(),
        UserId::new(2),
        &StatisticsFilter::default(),
        day(2025, 4, 20),
    )
    .await
    .unwrap();

    assert_eq!(dashboard.total_interventions, 2);
    assert_eq!(dashboard.sent_interventions, 1);
    assert_eq!(dashboard.saved_interventions, 1);
    assert_eq!(dashboard.active_interventions, 1);
    assert_eq!(dashboard.inactive_interventions, 1);
    assert_eq!(dashboard.this_month_interventions, 2);
}

#[tokio::test]
async fn test_malformed_time_is_reported() {
    let repo = fixture_repository();
    let mut edited = repo.get_intervention(InterventionId::new(4)).await.unwrap();
    edited.start_time = "1pm".to_string();
    repo.update_intervention(&edited).await.unwrap();

    let err = get_statistics(
        repo.as_ref(),
        &StatisticsAggregator::default(),
        &StatisticsFilter::default(),
    )
    .await
    .unwrap_err();

    match err {
        ServiceError::Statistics(e) => {
            assert_eq!(e.intervention_id(), InterventionId::new(4));
            assert!(e.to_string().contains("1pm"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
