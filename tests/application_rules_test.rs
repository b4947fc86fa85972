mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::{harness, harness_at, utc};
use job_marketplace::{
    database::{
        store::{ApplicationStore, StoreResult},
        MemoryStore,
    },
    error::Error,
    models::application::Application,
    services::application_service::ApplicationService,
};
use tokio::sync::Barrier;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

async fn applications_of(store: &MemoryStore, professional_id: Uuid) -> i64 {
    store
        .count_applied_between(professional_id, DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
        .await
        .unwrap()
}

#[tokio::test]
async fn fourth_application_in_a_month_exceeds_quota() {
    let h = harness();
    let (_, vacancies) = h.vacancies(4).await;
    let maria = h.professional("Maria", Some("Lopez"), Some("F"), vec![]).await;

    for vacancy in &vacancies[..3] {
        assert!(assert_ok!(h.state.application_service.apply(maria.id, vacancy.id).await));
        h.clock.advance(Duration::days(1));
    }

    let err = assert_err!(
        h.state
            .application_service
            .apply(maria.id, vacancies[3].id)
            .await
    );
    assert!(matches!(err, Error::QuotaExceeded { limit: 3 }));
    assert_eq!(err.code(), "QUOTA_EXCEEDED");
    assert_eq!(applications_of(&h.store, maria.id).await, 3);
}

#[tokio::test]
async fn quota_resets_with_the_calendar_month() {
    let h = harness_at(utc(2024, 1, 31, 23, 59, 59) + Duration::milliseconds(999));
    let (_, vacancies) = h.vacancies(4).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    for vacancy in &vacancies[..3] {
        assert_ok!(h.state.application_service.apply(maria.id, vacancy.id).await);
    }

    h.clock.set(utc(2024, 2, 1, 0, 0, 0));
    assert_ok!(h.state.application_service.apply(maria.id, vacancies[3].id).await);
    assert_eq!(applications_of(&h.store, maria.id).await, 4);
}

#[tokio::test]
async fn applications_from_other_professionals_do_not_count() {
    let h = harness();
    let (_, vacancies) = h.vacancies(3).await;
    let maria = h.professional("Maria", None, None, vec![]).await;
    let jose = h.professional("Jose", None, None, vec![]).await;

    for vacancy in &vacancies {
        assert_ok!(h.state.application_service.apply(jose.id, vacancy.id).await);
    }
    assert_ok!(h.state.application_service.apply(maria.id, vacancies[0].id).await);
}

#[tokio::test]
async fn second_application_to_same_vacancy_is_duplicate() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    assert_ok!(h.state.application_service.apply(maria.id, vacancies[0].id).await);
    let err = assert_err!(
        h.state
            .application_service
            .apply(maria.id, vacancies[0].id)
            .await
    );
    assert!(matches!(err, Error::DuplicateApplication));
    assert_eq!(applications_of(&h.store, maria.id).await, 1);
}

#[tokio::test]
async fn duplicate_holds_across_months() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    assert_ok!(h.state.application_service.apply(maria.id, vacancies[0].id).await);
    h.clock.advance(Duration::days(62));
    let err = assert_err!(
        h.state
            .application_service
            .apply(maria.id, vacancies[0].id)
            .await
    );
    assert_eq!(err.code(), "DUPLICATE_APPLICATION");
}

#[tokio::test]
async fn unknown_professional_or_vacancy_is_not_found() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    let err = assert_err!(
        h.state
            .application_service
            .apply(Uuid::new_v4(), vacancies[0].id)
            .await
    );
    assert!(matches!(err, Error::NotFound(_)));

    let err = assert_err!(h.state.application_service.apply(maria.id, Uuid::new_v4()).await);
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(applications_of(&h.store, maria.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_admit_exactly_one() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let maria = h.professional("Maria", None, None, vec![]).await;
    let vacancy_id = vacancies[0].id;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = h.state.application_service.clone();
        let professional_id = maria.id;
        handles.push(tokio::spawn(async move {
            service.apply(professional_id, vacancy_id).await
        }));
    }

    let mut accepted = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(true) => accepted += 1,
            Err(Error::DuplicateApplication) => duplicates += 1,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(applications_of(&h.store, maria.id).await, 1);
}

/// Holds every quota count until `parties` callers have read it, forcing the
/// interleaving where concurrent calls all see the same pre-insert count.
struct GatedCounts {
    inner: Arc<MemoryStore>,
    barrier: Barrier,
}

#[async_trait]
impl ApplicationStore for GatedCounts {
    async fn insert_application(&self, application: &Application) -> StoreResult<()> {
        self.inner.insert_application(application).await
    }

    async fn count_applied_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let count = self.inner.count_applied_between(professional_id, from, to).await?;
        self.barrier.wait().await;
        Ok(count)
    }

    async fn applicant_names(&self, service_id: Uuid) -> StoreResult<Vec<(String, Option<String>)>> {
        self.inner.applicant_names(service_id).await
    }
}

#[tokio::test]
async fn monthly_quota_is_advisory_under_concurrency() {
    let h = harness();
    let (_, vacancies) = h.vacancies(4).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    for vacancy in &vacancies[..2] {
        assert_ok!(h.state.application_service.apply(maria.id, vacancy.id).await);
    }

    let gated = Arc::new(GatedCounts {
        inner: h.store.clone(),
        barrier: Barrier::new(2),
    });
    let service = ApplicationService::new(gated, h.store.clone(), h.store.clone(), h.clock.clone());

    let (third, fourth) = tokio::join!(
        service.apply(maria.id, vacancies[2].id),
        service.apply(maria.id, vacancies[3].id),
    );

    // Both saw two prior applications, so both were admitted.
    assert_ok!(third);
    assert_ok!(fourth);
    assert_eq!(applications_of(&h.store, maria.id).await, 4);

    // The next sequential call observes the overshoot and is rejected.
    let err = assert_err!(
        h.state
            .application_service
            .apply(maria.id, vacancies[0].id)
            .await
    );
    assert_eq!(err.code(), "QUOTA_EXCEEDED");
}

#[tokio::test]
async fn concurrent_duplicates_still_collide_when_quota_is_bypassed() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let maria = h.professional("Maria", None, None, vec![]).await;

    let gated = Arc::new(GatedCounts {
        inner: h.store.clone(),
        barrier: Barrier::new(2),
    });
    let service = ApplicationService::new(gated, h.store.clone(), h.store.clone(), h.clock.clone());

    let (a, b) = tokio::join!(
        service.apply(maria.id, vacancies[0].id),
        service.apply(maria.id, vacancies[0].id),
    );
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(Error::DuplicateApplication))));
}
