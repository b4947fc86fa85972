mod common;

use chrono::Duration;
use common::harness;
use job_marketplace::{dto::vacancy_dto::CreateVacancyPayload, error::Error};
use tokio_test::assert_err;
use uuid::Uuid;

#[tokio::test]
async fn vacancy_view_resolves_service_and_employer() {
    let h = harness();
    let it = h.service("IT").await;
    let acme = h.organization("ACME Inc.").await;

    let vacancy = h.vacancy("Junior Developer", it.id, acme.id).await;
    assert_eq!(vacancy.title, "Junior Developer");
    assert_eq!(vacancy.service, it);
    assert_eq!(vacancy.employer, "ACME Inc.");
    assert_eq!(vacancy.created_at, common::utc(2024, 5, 10, 9, 0, 0));
}

#[tokio::test]
async fn unknown_references_are_rejected_before_insert() {
    let h = harness();
    let it = h.service("IT").await;
    let acme = h.organization("ACME Inc.").await;

    for (service_id, employer_id) in [(Uuid::new_v4(), acme.id), (it.id, Uuid::new_v4())] {
        let err = assert_err!(
            h.state
                .vacancy_service
                .create(CreateVacancyPayload {
                    title: "Junior Developer".into(),
                    service_id,
                    employer_id,
                    location: None,
                })
                .await
        );
        assert!(matches!(err, Error::NotFound(_)));
    }

    assert!(h.state.vacancy_service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let h = harness();
    let it = h.service("IT").await;
    let acme = h.organization("ACME Inc.").await;

    let err = assert_err!(
        h.state
            .vacancy_service
            .create(CreateVacancyPayload {
                title: "  ".into(),
                service_id: it.id,
                employer_id: acme.id,
                location: None,
            })
            .await
    );
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn created_at_never_changes_on_later_reads() {
    let h = harness();
    let (_, vacancies) = h.vacancies(1).await;
    let created = vacancies[0].created_at;

    h.clock.advance(Duration::days(40));
    for _ in 0..2 {
        let listed = h.state.vacancy_service.list().await.unwrap();
        assert_eq!(listed[0].created_at, created);
    }
}

#[tokio::test]
async fn list_is_newest_first() {
    let h = harness();
    let it = h.service("IT").await;
    let acme = h.organization("ACME Inc.").await;

    let first = h.vacancy("First", it.id, acme.id).await;
    h.clock.advance(Duration::hours(1));
    let second = h.vacancy("Second", it.id, acme.id).await;
    h.clock.advance(Duration::minutes(5));
    let third = h.vacancy("Third", it.id, acme.id).await;
    // same instant as the previous one
    let fourth = h.vacancy("Fourth", it.id, acme.id).await;

    let listed = h.state.vacancy_service.list().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
    assert_eq!(listed[2].id, second.id);
    assert_eq!(listed[3].id, first.id);
    let newest: Vec<_> = listed[..2].iter().map(|v| v.id).collect();
    assert!(newest.contains(&third.id) && newest.contains(&fourth.id));
}
