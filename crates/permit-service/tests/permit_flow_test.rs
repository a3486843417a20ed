//! Integration tests for submission, listing and decisions.

mod common;

use std::time::Duration;

use common::{MemoryPermits, RecordingNotifier, admin, contractor, date, submission};
use permit_core::error::PermitError;
use permit_core::models::permit::PermitStatus;
use permit_service::config::{NotifyConfig, ServiceConfig};
use permit_service::service::PermitService;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

fn config() -> ServiceConfig {
    ServiceConfig {
        notify: NotifyConfig {
            admin_line_id: "U-admin".into(),
            liff_url: "https://liff.example/app".into(),
            ..NotifyConfig::default()
        },
        ..ServiceConfig::default()
    }
}

fn setup() -> (
    PermitService<MemoryPermits, RecordingNotifier>,
    MemoryPermits,
    UnboundedReceiver<(String, String)>,
) {
    let permits = MemoryPermits::new();
    let (notifier, rx) = RecordingNotifier::new();
    let service = PermitService::new(permits.clone(), notifier, config());
    (service, permits, rx)
}

async fn next_push(rx: &mut UnboundedReceiver<(String, String)>) -> (String, String) {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("no notification within a second")
        .expect("notifier dropped")
}

async fn assert_no_more_pushes(rx: &mut UnboundedReceiver<(String, String)>) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err(), "unexpected extra notification");
}

#[tokio::test]
async fn submit_then_approve_end_to_end() {
    let (service, permits, mut rx) = setup();

    let created = service
        .submit(submission(date(2025, 1, 10), date(2025, 1, 12)))
        .await
        .unwrap();

    let sent = permits.submissions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].start_date, date(2025, 1, 10));
    assert_eq!(sent[0].end_date, date(2025, 1, 12));

    let (to, text) = next_push(&mut rx).await;
    assert_eq!(to, "U-admin");
    assert!(text.contains(&created.permit_number));
    assert!(text.contains("10/01/2025 ถึง 12/01/2025"));
    assert!(text.contains("📍 พื้นที่: Apron"));

    let decided = service
        .decide(created.permit_id, PermitStatus::Approved, &admin())
        .await
        .unwrap();
    assert_eq!(decided.status, PermitStatus::Approved);
    assert_eq!(
        permits.updates(),
        vec![(created.permit_id, PermitStatus::Approved, 1)]
    );

    let (to, text) = next_push(&mut rx).await;
    assert_eq!(to, "U-owner");
    assert!(text.contains("Niran Admin"));
    assert!(text.contains("✅ อนุมัติ"));
    assert_no_more_pushes(&mut rx).await;
}

#[tokio::test]
async fn reversed_dates_are_rejected_before_any_write() {
    let (service, permits, mut rx) = setup();

    let err = service
        .submit(submission(date(2025, 1, 12), date(2025, 1, 10)))
        .await
        .unwrap_err();

    assert!(matches!(err, PermitError::Validation { .. }));
    assert!(permits.submissions().is_empty());
    assert_no_more_pushes(&mut rx).await;
}

#[tokio::test]
async fn submission_without_admin_id_skips_the_notice() {
    let permits = MemoryPermits::new();
    let (notifier, mut rx) = RecordingNotifier::new();
    let service = PermitService::new(permits.clone(), notifier, ServiceConfig::default());

    service
        .submit(submission(date(2025, 1, 10), date(2025, 1, 10)))
        .await
        .unwrap();

    assert_eq!(permits.submissions().len(), 1);
    assert_no_more_pushes(&mut rx).await;
}

#[tokio::test]
async fn only_admins_decide() {
    let (service, permits, _rx) = setup();
    permits.seed(1, PermitStatus::Pending, date(2025, 1, 1), date(2025, 1, 2));

    let err = service
        .decide(1, PermitStatus::Approved, &contractor())
        .await
        .unwrap_err();

    assert!(matches!(err, PermitError::Forbidden { .. }));
    assert!(permits.updates().is_empty());
}

#[tokio::test]
async fn decided_permits_cannot_be_decided_again() {
    let (service, permits, mut rx) = setup();
    permits.seed(1, PermitStatus::Rejected, date(2025, 1, 1), date(2025, 1, 2));

    let err = service
        .decide(1, PermitStatus::Approved, &admin())
        .await
        .unwrap_err();

    assert!(matches!(err, PermitError::Validation { .. }));
    assert!(permits.updates().is_empty());
    assert_no_more_pushes(&mut rx).await;
}

#[tokio::test]
async fn decisions_other_than_approve_or_reject_are_refused() {
    let (service, permits, _rx) = setup();
    permits.seed(1, PermitStatus::Pending, date(2025, 1, 1), date(2025, 1, 2));

    for decision in [PermitStatus::Pending, PermitStatus::Cancelled] {
        let err = service.decide(1, decision, &admin()).await.unwrap_err();
        assert!(matches!(err, PermitError::Validation { .. }));
    }
}

#[tokio::test]
async fn rejection_notifies_the_owner() {
    let (service, permits, mut rx) = setup();
    permits.seed(3, PermitStatus::Pending, date(2025, 1, 1), date(2025, 1, 2));

    service
        .decide(3, PermitStatus::Rejected, &admin())
        .await
        .unwrap();

    let (to, text) = next_push(&mut rx).await;
    assert_eq!(to, "U-owner");
    assert!(text.contains("❌ ไม่อนุมัติ"));
}

#[tokio::test]
async fn user_list_is_filtered_by_covering_date() {
    let (service, permits, _rx) = setup();
    permits.seed(1, PermitStatus::Pending, date(2025, 1, 1), date(2025, 1, 5));
    permits.seed(2, PermitStatus::Approved, date(2025, 1, 5), date(2025, 1, 9));
    permits.seed(3, PermitStatus::Approved, date(2025, 1, 10), date(2025, 1, 10));

    let on_fifth = service
        .list_for_user(7, Some(date(2025, 1, 5)))
        .await
        .unwrap();
    let ids: Vec<_> = on_fifth.iter().map(|p| p.permit_id).collect();
    assert_eq!(ids, vec![2, 1]);

    let all = service.list_for_user(7, None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn admin_list_pages_by_ten_and_counts_pending() {
    let (service, permits, _rx) = setup();
    for id in 1..=23 {
        let status = if id % 3 == 0 {
            PermitStatus::Pending
        } else {
            PermitStatus::Approved
        };
        permits.seed(id, status, date(2025, 1, 1), date(2025, 1, 31));
    }

    let third = service.list_all(None, 3).await.unwrap();
    assert_eq!(third.page, 3);
    assert_eq!(third.total_pages, 3);
    assert_eq!(third.permits.items.len(), 3);
    assert_eq!(third.permits.total, 23);
    assert_eq!(third.pending_count, 7);

    let outside = service.list_all(Some(date(2025, 2, 1)), 1).await.unwrap();
    assert_eq!(outside.permits.total, 0);
    assert_eq!(outside.pending_count, 0);

    let first = service.list_all(None, 0).await.unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.permits.items.len(), 10);
}
