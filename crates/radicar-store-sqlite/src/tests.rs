//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use radicar_core::{
  case::{Case, LegalKind, Location, Requester, VisitRecord},
  lifecycle::CaseStatus,
  store::CaseStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sample_case(title: &str, sequence: u64) -> Case {
  let now = Utc::now();
  Case {
    case_id:       Uuid::new_v4(),
    tracking_code: format!("INF-2026-{sequence:04}"),
    created_at:    now,
    due_at:        now + Duration::days(15),
    closed_at:     None,
    case_type:     "ct-pothole".into(),
    department:    None,
    status:        CaseStatus::New,
    technician:    None,
    coordinator:   None,
    title:         title.into(),
    description:   "Reported through the service desk".into(),
    requester:     Requester {
      name:       "Rosa Diaz".into(),
      email:      Some("rosa@example.org".into()),
      phone:      Some("+57 301 222 3344".into()),
      legal_kind: Some(LegalKind::NaturalPerson),
    },
    location:      Location {
      latitude:  6.2442,
      longitude: -75.5812,
      address:   "Cra 45 # 10-11".into(),
      zone:      Some("Comuna 10".into()),
    },
    visit:         None,
  }
}

// ─── Insert and get ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_roundtrip() {
  let s = store().await;

  let case = sample_case("Pothole on main road", 1);
  let inserted = s.insert(case.clone()).await.unwrap();
  assert_eq!(inserted, case);

  let fetched = s.get(case.case_id).await.unwrap();
  assert_eq!(fetched, Some(case));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn visit_record_roundtrip() {
  let s = store().await;

  let mut case = sample_case("Broken street light", 2);
  case.department = Some("dep-2".into());
  case.technician = Some("usr-6".into());
  case.coordinator = Some("usr-5".into());
  case.status = CaseStatus::Resolved;
  case.closed_at = Some(case.created_at + Duration::days(3));
  case.visit = Some(VisitRecord {
    before_photos:   vec!["ph-1".into(), "ph-2".into()],
    after_photos:    vec!["ph-3".into()],
    on_site_contact: Some("Neighbour at #10-13".into()),
    observations:    "Lamp head corroded through".into(),
    resolution:      "Replaced lamp head and fuse".into(),
    visited_at:      case.created_at + Duration::days(3),
  });

  s.insert(case.clone()).await.unwrap();
  let fetched = s.get(case.case_id).await.unwrap().unwrap();
  assert_eq!(fetched, case);
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_all_returns_most_recent_first() {
  let s = store().await;

  let first = sample_case("first", 1);
  let second = sample_case("second", 2);
  let third = sample_case("third", 3);
  s.insert(first.clone()).await.unwrap();
  s.insert(second.clone()).await.unwrap();
  s.insert(third.clone()).await.unwrap();

  let all = s.get_all().await.unwrap();
  let ids: Vec<_> = all.iter().map(|c| c.case_id).collect();
  assert_eq!(ids, vec![third.case_id, second.case_id, first.case_id]);
}

#[tokio::test]
async fn replace_keeps_position() {
  let s = store().await;

  let older = sample_case("older", 1);
  let newer = sample_case("newer", 2);
  s.insert(older.clone()).await.unwrap();
  s.insert(newer.clone()).await.unwrap();

  let mut updated = older.clone();
  updated.title = "older, retitled".into();
  let replaced = s.replace(older.case_id, updated.clone()).await.unwrap();
  assert_eq!(replaced, Some(updated.clone()));

  // Still [newer, older]: replacing must not bump a case to the head.
  let all = s.get_all().await.unwrap();
  assert_eq!(all[0].case_id, newer.case_id);
  assert_eq!(all[1].case_id, older.case_id);
  assert_eq!(all[1].title, "older, retitled");
}

#[tokio::test]
async fn replace_missing_returns_none() {
  let s = store().await;
  let case = sample_case("ghost", 1);
  let result = s.replace(case.case_id, case).await.unwrap();
  assert!(result.is_none());
}

// ─── Sequence counter ────────────────────────────────────────────────────────

#[tokio::test]
async fn sequence_starts_at_one_and_is_monotonic() {
  let s = store().await;
  assert_eq!(s.allocate_sequence().await.unwrap(), 1);
  assert_eq!(s.allocate_sequence().await.unwrap(), 2);
  assert_eq!(s.allocate_sequence().await.unwrap(), 3);
}

#[tokio::test]
async fn sequence_survives_reopen() {
  let dir = std::env::temp_dir().join(format!("radicar-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("cases.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    assert_eq!(s.allocate_sequence().await.unwrap(), 1);
    assert_eq!(s.allocate_sequence().await.unwrap(), 2);
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.allocate_sequence().await.unwrap(), 3);

  std::fs::remove_dir_all(&dir).ok();
}
