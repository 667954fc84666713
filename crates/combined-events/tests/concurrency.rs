use std::sync::Arc;

use combined_events::cache::MemoryCache;
use combined_events::models::{Discipline, EventType, Gender, NewCombinedEvent};
use combined_events::repository::{AllowAllReferences, MemoryCombinedEventStore};
use combined_events::scoring::compute_points;
use combined_events::services::{CombinedEventService, RankingCache};
use uuid::Uuid;

fn service() -> CombinedEventService {
    CombinedEventService::new(
        Arc::new(MemoryCombinedEventStore::new()),
        Arc::new(AllowAllReferences),
        RankingCache::new(Arc::new(MemoryCache::new()), RankingCache::DEFAULT_TTL),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_lose_no_points() {
    let service = service();
    let id = service
        .create_entry(NewCombinedEvent {
            event_type: EventType::Decathlon,
            gender: Gender::Male,
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
        })
        .await
        .unwrap()
        .entry
        .combined_event_id;

    let marks = [
        (Discipline::Sprint100, "10.85"),
        (Discipline::LongJump, "7.50"),
        (Discipline::ShotPut, "15.00"),
        (Discipline::HighJump, "2.05"),
        (Discipline::Run400, "48.50"),
        (Discipline::Hurdles110, "14.20"),
        (Discipline::DiscusThrow, "45.00"),
        (Discipline::PoleVault, "5.00"),
        (Discipline::JavelinThrow, "60.00"),
        (Discipline::Run1500, "4:30"),
    ];

    let handles: Vec<_> = marks
        .iter()
        .map(|&(discipline, mark)| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .update_result(id, discipline, mark, None)
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let expected: i32 = marks
        .iter()
        .map(|&(discipline, mark)| compute_points(discipline, mark, Gender::Male).unwrap())
        .sum();

    let detail = service.get_entry(id).await.unwrap();
    assert_eq!(detail.entry.total_points, expected);
    assert!(detail.entry.is_complete);
    assert!(detail.results.iter().all(|r| r.is_valid));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resubmissions_settle_on_a_single_value() {
    let service = service();
    let id = service
        .create_entry(NewCombinedEvent {
            event_type: EventType::PentathlonIndoor,
            gender: Gender::Female,
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
        })
        .await
        .unwrap()
        .entry
        .combined_event_id;

    let marks = ["8.20", "8.35", "8.50", "8.65", "8.80", "8.95"];
    let handles: Vec<_> = marks
        .iter()
        .map(|&mark| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .update_result(id, Discipline::Hurdles60, mark, None)
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let detail = service.get_entry(id).await.unwrap();
    let hurdles = &detail.results[0];
    assert_eq!(hurdles.discipline, Discipline::Hurdles60);
    assert_eq!(detail.entry.total_points, hurdles.points);

    let stored_mark = hurdles.performance.as_deref().unwrap();
    assert_eq!(
        hurdles.points,
        compute_points(Discipline::Hurdles60, stored_mark, Gender::Female).unwrap()
    );
}
