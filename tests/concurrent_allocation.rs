use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use seat_allocator::config::HallConfig;
use seat_allocator::hall::{Hall, HallSnapshot, Point};
use seat_allocator::services::TicketService;
use seat_allocator::store::MemoryStore;

fn adjacent_reserved_pairs(snapshot: &HallSnapshot) -> Vec<(Point, Point)> {
    let reserved: HashSet<Point> = snapshot
        .reserved()
        .map(|s| Point::new(s.x, s.y))
        .collect();

    let mut pairs = Vec::new();
    for &p in &reserved {
        for n in p.neighbours() {
            if p < n && reserved.contains(&n) {
                pairs.push((p, n));
            }
        }
    }
    pairs
}

#[test]
fn racing_threads_never_reserve_neighbours() {
    let hall = Arc::new(Hall::new(40, 40).unwrap());

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let hall = Arc::clone(&hall);
            thread::spawn(move || {
                // half the threads start from the center, half from scattered seats
                let origin = if i % 2 == 0 {
                    hall.center().position()
                } else {
                    Point::new((i * 11) % 40, (i * 17) % 40)
                };
                let mut taken = Vec::new();
                while let Some(seat) = hall.get_next_available_ticket_from(origin).unwrap() {
                    taken.push(seat.position());
                }
                taken
            })
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for p in handle.join().unwrap() {
            assert!(all.insert(p), "seat {} handed out twice", p);
        }
    }

    let snapshot = hall.snapshot();
    assert_eq!(all.len(), snapshot.reserved().count());
    assert!(adjacent_reserved_pairs(&snapshot).is_empty());
    assert!(hall.seats().all(|s| !hall.is_available(s)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_are_persisted() {
    let store = Arc::new(MemoryStore::new());
    let service = TicketService::bootstrap(store.clone(), &HallConfig { rows: 20, cols: 30 })
        .await
        .unwrap();

    let requests = (0..48).map(|i| {
        let service = service.clone();
        async move {
            let preferred = (i % 3 != 0).then(|| Point::new(i % 20, (i * 7) % 30));
            service.allocate(preferred).await
        }
    });
    let results = futures::future::join_all(requests.map(tokio::spawn)).await;

    let mut handed_out = HashSet::new();
    for result in results {
        if let Some(seat) = result.unwrap().unwrap() {
            assert!(handed_out.insert((seat.x, seat.y)));
        }
    }

    let stored = store.current().unwrap();
    assert_eq!(stored, service.snapshot());
    assert_eq!(stored.reserved().count(), handed_out.len());
    assert!(adjacent_reserved_pairs(&stored).is_empty());
}

#[tokio::test]
async fn restart_resumes_from_the_stored_hall() {
    let store = Arc::new(MemoryStore::new());
    let config = HallConfig { rows: 5, cols: 5 };

    let first = TicketService::bootstrap(store.clone(), &config).await.unwrap();
    let a = first.allocate(None).await.unwrap().unwrap();
    assert_eq!((a.x, a.y), (2, 2));

    let second = TicketService::bootstrap(store.clone(), &config).await.unwrap();
    assert!(second.hall().center().is_reserved());
    let b = second.allocate(None).await.unwrap().unwrap();
    assert_ne!((b.x, b.y), (2, 2));
    assert_eq!(Point::new(b.x, b.y).distance_to(Point::new(2, 2)), 2);
}
