// ABOUTME: Integration tests for drink log storage
// ABOUTME: Covers insert-time classification, summaries and ownership scoping

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use drinkwise_drinks::{DrinkLogCreateInput, DrinkStorage, DrinkSummary};
use drinkwise_security::UserStorage;
use drinkwise_storage::{connect, connect_in_memory, StorageError};
use drinkwise_windows::{DrinkingWindowCreateInput, DrinkingWindowUpdateInput, WindowStorage};

struct Fixture {
    windows: WindowStorage,
    drinks: DrinkStorage,
    alice: i64,
    bob: i64,
}

async fn setup() -> Fixture {
    let pool = connect_in_memory().await.unwrap();
    let users = UserStorage::new(pool.clone());
    let alice = users.create_user("alice@example.com", "digest").await.unwrap();
    let bob = users.create_user("bob@example.com", "digest").await.unwrap();

    Fixture {
        windows: WindowStorage::new(pool.clone()),
        drinks: DrinkStorage::new(pool),
        alice: alice.id,
        bob: bob.id,
    }
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, h, m, 0).unwrap()
}

fn drink(timestamp: Option<DateTime<Utc>>) -> DrinkLogCreateInput {
    DrinkLogCreateInput {
        drink_type: "beer".to_string(),
        quantity: 1.0,
        timestamp,
    }
}

async fn nine_to_five(fixture: &Fixture) -> i64 {
    fixture
        .windows
        .create_window(
            fixture.alice,
            DrinkingWindowCreateInput {
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                duration_hours: 8,
                start_date: None,
                end_date: None,
                repeat_pattern: None,
                is_active: None,
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_drink_classified_against_active_window() {
    let fixture = setup().await;
    nine_to_five(&fixture).await;

    let inside = fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(12, 0))), at(23, 0))
        .await
        .unwrap();
    let outside = fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(20, 0))), at(23, 0))
        .await
        .unwrap();
    let boundary = fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(17, 0))), at(23, 0))
        .await
        .unwrap();

    assert!(inside.logged_in_window);
    assert!(!outside.logged_in_window);
    assert!(boundary.logged_in_window);
    assert_eq!(inside.timestamp, at(12, 0));
    assert_eq!(inside.created_at, at(23, 0));
}

#[tokio::test]
async fn test_drink_without_window_is_outside() {
    let fixture = setup().await;

    let log = fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(12, 0))), at(12, 0))
        .await
        .unwrap();

    assert!(!log.logged_in_window);
}

#[tokio::test]
async fn test_timestamp_defaults_to_now() {
    let fixture = setup().await;
    nine_to_five(&fixture).await;

    let log = fixture
        .drinks
        .log_drink(fixture.alice, drink(None), at(10, 30))
        .await
        .unwrap();

    assert_eq!(log.timestamp, at(10, 30));
    assert!(log.logged_in_window);
}

#[tokio::test]
async fn test_stored_classification_survives_window_changes() {
    let fixture = setup().await;
    let window_id = nine_to_five(&fixture).await;

    let log = fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(12, 0))), at(12, 0))
        .await
        .unwrap();
    assert!(log.logged_in_window);

    fixture
        .windows
        .update_window(
            fixture.alice,
            window_id,
            DrinkingWindowUpdateInput {
                start_time: Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    fixture
        .windows
        .delete_window(fixture.alice, window_id)
        .await
        .unwrap();

    let logs = fixture.drinks.list_drinks(fixture.alice).await.unwrap();
    assert_eq!(logs, vec![log]);
}

#[tokio::test]
async fn test_invalid_drink_rejected() {
    let fixture = setup().await;

    for quantity in [0.0, -1.0, f64::NAN] {
        let mut input = drink(None);
        input.quantity = quantity;
        let result = fixture.drinks.log_drink(fixture.alice, input, at(12, 0)).await;
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    let mut input = drink(None);
    input.drink_type = "   ".to_string();
    let result = fixture.drinks.log_drink(fixture.alice, input, at(12, 0)).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));

    let mut input = drink(None);
    input.drink_type = "x".repeat(101);
    let result = fixture.drinks.log_drink(fixture.alice, input, at(12, 0)).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));

    assert!(fixture.drinks.list_drinks(fixture.alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_counts() {
    let fixture = setup().await;

    assert_eq!(
        fixture.drinks.summarize(fixture.alice).await.unwrap(),
        DrinkSummary {
            total_drinks: 0,
            in_window: 0,
            out_window: 0
        }
    );

    nine_to_five(&fixture).await;
    for hour in [10, 12, 20] {
        fixture
            .drinks
            .log_drink(fixture.alice, drink(Some(at(hour, 0))), at(23, 0))
            .await
            .unwrap();
    }
    fixture
        .drinks
        .log_drink(fixture.bob, drink(Some(at(12, 0))), at(23, 0))
        .await
        .unwrap();

    let summary = fixture.drinks.summarize(fixture.alice).await.unwrap();
    assert_eq!(
        summary,
        DrinkSummary {
            total_drinks: 3,
            in_window: 2,
            out_window: 1
        }
    );
    assert_eq!(summary.total_drinks, summary.in_window + summary.out_window);
}

#[tokio::test]
async fn test_list_drinks_ordered_and_scoped() {
    let fixture = setup().await;

    fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(20, 0))), at(23, 0))
        .await
        .unwrap();
    fixture
        .drinks
        .log_drink(fixture.alice, drink(Some(at(8, 0))), at(23, 0))
        .await
        .unwrap();
    fixture
        .drinks
        .log_drink(fixture.bob, drink(Some(at(9, 0))), at(23, 0))
        .await
        .unwrap();

    let times: Vec<DateTime<Utc>> = fixture
        .drinks
        .list_drinks(fixture.alice)
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.timestamp)
        .collect();

    assert_eq!(times, vec![at(8, 0), at(20, 0)]);
}

#[tokio::test]
async fn test_list_drinks_since() {
    let fixture = setup().await;
    let now = at(12, 0);

    for days_ago in [10, 6, 1] {
        fixture
            .drinks
            .log_drink(
                fixture.alice,
                drink(Some(now - Duration::days(days_ago))),
                now,
            )
            .await
            .unwrap();
    }

    let recent = fixture
        .drinks
        .list_drinks_since(fixture.alice, now - Duration::days(7))
        .await
        .unwrap();

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, now - Duration::days(6));
}

#[tokio::test]
async fn test_delete_drink() {
    let fixture = setup().await;

    let log = fixture
        .drinks
        .log_drink(fixture.alice, drink(None), at(12, 0))
        .await
        .unwrap();

    assert!(matches!(
        fixture.drinks.delete_drink(fixture.bob, log.id).await,
        Err(StorageError::NotFound)
    ));
    assert_eq!(fixture.drinks.list_drinks(fixture.alice).await.unwrap().len(), 1);

    fixture.drinks.delete_drink(fixture.alice, log.id).await.unwrap();
    assert!(fixture.drinks.list_drinks(fixture.alice).await.unwrap().is_empty());

    assert!(matches!(
        fixture.drinks.delete_drink(fixture.alice, log.id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logging_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("drinkwise.db").display());
    let pool = connect(&url, 8).await.unwrap();
    let users = UserStorage::new(pool.clone());
    let fixture = Fixture {
        windows: WindowStorage::new(pool.clone()),
        drinks: DrinkStorage::new(pool.clone()),
        alice: users.create_user("alice@example.com", "digest").await.unwrap().id,
        bob: users.create_user("bob@example.com", "digest").await.unwrap().id,
    };
    let window_id = nine_to_five(&fixture).await;

    let mut handles = vec![];
    for i in 0..8 {
        let drinks = DrinkStorage::new(pool.clone());
        let user_id = if i % 2 == 0 { fixture.alice } else { fixture.bob };
        handles.push(tokio::spawn(async move {
            drinks.log_drink(user_id, drink(Some(at(12, 0))), at(12, 0)).await
        }));
    }

    // Competing writer on the window being read
    let windows = WindowStorage::new(pool.clone());
    let alice = fixture.alice;
    let touch = tokio::spawn(async move {
        let input = DrinkingWindowUpdateInput {
            repeat_pattern: Some(Some("weekdays".to_string())),
            ..Default::default()
        };
        windows.update_window(alice, window_id, input).await
    });

    for handle in handles {
        match handle.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => panic!("Logging failed: {:?}", e),
            Err(e) => panic!("Task panicked: {:?}", e),
        }
    }
    touch.await.unwrap().unwrap();

    assert_eq!(
        fixture.drinks.summarize(fixture.alice).await.unwrap(),
        DrinkSummary::new(4, 4)
    );
    assert_eq!(
        fixture.drinks.summarize(fixture.bob).await.unwrap(),
        DrinkSummary::new(4, 0)
    );
}
