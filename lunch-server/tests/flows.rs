//! End-to-end tests over an in-memory database: ingestion flows feeding
//! the read side, fallback resolution across views, and filter-scoped
//! pagination.

use lunch_server::conversation::{ConversationEngine, FlowInput, FlowKind, Reply};
use lunch_server::db::DbService;
use lunch_server::db::repository::{lunch, menu_item, place, review, user};
use lunch_server::{pagination, schedule};
use shared::models::{BusinessLunchCreate, MenuItemCreate, PlaceCreate, ReviewCreate};
use sqlx::SqlitePool;

const CITY: &str = "Липецк";
const OTHER_CITY: &str = "Ковров";

async fn setup() -> (DbService, ConversationEngine) {
    let db = DbService::open_in_memory().await.expect("in-memory db");
    user::upsert(&db.pool, 1, Some("admin"), CITY).await.unwrap();
    user::set_admin_status(&db.pool, 1, true).await.unwrap();
    let engine = ConversationEngine::new(
        db.pool.clone(),
        vec![CITY.to_string(), OTHER_CITY.to_string()],
        5,
    );
    (db, engine)
}

async fn seed_place(pool: &SqlitePool, name: &str, city: &str) -> i64 {
    place::create(
        pool,
        PlaceCreate {
            name: name.to_string(),
            address: "Lenina 1".to_string(),
            category: "cafe".to_string(),
            city: city.to_string(),
            photo_id: None,
            admin_comment: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn text(s: &str) -> FlowInput {
    FlowInput::Text {
        text: s.to_string(),
    }
}

fn select(id: i64) -> FlowInput {
    FlowInput::Select { id: id.to_string() }
}

async fn submit_schedule(engine: &ConversationEngine, place_id: i64, payload: &str) -> Reply {
    engine.start_flow(1, FlowKind::AddLunch).await.unwrap();
    engine.handle(1, select(place_id)).await.unwrap();
    engine.handle(1, text(payload)).await.unwrap()
}

#[tokio::test]
async fn resubmitted_day_inserts_a_second_row_and_the_newest_wins() {
    let (db, engine) = setup().await;
    let place_id = seed_place(&db.pool, "Cafe Nord", CITY).await;

    let first = r#"{"business_lunch":{"time":"12:00 to 15:00","price":380,"days":{"monday":{"positions":["Soup"]}}}}"#;
    let second = r#"{"business_lunch":{"time":"11:00 to 14:00","price":420,"days":{"monday":{"positions":["Salad"]}}}}"#;
    assert!(matches!(
        submit_schedule(&engine, place_id, first).await,
        Reply::Committed { .. }
    ));
    assert!(matches!(
        submit_schedule(&engine, place_id, second).await,
        Reply::Committed { .. }
    ));

    // Both rows are kept; resolution picks the most recently created one
    let rows = lunch::find_by_place(&db.pool, place_id).await.unwrap();
    assert_eq!(rows.len(), 2);

    let resolved = schedule::resolve(&db.pool, place_id, 1)
        .await
        .unwrap()
        .expect("monday row");
    assert_eq!(resolved.price, 420.0);
    assert_eq!(resolved.start_time, "11:00");

    // The full-week view does not collapse duplicates
    let week = schedule::resolve_all(&db.pool, place_id).await.unwrap();
    assert_eq!(week.len(), 2);
    assert!(week.iter().all(|r| r.weekday == 1));
}

#[tokio::test]
async fn fallback_is_consistent_across_list_and_detail_views() {
    let (db, engine) = setup().await;
    let every_day = seed_place(&db.pool, "Always Open", CITY).await;
    let monday_only = seed_place(&db.pool, "Monday Club", CITY).await;

    let every_day_payload = r#"{"business_lunch":{"time":"12:00 to 15:00","price":300,"days":{"every day":{"positions":["Soup of the day"]}}}}"#;
    let monday_payload = r#"{"business_lunch":{"time":"12:00 to 16:00","price":350,"days":{"monday":{"positions":["Monday special"]}}}}"#;
    submit_schedule(&engine, every_day, every_day_payload).await;
    submit_schedule(&engine, monday_only, monday_payload).await;

    // Monday: both venues qualify; Wednesday: only the code-0 one
    assert_eq!(
        lunch::count_places_with_lunch(&db.pool, CITY, 1).await.unwrap(),
        2
    );
    assert_eq!(
        lunch::count_places_with_lunch(&db.pool, CITY, 3).await.unwrap(),
        1
    );

    let wednesday_places = lunch::list_places_with_lunch(&db.pool, CITY, 3, 10, 0)
        .await
        .unwrap();
    assert_eq!(wednesday_places.len(), 1);
    assert_eq!(wednesday_places[0].id, every_day);

    // Detail view agrees with the list filter
    let resolved = schedule::resolve(&db.pool, every_day, 3)
        .await
        .unwrap()
        .expect("fallback row");
    assert_eq!(resolved.weekday, 0);
    assert_eq!(schedule::weekday_name(resolved.weekday), "every day");

    assert!(schedule::resolve(&db.pool, monday_only, 3)
        .await
        .unwrap()
        .is_none());

    // The day-specific row beats the fallback when both exist
    let combo_payload = r#"{"business_lunch":{"time":"12:00 to 15:00","price":500,"days":{"wednesday":{"positions":["Special"]}}}}"#;
    submit_schedule(&engine, every_day, combo_payload).await;
    let resolved = schedule::resolve(&db.pool, every_day, 3)
        .await
        .unwrap()
        .expect("day row");
    assert_eq!(resolved.weekday, 3);
    assert_eq!(resolved.price, 500.0);
}

#[tokio::test]
async fn changing_the_weekday_filter_recomputes_totals_and_clamps_pages() {
    let (db, engine) = setup().await;
    let a = seed_place(&db.pool, "A", CITY).await;
    let b = seed_place(&db.pool, "B", CITY).await;

    let monday = r#"{"business_lunch":{"time":"12:00 to 15:00","price":300,"days":{"monday":{"positions":["Soup"]}}}}"#;
    let both_days = r#"{"business_lunch":{"time":"12:00 to 15:00","price":300,"days":{"monday":{"positions":["Soup"]},"wednesday":{"positions":["Fish"]}}}}"#;
    submit_schedule(&engine, a, monday).await;
    submit_schedule(&engine, b, both_days).await;

    // Monday filter: 2 venues, one per page -> page 2 is valid
    let total_monday = lunch::count_places_with_lunch(&db.pool, CITY, 1).await.unwrap();
    assert_eq!(total_monday, 2);
    let page = pagination::clamp_page(2, total_monday, 1);
    assert_eq!(page, 2);
    let window = pagination::paginate(total_monday, page, 1);
    assert_eq!(window.page_count, 2);
    let places = lunch::list_places_with_lunch(&db.pool, CITY, 1, 1, window.offset)
        .await
        .unwrap();
    assert_eq!(places.len(), 1);

    // Same page number under the Wednesday filter: the total is
    // recomputed and the page clamps back into range
    let total_wednesday = lunch::count_places_with_lunch(&db.pool, CITY, 3).await.unwrap();
    assert_eq!(total_wednesday, 1);
    let page = pagination::clamp_page(2, total_wednesday, 1);
    assert_eq!(page, 1);
    let window = pagination::paginate(total_wednesday, page, 1);
    assert_eq!(window.page_count, 1);
    let places = lunch::list_places_with_lunch(&db.pool, CITY, 3, 1, window.offset)
        .await
        .unwrap();
    assert_eq!(places[0].id, b);
}

#[tokio::test]
async fn menu_search_matches_substrings_within_the_city() {
    let (db, engine) = setup().await;
    let here = seed_place(&db.pool, "Cafe Nord", CITY).await;
    let elsewhere = seed_place(&db.pool, "Cafe Sud", OTHER_CITY).await;

    for (place_id, name) in [(here, "Pasta Carbonara"), (elsewhere, "Carbonara Royale")] {
        menu_item::create(
            &db.pool,
            MenuItemCreate {
                place_id,
                name: name.to_string(),
                price: 290.0,
                category: "pasta".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    }

    // Substring match, scoped to the user's city
    assert_eq!(
        menu_item::count_search_results(&db.pool, CITY, "carbonara")
            .await
            .unwrap(),
        1
    );
    let found = menu_item::search_places(&db.pool, CITY, "carbonara", 10, 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, here);

    // Category matches too
    assert_eq!(
        menu_item::count_search_results(&db.pool, CITY, "past")
            .await
            .unwrap(),
        1
    );

    // Menu ingestion feeds the same search
    engine.start_flow(1, FlowKind::AddMenu).await.unwrap();
    engine.handle(1, select(here)).await.unwrap();
    engine.handle(1, text("hookah")).await.unwrap();
    let payload = r#"{"menu_items":[{"name":"Classic hookah","price":900}]}"#;
    assert!(matches!(
        engine.handle(1, text(payload)).await.unwrap(),
        Reply::Committed { .. }
    ));
    assert_eq!(
        menu_item::count_search_results(&db.pool, CITY, "hookah")
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn review_aggregate_tracks_submissions() {
    let (db, _engine) = setup().await;
    let place_id = seed_place(&db.pool, "Cafe Nord", CITY).await;

    let summary = review::summary(&db.pool, place_id).await.unwrap();
    assert_eq!(summary.count, 0);

    for (user_id, rating, comment) in [
        (10, 5, Some("great")),
        (11, 4, None),
        (12, 3, Some("okay")),
    ] {
        review::create(
            &db.pool,
            ReviewCreate {
                user_id,
                place_id,
                rating,
                comment: comment.map(String::from),
            },
        )
        .await
        .unwrap();
    }

    let summary = review::summary(&db.pool, place_id).await.unwrap();
    assert_eq!(summary.count, 3);
    assert!((summary.average - 4.0).abs() < f64::EPSILON);

    let reviews = review::find_by_place(&db.pool, place_id).await.unwrap();
    assert_eq!(reviews.len(), 3);
    // Out-of-range ratings are rejected
    assert!(review::create(
        &db.pool,
        ReviewCreate {
            user_id: 13,
            place_id,
            rating: 6,
            comment: None,
        },
    )
    .await
    .is_err());
}

#[tokio::test]
async fn lunch_rows_validate_their_weekday_domain() {
    let (db, _engine) = setup().await;
    let place_id = seed_place(&db.pool, "Cafe Nord", CITY).await;

    let result = lunch::create(
        &db.pool,
        BusinessLunchCreate {
            place_id,
            weekday: 8,
            price: 100.0,
            start_time: "12:00".to_string(),
            end_time: "15:00".to_string(),
            description: None,
        },
    )
    .await;
    assert!(result.is_err());
}
