//! Tests for the artist query and mutation operations

use chrono::{Duration, Utc};
use showbill_common::db::models::{ArtistUpdate, NewArtist, NewShow, NewVenue};
use showbill_common::db::{artists, init_database, shows, venues};
use showbill_common::Error;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("showbill.db")).await.unwrap();
    (dir, pool)
}

fn sample_artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: "326-123-5000".to_string(),
        genres: vec!["Rock n Roll".to_string()],
        image_link: None,
        website: None,
        facebook_link: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

fn sample_venue(name: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: "123-123-1234".to_string(),
        genres: vec!["Jazz".to_string()],
        image_link: Some("https://example.com/venue.jpg".to_string()),
        website: None,
        facebook_link: None,
        seeking_talent: false,
        seeking_description: None,
    }
}

#[tokio::test]
async fn test_list_is_ordered_by_name() {
    let (_dir, pool) = setup().await;

    artists::create(&pool, sample_artist("The Wild Sax Band"))
        .await
        .unwrap();
    artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();
    artists::create(&pool, sample_artist("Matt Quevedo"))
        .await
        .unwrap();

    let listing = artists::list(&pool).await.unwrap();
    let names: Vec<&str> = listing.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
}

#[tokio::test]
async fn test_search_substring_cases() {
    let (_dir, pool) = setup().await;

    artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();
    artists::create(&pool, sample_artist("Matt Quevedo"))
        .await
        .unwrap();
    artists::create(&pool, sample_artist("The Wild Sax Band"))
        .await
        .unwrap();

    // Case-insensitive: "a" appears in all three names
    let a = artists::search_by_name(&pool, "A").await.unwrap();
    assert_eq!(a.count, 3);

    let band = artists::search_by_name(&pool, "band").await.unwrap();
    assert_eq!(band.count, 1);
    assert_eq!(band.data[0].name, "The Wild Sax Band");

    let empty = artists::search_by_name(&pool, "").await.unwrap();
    assert_eq!(empty.count, 3);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let (_dir, pool) = setup().await;

    artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();
    let result = artists::create(&pool, sample_artist("Guns N Petals")).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_update_applies_only_supplied_fields() {
    let (_dir, pool) = setup().await;

    let created = artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();

    let update = ArtistUpdate {
        city: Some("Oakland".to_string()),
        seeking_venue: Some(true),
        genres: Some(vec!["Jazz".to_string(), "Blues".to_string()]),
        ..Default::default()
    };
    let updated = artists::update(&pool, &created.guid, update).await.unwrap();

    assert_eq!(updated.city, "Oakland");
    assert!(updated.seeking_venue);
    assert_eq!(updated.genres, vec!["Jazz", "Blues"]);
    assert_eq!(updated.name, "Guns N Petals");
    assert_eq!(updated.phone, "326-123-5000");
}

#[tokio::test]
async fn test_update_not_found() {
    let (_dir, pool) = setup().await;

    let result = artists::update(&pool, "no-such-guid", ArtistUpdate::default()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_delete_is_idempotent_and_cascades() {
    let (_dir, pool) = setup().await;

    let artist = artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();
    let venue = venues::create(&pool, sample_venue("The Musical Hop"))
        .await
        .unwrap();
    shows::create(
        &pool,
        NewShow {
            artist_guid: artist.guid.clone(),
            venue_guid: venue.guid.clone(),
            start_time: Utc::now() + Duration::days(3),
        },
    )
    .await
    .unwrap();

    // Artist delete cascades to shows, symmetric with venue delete
    artists::delete(&pool, &artist.guid).await.unwrap();

    let show_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(show_count, 0);

    let venue_detail = venues::get_detail(&pool, &venue.guid).await.unwrap();
    assert_eq!(venue_detail.upcoming_shows_count, 0);

    // Second delete is a successful no-op
    artists::delete(&pool, &artist.guid).await.unwrap();
}

#[tokio::test]
async fn test_detail_shows_reference_venue_side() {
    let (_dir, pool) = setup().await;

    let artist = artists::create(&pool, sample_artist("Guns N Petals"))
        .await
        .unwrap();
    let venue = venues::create(&pool, sample_venue("The Musical Hop"))
        .await
        .unwrap();
    shows::create(
        &pool,
        NewShow {
            artist_guid: artist.guid.clone(),
            venue_guid: venue.guid.clone(),
            start_time: Utc::now() - Duration::days(365),
        },
    )
    .await
    .unwrap();

    let detail = artists::get_detail(&pool, &artist.guid).await.unwrap();
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 0);
    assert_eq!(detail.past_shows[0].guid, venue.guid);
    assert_eq!(detail.past_shows[0].name, "The Musical Hop");
    assert_eq!(
        detail.past_shows[0].image_link.as_deref(),
        Some("https://example.com/venue.jpg")
    );
}
