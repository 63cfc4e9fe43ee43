//! End-to-end pipeline tests: JSON document in, laid-out spots out.

use std::sync::Arc;
use std::time::Duration;

use spots::prelude::*;
use spots::testing::{spot_wiring, temp_cache_root};

#[test]
fn test_document_to_laid_out_spots() {
    let (registry, tx, _rx) = spot_wiring();
    let json = r#"{
        "components": [
            {"kind": "grid", "title": "Albums", "items": [
                {"title": "Blue Train"}, {"title": "Giant Steps"}
            ]},
            {"kind": "list", "items": [{"title": "So What"}]},
            {"kind": "carousel", "items": [{"title": "Hits"}]}
        ]
    }"#;

    let mut spots = spots::parse_spots(json, &registry, &tx);
    assert_eq!(spots.len(), 3);

    for spot in &mut spots {
        spot.setup(SizeF::new(80.0, 24.0));
        assert_eq!(spot.state(), SpotState::LaidOut);
        let recorded = spot.component().size.unwrap();
        assert_eq!(recorded.width, 80.0);
        assert!(recorded.height > 0.0);
    }

    assert_eq!(spots[0].family(), SpotFamily::Grid);
    assert_eq!(spots[1].family(), SpotFamily::List);
    assert_eq!(spots[2].family(), SpotFamily::Carousel);
}

#[test]
fn test_unknown_kind_degrades_to_list() {
    let (registry, tx, _rx) = spot_wiring();
    let json = r#"{"components": [{"kind": "wall-of-fame"}]}"#;

    let spots = spots::parse_spots(json, &registry, &tx);
    assert_eq!(spots[0].family(), SpotFamily::List);
    // The unknown kind survives on the component itself.
    assert_eq!(spots[0].component().kind, "wall-of-fame");
}

#[tokio::test]
async fn test_selection_settles_through_channel() {
    let (registry, tx, mut rx) = spot_wiring();
    let json = r#"{"components": [
        {"kind": "grid"},
        {"kind": "grid", "items": [{"title": "a"}, {"title": "b"}]}
    ]}"#;

    let mut spots = spots::parse_spots(json, &registry, &tx);
    for spot in &mut spots {
        spot.setup(SizeF::new(80.0, 24.0));
    }

    spots[1].did_select(1, 1);

    let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("timeout")
        .expect("channel closed");
    let SpotEvent::SelectionSettled { spot, index } = event;
    assert_eq!(spot, 1);

    let item = spots[spot].resolve_selection(index).expect("stale index");
    assert_eq!(item.title, "b");
}

#[tokio::test]
async fn test_detached_spot_drops_pending_selection() {
    let (registry, tx, mut rx) = spot_wiring();
    let json = r#"{"components": [{"kind": "list", "items": [{"title": "a"}]}]}"#;

    let mut spots = spots::parse_spots(json, &registry, &tx);
    spots[0].setup(SizeF::new(40.0, 10.0));
    spots[0].did_select(0, 1);
    spots[0].detach();

    assert_eq!(spots[0].state(), SpotState::Detached);
    assert!(!spots[0].surface().is_attached());
    let result = tokio::time::timeout(Duration::from_millis(250), rx.recv()).await;
    assert!(result.is_err() || result.unwrap().is_none());
}

#[test]
fn test_cache_round_trip_through_spots() {
    let root = temp_cache_root();
    let (registry, tx, _rx) = spot_wiring();

    let component = Component::new("grid")
        .with_title("Albums")
        .with_items(vec![Item::new("one"), Item::new("two")]);
    let spot = GridSpot::new(component, Arc::clone(&registry), tx.clone())
        .with_cache(StateCache::with_root("albums", &root));
    spot.save_state();

    // A fresh spot under the same key adopts the saved component.
    let restored = GridSpot::new(Component::new("grid"), registry, tx)
        .with_cache(StateCache::with_root("albums", &root));
    assert_eq!(restored.component().title, "Albums");
    assert_eq!(restored.component().len(), 2);
    assert_eq!(restored.component().items[1].index, 1);
}

#[test]
fn test_composite_spots_follow_host_items() {
    let (registry, tx, _rx) = spot_wiring();

    let mut host = GridSpot::new(
        Component::new("grid").with_items(vec![Item::new("hero"), Item::new("strip")]),
        Arc::clone(&registry),
        tx.clone(),
    );
    host.set_spot_index(0);

    let mut composites = CompositeSpots::new();
    composites.add(
        0,
        1,
        Box::new(CarouselSpot::new(
            Component::new("carousel"),
            registry,
            tx,
        )),
    );
    assert_eq!(composites.resolve(0, 1).len(), 1);

    // Purge before removing the hosting item, then remove it.
    let item = host.component().items[1].clone();
    composites.purge(0, &item);
    host.remove(1);

    assert!(composites.is_empty());
    assert_eq!(host.count(), 1);
}
