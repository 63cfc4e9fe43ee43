//! Document parsing and spot resolution
//!
//! The parser turns a JSON document into components; the factory resolves
//! each component's kind to the matching spot family. Both are tolerant:
//! unknown document keys are ignored, a missing `components` key yields an
//! empty result, and unknown kinds resolve to the list family rather than
//! failing.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::carousel::CarouselSpot;
use crate::component::Component;
use crate::grid::GridSpot;
use crate::list::ListSpot;
use crate::registry::{RegistryService, SpotFamily};
use crate::spot::{Spot, SpotSender};

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    components: Vec<Component>,
}

/// Parse a JSON document into its component list.
///
/// Total: malformed JSON or a missing `components` key yields an empty
/// list. Item indices are renumbered after decoding.
pub fn parse_document(json: &str) -> Vec<Component> {
    let document = match serde_json::from_str::<Document>(json) {
        Ok(document) => document,
        Err(err) => {
            debug!(%err, "unparseable document, yielding no components");
            Document::default()
        }
    };
    let mut components = document.components;
    for component in &mut components {
        component.renumber(0);
    }
    components
}

/// Spot family for a component kind. Unrecognized kinds degrade to list.
pub fn family_for_kind(kind: &str) -> SpotFamily {
    match kind {
        "grid" => SpotFamily::Grid,
        "carousel" => SpotFamily::Carousel,
        _ => SpotFamily::List,
    }
}

/// Resolve one component into the matching spot implementation.
pub fn make_spot(
    component: Component,
    registry: &Arc<RegistryService>,
    events: &SpotSender,
) -> Box<dyn Spot> {
    match family_for_kind(&component.kind) {
        SpotFamily::Grid => Box::new(GridSpot::new(
            component,
            Arc::clone(registry),
            events.clone(),
        )),
        SpotFamily::Carousel => Box::new(CarouselSpot::new(
            component,
            Arc::clone(registry),
            events.clone(),
        )),
        SpotFamily::List => Box::new(ListSpot::new(
            component,
            Arc::clone(registry),
            events.clone(),
        )),
    }
}

/// Assemble the full top-level spot list from a JSON document, assigning
/// each spot its index within the host's list.
pub fn parse_spots(
    json: &str,
    registry: &Arc<RegistryService>,
    events: &SpotSender,
) -> Vec<Box<dyn Spot>> {
    parse_document(json)
        .into_iter()
        .enumerate()
        .map(|(index, component)| {
            let mut spot = make_spot(component, registry, events);
            spot.set_spot_index(index);
            spot
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn wiring() -> (Arc<RegistryService>, SpotSender) {
        let (tx, _rx) = mpsc::unbounded_channel();
        (Arc::new(RegistryService::new()), tx)
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "components": [
                {"kind": "grid", "title": "Albums", "items": [{"title": "a"}, {"title": "b"}]},
                {"kind": "list", "items": []}
            ]
        }"#;
        let components = parse_document(json);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].kind, "grid");
        assert_eq!(components[0].items[1].index, 1);
    }

    #[test]
    fn test_missing_components_key_yields_empty() {
        assert!(parse_document("{}").is_empty());
        assert!(parse_document(r#"{"meta": {"x": 1}}"#).is_empty());
    }

    #[test]
    fn test_malformed_document_yields_empty() {
        assert!(parse_document("{ not json").is_empty());
    }

    #[test]
    fn test_unknown_document_keys_ignored() {
        let json = r#"{"components": [{"kind": "list"}], "version": 3}"#;
        assert_eq!(parse_document(json).len(), 1);
    }

    #[test]
    fn test_family_resolution() {
        assert_eq!(family_for_kind("grid"), SpotFamily::Grid);
        assert_eq!(family_for_kind("carousel"), SpotFamily::Carousel);
        assert_eq!(family_for_kind("list"), SpotFamily::List);
        // Unknown kinds fall back to list.
        assert_eq!(family_for_kind("mystery"), SpotFamily::List);
    }

    #[test]
    fn test_parse_spots_assigns_indices() {
        let (registry, tx) = wiring();
        let json = r#"{
            "components": [
                {"kind": "grid"},
                {"kind": "carousel"},
                {"kind": "feed"}
            ]
        }"#;
        let spots = parse_spots(json, &registry, &tx);
        assert_eq!(spots.len(), 3);
        assert_eq!(spots[0].family(), SpotFamily::Grid);
        assert_eq!(spots[1].family(), SpotFamily::Carousel);
        assert_eq!(spots[2].family(), SpotFamily::List);
        for (index, spot) in spots.iter().enumerate() {
            assert_eq!(spot.spot_index(), index);
        }
    }
}
