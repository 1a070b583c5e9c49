//! Free-text search over the component catalog.
//!
//! The ranking algorithm is pluggable: the host depends only on the
//! [`Searcher`] contract, so strategies can be swapped without touching the
//! registry or the stores.

use crate::descriptor::{ComponentDescriptor, ComponentTypeId};

/// One-shot delivery of a ranked result set.
pub type SearchDelivery = Box<dyn FnOnce(Vec<ComponentTypeId>)>;

/// A pluggable ranking strategy over the descriptor catalog.
///
/// Contract: exactly one delivery per call, best match first. Delivery may
/// happen after `search` returns (a strategy backed by an external index is
/// free to defer), and overlapping calls are not ordered relative to each
/// other — callers that care must discard stale results themselves.
///
/// An empty query is not a search: it delivers the whole corpus in the
/// order given (the registry's canonical order), unranked.
pub trait Searcher {
    /// Rank `corpus` against `query` and hand the matching ids to `deliver`.
    fn search(&self, query: &str, corpus: &[ComponentDescriptor], deliver: SearchDelivery);
}

/// The host's default strategy.
pub fn default_searcher() -> Box<dyn Searcher> {
    Box::new(NameSearcher)
}

fn passthrough(corpus: &[ComponentDescriptor]) -> Vec<ComponentTypeId> {
    corpus.iter().map(|d| d.type_id().clone()).collect()
}

fn secondary_match(descriptor: &ComponentDescriptor, query: &str) -> bool {
    descriptor
        .description()
        .is_some_and(|text| text.to_lowercase().contains(query))
        || descriptor.author().to_lowercase().contains(query)
}

/// Case-insensitive substring matching.
///
/// Name matches rank first (by match position, then name length), then
/// descriptors whose description or author matched. Ties break on
/// `type_id`, so a fixed corpus and query always rank the same way.
#[derive(Debug, Default)]
pub struct NameSearcher;

impl Searcher for NameSearcher {
    fn search(&self, query: &str, corpus: &[ComponentDescriptor], deliver: SearchDelivery) {
        deliver(rank_substring(query, corpus));
    }
}

fn rank_substring(query: &str, corpus: &[ComponentDescriptor]) -> Vec<ComponentTypeId> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return passthrough(corpus);
    }

    // (band, match position, name length, id) — lower is better throughout
    let mut hits: Vec<(u8, usize, usize, &ComponentTypeId)> = Vec::new();

    for descriptor in corpus {
        let name = descriptor.name().to_lowercase();
        if let Some(position) = name.find(&query) {
            hits.push((0, position, name.len(), descriptor.type_id()));
        } else if secondary_match(descriptor, &query) {
            hits.push((1, 0, name.len(), descriptor.type_id()));
        }
    }

    hits.sort();
    hits.into_iter().map(|(_, _, _, id)| id.clone()).collect()
}

/// Edit-distance tolerant matching via Jaro-Winkler similarity.
///
/// Accepts a name whose similarity to the query clears the threshold, with
/// substring hits on secondary fields as a weaker band. Same determinism
/// rules as [`NameSearcher`].
#[derive(Debug)]
pub struct FuzzySearcher {
    threshold: f64,
}

impl FuzzySearcher {
    /// Strategy with a custom similarity threshold in `0.0..=1.0`.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for FuzzySearcher {
    fn default() -> Self {
        Self { threshold: 0.6 }
    }
}

impl Searcher for FuzzySearcher {
    fn search(&self, query: &str, corpus: &[ComponentDescriptor], deliver: SearchDelivery) {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            deliver(passthrough(corpus));
            return;
        }

        // (band, score, id); score only orders within the fuzzy band
        let mut hits: Vec<(u8, f64, &ComponentTypeId)> = Vec::new();

        for descriptor in corpus {
            let name = descriptor.name().to_lowercase();
            let score = strsim::jaro_winkler(&name, &query);
            if name.contains(&query) || score >= self.threshold {
                hits.push((0, score, descriptor.type_id()));
            } else if secondary_match(descriptor, &query) {
                hits.push((1, 0.0, descriptor.type_id()));
            }
        }

        hits.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(b.1.total_cmp(&a.1))
                .then(a.2.cmp(b.2))
        });
        deliver(hits.into_iter().map(|(_, _, id)| id.clone()).collect());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::ComponentConfig;

    fn descriptor(id: &str, name: &str) -> ComponentDescriptor {
        ComponentDescriptor::new(
            ComponentTypeId::new(id),
            ComponentConfig::new(name)
                .with_author("kit authors")
                .with_version("1.0.0"),
        )
    }

    fn corpus() -> Vec<ComponentDescriptor> {
        vec![
            descriptor("kit.alpha", "Alpha"),
            descriptor("kit.alphabet", "Alphabet"),
            descriptor("kit.beta", "Beta"),
        ]
    }

    fn run(searcher: &dyn Searcher, query: &str, corpus: &[ComponentDescriptor]) -> Vec<String> {
        let out = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&out);
        searcher.search(
            query,
            corpus,
            Box::new(move |ids| {
                *sink.borrow_mut() = ids.iter().map(|id| id.to_string()).collect();
            }),
        );
        Rc::try_unwrap(out).unwrap().into_inner()
    }

    #[test]
    fn substring_matches_names_case_insensitively() {
        let corpus = corpus();
        let results = run(&NameSearcher, "alph", &corpus);
        assert_eq!(results, ["kit.alpha", "kit.alphabet"]);
    }

    #[test]
    fn repeated_searches_rank_identically() {
        let corpus = corpus();
        let first = run(&NameSearcher, "alph", &corpus);
        let second = run(&NameSearcher, "alph", &corpus);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_passes_the_corpus_through() {
        let corpus = corpus();
        let results = run(&NameSearcher, "", &corpus);
        assert_eq!(results, ["kit.alpha", "kit.alphabet", "kit.beta"]);
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        let corpus = corpus();
        let results = run(&NameSearcher, "   ", &corpus);
        assert_eq!(results.len(), corpus.len());
    }

    #[test]
    fn earlier_match_positions_rank_higher() {
        let corpus = vec![
            descriptor("kit.packer", "Sprite Packer"),
            descriptor("kit.sprite", "Sprite Editor"),
        ];
        let results = run(&NameSearcher, "packer", &corpus);
        assert_eq!(results, ["kit.packer"]);

        let results = run(&NameSearcher, "sprite", &corpus);
        assert_eq!(results, ["kit.packer", "kit.sprite"]);
    }

    #[test]
    fn description_and_author_are_secondary_signal() {
        let mut corpus = corpus();
        corpus.push(ComponentDescriptor::new(
            ComponentTypeId::new("kit.cache"),
            ComponentConfig::new("Cache Server")
                .with_author("kit authors")
                .with_version("1.0.0")
                .with_description("checks alpha channel connectivity"),
        ));

        let results = run(&NameSearcher, "alpha", &corpus);
        assert_eq!(results, ["kit.alpha", "kit.alphabet", "kit.cache"]);
    }

    #[test]
    fn fuzzy_tolerates_near_misses() {
        let corpus = corpus();
        let results = run(&FuzzySearcher::default(), "alpah", &corpus);
        assert!(results.contains(&"kit.alpha".to_string()));
    }

    #[test]
    fn fuzzy_empty_query_passes_through() {
        let corpus = corpus();
        let results = run(&FuzzySearcher::default(), "", &corpus);
        assert_eq!(results, ["kit.alpha", "kit.alphabet", "kit.beta"]);
    }

    #[test]
    fn default_searcher_is_substring_based() {
        let corpus = corpus();
        let results = run(default_searcher().as_ref(), "beta", &corpus);
        assert_eq!(results, ["kit.beta"]);
    }
}
