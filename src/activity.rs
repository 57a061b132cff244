//! Node sizer: log-scaled public-post activity per participant.
//!
//! A participant's node radius in the visualization is driven by how much
//! they posted publicly, compressed with `log10(1 + n)` so prolific posters
//! do not dwarf everyone else. Only participants appearing in a retained
//! edge get a score; everyone else never becomes a node.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::aggregate::EdgeWeights;
use crate::source::{PostRecord, UserId};

/// Log-scale a raw count: `log10(1 + n)`. Zero maps to 0.0.
pub fn log_scale(count: u64) -> f64 {
    ((count + 1) as f64).log10()
}

/// Tally public posts per author in one pass over the post table.
pub fn post_counts(posts: &[PostRecord]) -> HashMap<UserId, u64> {
    let mut counts: HashMap<UserId, u64> = HashMap::new();
    for post in posts {
        if let Some(author) = post.author() {
            *counts.entry(author).or_insert(0) += 1;
        }
    }
    counts
}

/// The distinct participants of the retained edges, in ID order.
pub fn edge_participants(edges: &EdgeWeights) -> BTreeSet<UserId> {
    let mut participants = BTreeSet::new();
    for pair in edges.keys() {
        participants.insert(pair.lo());
        participants.insert(pair.hi());
    }
    participants
}

/// Activity score per retained participant: `log10(1 + public post count)`.
///
/// A participant with no public posts still gets a node, scored 0.0.
pub fn activity_scores(edges: &EdgeWeights, posts: &[PostRecord]) -> BTreeMap<UserId, f64> {
    let counts = post_counts(posts);
    edge_participants(edges)
        .into_iter()
        .map(|user| {
            let count = counts.get(&user).copied().unwrap_or(0);
            (user, log_scale(count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PairKey;

    fn uid(raw: u64) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn post(author: u64) -> PostRecord {
        PostRecord { author_id: author }
    }

    #[test]
    fn log_scale_anchors() {
        assert_eq!(log_scale(0), 0.0);
        assert!((log_scale(9) - 1.0).abs() < 1e-12);
        assert!((log_scale(99) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_post_participant_scores_zero() {
        let mut edges = EdgeWeights::new();
        edges.insert(PairKey::new(uid(10), uid(20)).unwrap(), 5);
        let posts = [post(10), post(10), post(10)];

        let scores = activity_scores(&edges, &posts);
        assert!((scores[&uid(10)] - 4.0_f64.log10()).abs() < 1e-12);
        assert_eq!(scores[&uid(20)], 0.0);
    }

    #[test]
    fn non_participants_get_no_score() {
        let mut edges = EdgeWeights::new();
        edges.insert(PairKey::new(uid(10), uid(20)).unwrap(), 5);
        // author 30 posts a lot but appears in no retained edge
        let posts = [post(30), post(30)];

        let scores = activity_scores(&edges, &posts);
        assert_eq!(scores.len(), 2);
        assert!(!scores.contains_key(&uid(30)));
    }

    #[test]
    fn sentinel_author_posts_are_ignored() {
        let counts = post_counts(&[post(0), post(10)]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&uid(10)], 1);
    }
}
