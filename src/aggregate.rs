//! Edge aggregator: collapse two-party conversations into weighted pairs.
//!
//! Each thread contributes its `reply_count` to the edge for its two
//! participants. Participant identity comes from two partially-overlapping
//! sources (message authors and the thread's starter/recipient metadata)
//! because neither table is complete on its own: old thread rows are missing
//! the recipient, and some threads have no surviving message rows.
//!
//! Aggregation is a commutative keyed sum, so threads are processed as a
//! rayon partition-then-merge reduction: each worker folds a local map and
//! the maps merge by per-key addition. The result is identical to the
//! sequential loop for any processing order.

use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;

use crate::source::{MessageRecord, ThreadId, ThreadRecord, UserId};

/// Canonical unordered pair of distinct users.
///
/// The only constructor sorts, so `(A, B)` and `(B, A)` are the same key and
/// a conversation is never double-counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    /// Build the canonical key for two users. Returns `None` when they are
    /// the same user (a self-loop is not a conversation pair).
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller user ID.
    pub fn lo(&self) -> UserId {
        self.lo
    }

    /// The larger user ID.
    pub fn hi(&self) -> UserId {
        self.hi
    }
}

/// Aggregated edge list: canonical pair → summed reply count.
///
/// Ordered map so every downstream consumer iterates edges in the same
/// order without re-sorting; the snapshot and GEXF outputs depend on this
/// for byte reproducibility.
pub type EdgeWeights = BTreeMap<PairKey, u64>;

/// Distinct message authors per thread, prebuilt in one pass so the
/// per-thread lookup is O(1) instead of a rescan of the message table.
pub fn authors_by_thread(messages: &[MessageRecord]) -> HashMap<ThreadId, HashSet<UserId>> {
    let mut index: HashMap<ThreadId, HashSet<UserId>> = HashMap::new();
    for message in messages {
        if let Some(author) = message.author() {
            index.entry(message.thread_id).or_default().insert(author);
        }
    }
    index
}

/// Resolve the exactly-two participants of a thread, or `None`.
///
/// Unions the message-derived author set with the metadata-derived
/// starter/recipient (sentinel 0 already stripped by the `UserId` type) and
/// requires the union to have exactly two members. A union of one (user
/// messaging themselves, or only one identity recorded) or of three-plus (a
/// group conversation, or a message author that matches neither starter nor
/// recipient) disqualifies the thread entirely.
pub fn dyadic_participants(
    thread: &ThreadRecord,
    authors: Option<&HashSet<UserId>>,
) -> Option<PairKey> {
    let mut participants: HashSet<UserId> = authors.cloned().unwrap_or_default();
    participants.extend(thread.starter());
    participants.extend(thread.recipient());

    if participants.len() != 2 {
        return None;
    }
    let mut iter = participants.into_iter();
    let a = iter.next()?;
    let b = iter.next()?;
    PairKey::new(a, b)
}

/// Outcome counts for one aggregation run, for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Threads inspected.
    pub threads_seen: usize,
    /// Threads dropped because their participant set was not exactly two.
    pub dropped_not_dyadic: usize,
    /// Threads dropped by the reply-count threshold.
    pub dropped_below_threshold: usize,
    /// Threads that contributed weight to an edge.
    pub kept: usize,
}

/// Aggregate reply counts per canonical participant pair.
///
/// Threads that are not two-party conversations or fall below `min_replies`
/// contribute nothing. Multiple threads between the same pair collapse into
/// one entry with summed weight.
pub fn aggregate_edges(
    threads: &[ThreadRecord],
    messages: &[MessageRecord],
    min_replies: u64,
) -> (EdgeWeights, AggregateStats) {
    let authors = authors_by_thread(messages);

    let (weights, stats) = threads
        .par_iter()
        .fold(
            || (EdgeWeights::new(), AggregateStats::default()),
            |(mut weights, mut stats), thread| {
                stats.threads_seen += 1;
                match dyadic_participants(thread, authors.get(&thread.thread_id)) {
                    None => stats.dropped_not_dyadic += 1,
                    Some(_) if thread.reply_count < min_replies => {
                        stats.dropped_below_threshold += 1;
                    }
                    Some(pair) => {
                        *weights.entry(pair).or_insert(0) += thread.reply_count;
                        stats.kept += 1;
                    }
                }
                (weights, stats)
            },
        )
        .reduce(
            || (EdgeWeights::new(), AggregateStats::default()),
            |(mut acc_w, acc_s), (weights, stats)| {
                for (pair, weight) in weights {
                    *acc_w.entry(pair).or_insert(0) += weight;
                }
                (
                    acc_w,
                    AggregateStats {
                        threads_seen: acc_s.threads_seen + stats.threads_seen,
                        dropped_not_dyadic: acc_s.dropped_not_dyadic + stats.dropped_not_dyadic,
                        dropped_below_threshold: acc_s.dropped_below_threshold
                            + stats.dropped_below_threshold,
                        kept: acc_s.kept + stats.kept,
                    },
                )
            },
        );

    (weights, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(raw: u64) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn thread(id: u64, starter: u64, recipient: u64, replies: u64) -> ThreadRecord {
        ThreadRecord {
            thread_id: ThreadId(id),
            starter_id: starter,
            recipient_id: Some(recipient),
            reply_count: replies,
        }
    }

    fn message(thread: u64, author: u64) -> MessageRecord {
        MessageRecord {
            thread_id: ThreadId(thread),
            author_id: author,
        }
    }

    #[test]
    fn pair_key_is_order_independent() {
        let ab = PairKey::new(uid(10), uid(20)).unwrap();
        let ba = PairKey::new(uid(20), uid(10)).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.lo(), uid(10));
        assert_eq!(ab.hi(), uid(20));
    }

    #[test]
    fn pair_key_rejects_self_loop() {
        assert!(PairKey::new(uid(10), uid(10)).is_none());
    }

    #[test]
    fn swapped_starter_and_recipient_hit_the_same_edge() {
        let threads = [thread(1, 10, 20, 4), thread(2, 20, 10, 5)];
        let (weights, stats) = aggregate_edges(&threads, &[], 3);

        assert_eq!(weights.len(), 1);
        let key = PairKey::new(uid(10), uid(20)).unwrap();
        assert_eq!(weights[&key], 9);
        assert_eq!(stats.kept, 2);
    }

    #[test]
    fn reply_threshold_boundary() {
        // exactly 2 replies: dropped; exactly 3: kept
        let threads = [thread(1, 10, 20, 2), thread(2, 30, 40, 3)];
        let (weights, stats) = aggregate_edges(&threads, &[], 3);

        assert_eq!(weights.len(), 1);
        assert!(weights.contains_key(&PairKey::new(uid(30), uid(40)).unwrap()));
        assert_eq!(stats.dropped_below_threshold, 1);
    }

    #[test]
    fn metadata_fills_in_for_missing_message_rows() {
        // no message rows at all: starter + recipient alone resolve the pair
        let threads = [thread(1, 10, 20, 5)];
        let (weights, _) = aggregate_edges(&threads, &[], 3);
        assert_eq!(weights[&PairKey::new(uid(10), uid(20)).unwrap()], 5);
    }

    #[test]
    fn messages_fill_in_for_missing_recipient() {
        let mut t = thread(1, 10, 0, 5);
        t.recipient_id = None;
        let messages = [message(1, 10), message(1, 20)];
        let (weights, _) = aggregate_edges(&[t], &messages, 3);
        assert_eq!(weights[&PairKey::new(uid(10), uid(20)).unwrap()], 5);
    }

    #[test]
    fn single_participant_thread_is_dropped() {
        // recipient unrecorded and the starter is the only author
        let threads = [thread(1, 10, 0, 9)];
        let messages = [message(1, 10)];
        let (weights, stats) = aggregate_edges(&threads, &messages, 3);

        assert!(weights.is_empty());
        assert_eq!(stats.dropped_not_dyadic, 1);
    }

    #[test]
    fn third_author_disqualifies_the_thread() {
        // a message author outside {starter, recipient} inflates the union
        let threads = [thread(1, 10, 20, 9)];
        let messages = [message(1, 10), message(1, 20), message(1, 30)];
        let (weights, stats) = aggregate_edges(&threads, &messages, 3);

        assert!(weights.is_empty());
        assert_eq!(stats.dropped_not_dyadic, 1);
    }

    #[test]
    fn sentinel_zero_is_excluded_from_the_union() {
        // starter 10, recipient 0, authors {10, 20}: union is exactly {10, 20}
        let threads = [thread(1, 10, 0, 3)];
        let messages = [message(1, 10), message(1, 20), message(1, 0)];
        let (weights, _) = aggregate_edges(&threads, &messages, 3);
        assert_eq!(weights.len(), 1);
    }

    #[test]
    fn repeated_pairs_sum_their_reply_counts() {
        let threads = [thread(1, 10, 20, 4), thread(2, 10, 20, 5), thread(3, 10, 20, 2)];
        let (weights, stats) = aggregate_edges(&threads, &[], 3);

        let key = PairKey::new(uid(10), uid(20)).unwrap();
        assert_eq!(weights[&key], 9); // the 2-reply thread is filtered out
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.dropped_below_threshold, 1);
    }
}
