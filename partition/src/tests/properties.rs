// Copyright (c) 2024 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://spdx.org/licenses/MIT
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use super::*;

fn random_entries(rng: &mut impl Rng) -> Vec<TxEntry<u32>> {
    let len = rng.gen_range(1..=12u32);
    (0..len)
        .map(|i| {
            let parents: BTreeSet<u32> = (0..i).filter(|_| rng.gen_bool(0.4)).collect();
            TxEntry::new(
                i,
                Fee::new(Amount::from_atoms(rng.gen_range(0..=5_000))),
                NonZeroUsize::new(rng.gen_range(1..=1_000)).expect("nonzero size"),
                parents,
            )
        })
        .collect()
}

fn random_rate(rng: &mut impl Rng) -> FeeRate {
    FeeRate::from_amount_per_kb(rng.gen_range(0..=10_000))
}

/// Reorder entries into another valid topological order by repeatedly
/// picking a random entry whose parents are already placed.
fn random_linearization(entries: &[TxEntry<u32>], rng: &mut impl Rng) -> Vec<TxEntry<u32>> {
    let mut remaining = entries.to_vec();
    let mut placed = BTreeSet::new();
    let mut result = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let ready: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parents().iter().all(|p| placed.contains(p)))
            .map(|(pos, _)| pos)
            .collect();
        let entry = remaining.swap_remove(ready[rng.gen_range(0..ready.len())]);
        placed.insert(*entry.id());
        result.push(entry);
    }
    result
}

fn accepted_set(partition: &FeeRatePartition<u32>) -> BTreeSet<u32> {
    partition.accepted().iter().copied().collect()
}

/// Per-path ancestor aggregates consistent with the given accepted set, in
/// the entries' own topological order.
fn final_aggregates(
    entries: &[TxEntry<u32>],
    accepted: &BTreeSet<u32>,
) -> BTreeMap<u32, (u128, usize)> {
    let mut aggregates = BTreeMap::new();
    for entry in entries {
        let mut fee = entry.fee().into_atoms();
        let mut size = entry.size().get();
        for parent in entry.parents() {
            if accepted.contains(parent) {
                continue;
            }
            let (parent_fee, parent_size) = aggregates[parent];
            fee += parent_fee;
            size += parent_size;
        }
        aggregates.insert(*entry.id(), (fee, size));
    }
    aggregates
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn order_independence(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    for _ in 0..20 {
        let entries = random_entries(&mut rng);
        let min_fee_rate = random_rate(&mut rng);

        let graph = PackageGraph::from_topo_order(entries.clone()).expect("valid package");
        let baseline = partition_by_fee_rate(&graph, min_fee_rate).expect("partition");

        for _ in 0..3 {
            let reordered = random_linearization(&entries, &mut rng);
            let graph = PackageGraph::from_topo_order(reordered).expect("valid package");
            let partition = partition_by_fee_rate(&graph, min_fee_rate).expect("partition");

            // the partition must not depend on the linearization; only the
            // sweep count may differ
            assert_eq!(accepted_set(&partition), accepted_set(&baseline));
            assert_eq!(partition.shortfalls(), baseline.shortfalls());
        }
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn accepted_ancestry_is_closed(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    for _ in 0..50 {
        let entries = random_entries(&mut rng);
        let graph = PackageGraph::from_topo_order(entries).expect("valid package");
        let partition =
            partition_by_fee_rate(&graph, random_rate(&mut rng)).expect("partition");

        let accepted = accepted_set(&partition);
        for id in &accepted {
            let entry = graph.get(id).expect("accepted id is in the package");
            for parent in entry.parents() {
                assert!(
                    accepted.contains(parent),
                    "{id:?} accepted without its parent {parent:?}"
                );
            }
        }

        // the acceptance totals are the plain sums over the accepted entries
        let fee: u128 =
            accepted.iter().map(|id| graph.get(id).unwrap().fee().into_atoms()).sum();
        let size: usize = accepted.iter().map(|id| graph.get(id).unwrap().size().get()).sum();
        assert_eq!(partition.accepted_fee().into_atoms(), fee);
        assert_eq!(partition.accepted_size(), size);
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn no_self_sufficient_tx_left_behind(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    for _ in 0..50 {
        let entries = random_entries(&mut rng);
        let min_fee_rate = random_rate(&mut rng);
        let graph = PackageGraph::from_topo_order(entries).expect("valid package");
        let partition = partition_by_fee_rate(&graph, min_fee_rate).expect("partition");

        // A tx that pays its own way and whose ancestry has been paid off
        // cannot be rejected at a fixed point, no matter in which order its
        // siblings were evaluated. (A self-sufficient tx with an unpaid
        // ancestor still carries that ancestor's burden, so no claim is
        // made for it.)
        let accepted = accepted_set(&partition);
        for entry in graph.entries() {
            let own_required =
                min_fee_rate.required_fee(entry.size().get()).expect("no overflow");
            let pays_own_way = entry.fee() >= own_required;
            let ancestry_paid = entry.parents().iter().all(|p| accepted.contains(p));
            if pays_own_way && ancestry_paid {
                assert!(
                    partition.is_accepted(entry.id()),
                    "tx {:?} pays its own way but was not accepted",
                    entry.id()
                );
            }
        }
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn lowering_the_threshold_only_grows_the_accepted_set(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    for _ in 0..50 {
        let entries = random_entries(&mut rng);
        let low = rng.gen_range(0..=10_000);
        let high = low + rng.gen_range(1..=5_000);

        let graph = PackageGraph::from_topo_order(entries).expect("valid package");
        let at_low = partition_by_fee_rate(&graph, FeeRate::from_amount_per_kb(low))
            .expect("partition");
        let at_high = partition_by_fee_rate(&graph, FeeRate::from_amount_per_kb(high))
            .expect("partition");

        let at_low = accepted_set(&at_low);
        for id in accepted_set(&at_high) {
            assert!(at_low.contains(&id), "{id:?} lost by lowering the threshold");
        }
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn shortfall_tops_the_aggregate_up_to_the_required_fee(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    for _ in 0..50 {
        let entries = random_entries(&mut rng);
        let min_fee_rate = random_rate(&mut rng);
        let graph = PackageGraph::from_topo_order(entries.clone()).expect("valid package");
        let partition = partition_by_fee_rate(&graph, min_fee_rate).expect("partition");

        let accepted = accepted_set(&partition);
        let aggregates = final_aggregates(&entries, &accepted);

        assert_eq!(
            partition.shortfalls().len(),
            entries.len() - accepted.len(),
            "every non-accepted tx carries a shortfall"
        );
        for (id, shortfall) in partition.shortfalls() {
            let (fee, size) = aggregates[id];
            let required =
                min_fee_rate.required_fee(size).expect("no overflow").into_atoms();
            assert!(fee < required, "a qualifying tx was left unaccepted");
            assert_eq!(fee + shortfall.into_atoms(), required);
        }
    }
}
