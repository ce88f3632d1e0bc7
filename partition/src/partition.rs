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

use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
    num::NonZeroUsize,
};

use common::primitives::Amount;
use logging::log;

use crate::{error::Error, fee::Fee, feerate::FeeRate, graph::PackageGraph};

/// Rolled-up fee and size of a transaction plus its not-yet-accepted
/// ancestors, valid for one sweep.
///
/// Ancestors reached along several converging parent paths are summed once
/// per path. The aggregate is exact whenever the unaccepted ancestry of each
/// transaction forms a tree; with shared ancestors (diamonds) it
/// over-counts. See `diamond_shared_ancestor_counted_per_path` in the tests
/// before changing this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AncestorAggregate {
    fee: Fee,
    size: usize,
}

impl AncestorAggregate {
    const EMPTY: Self = Self {
        fee: Fee::ZERO,
        size: 0,
    };

    fn combine(self, other: Self) -> Option<Self> {
        Some(Self {
            fee: (self.fee + other.fee)?,
            size: self.size.checked_add(other.size)?,
        })
    }
}

/// Outcome of [partition_by_fee_rate]: two views over one computation.
///
/// The acceptance view lists the transactions whose cumulative fee rate met
/// the threshold, in the package's topological order, along with the total
/// fee, size and realized rate of that set (diagnostics only). The shortfall
/// view gives, for every remaining transaction, the amount its effective
/// spendable value must be discounted by before it is offered to coin
/// selection, i.e. the fee still missing from its unconfirmed ancestry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeRatePartition<I> {
    accepted: Vec<I>,
    accepted_fee: Fee,
    accepted_size: usize,
    shortfalls: BTreeMap<I, Amount>,
    sweeps: usize,
}

impl<I: Ord> FeeRatePartition<I> {
    /// Accepted transaction ids, in topological order
    pub fn accepted(&self) -> &[I] {
        &self.accepted
    }

    pub fn is_accepted(&self, id: &I) -> bool {
        self.accepted.contains(id)
    }

    /// Total fee paid by the accepted set
    pub fn accepted_fee(&self) -> Fee {
        self.accepted_fee
    }

    /// Total size of the accepted set
    pub fn accepted_size(&self) -> usize {
        self.accepted_size
    }

    /// Realized fee rate of the accepted set, `None` if nothing was accepted
    pub fn accepted_fee_rate(&self) -> Option<FeeRate> {
        let size = NonZeroUsize::new(self.accepted_size)?;
        FeeRate::of_tx(self.accepted_fee, size)
    }

    /// Effective-value decrements for all transactions below the threshold
    pub fn shortfalls(&self) -> &BTreeMap<I, Amount> {
        &self.shortfalls
    }

    pub fn shortfall(&self, id: &I) -> Option<Amount> {
        self.shortfalls.get(id).copied()
    }

    /// Number of sweeps it took to reach the fixed point, including the
    /// final sweep that made no progress. Depends on the traversal order,
    /// unlike the partition itself.
    pub fn sweep_count(&self) -> usize {
        self.sweeps
    }
}

/// Partition the package into the set of transactions acceptable at
/// `min_fee_rate` and the rest.
///
/// A transaction is acceptable when the combined fee of itself plus its
/// not-yet-accepted ancestors meets the rate over their combined size; an
/// acceptable transaction drags exactly that ancestry in with it, and never
/// any of its descendants. Sweeps over the package repeat until none
/// accepts anything new: a transaction's burden shrinks as its ancestors
/// get accepted on account of some other descendant, so a single pass over
/// one particular linearization is not enough to find every acceptable
/// transaction. The final accepted set is independent of the supplied
/// topological order.
pub fn partition_by_fee_rate<I: Ord + Clone + fmt::Debug>(
    graph: &PackageGraph<I>,
    min_fee_rate: FeeRate,
) -> Result<FeeRatePartition<I>, Error<I>> {
    let len = graph.len();
    let mut accepted = vec![false; len];
    let mut aggregates = vec![AncestorAggregate::EMPTY; len];
    let mut sweeps = 0;

    loop {
        sweeps += 1;
        let mut progress = false;

        for index in 0..len {
            if accepted[index] {
                continue;
            }
            let entry = graph.entry(index);

            // In topological order every parent is already memoized for this
            // sweep; accepted parents no longer burden their descendants.
            let mut aggregate = AncestorAggregate {
                fee: entry.fee(),
                size: entry.size().get(),
            };
            for &parent in graph.parent_indices(index) {
                if accepted[parent] {
                    continue;
                }
                aggregate = aggregate
                    .combine(aggregates[parent])
                    .ok_or(Error::AncestorFeeOverflow)?;
            }
            aggregates[index] = aggregate;

            let required = min_fee_rate
                .required_fee(aggregate.size)
                .ok_or(Error::AncestorFeeOverflow)?;
            if aggregate.fee < required {
                continue;
            }

            log::trace!(
                "tx {:?} qualifies with ancestor fee {:?} over size {}",
                entry.id(),
                aggregate.fee,
                aggregate.size,
            );

            // Pull the qualifying tx and its still-unaccepted ancestors in,
            // worklist-style to keep the stack flat on long chains.
            let mut todo = VecDeque::from([index]);
            while let Some(current) = todo.pop_front() {
                if std::mem::replace(&mut accepted[current], true) {
                    continue;
                }
                progress = true;
                todo.extend(graph.parent_indices(current));
            }
        }

        log::debug!("fee rate partition sweep {sweeps}, progress: {progress}");
        if !progress {
            break;
        }
    }

    // The last sweep accepted nothing, so the memo table it left behind is
    // consistent with the final accepted set; rejected transactions take
    // their shortfall from it.
    let mut accepted_ids = Vec::new();
    let mut accepted_fee = Fee::ZERO;
    let mut accepted_size = 0usize;
    let mut shortfalls = BTreeMap::new();

    for (index, entry) in graph.entries().enumerate() {
        if accepted[index] {
            accepted_fee = (accepted_fee + entry.fee()).ok_or(Error::AncestorFeeOverflow)?;
            accepted_size = accepted_size
                .checked_add(entry.size().get())
                .ok_or(Error::AncestorFeeOverflow)?;
            accepted_ids.push(entry.id().clone());
        } else {
            let aggregate = aggregates[index];
            let required = min_fee_rate
                .required_fee(aggregate.size)
                .ok_or(Error::AncestorFeeOverflow)?;
            let shortfall =
                (required - aggregate.fee).expect("rejected tx is below the required fee");
            shortfalls.insert(entry.id().clone(), shortfall.into());
        }
    }

    Ok(FeeRatePartition {
        accepted: accepted_ids,
        accepted_fee,
        accepted_size,
        shortfalls,
        sweeps,
    })
}
