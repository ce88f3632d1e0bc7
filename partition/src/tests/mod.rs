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

use std::{collections::BTreeSet, num::NonZeroUsize};

use common::primitives::Amount;
use rstest::rstest;
use test_utils::random::{make_seedable_rng, Rng, Seed};

use super::*;

mod properties;

fn tx(
    id: &'static str,
    fee: u128,
    size: usize,
    parents: &[&'static str],
) -> TxEntry<&'static str> {
    TxEntry::new(
        id,
        Fee::new(Amount::from_atoms(fee)),
        NonZeroUsize::new(size).expect("test tx size"),
        parents.iter().copied().collect(),
    )
}

fn package(
    entries: impl IntoIterator<Item = TxEntry<&'static str>>,
) -> PackageGraph<&'static str> {
    PackageGraph::from_topo_order(entries).expect("test package")
}

fn rate(amount_per_kb: u128) -> FeeRate {
    FeeRate::from_amount_per_kb(amount_per_kb)
}

fn run(
    graph: &PackageGraph<&'static str>,
    amount_per_kb: u128,
) -> FeeRatePartition<&'static str> {
    partition_by_fee_rate(graph, rate(amount_per_kb)).expect("partition")
}

fn shortfall_atoms(partition: &FeeRatePartition<&'static str>, id: &'static str) -> u128 {
    partition.shortfall(&id).expect("shortfall present").into_atoms()
}
