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

#![deny(clippy::clone_on_ref_ptr)]

pub mod error;

mod fee;
mod feerate;
mod graph;
mod partition;

pub use crate::{
    fee::Fee,
    feerate::FeeRate,
    graph::{PackageGraph, TxEntry},
    partition::{partition_by_fee_rate, FeeRatePartition},
};

#[cfg(test)]
mod tests;
