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

use std::num::NonZeroUsize;

use common::primitives::amount::{Amount, UnsignedIntType};

use crate::fee::Fee;

/// A fee rate, expressed in amount atoms per 1000 size units.
///
/// Keeping the denominator at 1000 makes the common fractional per-unit rates
/// exactly representable: 2.1 atoms per unit is 2100 atoms per kilo-unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeeRate {
    amount_per_kb: UnsignedIntType,
}

impl FeeRate {
    pub const fn from_amount_per_kb(amount_per_kb: UnsignedIntType) -> Self {
        Self { amount_per_kb }
    }

    pub const fn amount_per_kb(&self) -> UnsignedIntType {
        self.amount_per_kb
    }

    /// Realized rate of `fee` paid over `size` units, rounded up to the next
    /// atom per kilo-unit. `None` on overflow.
    pub fn of_tx(fee: Fee, size: NonZeroUsize) -> Option<Self> {
        let fee_per_kb = fee.into_atoms().checked_mul(1000)?;
        let size = size.get() as UnsignedIntType;
        Some(Self {
            amount_per_kb: fee_per_kb.div_ceil(size),
        })
    }

    /// The smallest fee a payload of `size` units must carry to meet this
    /// rate. `fee >= rate.required_fee(size)` is exactly the rational
    /// comparison `fee / size >= rate`, and the two stay consistent with the
    /// shortfall `required_fee(size) - fee`. `None` on overflow.
    pub fn required_fee(&self, size: usize) -> Option<Fee> {
        let size = size as UnsignedIntType;
        let atoms = self.amount_per_kb.checked_mul(size)?.div_ceil(1000);
        Some(Fee::new(Amount::from_atoms(atoms)))
    }
}
