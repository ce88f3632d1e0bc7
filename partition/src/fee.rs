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

use common::primitives::amount::{Amount, UnsignedIntType};

/// An absolute transaction fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[must_use]
pub struct Fee(Amount);

impl Fee {
    pub const ZERO: Self = Fee(Amount::ZERO);

    pub const fn new(amount: Amount) -> Self {
        Fee(amount)
    }

    pub const fn into_atoms(self) -> UnsignedIntType {
        self.0.into_atoms()
    }
}

impl From<Amount> for Fee {
    fn from(amount: Amount) -> Self {
        Fee(amount)
    }
}

impl From<Fee> for Amount {
    fn from(fee: Fee) -> Self {
        fee.0
    }
}

impl std::ops::Add for Fee {
    type Output = Option<Self>;

    fn add(self, other: Self) -> Option<Self> {
        (self.0 + other.0).map(Fee)
    }
}

impl std::ops::Sub for Fee {
    type Output = Option<Self>;

    fn sub(self, other: Self) -> Option<Self> {
        (self.0 - other.0).map(Fee)
    }
}
