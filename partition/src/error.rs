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

use std::fmt;

use thiserror::Error;

/// Error raised while building a [crate::PackageGraph] from supplied entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError<I: fmt::Debug> {
    #[error("Transaction {0:?} is declared more than once")]
    DuplicateTransaction(I),

    #[error("Transaction {0:?} references parent {1:?} which is not in the package")]
    UndeclaredParent(I, I),

    #[error("Transaction {0:?} is not ordered after its parent {1:?}")]
    NotTopologicallySorted(I, I),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error<I: fmt::Debug> {
    #[error(transparent)]
    InvalidGraph(#[from] GraphError<I>),

    #[error("Overflow encountered while computing fee with ancestors")]
    AncestorFeeOverflow,
}
