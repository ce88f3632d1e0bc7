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
    collections::{BTreeMap, BTreeSet},
    fmt,
    num::NonZeroUsize,
};

use utils::ensure;

use crate::{error::GraphError, fee::Fee};

/// A transaction as seen by the partitioner: an id, an absolute fee, a size
/// and the ids of its in-package parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEntry<I> {
    id: I,
    fee: Fee,
    size: NonZeroUsize,
    parents: BTreeSet<I>,
}

impl<I: Ord> TxEntry<I> {
    pub fn new(id: I, fee: Fee, size: NonZeroUsize, parents: BTreeSet<I>) -> Self {
        Self {
            id,
            fee,
            size,
            parents,
        }
    }

    /// Transaction ID
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Absolute fee this transaction pays on its own
    pub fn fee(&self) -> Fee {
        self.fee
    }

    /// Size in virtual size units
    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Ids of the in-package parents
    pub fn parents(&self) -> &BTreeSet<I> {
        &self.parents
    }
}

/// An immutable package of transactions forming a DAG, held in the
/// topological order it was supplied in (every parent before its children).
///
/// The graph is fixed for the lifetime of a partitioning run; acceptance
/// state lives with the run, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGraph<I> {
    entries: Vec<TxEntry<I>>,
    parent_indices: Vec<Vec<usize>>,
    index_by_id: BTreeMap<I, usize>,
}

impl<I: Ord + Clone + fmt::Debug> PackageGraph<I> {
    /// Build a package graph from entries sorted parents-before-children.
    ///
    /// The ordering is a caller-side precondition (spendable parents are
    /// known before their children), and is verified here rather than
    /// repaired: a parent id missing from the package or appearing at or
    /// after its child fails construction. A cycle cannot be expressed in a
    /// parents-earlier ordering, so cyclic input always surfaces as
    /// [GraphError::NotTopologicallySorted].
    pub fn from_topo_order(
        entries: impl IntoIterator<Item = TxEntry<I>>,
    ) -> Result<Self, GraphError<I>> {
        let entries: Vec<_> = entries.into_iter().collect();

        let mut index_by_id = BTreeMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            let prev = index_by_id.insert(entry.id().clone(), pos);
            ensure!(
                prev.is_none(),
                GraphError::DuplicateTransaction(entry.id().clone()),
            );
        }

        let mut parent_indices = Vec::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            let mut indices = Vec::with_capacity(entry.parents().len());
            for parent in entry.parents() {
                let parent_pos = *index_by_id.get(parent).ok_or_else(|| {
                    GraphError::UndeclaredParent(entry.id().clone(), parent.clone())
                })?;
                ensure!(
                    parent_pos < pos,
                    GraphError::NotTopologicallySorted(entry.id().clone(), parent.clone()),
                );
                indices.push(parent_pos);
            }
            parent_indices.push(indices);
        }

        Ok(Self {
            entries,
            parent_indices,
            index_by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in topological order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &TxEntry<I>> + '_ {
        self.entries.iter()
    }

    /// Look up a single entry by id
    pub fn get(&self, id: &I) -> Option<&TxEntry<I>> {
        self.index_by_id.get(id).map(|idx| &self.entries[*idx])
    }

    pub(crate) fn entry(&self, index: usize) -> &TxEntry<I> {
        &self.entries[index]
    }

    pub(crate) fn parent_indices(&self, index: usize) -> &[usize] {
        &self.parent_indices[index]
    }
}
