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

/// Return early with an error (or `None`) if the given condition does not hold.
///
/// Works in functions returning either [Option] or [Result]:
/// ```
/// # use utils::ensure;
/// #[derive(PartialEq, Eq, Debug)]
/// enum RateError {
///     ZeroSize,
/// }
///
/// fn rate(fee: u64, size: u64) -> Result<u64, RateError> {
///     ensure!(size != 0, RateError::ZeroSize);
///     Ok(fee / size)
/// }
///
/// assert_eq!(rate(6, 2), Ok(3));
/// assert_eq!(rate(6, 0), Err(RateError::ZeroSize));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $cond.then(|| ())?
    };
    ($cond:expr, $err:expr $(,)?) => {
        $cond.then(|| ()).ok_or_else(|| $err)?
    };
}
